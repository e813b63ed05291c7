use axum::{
    Json, Router,
    extract::{Path, State},
    http::StatusCode,
    routing::{get, patch, post, put},
};
use uuid::Uuid;

use crate::{
    dto::{
        products::{CreateProductRequest, ProductList, ReorderProductsRequest, UpdateProductRequest},
        settings::{StoreStatusRequest, UpdateSettingsRequest},
    },
    error::AppResult,
    middleware::auth::AdminUser,
    models::{Product, StoreSettings},
    response::ApiResponse,
    services::{product_service, settings_service, storefront_service},
    state::AppState,
};

pub fn router() -> Router<AppState> {
    Router::new()
        .route("/settings", get(get_settings).put(update_settings))
        .route("/settings/status", patch(set_store_status))
        .route("/products", get(list_products).post(create_product))
        .route("/products/reorder", post(reorder_products))
        .route("/products/{id}", put(update_product).delete(delete_product))
}

#[utoipa::path(
    get,
    path = "/api/admin/settings",
    responses(
        (status = 200, description = "Current store settings", body = ApiResponse<StoreSettings>),
        (status = 401, description = "Unauthorized"),
    ),
    security(("bearer_auth" = [])),
    tag = "Admin"
)]
pub async fn get_settings(
    State(state): State<AppState>,
    _admin: AdminUser,
) -> AppResult<Json<ApiResponse<StoreSettings>>> {
    let resp = settings_service::get_settings(&state).await?;
    Ok(Json(resp))
}

#[utoipa::path(
    put,
    path = "/api/admin/settings",
    request_body = UpdateSettingsRequest,
    responses(
        (status = 200, description = "Settings saved", body = ApiResponse<StoreSettings>),
        (status = 400, description = "Invalid settings"),
        (status = 401, description = "Unauthorized"),
    ),
    security(("bearer_auth" = [])),
    tag = "Admin"
)]
pub async fn update_settings(
    State(state): State<AppState>,
    admin: AdminUser,
    Json(payload): Json<UpdateSettingsRequest>,
) -> AppResult<Json<ApiResponse<StoreSettings>>> {
    let resp = settings_service::update_settings(&state, &admin, payload).await?;
    Ok(Json(resp))
}

#[utoipa::path(
    patch,
    path = "/api/admin/settings/status",
    request_body = StoreStatusRequest,
    responses(
        (status = 200, description = "Store opened or closed", body = ApiResponse<StoreSettings>),
        (status = 401, description = "Unauthorized"),
    ),
    security(("bearer_auth" = [])),
    tag = "Admin"
)]
pub async fn set_store_status(
    State(state): State<AppState>,
    admin: AdminUser,
    Json(payload): Json<StoreStatusRequest>,
) -> AppResult<Json<ApiResponse<StoreSettings>>> {
    let resp = settings_service::set_store_status(&state, &admin, payload).await?;
    Ok(Json(resp))
}

#[utoipa::path(
    get,
    path = "/api/admin/products",
    responses(
        (status = 200, description = "Menu items in display order", body = ApiResponse<ProductList>),
        (status = 401, description = "Unauthorized"),
    ),
    security(("bearer_auth" = [])),
    tag = "Admin"
)]
pub async fn list_products(
    State(state): State<AppState>,
    _admin: AdminUser,
) -> AppResult<Json<ApiResponse<ProductList>>> {
    let resp = storefront_service::list_catalog(&state).await?;
    Ok(Json(resp))
}

#[utoipa::path(
    post,
    path = "/api/admin/products",
    request_body = CreateProductRequest,
    responses(
        (status = 201, description = "Create menu item", body = ApiResponse<Product>),
        (status = 400, description = "Invalid product"),
        (status = 401, description = "Unauthorized"),
    ),
    security(("bearer_auth" = [])),
    tag = "Admin"
)]
pub async fn create_product(
    State(state): State<AppState>,
    admin: AdminUser,
    Json(payload): Json<CreateProductRequest>,
) -> AppResult<(StatusCode, Json<ApiResponse<Product>>)> {
    let resp = product_service::create_product(&state, &admin, payload).await?;
    Ok((StatusCode::CREATED, Json(resp)))
}

#[utoipa::path(
    put,
    path = "/api/admin/products/{id}",
    params(
        ("id" = Uuid, Path, description = "Product ID")
    ),
    request_body = UpdateProductRequest,
    responses(
        (status = 200, description = "Updated menu item", body = ApiResponse<Product>),
        (status = 400, description = "Invalid product"),
        (status = 401, description = "Unauthorized"),
        (status = 404, description = "Product not found"),
    ),
    security(("bearer_auth" = [])),
    tag = "Admin"
)]
pub async fn update_product(
    State(state): State<AppState>,
    admin: AdminUser,
    Path(id): Path<Uuid>,
    Json(payload): Json<UpdateProductRequest>,
) -> AppResult<Json<ApiResponse<Product>>> {
    let resp = product_service::update_product(&state, &admin, id, payload).await?;
    Ok(Json(resp))
}

#[utoipa::path(
    delete,
    path = "/api/admin/products/{id}",
    params(
        ("id" = Uuid, Path, description = "Product ID")
    ),
    responses(
        (status = 200, description = "Deleted menu item"),
        (status = 401, description = "Unauthorized"),
        (status = 404, description = "Product not found"),
    ),
    security(("bearer_auth" = [])),
    tag = "Admin"
)]
pub async fn delete_product(
    State(state): State<AppState>,
    admin: AdminUser,
    Path(id): Path<Uuid>,
) -> AppResult<Json<ApiResponse<serde_json::Value>>> {
    let resp = product_service::delete_product(&state, &admin, id).await?;
    Ok(Json(resp))
}

#[utoipa::path(
    post,
    path = "/api/admin/products/reorder",
    request_body = ReorderProductsRequest,
    responses(
        (status = 200, description = "Menu renumbered", body = ApiResponse<ProductList>),
        (status = 400, description = "No ids given"),
        (status = 401, description = "Unauthorized"),
    ),
    security(("bearer_auth" = [])),
    tag = "Admin"
)]
pub async fn reorder_products(
    State(state): State<AppState>,
    admin: AdminUser,
    Json(payload): Json<ReorderProductsRequest>,
) -> AppResult<Json<ApiResponse<ProductList>>> {
    let resp = product_service::reorder_products(&state, &admin, payload).await?;
    Ok(Json(resp))
}
