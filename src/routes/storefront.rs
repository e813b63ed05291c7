use axum::{
    Json, Router,
    extract::{Path, State},
    routing::get,
};
use uuid::Uuid;

use crate::{
    dto::{products::ProductList, settings::Storefront},
    error::AppResult,
    models::Product,
    response::ApiResponse,
    services::{product_service, storefront_service},
    state::AppState,
};

pub fn router() -> Router<AppState> {
    Router::new()
        .route("/storefront", get(storefront))
        .route("/catalog", get(list_catalog))
        .route("/catalog/{id}", get(get_product))
}

#[utoipa::path(
    get,
    path = "/api/storefront",
    responses(
        (status = 200, description = "Store settings and the sorted menu", body = ApiResponse<Storefront>)
    ),
    tag = "Storefront"
)]
pub async fn storefront(State(state): State<AppState>) -> AppResult<Json<ApiResponse<Storefront>>> {
    let resp = storefront_service::storefront(&state).await?;
    Ok(Json(resp))
}

#[utoipa::path(
    get,
    path = "/api/catalog",
    responses(
        (status = 200, description = "Menu items in display order", body = ApiResponse<ProductList>)
    ),
    tag = "Storefront"
)]
pub async fn list_catalog(
    State(state): State<AppState>,
) -> AppResult<Json<ApiResponse<ProductList>>> {
    let resp = storefront_service::list_catalog(&state).await?;
    Ok(Json(resp))
}

#[utoipa::path(
    get,
    path = "/api/catalog/{id}",
    params(
        ("id" = Uuid, Path, description = "Product ID")
    ),
    responses(
        (status = 200, description = "Get menu item", body = ApiResponse<Product>),
        (status = 404, description = "Product not found"),
    ),
    tag = "Storefront"
)]
pub async fn get_product(
    State(state): State<AppState>,
    Path(id): Path<Uuid>,
) -> AppResult<Json<ApiResponse<Product>>> {
    let resp = product_service::get_product(&state, id).await?;
    Ok(Json(resp))
}
