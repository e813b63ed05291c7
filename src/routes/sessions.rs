use axum::{
    Json, Router,
    extract::{Path, State},
    http::StatusCode,
    routing::{get, patch, post},
};
use uuid::Uuid;

use crate::{
    dto::session::{
        AdjustCartRequest, CartView, SelectionChanged, SelectionRequest, SessionCreated,
        SessionView,
    },
    error::AppResult,
    ordering::{CustomerDetails, SubmittedOrder},
    response::ApiResponse,
    services::session_service,
    state::AppState,
};

pub fn router() -> Router<AppState> {
    Router::new()
        .route("/", post(create_session))
        .route("/{id}", get(get_session))
        .route("/{id}/selection", post(change_selection))
        .route("/{id}/cart/open", post(open_cart))
        .route("/{id}/cart/close", post(close_cart))
        .route(
            "/{id}/cart/{product_id}",
            patch(adjust_cart_item).delete(remove_cart_item),
        )
        .route("/{id}/checkout", post(checkout))
}

#[utoipa::path(
    post,
    path = "/api/sessions",
    responses(
        (status = 201, description = "Start a customer session", body = ApiResponse<SessionCreated>)
    ),
    tag = "Sessions"
)]
pub async fn create_session(
    State(state): State<AppState>,
) -> (StatusCode, Json<ApiResponse<SessionCreated>>) {
    let resp = session_service::create_session(&state).await;
    (StatusCode::CREATED, Json(resp))
}

#[utoipa::path(
    get,
    path = "/api/sessions/{id}",
    params(
        ("id" = Uuid, Path, description = "Session ID")
    ),
    responses(
        (status = 200, description = "Menu with pending selections, cart and totals", body = ApiResponse<SessionView>),
        (status = 404, description = "Session not found or expired"),
    ),
    tag = "Sessions"
)]
pub async fn get_session(
    State(state): State<AppState>,
    Path(id): Path<Uuid>,
) -> AppResult<Json<ApiResponse<SessionView>>> {
    let resp = session_service::session_view(&state, id).await?;
    Ok(Json(resp))
}

#[utoipa::path(
    post,
    path = "/api/sessions/{id}/selection",
    params(
        ("id" = Uuid, Path, description = "Session ID")
    ),
    request_body = SelectionRequest,
    responses(
        (status = 200, description = "Pending quantity changed", body = ApiResponse<SelectionChanged>),
        (status = 400, description = "Unknown product"),
        (status = 404, description = "Session not found"),
        (status = 409, description = "Store is closed"),
    ),
    tag = "Sessions"
)]
pub async fn change_selection(
    State(state): State<AppState>,
    Path(id): Path<Uuid>,
    Json(payload): Json<SelectionRequest>,
) -> AppResult<Json<ApiResponse<SelectionChanged>>> {
    let resp = session_service::change_selection(&state, id, payload).await?;
    Ok(Json(resp))
}

#[utoipa::path(
    post,
    path = "/api/sessions/{id}/cart/open",
    params(
        ("id" = Uuid, Path, description = "Session ID")
    ),
    responses(
        (status = 200, description = "Pending selections merged into the cart", body = ApiResponse<CartView>),
        (status = 404, description = "Session not found"),
    ),
    tag = "Sessions"
)]
pub async fn open_cart(
    State(state): State<AppState>,
    Path(id): Path<Uuid>,
) -> AppResult<Json<ApiResponse<CartView>>> {
    let resp = session_service::open_cart(&state, id).await?;
    Ok(Json(resp))
}

#[utoipa::path(
    post,
    path = "/api/sessions/{id}/cart/close",
    params(
        ("id" = Uuid, Path, description = "Session ID")
    ),
    responses(
        (status = 200, description = "Selections cleared, cart kept", body = ApiResponse<CartView>),
        (status = 404, description = "Session not found"),
    ),
    tag = "Sessions"
)]
pub async fn close_cart(
    State(state): State<AppState>,
    Path(id): Path<Uuid>,
) -> AppResult<Json<ApiResponse<CartView>>> {
    let resp = session_service::close_cart(&state, id).await?;
    Ok(Json(resp))
}

#[utoipa::path(
    patch,
    path = "/api/sessions/{id}/cart/{product_id}",
    params(
        ("id" = Uuid, Path, description = "Session ID"),
        ("product_id" = Uuid, Path, description = "Product ID")
    ),
    request_body = AdjustCartRequest,
    responses(
        (status = 200, description = "Cart line adjusted", body = ApiResponse<CartView>),
        (status = 404, description = "Session not found"),
        (status = 409, description = "Store is closed"),
    ),
    tag = "Sessions"
)]
pub async fn adjust_cart_item(
    State(state): State<AppState>,
    Path((id, product_id)): Path<(Uuid, Uuid)>,
    Json(payload): Json<AdjustCartRequest>,
) -> AppResult<Json<ApiResponse<CartView>>> {
    let resp = session_service::adjust_cart_item(&state, id, product_id, payload).await?;
    Ok(Json(resp))
}

#[utoipa::path(
    delete,
    path = "/api/sessions/{id}/cart/{product_id}",
    params(
        ("id" = Uuid, Path, description = "Session ID"),
        ("product_id" = Uuid, Path, description = "Product ID")
    ),
    responses(
        (status = 200, description = "Cart line removed", body = ApiResponse<CartView>),
        (status = 404, description = "Session not found"),
    ),
    tag = "Sessions"
)]
pub async fn remove_cart_item(
    State(state): State<AppState>,
    Path((id, product_id)): Path<(Uuid, Uuid)>,
) -> AppResult<Json<ApiResponse<CartView>>> {
    let resp = session_service::remove_cart_item(&state, id, product_id).await?;
    Ok(Json(resp))
}

#[utoipa::path(
    post,
    path = "/api/sessions/{id}/checkout",
    params(
        ("id" = Uuid, Path, description = "Session ID")
    ),
    request_body = CustomerDetails,
    responses(
        (status = 200, description = "Order message and WhatsApp hand-off link", body = ApiResponse<SubmittedOrder>),
        (status = 404, description = "Session not found"),
        (status = 409, description = "Store is closed"),
        (status = 422, description = "Missing customer fields or empty cart"),
    ),
    tag = "Sessions"
)]
pub async fn checkout(
    State(state): State<AppState>,
    Path(id): Path<Uuid>,
    Json(payload): Json<CustomerDetails>,
) -> AppResult<Json<ApiResponse<SubmittedOrder>>> {
    let resp = session_service::checkout(&state, id, payload).await?;
    Ok(Json(resp))
}
