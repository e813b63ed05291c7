use axum::Router;

use crate::state::AppState;

pub mod admin;
pub mod auth;
pub mod doc;
pub mod health;
pub mod sessions;
pub mod storefront;

// Build the API router without binding state; it will be provided at the top level.
pub fn create_api_router() -> Router<AppState> {
    Router::new()
        .merge(storefront::router())
        .nest("/sessions", sessions::router())
        .nest("/auth", auth::router())
        .nest("/admin", admin::router())
}
