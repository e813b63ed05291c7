use axum::extract::State;
use storefront_api::{
    config::AppConfig, routes::health::health_check, state::AppState, storage::Storage,
};

#[tokio::test]
async fn health_check_returns_ok() {
    let state = AppState::with_storage(AppConfig::for_demo("test-secret"), Storage::memory(true));
    let response = health_check(State(state)).await;
    assert_eq!(response.0.message, "Health check");

    let data = response.0.data.expect("health data");
    assert_eq!(data.status, "ok");
    assert_eq!(data.storage, "memory");
}
