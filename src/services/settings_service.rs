use crate::{
    audit::try_log_audit,
    dto::settings::{StoreStatusRequest, UpdateSettingsRequest},
    error::{AppError, AppResult},
    middleware::auth::AdminUser,
    models::StoreSettings,
    response::{ApiResponse, Meta},
    state::AppState,
};

pub async fn get_settings(state: &AppState) -> AppResult<ApiResponse<StoreSettings>> {
    let settings = state.storage.load_settings().await?;
    let meta = Meta::store(settings.is_open);
    Ok(ApiResponse::success("Settings", settings, Some(meta)))
}

/// Replace the editable settings. The open/closed flag is left untouched.
pub async fn update_settings(
    state: &AppState,
    admin: &AdminUser,
    payload: UpdateSettingsRequest,
) -> AppResult<ApiResponse<StoreSettings>> {
    if payload.delivery_fee.is_sign_negative() {
        return Err(AppError::BadRequest(
            "delivery_fee must not be negative".into(),
        ));
    }

    let current = state.storage.load_settings().await?;
    let settings = StoreSettings {
        name: payload.name.trim().to_string(),
        whatsapp: payload.whatsapp.trim().to_string(),
        is_open: current.is_open,
        logo_url: payload.logo_url.trim().to_string(),
        banner_url: payload.banner_url.trim().to_string(),
        banner_message: payload.banner_message,
        delivery_fee: payload.delivery_fee,
    };

    if settings.whatsapp.chars().all(|c| !c.is_ascii_digit()) {
        tracing::warn!("store whatsapp number has no digits, hand-off links will be unusable");
    }

    state.storage.save_settings(&settings).await?;

    try_log_audit(
        &state.storage,
        Some(&admin.email),
        "settings_update",
        Some("store_settings"),
        Some(serde_json::json!({ "delivery_fee": settings.delivery_fee })),
    )
    .await;

    let meta = Meta::store(settings.is_open);
    Ok(ApiResponse::success("Settings saved", settings, Some(meta)))
}

pub async fn set_store_status(
    state: &AppState,
    admin: &AdminUser,
    payload: StoreStatusRequest,
) -> AppResult<ApiResponse<StoreSettings>> {
    let mut settings = state.storage.load_settings().await?;
    settings.is_open = payload.is_open;
    state.storage.save_settings(&settings).await?;

    tracing::info!(is_open = settings.is_open, "store status changed");
    try_log_audit(
        &state.storage,
        Some(&admin.email),
        "store_status",
        Some("store_settings"),
        Some(serde_json::json!({ "is_open": settings.is_open })),
    )
    .await;

    let meta = Meta::store(settings.is_open);
    Ok(ApiResponse::success(
        if settings.is_open {
            "Store opened"
        } else {
            "Store closed"
        },
        settings,
        Some(meta),
    ))
}
