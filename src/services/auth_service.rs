use argon2::{
    Argon2,
    password_hash::{PasswordHash, PasswordVerifier},
};
use chrono::{Duration, Utc};
use jsonwebtoken::{EncodingKey, Header, encode};

use crate::{
    audit::try_log_audit,
    dto::auth::{Claims, LoginRequest, LoginResponse},
    error::{AppError, AppResult},
    middleware::auth::ADMIN_ROLE,
    response::{ApiResponse, Meta},
    state::AppState,
};

const TOKEN_TTL_HOURS: i64 = 24;

pub async fn login_admin(
    state: &AppState,
    payload: LoginRequest,
) -> AppResult<ApiResponse<LoginResponse>> {
    let LoginRequest { email, password } = payload;
    let config = &state.config;

    let Some(stored_hash) = config.admin_password_hash.as_deref() else {
        tracing::warn!("admin login attempted but ADMIN_PASSWORD_HASH is not configured");
        return Err(AppError::Unauthorized);
    };

    if !email.trim().eq_ignore_ascii_case(&config.admin_email) {
        return Err(AppError::BadRequest("Invalid email or password".into()));
    }

    let parsed_hash = PasswordHash::new(stored_hash)
        .map_err(|_| AppError::Internal(anyhow::anyhow!("Invalid password hash")))?;

    if Argon2::default()
        .verify_password(password.as_bytes(), &parsed_hash)
        .is_err()
    {
        return Err(AppError::BadRequest("Invalid email or password".into()));
    }

    let token = issue_token(&config.admin_email, &config.jwt_secret)?;

    try_log_audit(
        &state.storage,
        Some(&config.admin_email),
        "admin_login",
        Some("auth"),
        None,
    )
    .await;

    Ok(ApiResponse::success(
        "Logged in",
        LoginResponse {
            token: format!("Bearer {}", token),
        },
        Some(Meta::empty()),
    ))
}

pub fn issue_token(email: &str, secret: &str) -> AppResult<String> {
    let expiration = Utc::now()
        .checked_add_signed(Duration::hours(TOKEN_TTL_HOURS))
        .ok_or_else(|| AppError::Internal(anyhow::anyhow!("Failed to set expiration")))?;

    let claims = Claims {
        sub: email.to_string(),
        role: ADMIN_ROLE.to_string(),
        exp: expiration.timestamp() as usize,
    };

    encode(
        &Header::default(),
        &claims,
        &EncodingKey::from_secret(secret.as_bytes()),
    )
    .map_err(|e| AppError::Internal(anyhow::anyhow!(e.to_string())))
}
