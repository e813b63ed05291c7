use std::env;

use crate::sessions::MAX_SESSION_TTL_MINUTES;

const DEFAULT_SESSION_TTL_MINUTES: i64 = 120;

#[derive(Debug, Clone)]
pub struct AppConfig {
    /// Absent means the store runs on the in-memory demo storage.
    pub database_url: Option<String>,
    pub host: String,
    pub port: u16,
    pub jwt_secret: String,
    pub admin_email: String,
    /// Argon2 PHC string, see the `hash-password` binary.
    pub admin_password_hash: Option<String>,
    pub seed_demo_menu: bool,
    pub session_ttl_minutes: i64,
}

impl AppConfig {
    pub fn from_env() -> anyhow::Result<Self> {
        let database_url = env::var("DATABASE_URL").ok().filter(|url| !url.is_empty());
        let host = env::var("APP_HOST").unwrap_or_else(|_| "127.0.0.1".to_string());
        let port = env::var("APP_PORT")
            .ok()
            .and_then(|p| p.parse::<u16>().ok())
            .unwrap_or(3000);
        let jwt_secret = env::var("JWT_SECRET")
            .map_err(|_| anyhow::anyhow!("JWT_SECRET is not set"))?;
        let admin_email =
            env::var("ADMIN_EMAIL").unwrap_or_else(|_| "admin@example.com".to_string());
        let admin_password_hash = env::var("ADMIN_PASSWORD_HASH").ok();
        let seed_demo_menu = env::var("SEED_DEMO_MENU")
            .ok()
            .and_then(|v| v.parse::<bool>().ok())
            .unwrap_or(true);
        let session_ttl_minutes =
            parse_session_ttl(env::var("SESSION_TTL_MINUTES").ok().as_deref());
        Ok(Self {
            database_url,
            host,
            port,
            jwt_secret,
            admin_email,
            admin_password_hash,
            seed_demo_menu,
            session_ttl_minutes,
        })
    }

    /// Settings for tests and local tooling: demo storage, fixed secret.
    pub fn for_demo(jwt_secret: impl Into<String>) -> Self {
        Self {
            database_url: None,
            host: "127.0.0.1".to_string(),
            port: 3000,
            jwt_secret: jwt_secret.into(),
            admin_email: "admin@example.com".to_string(),
            admin_password_hash: None,
            seed_demo_menu: true,
            session_ttl_minutes: DEFAULT_SESSION_TTL_MINUTES,
        }
    }
}

/// Positive minutes, capped at one year. Anything unparsable uses the default.
fn parse_session_ttl(raw: Option<&str>) -> i64 {
    raw.and_then(|v| v.trim().parse::<i64>().ok())
        .filter(|minutes| *minutes > 0)
        .map_or(DEFAULT_SESSION_TTL_MINUTES, |minutes| {
            minutes.min(MAX_SESSION_TTL_MINUTES)
        })
}
