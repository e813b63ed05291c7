use std::sync::Arc;

use crate::{config::AppConfig, sessions::SessionStore, storage::Storage};

#[derive(Clone)]
pub struct AppState {
    pub storage: Storage,
    pub sessions: SessionStore,
    pub config: Arc<AppConfig>,
}

impl AppState {
    pub async fn from_config(config: AppConfig) -> Self {
        let storage = Storage::connect(&config).await;
        Self::with_storage(config, storage)
    }

    pub fn with_storage(config: AppConfig, storage: Storage) -> Self {
        Self {
            storage,
            sessions: SessionStore::new(config.session_ttl_minutes),
            config: Arc::new(config),
        }
    }
}
