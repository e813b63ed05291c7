//! In-memory customer sessions. Each one owns a selection buffer and a cart.

use std::{collections::HashMap, sync::Arc};

use chrono::{DateTime, Duration, TimeDelta, Utc};
use tokio::sync::Mutex;
use uuid::Uuid;

use crate::{
    error::{AppError, AppResult},
    ordering::{Cart, SelectionBuffer},
};

/// One year.
pub const MAX_SESSION_TTL_MINUTES: i64 = 365 * 24 * 60;

#[derive(Debug, Clone)]
pub struct CustomerSession {
    pub id: Uuid,
    pub selection: SelectionBuffer,
    pub cart: Cart,
    pub last_seen: DateTime<Utc>,
}

impl CustomerSession {
    fn new() -> Self {
        Self {
            id: Uuid::new_v4(),
            selection: SelectionBuffer::new(),
            cart: Cart::new(),
            last_seen: Utc::now(),
        }
    }
}

#[derive(Clone)]
pub struct SessionStore {
    sessions: Arc<Mutex<HashMap<Uuid, CustomerSession>>>,
    ttl: Duration,
}

impl SessionStore {
    /// TTLs beyond [`MAX_SESSION_TTL_MINUTES`] are capped.
    pub fn new(ttl_minutes: i64) -> Self {
        let minutes = ttl_minutes.clamp(1, MAX_SESSION_TTL_MINUTES);
        Self {
            sessions: Arc::new(Mutex::new(HashMap::new())),
            ttl: TimeDelta::try_minutes(minutes).unwrap_or(TimeDelta::MAX),
        }
    }

    /// Start a fresh session, evicting any that have been idle past the TTL.
    pub async fn create(&self) -> Uuid {
        let mut sessions = self.sessions.lock().await;
        if let Some(cutoff) = Utc::now().checked_sub_signed(self.ttl) {
            let before = sessions.len();
            sessions.retain(|_, session| session.last_seen >= cutoff);
            let evicted = before - sessions.len();
            if evicted > 0 {
                tracing::debug!(evicted, "evicted idle sessions");
            }
        }

        let session = CustomerSession::new();
        let id = session.id;
        sessions.insert(id, session);
        id
    }

    /// Run one synchronous transition against a session while holding it
    /// exclusively.
    pub async fn with_session<T>(
        &self,
        id: Uuid,
        f: impl FnOnce(&mut CustomerSession) -> T,
    ) -> AppResult<T> {
        let mut sessions = self.sessions.lock().await;
        let session = sessions.get_mut(&id).ok_or(AppError::NotFound)?;
        session.last_seen = Utc::now();
        Ok(f(session))
    }

    pub async fn len(&self) -> usize {
        self.sessions.lock().await.len()
    }

    pub async fn is_empty(&self) -> bool {
        self.sessions.lock().await.is_empty()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[tokio::test]
    async fn unknown_sessions_are_not_found() {
        let store = SessionStore::new(10);
        let result = store.with_session(Uuid::new_v4(), |_| ()).await;
        assert!(matches!(result, Err(AppError::NotFound)));
    }

    #[tokio::test]
    async fn idle_sessions_are_evicted_on_create() {
        let store = SessionStore::new(10);
        let stale = store.create().await;
        store
            .with_session(stale, |session| {
                session.last_seen = Utc::now() - Duration::minutes(11);
            })
            .await
            .expect("session exists");
        let fresh = store.create().await;

        assert_eq!(store.len().await, 1);
        assert!(store.with_session(fresh, |_| ()).await.is_ok());
    }

    #[tokio::test]
    async fn huge_ttls_are_capped_instead_of_overflowing() {
        for minutes in [200_000_000_000, i64::MAX, 0, -5] {
            let store = SessionStore::new(minutes);
            let first = store.create().await;
            let second = store.create().await;

            assert_eq!(store.len().await, 2);
            assert!(store.with_session(first, |_| ()).await.is_ok());
            assert!(store.with_session(second, |_| ()).await.is_ok());
        }
        assert_eq!(
            SessionStore::new(i64::MAX).ttl,
            Duration::minutes(MAX_SESSION_TTL_MINUTES)
        );
    }
}
