use serde::Serialize;
use utoipa::ToSchema;

#[derive(Debug, Serialize, ToSchema, Clone)]
pub struct Meta {
    pub total: Option<u64>,
    /// Store status at the time the response was built, for storefront calls.
    pub store_open: Option<bool>,
}

impl Meta {
    pub fn total(total: usize) -> Self {
        Self {
            total: Some(total as u64),
            store_open: None,
        }
    }

    pub fn store(store_open: bool) -> Self {
        Self {
            total: None,
            store_open: Some(store_open),
        }
    }

    pub fn empty() -> Self {
        Self {
            total: None,
            store_open: None,
        }
    }
}

#[derive(Debug, Serialize, ToSchema)]
pub struct ApiResponse<T> {
    pub message: String,
    pub data: Option<T>,
    pub meta: Option<Meta>,
}

impl<T: Serialize> ApiResponse<T> {
    pub fn success(message: impl Into<String>, data: T, meta: Option<Meta>) -> Self {
        Self {
            message: message.into(),
            data: Some(data),
            meta,
        }
    }
}
