use axum::{
    http::StatusCode,
    response::{IntoResponse, Response},
};
use serde::Serialize;
use thiserror::Error;

use crate::{
    ordering::{OrderingError, RequiredField},
    response::{ApiResponse, Meta},
};

#[derive(Debug, Error)]
pub enum AppError {
    #[error("Not Found")]
    NotFound,

    #[error("Bad Request {0}")]
    BadRequest(String),

    #[error("Unauthorized")]
    Unauthorized,

    #[error("Store is closed")]
    StoreClosed,

    #[error("Please fill in the following fields: {}", RequiredField::join(.0))]
    MissingFields(Vec<RequiredField>),

    #[error("Cart is empty")]
    EmptyCart,

    #[error("ORM error")]
    OrmError(#[from] sea_orm::DbErr),

    #[error("Internal Server Error")]
    Internal(#[from] anyhow::Error),
}

impl From<OrderingError> for AppError {
    fn from(err: OrderingError) -> Self {
        match err {
            OrderingError::StoreClosed => AppError::StoreClosed,
            OrderingError::MissingFields(fields) => AppError::MissingFields(fields),
            OrderingError::EmptyCart => AppError::EmptyCart,
        }
    }
}

#[derive(Serialize)]
struct ErrorData {
    error: String,
    #[serde(skip_serializing_if = "Vec::is_empty")]
    missing_fields: Vec<RequiredField>,
}

impl IntoResponse for AppError {
    fn into_response(self) -> Response {
        let status = match &self {
            AppError::NotFound => StatusCode::NOT_FOUND,
            AppError::BadRequest(_) => StatusCode::BAD_REQUEST,
            AppError::Unauthorized => StatusCode::UNAUTHORIZED,
            AppError::StoreClosed => StatusCode::CONFLICT,
            AppError::MissingFields(_) => StatusCode::UNPROCESSABLE_ENTITY,
            AppError::EmptyCart => StatusCode::UNPROCESSABLE_ENTITY,
            AppError::OrmError(_) => StatusCode::INTERNAL_SERVER_ERROR,
            AppError::Internal(_) => StatusCode::INTERNAL_SERVER_ERROR,
        };

        if status == StatusCode::INTERNAL_SERVER_ERROR {
            tracing::error!(error = ?self, "request failed");
        }

        let missing_fields = match &self {
            AppError::MissingFields(fields) => fields.clone(),
            _ => Vec::new(),
        };
        let body = ApiResponse {
            message: self.to_string(),
            data: Some(ErrorData {
                error: self.to_string(),
                missing_fields,
            }),
            meta: Some(Meta::empty()),
        };

        (status, axum::Json(body)).into_response()
    }
}

pub type AppResult<T> = Result<T, AppError>;
