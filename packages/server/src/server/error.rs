//! JSON error responses.

use std::any::Any;

use axum::{
    http::{StatusCode, Uri},
    response::{IntoResponse, Response},
    Json,
};
use linkcheck::{CheckError, ReportError};
use serde_json::json;
use thiserror::Error;

/// Errors surfaced to HTTP callers.
///
/// Only `InvalidInput` carries its message to the client; internal faults are
/// logged and answered with a generic body.
#[derive(Debug, Error)]
pub enum ApiError {
    #[error("{0}")]
    InvalidInput(String),

    #[error("not found")]
    NotFound,

    #[error("internal error: {0}")]
    Internal(String),
}

impl From<CheckError> for ApiError {
    fn from(error: CheckError) -> Self {
        match error {
            CheckError::InvalidInput { reason } => Self::InvalidInput(reason),
            other => Self::Internal(other.to_string()),
        }
    }
}

impl From<ReportError> for ApiError {
    fn from(error: ReportError) -> Self {
        Self::Internal(error.to_string())
    }
}

impl IntoResponse for ApiError {
    fn into_response(self) -> Response {
        let (status, message) = match self {
            Self::InvalidInput(reason) => (StatusCode::BAD_REQUEST, reason),
            Self::NotFound => (StatusCode::NOT_FOUND, "Not found".to_string()),
            Self::Internal(detail) => {
                tracing::error!(error = %detail, "Server error");
                (
                    StatusCode::INTERNAL_SERVER_ERROR,
                    "Internal server error".to_string(),
                )
            }
        };

        (status, Json(json!({ "error": message }))).into_response()
    }
}

/// Fallback for unmatched routes
pub async fn not_found_handler(uri: Uri) -> ApiError {
    tracing::debug!(path = %uri.path(), "No route matched");
    ApiError::NotFound
}

/// Turns a handler panic into a logged 500 instead of a dropped connection
pub fn panic_response(panic: Box<dyn Any + Send + 'static>) -> Response {
    let detail = if let Some(message) = panic.downcast_ref::<String>() {
        message.clone()
    } else if let Some(message) = panic.downcast_ref::<&str>() {
        message.to_string()
    } else {
        "unknown panic".to_string()
    };

    ApiError::Internal(detail).into_response()
}
