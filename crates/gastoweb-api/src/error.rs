//! Error types for gastoweb-api
//!
//! Maps the domain taxonomy onto HTTP status codes. Every error body is
//! `{ "error": <message> }`; internal faults are logged server-side and
//! surfaced with a generic message only.

use axum::http::StatusCode;
use axum::response::{IntoResponse, Response};
use axum::Json;
use gastoweb_core::CoreError;
use serde_json::json;

/// API error wrapper around the domain taxonomy
#[derive(Debug)]
pub struct ApiError(pub CoreError);

impl From<CoreError> for ApiError {
    fn from(err: CoreError) -> Self {
        ApiError(err)
    }
}

impl IntoResponse for ApiError {
    fn into_response(self) -> Response {
        let (status, message) = match &self.0 {
            CoreError::Validation { .. } => (StatusCode::BAD_REQUEST, self.0.to_string()),
            CoreError::NotFound { .. } => (StatusCode::NOT_FOUND, self.0.to_string()),
            CoreError::Conflict { .. } => (StatusCode::CONFLICT, self.0.to_string()),
            CoreError::ForeignKey { .. } => (StatusCode::BAD_REQUEST, self.0.to_string()),
            CoreError::Constraint { .. } => (StatusCode::BAD_REQUEST, self.0.to_string()),
            CoreError::Internal { detail } => {
                log::error!("internal error: {}", detail);
                (
                    StatusCode::INTERNAL_SERVER_ERROR,
                    "Internal server error.".to_string(),
                )
            }
        };
        (status, Json(json!({ "error": message }))).into_response()
    }
}

/// Result type with ApiError
pub type ApiResult<T> = Result<T, ApiError>;
