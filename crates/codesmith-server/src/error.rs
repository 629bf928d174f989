//! API error types with HTTP status code mapping.
//!
//! [`ApiError`] is the unified error type for all API endpoints. It implements
//! `axum::response::IntoResponse` to produce the `{"success": false,
//! "error": "..."}` JSON shape with an appropriate HTTP status code. Errors
//! are never retried and never surface as raw stack traces.

use axum::http::StatusCode;
use axum::response::{IntoResponse, Response};

/// API errors with HTTP status code mapping.
#[derive(Debug, thiserror::Error)]
pub enum ApiError {
    /// Invalid request input (400). Rejected before any model or storage call.
    #[error("{0}")]
    BadRequest(String),

    /// Upstream model failure or empty response after normalization (502).
    /// Nothing is persisted.
    #[error("{0}")]
    GenerationFailed(String),

    /// Storage or other internal failure (500).
    #[error("{0}")]
    Internal(String),
}

impl IntoResponse for ApiError {
    fn into_response(self) -> Response {
        let status = match &self {
            ApiError::BadRequest(_) => StatusCode::BAD_REQUEST,
            ApiError::GenerationFailed(_) => StatusCode::BAD_GATEWAY,
            ApiError::Internal(_) => StatusCode::INTERNAL_SERVER_ERROR,
        };

        let body = serde_json::json!({
            "success": false,
            "error": self.to_string(),
        });

        (status, axum::Json(body)).into_response()
    }
}

impl From<codesmith_storage::StorageError> for ApiError {
    fn from(err: codesmith_storage::StorageError) -> Self {
        ApiError::Internal(err.to_string())
    }
}
