//! API error handling
//!
//! Every error leaves the server as a JSON `{"error": "..."}` body with the
//! matching status code. Parse and validation problems are the caller's
//! fault (400); provider outages surface as 502; anything touching local
//! storage that fails is a 500.

use axum::{
    Json,
    http::StatusCode,
    response::{IntoResponse, Response},
};
use batch::BatchError;
use serde::Serialize;
use speech::SpeechError;
use storage::StorageError;
use thiserror::Error;

/// API error type
#[derive(Debug, Error)]
pub enum ApiError {
    #[error("{0}")]
    BadRequest(String),

    #[error("{0}")]
    NotFound(String),

    #[error("{0}")]
    ProviderUnavailable(String),

    #[error("{0}")]
    Internal(String),
}

/// Error response body
#[derive(Debug, Serialize)]
pub struct ErrorResponse {
    /// Error message
    pub error: String,
}

impl IntoResponse for ApiError {
    fn into_response(self) -> Response {
        let status = match &self {
            Self::BadRequest(_) => StatusCode::BAD_REQUEST,
            Self::NotFound(_) => StatusCode::NOT_FOUND,
            Self::ProviderUnavailable(_) => StatusCode::BAD_GATEWAY,
            Self::Internal(_) => StatusCode::INTERNAL_SERVER_ERROR,
        };

        let body = ErrorResponse {
            error: self.to_string(),
        };

        (status, Json(body)).into_response()
    }
}

impl From<BatchError> for ApiError {
    fn from(err: BatchError) -> Self {
        match err {
            BatchError::Parse(msg) | BatchError::Validation(msg) => Self::BadRequest(msg),
            BatchError::Storage(e) => Self::Internal(e.to_string()),
            BatchError::Archive(msg) => Self::Internal(msg),
        }
    }
}

impl From<SpeechError> for ApiError {
    fn from(err: SpeechError) -> Self {
        match err {
            SpeechError::Validation(msg) => Self::BadRequest(msg),
            SpeechError::NotSupported(msg) => Self::BadRequest(msg),
            SpeechError::Configuration(msg) => Self::Internal(msg),
            other => Self::ProviderUnavailable(other.to_string()),
        }
    }
}

impl From<StorageError> for ApiError {
    fn from(err: StorageError) -> Self {
        Self::Internal(err.to_string())
    }
}
