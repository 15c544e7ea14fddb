//! API error types with HTTP response mapping.

use axum::http::StatusCode;
use axum::response::{IntoResponse, Response};
use domain::CatalogError;
use remote::RemoteError;
use thiserror::Error;

use crate::envelope;

/// Body of every 500 response; details are logged, never returned.
pub const INTERNAL_MESSAGE: &str = "internal server error";

/// API-level error type that maps to HTTP responses.
#[derive(Debug, Error)]
pub enum ApiError {
    /// Malformed path, query, or body, or a failed validation.
    #[error("{0}")]
    BadRequest(String),

    #[error("{0}")]
    Unauthorized(String),

    #[error("not found")]
    NotFound,

    #[error("already exists")]
    AlreadyExists,

    #[error("method not allowed")]
    MethodNotAllowed,

    #[error("request body too large")]
    PayloadTooLarge,

    /// The request deadline passed before a response was ready.
    #[error("request timed out")]
    Timeout,

    /// A sibling service call failed.
    #[error("internal server error")]
    Remote(#[from] RemoteError),

    /// Anything else; the detail is logged.
    #[error("internal server error")]
    Internal(String),
}

impl ApiError {
    pub fn status(&self) -> StatusCode {
        match self {
            ApiError::BadRequest(_) => StatusCode::BAD_REQUEST,
            ApiError::Unauthorized(_) => StatusCode::UNAUTHORIZED,
            ApiError::NotFound => StatusCode::NOT_FOUND,
            ApiError::AlreadyExists => StatusCode::CONFLICT,
            ApiError::MethodNotAllowed => StatusCode::METHOD_NOT_ALLOWED,
            ApiError::PayloadTooLarge => StatusCode::PAYLOAD_TOO_LARGE,
            ApiError::Timeout => StatusCode::REQUEST_TIMEOUT,
            ApiError::Remote(_) | ApiError::Internal(_) => StatusCode::INTERNAL_SERVER_ERROR,
        }
    }
}

impl IntoResponse for ApiError {
    fn into_response(self) -> Response {
        match &self {
            ApiError::Remote(err) => {
                tracing::debug!(error = %err, class = err.class(), "remote call failed");
            }
            ApiError::Internal(detail) => {
                tracing::error!(error = %detail, "internal server error");
            }
            _ => {}
        }
        envelope::error(self.status(), &self.to_string())
    }
}

impl From<CatalogError> for ApiError {
    fn from(err: CatalogError) -> Self {
        match err {
            CatalogError::NotFound => ApiError::NotFound,
            CatalogError::AlreadyExists => ApiError::AlreadyExists,
            CatalogError::Validation(msg) => ApiError::BadRequest(msg),
            CatalogError::DeadlineExceeded => ApiError::Timeout,
            CatalogError::Storage(detail) => ApiError::Internal(detail),
        }
    }
}

/// Fallback for methods a route does not allow.
pub async fn method_not_allowed() -> ApiError {
    ApiError::MethodNotAllowed
}

/// Fallback for unmatched paths.
pub async fn not_found() -> ApiError {
    ApiError::NotFound
}
