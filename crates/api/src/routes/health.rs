//! Liveness endpoint.

use axum::http::StatusCode;
use axum::response::Response;

use crate::envelope;

/// GET /api/health-check
pub async fn check() -> Response {
    envelope::success(StatusCode::OK, "OK")
}
