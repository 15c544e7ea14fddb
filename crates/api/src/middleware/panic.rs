//! Converts handler panics into the generic 500 envelope.

use std::any::Any;

use axum::http::StatusCode;
use axum::response::Response;

use crate::envelope;
use crate::error::INTERNAL_MESSAGE;

/// Panic handler for `CatchPanicLayer::custom`.
pub fn recover_panic(err: Box<dyn Any + Send + 'static>) -> Response {
    let detail = if let Some(s) = err.downcast_ref::<String>() {
        s.as_str()
    } else if let Some(s) = err.downcast_ref::<&str>() {
        s
    } else {
        "unknown panic payload"
    };
    tracing::error!(panic = detail, "handler panicked");
    envelope::error(StatusCode::INTERNAL_SERVER_ERROR, INTERNAL_MESSAGE)
}
