//! Request middleware, outermost first: panic recovery, then tracing with
//! the request deadline and metrics, then per-route bearer auth.

pub mod auth;
pub mod panic;
pub mod trace;

pub use auth::{CurrentUser, authenticate, bearer_token};
pub use panic::recover_panic;
pub use trace::trace_request;
