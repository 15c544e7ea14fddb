//! Shared types for the catalog service: caller ids, pagination windows,
//! the request call context, and trace propagation.

pub mod context;
pub mod pagination;
pub mod telemetry;
pub mod types;

pub use context::CallContext;
pub use pagination::{
    DEFAULT_PAGE_SIZE, Filters, ListQuery, MIN_QUERY_LEN, Page, PageRequest, SEARCH_PAGE_SIZE,
};
pub use telemetry::TRACEPARENT;
pub use types::UserId;
