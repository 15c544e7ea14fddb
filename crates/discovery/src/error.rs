//! Discovery error types.

use thiserror::Error;

/// Errors returned by the registry client.
#[derive(Debug, Error)]
pub enum DiscoveryError {
    /// The registry could not resolve the service: non-200 answer,
    /// unreachable registry, or an unreadable body.
    #[error("service {0} not found")]
    NotFoundSvc(String),

    /// Register/deregister was answered with an unexpected status.
    #[error("registry rejected {operation}: status {status}")]
    Rejected { operation: &'static str, status: u16 },

    /// The registry could not be reached.
    #[error("registry request failed: {0}")]
    Transport(#[from] reqwest::Error),
}

/// Result type for discovery operations.
pub type Result<T> = std::result::Result<T, DiscoveryError>;
