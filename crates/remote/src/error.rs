//! Remote adapter error types.

use thiserror::Error;

/// Failure classes of an outbound adapter call.
#[derive(Debug, Error)]
pub enum RemoteError {
    /// The registry could not resolve the service.
    #[error("service {service} not found")]
    NotFoundSvc { service: String },

    /// A transport to the resolved address could not be opened.
    #[error("failed to create client for {service}: {reason}")]
    CreateClient { service: String, reason: String },

    /// The remote service answered with an error status.
    #[error("{}", .0.message())]
    Remote(#[from] tonic::Status),
}

impl RemoteError {
    /// Label used for the `status` metric dimension.
    pub fn class(&self) -> &'static str {
        match self {
            RemoteError::NotFoundSvc { .. } => "not_found_svc",
            RemoteError::CreateClient { .. } => "create_client",
            RemoteError::Remote(_) => "remote",
        }
    }
}

/// Result type for adapter calls.
pub type Result<T> = std::result::Result<T, RemoteError>;
