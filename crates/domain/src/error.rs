//! Domain error types.

use thiserror::Error;

/// Errors returned by catalog controllers and validation.
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum CatalogError {
    /// The requested entity does not exist.
    #[error("not found")]
    NotFound,

    /// A uniqueness constraint would be violated.
    #[error("already exists")]
    AlreadyExists,

    /// Input violates a validation rule; the message names the field.
    #[error("{0}")]
    Validation(String),

    /// The caller's deadline passed before the call started.
    #[error("deadline exceeded")]
    DeadlineExceeded,

    /// The storage layer failed.
    #[error("storage error: {0}")]
    Storage(String),
}

impl CatalogError {
    pub fn validation(message: impl Into<String>) -> Self {
        CatalogError::Validation(message.into())
    }
}

/// Convenience type alias for controller results.
pub type Result<T> = std::result::Result<T, CatalogError>;
