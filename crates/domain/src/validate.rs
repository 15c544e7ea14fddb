//! Validation contract applied by handlers before calling a controller.

use crate::error::CatalogError;

/// Checks an inbound entity before it reaches storage.
///
/// Implementations return [`CatalogError::Validation`] naming the first
/// offending field.
pub trait Validate {
    fn validate(&self) -> Result<(), CatalogError>;
}

pub(crate) fn require(value: &str, field: &str) -> Result<(), CatalogError> {
    if value.trim().is_empty() {
        return Err(CatalogError::validation(format!("{field} is required")));
    }
    Ok(())
}

/// Slugs are lowercase ASCII letters, digits, and inner hyphens.
pub fn is_slug(value: &str) -> bool {
    !value.is_empty()
        && !value.starts_with('-')
        && !value.ends_with('-')
        && value
            .chars()
            .all(|c| c.is_ascii_lowercase() || c.is_ascii_digit() || c == '-')
}

pub(crate) fn require_slug(value: &str) -> Result<(), CatalogError> {
    if !is_slug(value) {
        return Err(CatalogError::validation("slug must be url-safe"));
    }
    Ok(())
}
