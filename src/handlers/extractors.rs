//! Common extractors for API handlers.
//!
//! Path parameters are taken as strings and parsed here so a malformed id
//! produces the structured validation error instead of axum's plain-text
//! rejection.

use crate::error::ApiError;

/// Validated customer id helper
///
/// # Example
/// ```ignore
/// let id = ValidatedId::parse(&raw_id)?;
/// ```
pub struct ValidatedId;

impl ValidatedId {
    /// Parse a path segment into a customer id, returning an ApiError on failure
    pub fn parse(s: &str) -> Result<i64, ApiError> {
        s.trim()
            .parse::<i64>()
            .map_err(|_| ApiError::validation_field("id", format!("Invalid customer id: {}", s)))
    }
}
