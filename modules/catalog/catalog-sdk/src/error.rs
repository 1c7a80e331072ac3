//! Error types for the catalog boundary.

use thiserror::Error;

/// Errors a catalog backend can report.
///
/// Absence of an entity is not an error: lookups return `Ok(None)`.
#[derive(Debug, Error)]
pub enum CatalogError {
    /// The catalog backend cannot be reached.
    #[error("catalog unavailable: {0}")]
    Unavailable(String),

    /// An internal error occurred.
    #[error("internal error: {0}")]
    Internal(String),
}

impl CatalogError {
    #[must_use]
    pub fn unavailable(msg: impl Into<String>) -> Self {
        Self::Unavailable(msg.into())
    }

    #[must_use]
    pub fn internal(msg: impl Into<String>) -> Self {
        Self::Internal(msg.into())
    }
}
