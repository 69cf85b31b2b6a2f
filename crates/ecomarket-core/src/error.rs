//! Error types for the core assistant crate.

use thiserror::Error;

/// Errors returned by record store operations.
#[derive(Debug, Error)]
pub enum CoreError {
    /// The database text is not valid JSON.
    #[error("failed to parse record store: {0}")]
    Parse(#[from] serde_json::Error),
    /// The database is valid JSON but not an array of objects.
    #[error("invalid record store: {0}")]
    InvalidStore(String),
}
