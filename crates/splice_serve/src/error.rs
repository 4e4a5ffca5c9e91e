//! Error types for the serving layer.

use thiserror::Error;

/// Result type for serving operations.
pub type ServeResult<T> = Result<T, ServeError>;

/// Errors that can occur in the serving layer.
#[derive(Debug, Error)]
pub enum ServeError {
    /// The request carried an id that is not a 32-byte hex string.
    #[error("invalid record id: {0}")]
    InvalidId(String),
}
