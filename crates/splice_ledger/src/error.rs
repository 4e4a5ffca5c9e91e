//! Error types for ledger operations.

use std::io;
use thiserror::Error;

/// Result type for ledger operations.
pub type LedgerResult<T> = Result<T, LedgerError>;

/// Errors that can occur during ledger operations.
#[derive(Debug, Error)]
pub enum LedgerError {
    /// An I/O error occurred.
    #[error("I/O error: {0}")]
    Io(#[from] io::Error),

    /// The ledger is temporarily unavailable.
    ///
    /// Transient by nature: the same call may succeed later. The caller
    /// decides whether to retry.
    #[error("ledger unavailable: {0}")]
    Unavailable(String),

    /// The ledger rejected the write.
    #[error("write rejected: {0}")]
    Rejected(String),

    /// A stored record failed validation on read.
    #[error("corrupt record: {message}")]
    CorruptRecord {
        /// Description of the corruption.
        message: String,
    },
}

impl LedgerError {
    /// Creates an unavailable error.
    pub fn unavailable(message: impl Into<String>) -> Self {
        Self::Unavailable(message.into())
    }

    /// Creates a rejected error.
    pub fn rejected(message: impl Into<String>) -> Self {
        Self::Rejected(message.into())
    }

    /// Creates a corrupt record error.
    pub fn corrupt_record(message: impl Into<String>) -> Self {
        Self::CorruptRecord {
            message: message.into(),
        }
    }
}
