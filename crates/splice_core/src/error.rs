//! Error types for the content store core.

use crate::binding::BindingKey;
use crate::digest::ContentDigest;
use splice_ledger::{LedgerError, RecordId};
use thiserror::Error;

/// Result type for content store operations.
pub type StoreResult<T> = Result<T, StoreError>;

/// Errors that can occur in content store operations.
///
/// Deterministic chunking/derivation/reassembly errors are always surfaced
/// to the caller; the core never recovers silently, since that would mean
/// returning corrupted media. Ledger failures are propagated as
/// [`StoreError::Ledger`], never interpreted.
#[derive(Debug, Error)]
pub enum StoreError {
    /// No parent record exists for the requested id.
    #[error("record not found: {id}")]
    NotFound {
        /// The id that was requested.
        id: RecordId,
    },

    /// No segment records exist for the binding key.
    ///
    /// Either the writer never ran, or the ledger has not caught up yet.
    #[error("no segments found for binding key {key}")]
    NoSegments {
        /// The binding key that was queried.
        key: BindingKey,
    },

    /// The located index set has gaps: the object is still being written
    /// or was abandoned part-way.
    #[error("incomplete segment set: found {found} segments, missing indices {missing:?}")]
    Incomplete {
        /// Number of segments located.
        found: usize,
        /// Indices absent from the expected contiguous range.
        missing: Vec<u8>,
    },

    /// Two segment records claim the same index.
    #[error("corrupt segment set: duplicate index {index}")]
    DuplicateIndex {
        /// The duplicated index.
        index: u8,
    },

    /// A segment record carries no payload beyond the index byte.
    #[error("corrupt segment record: data length {len}, expected greater than 1")]
    EmptySegment {
        /// Length of the offending record's data.
        len: usize,
    },

    /// The reassembled content does not match the parent's stored digest.
    #[error("digest mismatch: expected {expected}, actual {actual}")]
    DigestMismatch {
        /// Digest stored in the parent envelope.
        expected: ContentDigest,
        /// Digest of the reassembled bytes.
        actual: ContentDigest,
    },

    /// The parent record's envelope failed to decode.
    #[error("invalid media envelope: {message}")]
    InvalidEnvelope {
        /// Description of the defect.
        message: String,
    },

    /// The content cannot be split into at most 256 segments.
    #[error(
        "content too large: {len} bytes at segment size {segment_size} exceeds the {max}-byte maximum"
    )]
    SizeExceeded {
        /// Content length in bytes.
        len: usize,
        /// Segment size chosen for the write.
        segment_size: usize,
        /// Maximum content length at that segment size.
        max: usize,
    },

    /// The content is not publishable as requested.
    #[error("invalid content: {message}")]
    InvalidContent {
        /// Description of the defect.
        message: String,
    },

    /// A configuration value is unusable.
    #[error("invalid configuration: {message}")]
    InvalidConfig {
        /// Description of the defect.
        message: String,
    },

    /// The external ledger call failed. Propagated, not interpreted.
    #[error("ledger error: {0}")]
    Ledger(#[from] LedgerError),
}

impl StoreError {
    /// Creates an invalid envelope error.
    pub fn invalid_envelope(message: impl Into<String>) -> Self {
        Self::InvalidEnvelope {
            message: message.into(),
        }
    }

    /// Creates an invalid content error.
    pub fn invalid_content(message: impl Into<String>) -> Self {
        Self::InvalidContent {
            message: message.into(),
        }
    }

    /// Creates an invalid configuration error.
    pub fn invalid_config(message: impl Into<String>) -> Self {
        Self::InvalidConfig {
            message: message.into(),
        }
    }

    /// Returns true for the not-found family: missing parent or missing
    /// segment set.
    #[must_use]
    pub fn is_not_found(&self) -> bool {
        matches!(self, Self::NotFound { .. } | Self::NoSegments { .. })
    }

    /// Returns true if the object looks partially written rather than
    /// damaged. Retriable: a later read may see the full set.
    #[must_use]
    pub fn is_incomplete(&self) -> bool {
        matches!(self, Self::Incomplete { .. })
    }

    /// Returns true for the corrupt family: duplicate indices, empty
    /// payloads, digest mismatches, undecodable envelopes.
    #[must_use]
    pub fn is_corrupt(&self) -> bool {
        matches!(
            self,
            Self::DuplicateIndex { .. }
                | Self::EmptySegment { .. }
                | Self::DigestMismatch { .. }
                | Self::InvalidEnvelope { .. }
        )
    }
}
