//! Content store configuration.

use crate::error::{StoreError, StoreResult};

/// Default segment size and inline limit: 10 KiB.
const DEFAULT_SEGMENT_SIZE: usize = 10 * 1024;
/// Default content-type marker suffix.
const DEFAULT_MARKER_SUFFIX: &str = "+splice";

/// Configuration for publishing and resolving content.
///
/// All tunables are explicit per-instance values threaded into the chunker,
/// writer, and codec - never module-level constants - so the core stays
/// pure and testable.
#[derive(Debug, Clone)]
pub struct StoreConfig {
    /// Maximum payload bytes per segment record.
    pub segment_size: usize,

    /// Largest content stored literally in the parent record. Anything
    /// bigger is segmented.
    pub inline_limit: usize,

    /// Reserved content-type suffix signaling segmented storage.
    pub marker_suffix: String,
}

impl Default for StoreConfig {
    fn default() -> Self {
        Self {
            segment_size: DEFAULT_SEGMENT_SIZE, // 10 KiB
            inline_limit: DEFAULT_SEGMENT_SIZE, // 10 KiB
            marker_suffix: DEFAULT_MARKER_SUFFIX.to_string(),
        }
    }
}

impl StoreConfig {
    /// Creates a configuration with default values.
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    /// Sets the segment size.
    #[must_use]
    pub const fn segment_size(mut self, size: usize) -> Self {
        self.segment_size = size;
        self
    }

    /// Sets the inline limit.
    #[must_use]
    pub const fn inline_limit(mut self, limit: usize) -> Self {
        self.inline_limit = limit;
        self
    }

    /// Sets the marker suffix.
    #[must_use]
    pub fn marker_suffix(mut self, suffix: impl Into<String>) -> Self {
        self.marker_suffix = suffix.into();
        self
    }

    /// Validates the configuration.
    ///
    /// # Errors
    ///
    /// Returns [`StoreError::InvalidConfig`] if the segment size is zero or
    /// the marker suffix is empty.
    pub fn validate(&self) -> StoreResult<()> {
        if self.segment_size == 0 {
            return Err(StoreError::invalid_config("segment size must be positive"));
        }
        if self.marker_suffix.is_empty() {
            return Err(StoreError::invalid_config("marker suffix must not be empty"));
        }
        Ok(())
    }
}
