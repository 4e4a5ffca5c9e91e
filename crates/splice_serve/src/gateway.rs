//! Media gateway: resolution outcomes as HTTP-equivalent responses.

use crate::config::ServeConfig;
use crate::error::{ServeError, ServeResult};
use splice_core::{ContentResolver, StoreError};
use splice_ledger::RecordId;
use tracing::{debug, warn};

/// An HTTP-equivalent media response.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct MediaResponse {
    /// HTTP-equivalent status code.
    pub status: u16,
    /// `Content-Type` header value; present only on success, always the
    /// unmarked media type.
    pub content_type: Option<String>,
    /// Response body; empty on failure.
    pub body: Vec<u8>,
    /// Optional `Cache-Control` header value; present only on success.
    pub cache_control: Option<String>,
}

impl MediaResponse {
    fn status_only(status: u16) -> Self {
        Self {
            status,
            content_type: None,
            body: Vec::new(),
            cache_control: None,
        }
    }
}

/// Serves media records by id over a [`ContentResolver`].
pub struct MediaGateway {
    resolver: ContentResolver,
    config: ServeConfig,
}

impl MediaGateway {
    /// Creates a gateway.
    #[must_use]
    pub fn new(resolver: ContentResolver, config: ServeConfig) -> Self {
        Self { resolver, config }
    }

    /// Parses a raw request id into a [`RecordId`].
    ///
    /// # Errors
    ///
    /// Returns [`ServeError::InvalidId`] for anything but a 32-byte hex
    /// string (a `0x` prefix is accepted).
    pub fn parse_id(raw: &str) -> ServeResult<RecordId> {
        let trimmed = raw.trim();
        if trimmed.is_empty() {
            return Err(ServeError::InvalidId("empty id".to_string()));
        }
        RecordId::from_hex(trimmed).ok_or_else(|| ServeError::InvalidId(trimmed.to_string()))
    }

    /// Serves the media record identified by `raw_id`.
    ///
    /// Never fails: every outcome, including malformed ids and upstream
    /// errors, maps to a [`MediaResponse`] per the crate-level table.
    #[must_use]
    pub fn serve(&self, raw_id: &str) -> MediaResponse {
        let id = match Self::parse_id(raw_id) {
            Ok(id) => id,
            Err(err) => {
                debug!(raw_id, %err, "rejecting malformed media id");
                return MediaResponse::status_only(400);
            }
        };

        match self.resolver.resolve(&id) {
            Ok(resolved) => {
                debug!(id = %id, bytes = resolved.content.len(), "serving media");
                MediaResponse {
                    status: 200,
                    content_type: Some(resolved.content_type),
                    body: resolved.content,
                    cache_control: self.config.cache_control.clone(),
                }
            }
            Err(err) => {
                let status = Self::status_for(&err);
                warn!(id = %id, status, %err, "media resolution failed");
                MediaResponse::status_only(status)
            }
        }
    }

    fn status_for(err: &StoreError) -> u16 {
        if err.is_not_found() {
            404
        } else if err.is_incomplete() {
            // The object may still be being written; retriable.
            503
        } else if err.is_corrupt() {
            500
        } else if matches!(err, StoreError::Ledger(_)) {
            502
        } else {
            500
        }
    }
}
