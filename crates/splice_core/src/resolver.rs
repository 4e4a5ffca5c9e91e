//! Content resolution.

use crate::binding::BindingKey;
use crate::config::StoreConfig;
use crate::content_type::TypeMarker;
use crate::digest::ContentDigest;
use crate::envelope::MediaEnvelope;
use crate::error::{StoreError, StoreResult};
use crate::segment::{reassemble_verified, SegmentLocator};
use splice_ledger::{LedgerStore, RecordId};
use std::sync::Arc;
use tracing::debug;

/// Content resolved from a parent record.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ResolvedContent {
    /// The full payload bytes.
    pub content: Vec<u8>,
    /// The true media type, marker stripped.
    pub content_type: String,
}

/// Resolves a parent record id to its full content.
///
/// The only read entry point external callers should use: it hides the
/// two storage shapes (inline payload vs. digest plus segments) behind
/// one interface. For segmented parents the resolver derives the binding
/// key, locates the segments, and reassembles with digest verification -
/// truncated or tampered content is never returned silently.
pub struct ContentResolver {
    ledger: Arc<dyn LedgerStore>,
    locator: SegmentLocator,
    marker: TypeMarker,
}

impl ContentResolver {
    /// Creates a resolver over the given ledger.
    #[must_use]
    pub fn new(ledger: Arc<dyn LedgerStore>, config: &StoreConfig) -> Self {
        Self {
            locator: SegmentLocator::new(ledger.clone()),
            marker: TypeMarker::new(config.marker_suffix.clone()),
            ledger,
        }
    }

    /// Resolves a parent record to `(bytes, media type)`.
    ///
    /// # Errors
    ///
    /// - [`StoreError::NotFound`] if no record exists for `id`
    /// - [`StoreError::NoSegments`] if a segmented parent has no children
    /// - [`StoreError::Incomplete`] if the segment set has index gaps
    /// - the corrupt family for duplicate indices, empty payloads, digest
    ///   mismatches, or an undecodable envelope
    /// - [`StoreError::Ledger`] for upstream failures, propagated untouched
    pub fn resolve(&self, id: &RecordId) -> StoreResult<ResolvedContent> {
        let record = self
            .ledger
            .record_by_id(id)?
            .ok_or(StoreError::NotFound { id: *id })?;
        let envelope = MediaEnvelope::decode(&record.data)?;
        debug!(id = %id, content_type = %envelope.content_type, "resolving parent record");

        if !self.marker.is_marked(&envelope.content_type) {
            // Inline shape: the envelope holds the literal payload.
            return Ok(ResolvedContent {
                content: envelope.content,
                content_type: envelope.content_type,
            });
        }

        let descriptor = record.type_descriptor.ok_or_else(|| {
            StoreError::invalid_envelope("segmented parent record has no type descriptor")
        })?;
        let expected = ContentDigest::from_slice(&envelope.content).ok_or_else(|| {
            StoreError::invalid_envelope(format!(
                "segmented parent content is not a digest: {} bytes",
                envelope.content.len()
            ))
        })?;

        let key = BindingKey::derive(&descriptor);
        let records = self.locator.locate(&key)?;
        let content = reassemble_verified(&records, &expected)?;
        debug!(id = %id, bytes = content.len(), segments = records.len(), "reassembled content");

        Ok(ResolvedContent {
            content,
            content_type: self.marker.unmark(&envelope.content_type),
        })
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use splice_ledger::{CreateRecord, InMemoryLedger, OwnerKey, TypeDescriptor};

    fn setup() -> (Arc<InMemoryLedger>, ContentResolver) {
        let ledger = Arc::new(InMemoryLedger::new());
        let resolver = ContentResolver::new(ledger.clone(), &StoreConfig::default());
        (ledger, resolver)
    }

    #[test]
    fn unknown_id_is_not_found() {
        let (_, resolver) = setup();
        let result = resolver.resolve(&RecordId::from_bytes([0xEE; 32]));
        assert!(matches!(result, Err(StoreError::NotFound { .. })));
    }

    #[test]
    fn inline_record_resolves_directly() {
        let (ledger, resolver) = setup();
        let descriptor = TypeDescriptor::new([1; 32], [2; 32]);
        let envelope = MediaEnvelope::new("image/png", vec![1, 2, 3]);
        ledger
            .create_record(CreateRecord::addressable(
                OwnerKey::from_bytes([0; 32]),
                descriptor,
                envelope.encode().unwrap(),
            ))
            .unwrap();

        let resolved = resolver.resolve(&descriptor.record_id()).unwrap();
        assert_eq!(resolved.content, vec![1, 2, 3]);
        assert_eq!(resolved.content_type, "image/png");
    }

    #[test]
    fn undecodable_envelope_is_corrupt() {
        let (ledger, resolver) = setup();
        let descriptor = TypeDescriptor::new([1; 32], [2; 32]);
        ledger
            .create_record(CreateRecord::addressable(
                OwnerKey::from_bytes([0; 32]),
                descriptor,
                vec![0xFF, 0xFF],
            ))
            .unwrap();

        let result = resolver.resolve(&descriptor.record_id());
        assert!(matches!(result, Err(ref e) if e.is_corrupt()));
    }

    #[test]
    fn marked_parent_without_segments_is_no_segments() {
        let (ledger, resolver) = setup();
        let descriptor = TypeDescriptor::new([1; 32], [2; 32]);
        let digest = ContentDigest::compute(b"whatever");
        let envelope = MediaEnvelope::new("video/mp4+splice", digest.as_bytes().to_vec());
        ledger
            .create_record(CreateRecord::addressable(
                OwnerKey::from_bytes([0; 32]),
                descriptor,
                envelope.encode().unwrap(),
            ))
            .unwrap();

        let result = resolver.resolve(&descriptor.record_id());
        assert!(matches!(result, Err(StoreError::NoSegments { .. })));
    }

    #[test]
    fn marked_parent_with_non_digest_content_is_corrupt() {
        let (ledger, resolver) = setup();
        let descriptor = TypeDescriptor::new([1; 32], [2; 32]);
        let envelope = MediaEnvelope::new("video/mp4+splice", vec![1, 2, 3]);
        ledger
            .create_record(CreateRecord::addressable(
                OwnerKey::from_bytes([0; 32]),
                descriptor,
                envelope.encode().unwrap(),
            ))
            .unwrap();

        let result = resolver.resolve(&descriptor.record_id());
        assert!(matches!(result, Err(ref e) if e.is_corrupt()));
    }
}
