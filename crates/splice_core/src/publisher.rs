//! Content publishing.

use crate::binding::BindingKey;
use crate::config::StoreConfig;
use crate::content_type::TypeMarker;
use crate::digest::ContentDigest;
use crate::envelope::MediaEnvelope;
use crate::error::{StoreError, StoreResult};
use crate::segment::{chunk_content, SegmentWriter};
use splice_ledger::{CreateRecord, LedgerStore, OwnerKey, RecordId, TypeDescriptor};
use std::sync::Arc;
use tracing::{debug, info};

/// Write-time context supplied by the caller.
///
/// Carries the ledger-side ownership material the core does not invent
/// itself: the lock under which parent records are stored and the code
/// hash stamped into fresh type descriptors.
#[derive(Debug, Clone, Copy)]
pub struct WriteContext {
    /// Owner key for parent records (the publisher's own lock).
    pub owner_key: OwnerKey,
    /// Code hash for descriptors minted during publishing.
    pub code_hash: [u8; 32],
}

impl WriteContext {
    /// Creates a write context.
    #[must_use]
    pub const fn new(owner_key: OwnerKey, code_hash: [u8; 32]) -> Self {
        Self {
            owner_key,
            code_hash,
        }
    }
}

/// Receipt for a published content object.
#[derive(Debug, Clone)]
pub struct PublishReceipt {
    /// Id of the parent record.
    pub id: RecordId,
    /// Binding key of the segment set; `None` for inline content.
    pub binding_key: Option<BindingKey>,
    /// Number of segment records written.
    pub segments: usize,
    /// Content length in bytes.
    pub bytes: usize,
}

/// Publishes content to the ledger, choosing the storage shape.
///
/// Small content is stored literally in the parent record with an
/// unmarked content type. Larger content is segmented: the parent record
/// is created first, carrying the content digest and the marked type,
/// then one segment record per chunk is written sequentially in index
/// order. There is no atomic multi-record commit - a failed segment write
/// surfaces immediately and previously written segments stay, a partial
/// state the read-path validations detect.
pub struct ContentPublisher {
    ledger: Arc<dyn LedgerStore>,
    writer: SegmentWriter,
    marker: TypeMarker,
    config: StoreConfig,
}

impl ContentPublisher {
    /// Creates a publisher over the given ledger.
    ///
    /// # Errors
    ///
    /// Returns [`StoreError::InvalidConfig`] if the configuration fails
    /// validation.
    pub fn new(ledger: Arc<dyn LedgerStore>, config: StoreConfig) -> StoreResult<Self> {
        config.validate()?;
        Ok(Self {
            writer: SegmentWriter::new(ledger.clone()),
            marker: TypeMarker::new(config.marker_suffix.clone()),
            ledger,
            config,
        })
    }

    /// Publishes content, picking inline or segmented storage by the
    /// configured inline limit.
    ///
    /// # Errors
    ///
    /// See [`publish_inline`](Self::publish_inline) and
    /// [`publish_segmented`](Self::publish_segmented).
    pub fn publish(
        &self,
        content_type: &str,
        content: &[u8],
        ctx: &WriteContext,
    ) -> StoreResult<PublishReceipt> {
        if content.len() <= self.config.inline_limit {
            self.publish_inline(content_type, content, ctx)
        } else {
            self.publish_segmented(content_type, content, ctx)
        }
    }

    /// Publishes content literally inside the parent record.
    ///
    /// # Errors
    ///
    /// - [`StoreError::InvalidContent`] if `content_type` already carries
    ///   the marker suffix
    /// - [`StoreError::Ledger`] if the write fails
    pub fn publish_inline(
        &self,
        content_type: &str,
        content: &[u8],
        ctx: &WriteContext,
    ) -> StoreResult<PublishReceipt> {
        self.check_unmarked(content_type)?;

        let descriptor = TypeDescriptor::with_random_args(ctx.code_hash);
        let envelope = MediaEnvelope::new(content_type, content.to_vec());
        self.ledger.create_record(CreateRecord::addressable(
            ctx.owner_key,
            descriptor,
            envelope.encode()?,
        ))?;

        let id = descriptor.record_id();
        info!(id = %id, bytes = content.len(), content_type, "published inline content");
        Ok(PublishReceipt {
            id,
            binding_key: None,
            segments: 0,
            bytes: content.len(),
        })
    }

    /// Publishes content as a parent record plus segment records.
    ///
    /// The parent carries the content digest and the marked type; the
    /// segments are written afterwards, sequentially in index order.
    ///
    /// # Errors
    ///
    /// - [`StoreError::InvalidContent`] for empty content (a zero-segment
    ///   object would be unlocatable on read) or an already-marked type
    /// - [`StoreError::SizeExceeded`] if the content needs more than 256
    ///   segments at the configured segment size
    /// - [`StoreError::Ledger`] if any write fails; earlier segments stay
    pub fn publish_segmented(
        &self,
        content_type: &str,
        content: &[u8],
        ctx: &WriteContext,
    ) -> StoreResult<PublishReceipt> {
        self.check_unmarked(content_type)?;
        if content.is_empty() {
            return Err(StoreError::invalid_content(
                "empty content cannot be segmented",
            ));
        }

        let segments = chunk_content(content, self.config.segment_size)?;

        let descriptor = TypeDescriptor::with_random_args(ctx.code_hash);
        let digest = ContentDigest::compute(content);
        let envelope = MediaEnvelope::new(
            self.marker.mark(content_type),
            digest.as_bytes().to_vec(),
        );
        self.ledger.create_record(CreateRecord::addressable(
            ctx.owner_key,
            descriptor,
            envelope.encode()?,
        ))?;

        let key = BindingKey::derive(&descriptor);
        debug!(
            id = %descriptor.record_id(),
            key = %key,
            segments = segments.len(),
            segment_size = self.config.segment_size,
            "writing segment records"
        );
        for segment in &segments {
            self.writer.write(&key, segment)?;
        }

        let id = descriptor.record_id();
        info!(
            id = %id,
            bytes = content.len(),
            segments = segments.len(),
            content_type,
            "published segmented content"
        );
        Ok(PublishReceipt {
            id,
            binding_key: Some(key),
            segments: segments.len(),
            bytes: content.len(),
        })
    }

    fn check_unmarked(&self, content_type: &str) -> StoreResult<()> {
        if self.marker.is_marked(content_type) {
            return Err(StoreError::invalid_content(format!(
                "content type already carries the marker suffix: {content_type}"
            )));
        }
        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::resolver::ContentResolver;
    use splice_ledger::InMemoryLedger;

    fn setup(config: StoreConfig) -> (Arc<InMemoryLedger>, ContentPublisher, ContentResolver) {
        let ledger = Arc::new(InMemoryLedger::new());
        let publisher = ContentPublisher::new(ledger.clone(), config.clone()).unwrap();
        let resolver = ContentResolver::new(ledger.clone(), &config);
        (ledger, publisher, resolver)
    }

    fn ctx() -> WriteContext {
        WriteContext::new(OwnerKey::from_bytes([0xA0; 32]), [0xC0; 32])
    }

    #[test]
    fn small_content_goes_inline() {
        let (ledger, publisher, resolver) = setup(StoreConfig::default());
        let receipt = publisher.publish("image/png", &[1, 2, 3], &ctx()).unwrap();

        assert!(receipt.binding_key.is_none());
        assert_eq!(receipt.segments, 0);
        assert_eq!(ledger.record_count(), 1);

        let resolved = resolver.resolve(&receipt.id).unwrap();
        assert_eq!(resolved.content, vec![1, 2, 3]);
        assert_eq!(resolved.content_type, "image/png");
    }

    #[test]
    fn large_content_is_segmented() {
        let config = StoreConfig::default()
            .segment_size(10_000)
            .inline_limit(10_000);
        let (ledger, publisher, resolver) = setup(config);

        let content: Vec<u8> = (0..25_000u32).map(|i| (i % 251) as u8).collect();
        let receipt = publisher.publish("video/mp4", &content, &ctx()).unwrap();

        assert!(receipt.binding_key.is_some());
        assert_eq!(receipt.segments, 3);
        // Parent plus three segments.
        assert_eq!(ledger.record_count(), 4);

        let resolved = resolver.resolve(&receipt.id).unwrap();
        assert_eq!(resolved.content, content);
        assert_eq!(resolved.content_type, "video/mp4");
    }

    #[test]
    fn segment_records_carry_binding_key_and_index() {
        let config = StoreConfig::default().segment_size(10).inline_limit(0);
        let (ledger, publisher, _) = setup(config);

        let receipt = publisher
            .publish("audio/ogg", &[5u8; 25], &ctx())
            .unwrap();
        let key = receipt.binding_key.unwrap();

        let mut records = ledger.records_by_owner(&key.owner_key()).unwrap();
        records.sort_by_key(|r| r.data[0]);
        assert_eq!(records.len(), 3);
        assert_eq!(records[0].data[0], 0);
        assert_eq!(records[1].data[0], 1);
        assert_eq!(records[2].data[0], 2);
        assert_eq!(records[2].data.len(), 6); // index byte + 5 payload bytes
    }

    #[test]
    fn empty_content_cannot_be_segmented() {
        let (_, publisher, _) = setup(StoreConfig::default());
        let result = publisher.publish_segmented("video/mp4", &[], &ctx());
        assert!(matches!(result, Err(StoreError::InvalidContent { .. })));
    }

    #[test]
    fn empty_content_publishes_inline() {
        let (_, publisher, resolver) = setup(StoreConfig::default());
        let receipt = publisher.publish("text/plain", &[], &ctx()).unwrap();
        let resolved = resolver.resolve(&receipt.id).unwrap();
        assert!(resolved.content.is_empty());
    }

    #[test]
    fn premarked_type_rejected() {
        let (_, publisher, _) = setup(StoreConfig::default());
        let result = publisher.publish("video/mp4+splice", &[1], &ctx());
        assert!(matches!(result, Err(StoreError::InvalidContent { .. })));
    }

    #[test]
    fn oversized_content_fails_before_any_write() {
        let config = StoreConfig::default().segment_size(4).inline_limit(0);
        let (ledger, publisher, _) = setup(config);

        let content = vec![0u8; 256 * 4 + 1];
        let result = publisher.publish("video/mp4", &content, &ctx());
        assert!(matches!(result, Err(StoreError::SizeExceeded { .. })));
        assert_eq!(ledger.record_count(), 0);
    }

    #[test]
    fn partial_write_is_visible_and_detected_on_read() {
        let config = StoreConfig::default().segment_size(10).inline_limit(0);
        let (ledger, publisher, resolver) = setup(config);

        // Parent plus two of five segments succeed.
        ledger.fail_writes_after(3);
        let content = vec![3u8; 50];
        let result = publisher.publish("video/mp4", &content, &ctx());
        assert!(matches!(result, Err(StoreError::Ledger(_))));

        ledger.clear_write_failures();
        assert_eq!(ledger.record_count(), 3);

        // Sequential writes leave a contiguous prefix, so the gap check
        // cannot fire; the digest verification catches the truncation.
        let parent = ledger
            .records_by_owner(&OwnerKey::from_bytes([0xA0; 32]))
            .unwrap();
        let id = parent[0].id().unwrap();
        let read = resolver.resolve(&id);
        assert!(
            matches!(read, Err(StoreError::DigestMismatch { .. })),
            "got {read:?}"
        );
    }

    #[test]
    fn invalid_config_rejected_at_construction() {
        let ledger = Arc::new(InMemoryLedger::new());
        let result = ContentPublisher::new(ledger, StoreConfig::default().segment_size(0));
        assert!(matches!(result, Err(StoreError::InvalidConfig { .. })));
    }
}
