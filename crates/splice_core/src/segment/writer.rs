//! Segment writing.

use super::Segment;
use crate::binding::BindingKey;
use crate::error::StoreResult;
use splice_ledger::{CreateRecord, LedgerStore, RecordHandle};
use std::sync::Arc;
use tracing::debug;

/// Writes segment records to the ledger.
///
/// Each [`write`](Self::write) call is one independent unit of work: it
/// builds a single record whose data is `[index] || payload` and whose
/// owner key is the binding key, and delegates persistence to the ledger.
/// The writer imposes no ordering and performs no retries or rollback - a
/// failed write of segment `k` leaves segments `0..k-1` in place, a
/// recoverable-but-visible partial state the caller must handle.
pub struct SegmentWriter {
    ledger: Arc<dyn LedgerStore>,
}

impl SegmentWriter {
    /// Creates a writer over the given ledger.
    #[must_use]
    pub fn new(ledger: Arc<dyn LedgerStore>) -> Self {
        Self { ledger }
    }

    /// Persists one segment under the binding key.
    ///
    /// # Errors
    ///
    /// Returns [`crate::StoreError::Ledger`] if the ledger write fails.
    /// Nothing written earlier is rolled back.
    pub fn write(&self, key: &BindingKey, segment: &Segment) -> StoreResult<RecordHandle> {
        debug!(
            key = %key,
            index = segment.index,
            payload_len = segment.payload.len(),
            "writing segment record"
        );
        let handle = self
            .ledger
            .create_record(CreateRecord::owned(key.owner_key(), segment.encode()))?;
        Ok(handle)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use bytes::Bytes;
    use splice_ledger::InMemoryLedger;

    #[test]
    fn write_stores_indexed_record() {
        let ledger = Arc::new(InMemoryLedger::new());
        let writer = SegmentWriter::new(ledger.clone());
        let key = BindingKey::from_bytes([3; 32]);

        writer
            .write(&key, &Segment::new(2, Bytes::from_static(b"xyz")))
            .unwrap();

        let records = ledger.records_by_owner(&key.owner_key()).unwrap();
        assert_eq!(records.len(), 1);
        assert_eq!(records[0].data, vec![2, b'x', b'y', b'z']);
        assert!(records[0].type_descriptor.is_none());
    }

    #[test]
    fn failed_write_leaves_earlier_segments() {
        let ledger = Arc::new(InMemoryLedger::new());
        let writer = SegmentWriter::new(ledger.clone());
        let key = BindingKey::from_bytes([3; 32]);

        ledger.fail_writes_after(2);
        writer
            .write(&key, &Segment::new(0, Bytes::from_static(b"a")))
            .unwrap();
        writer
            .write(&key, &Segment::new(1, Bytes::from_static(b"b")))
            .unwrap();
        let third = writer.write(&key, &Segment::new(2, Bytes::from_static(b"c")));
        assert!(third.is_err());

        ledger.clear_write_failures();
        assert_eq!(ledger.records_by_owner(&key.owner_key()).unwrap().len(), 2);
    }
}
