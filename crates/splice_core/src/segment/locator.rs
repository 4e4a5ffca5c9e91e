//! Segment location.

use crate::binding::BindingKey;
use crate::error::{StoreError, StoreResult};
use splice_ledger::{LedgerStore, Record};
use std::sync::Arc;
use tracing::debug;

/// Locates the segment records bound to a parent.
///
/// Returns whatever set the ledger knows at query time, unordered. The
/// ledger guarantees neither a consistency window nor completeness: a
/// result may be stale or partial when queried concurrently with writes.
/// Ordering and validation happen in reassembly.
pub struct SegmentLocator {
    ledger: Arc<dyn LedgerStore>,
}

impl SegmentLocator {
    /// Creates a locator over the given ledger.
    #[must_use]
    pub fn new(ledger: Arc<dyn LedgerStore>) -> Self {
        Self { ledger }
    }

    /// Returns every record stored under the binding key.
    ///
    /// # Errors
    ///
    /// - [`StoreError::NoSegments`] if the set is empty - the primary
    ///   detectable failure for a segmented parent with no children
    /// - [`StoreError::Ledger`] if the ledger query fails
    pub fn locate(&self, key: &BindingKey) -> StoreResult<Vec<Record>> {
        let records = self.ledger.records_by_owner(&key.owner_key())?;
        debug!(key = %key, count = records.len(), "located segment records");
        if records.is_empty() {
            return Err(StoreError::NoSegments { key: *key });
        }
        Ok(records)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use splice_ledger::{CreateRecord, InMemoryLedger, OwnerKey};

    #[test]
    fn locate_returns_all_matching_records() {
        let ledger = Arc::new(InMemoryLedger::new());
        let key = BindingKey::from_bytes([5; 32]);
        for index in 0..3u8 {
            ledger
                .create_record(CreateRecord::owned(key.owner_key(), vec![index, 0xAA]))
                .unwrap();
        }
        // A record under a different owner must not appear.
        ledger
            .create_record(CreateRecord::owned(OwnerKey::from_bytes([6; 32]), vec![0]))
            .unwrap();

        let locator = SegmentLocator::new(ledger);
        assert_eq!(locator.locate(&key).unwrap().len(), 3);
    }

    #[test]
    fn empty_set_is_no_segments() {
        let ledger = Arc::new(InMemoryLedger::new());
        let locator = SegmentLocator::new(ledger);
        let key = BindingKey::from_bytes([5; 32]);
        let result = locator.locate(&key);
        assert!(matches!(result, Err(StoreError::NoSegments { .. })));
    }

    #[test]
    fn ledger_failure_propagates() {
        let ledger = Arc::new(InMemoryLedger::new());
        ledger.set_unavailable(true);
        let locator = SegmentLocator::new(ledger);
        let result = locator.locate(&BindingKey::from_bytes([5; 32]));
        assert!(matches!(result, Err(StoreError::Ledger(_))));
    }
}
