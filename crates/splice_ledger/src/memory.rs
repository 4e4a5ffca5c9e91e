//! In-memory ledger store for testing.

use crate::error::{LedgerError, LedgerResult};
use crate::record::{CreateRecord, OwnerKey, Record, RecordHandle, RecordId};
use crate::store::LedgerStore;
use parking_lot::RwLock;
use std::collections::HashMap;

#[derive(Debug, Default)]
struct State {
    records: Vec<Record>,
    by_id: HashMap<RecordId, usize>,
    by_owner: HashMap<OwnerKey, Vec<usize>>,
    unavailable: bool,
    writes_until_failure: Option<u64>,
}

/// An in-memory ledger store.
///
/// Stores all records in memory. Suitable for unit tests, integration
/// tests, and ephemeral ledgers that don't need persistence.
///
/// # Fault Injection
///
/// - [`set_unavailable`](Self::set_unavailable) makes every operation fail
///   with [`LedgerError::Unavailable`]
/// - [`fail_writes_after`](Self::fail_writes_after) lets the next `n`
///   writes succeed and fails the rest, for partial-write scenarios
///
/// # Thread Safety
///
/// This store is thread-safe and can be shared across threads.
///
/// # Example
///
/// ```rust
/// use splice_ledger::{CreateRecord, InMemoryLedger, LedgerStore, OwnerKey};
///
/// let ledger = InMemoryLedger::new();
/// let owner = OwnerKey::from_bytes([1u8; 32]);
/// ledger
///     .create_record(CreateRecord::owned(owner, vec![0xCA, 0xFE]))
///     .unwrap();
/// assert_eq!(ledger.record_count(), 1);
/// ```
#[derive(Debug, Default)]
pub struct InMemoryLedger {
    state: RwLock<State>,
}

impl InMemoryLedger {
    /// Creates a new empty in-memory ledger.
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    /// Returns the number of records in the ledger.
    #[must_use]
    pub fn record_count(&self) -> usize {
        self.state.read().records.len()
    }

    /// Makes every operation fail with [`LedgerError::Unavailable`] until
    /// called again with `false`.
    pub fn set_unavailable(&self, unavailable: bool) {
        self.state.write().unavailable = unavailable;
    }

    /// Lets the next `n` writes succeed; every write after that fails with
    /// [`LedgerError::Unavailable`]. Reads are unaffected.
    pub fn fail_writes_after(&self, n: u64) {
        self.state.write().writes_until_failure = Some(n);
    }

    /// Clears any pending write-failure schedule.
    pub fn clear_write_failures(&self) {
        self.state.write().writes_until_failure = None;
    }
}

impl LedgerStore for InMemoryLedger {
    fn create_record(&self, request: CreateRecord) -> LedgerResult<RecordHandle> {
        let mut state = self.state.write();
        if state.unavailable {
            return Err(LedgerError::unavailable("ledger marked unavailable"));
        }
        if let Some(remaining) = state.writes_until_failure {
            if remaining == 0 {
                return Err(LedgerError::unavailable("injected write failure"));
            }
            state.writes_until_failure = Some(remaining - 1);
        }

        let id = request.type_descriptor.as_ref().map(|d| d.record_id());
        if let Some(id) = id {
            if state.by_id.contains_key(&id) {
                return Err(LedgerError::rejected(format!(
                    "record id already exists: {id}"
                )));
            }
        }

        let record = Record {
            owner_key: request.owner_key,
            type_descriptor: request.type_descriptor,
            data: request.data,
        };
        let index = state.records.len();
        if let Some(id) = id {
            state.by_id.insert(id, index);
        }
        state
            .by_owner
            .entry(record.owner_key)
            .or_default()
            .push(index);
        let owner_key = record.owner_key;
        state.records.push(record);

        Ok(RecordHandle { id, owner_key })
    }

    fn record_by_id(&self, id: &RecordId) -> LedgerResult<Option<Record>> {
        let state = self.state.read();
        if state.unavailable {
            return Err(LedgerError::unavailable("ledger marked unavailable"));
        }
        Ok(state
            .by_id
            .get(id)
            .map(|&index| state.records[index].clone()))
    }

    fn records_by_owner(&self, key: &OwnerKey) -> LedgerResult<Vec<Record>> {
        let state = self.state.read();
        if state.unavailable {
            return Err(LedgerError::unavailable("ledger marked unavailable"));
        }
        Ok(state
            .by_owner
            .get(key)
            .map(|indices| {
                indices
                    .iter()
                    .map(|&index| state.records[index].clone())
                    .collect()
            })
            .unwrap_or_default())
    }
}
