//! Ledger store trait definition.

use crate::error::LedgerResult;
use crate::record::{CreateRecord, OwnerKey, Record, RecordHandle, RecordId};
use std::sync::Arc;

/// An append-only record store.
///
/// Ledger stores persist **opaque records**. They provide three operations:
/// create a record, fetch a record by id, and query records by owner key.
/// Splice owns all record data interpretation - stores do not understand
/// media envelopes or segment layouts.
///
/// # Invariants
///
/// - Records are immutable once created
/// - `record_by_id` returns exactly the record created with that descriptor,
///   or `None`
/// - `records_by_owner` has set semantics: no ordering guarantee, and the
///   result may be stale or partial relative to concurrent `create_record`
///   calls
/// - `create_record` may fail transiently ([`crate::LedgerError::Unavailable`]);
///   the store performs no retries
///
/// # Implementors
///
/// - [`crate::InMemoryLedger`] - For testing, with fault injection
/// - [`crate::FileLedger`] - For persistent storage
pub trait LedgerStore: Send + Sync {
    /// Persists one record.
    ///
    /// # Errors
    ///
    /// Returns an error if the store is unavailable, the write is rejected
    /// (e.g. duplicate id), or an I/O error occurs.
    fn create_record(&self, request: CreateRecord) -> LedgerResult<RecordHandle>;

    /// Fetches the record addressable by `id`, if any.
    ///
    /// # Errors
    ///
    /// Returns an error if the store is unavailable or the stored record
    /// fails validation.
    fn record_by_id(&self, id: &RecordId) -> LedgerResult<Option<Record>>;

    /// Returns every record whose owner key equals `key`.
    ///
    /// An empty result is not an error at this layer; callers decide what
    /// an empty set means.
    ///
    /// # Errors
    ///
    /// Returns an error if the store is unavailable or a stored record
    /// fails validation.
    fn records_by_owner(&self, key: &OwnerKey) -> LedgerResult<Vec<Record>>;
}

impl<T: LedgerStore + ?Sized> LedgerStore for Arc<T> {
    fn create_record(&self, request: CreateRecord) -> LedgerResult<RecordHandle> {
        (**self).create_record(request)
    }

    fn record_by_id(&self, id: &RecordId) -> LedgerResult<Option<Record>> {
        (**self).record_by_id(id)
    }

    fn records_by_owner(&self, key: &OwnerKey) -> LedgerResult<Vec<Record>> {
        (**self).records_by_owner(key)
    }
}
