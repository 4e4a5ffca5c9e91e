//! # Splice Ledger
//!
//! Record model and ledger-store abstraction for splice.
//!
//! This crate provides the lowest-level persistence abstraction for the
//! segmented content store. Ledger stores are **append-only record stores**:
//! they persist opaque records, look them up by id, and query them by owner
//! key. The store does not interpret record data - splice_core owns all
//! payload format interpretation.
//!
//! ## Design Principles
//!
//! - Records are immutable once written
//! - Owner-key queries have set semantics: no ordering guarantee, and the
//!   result may be stale or partial relative to concurrent writes
//! - Stores must be `Send + Sync` for concurrent access
//!
//! ## Available Stores
//!
//! - [`InMemoryLedger`] - For testing, with fault injection
//! - [`FileLedger`] - One file per record, for persistent storage
//!
//! ## Example
//!
//! ```rust
//! use splice_ledger::{CreateRecord, InMemoryLedger, LedgerStore, OwnerKey};
//!
//! let ledger = InMemoryLedger::new();
//! let owner = OwnerKey::from_bytes([7u8; 32]);
//! ledger
//!     .create_record(CreateRecord::owned(owner, vec![0, 1, 2]))
//!     .unwrap();
//! let records = ledger.records_by_owner(&owner).unwrap();
//! assert_eq!(records.len(), 1);
//! ```

#![deny(unsafe_code)]
#![warn(missing_docs)]

mod error;
mod file;
mod memory;
mod record;
mod store;

pub use error::{LedgerError, LedgerResult};
pub use file::FileLedger;
pub use memory::InMemoryLedger;
pub use record::{CreateRecord, OwnerKey, Record, RecordHandle, RecordId, TypeDescriptor};
pub use store::LedgerStore;
