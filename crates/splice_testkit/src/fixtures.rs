//! Test fixtures and ledger helpers.
//!
//! Provides convenience wrappers for setting up test ledgers with a
//! publisher and resolver already wired up.

use splice_core::{
    ContentPublisher, ContentResolver, PublishReceipt, StoreConfig, StoreResult, WriteContext,
};
use splice_ledger::{FileLedger, InMemoryLedger, LedgerStore, OwnerKey};
use std::sync::Arc;
use tempfile::TempDir;

/// Owner key used for parent records in tests.
pub const TEST_OWNER: OwnerKey = OwnerKey::from_bytes([0xA1; 32]);
/// Descriptor code hash used in tests.
pub const TEST_CODE_HASH: [u8; 32] = [0xC1; 32];

/// A test ledger with publisher and resolver, and automatic cleanup.
pub struct TestLedger {
    /// The underlying store, shared with publisher and resolver.
    pub ledger: Arc<dyn LedgerStore>,
    /// Configuration used by both ends.
    pub config: StoreConfig,
    /// The temporary directory (kept alive to prevent cleanup).
    _temp_dir: Option<TempDir>,
}

impl TestLedger {
    /// Creates an in-memory test ledger with default configuration.
    #[must_use]
    pub fn memory() -> Self {
        Self::memory_with(StoreConfig::default())
    }

    /// Creates an in-memory test ledger with the given configuration.
    #[must_use]
    pub fn memory_with(config: StoreConfig) -> Self {
        Self {
            ledger: Arc::new(InMemoryLedger::new()),
            config,
            _temp_dir: None,
        }
    }

    /// Creates a file-backed test ledger in a temporary directory.
    #[must_use]
    pub fn file_with(config: StoreConfig) -> Self {
        let temp_dir = TempDir::new().expect("Failed to create temp directory");
        let ledger = FileLedger::open(temp_dir.path()).expect("Failed to open file ledger");
        Self {
            ledger: Arc::new(ledger),
            config,
            _temp_dir: Some(temp_dir),
        }
    }

    /// Returns a publisher over this ledger.
    #[must_use]
    pub fn publisher(&self) -> ContentPublisher {
        ContentPublisher::new(self.ledger.clone(), self.config.clone())
            .expect("Test configuration must be valid")
    }

    /// Returns a resolver over this ledger.
    #[must_use]
    pub fn resolver(&self) -> ContentResolver {
        ContentResolver::new(self.ledger.clone(), &self.config)
    }

    /// Returns the write context used by [`publish`](Self::publish).
    #[must_use]
    pub fn write_context(&self) -> WriteContext {
        WriteContext::new(TEST_OWNER, TEST_CODE_HASH)
    }

    /// Publishes content with the fixture's context.
    ///
    /// # Errors
    ///
    /// Propagates publisher errors.
    pub fn publish(&self, content_type: &str, content: &[u8]) -> StoreResult<PublishReceipt> {
        self.publisher()
            .publish(content_type, content, &self.write_context())
    }
}

/// Runs a test with a temporary in-memory ledger.
///
/// # Example
///
/// ```rust
/// use splice_testkit::fixtures::with_ledger;
///
/// with_ledger(|ledger| {
///     let receipt = ledger.publish("text/plain", b"hi").unwrap();
///     let resolved = ledger.resolver().resolve(&receipt.id).unwrap();
///     assert_eq!(resolved.content, b"hi");
/// });
/// ```
pub fn with_ledger<F, R>(f: F) -> R
where
    F: FnOnce(&TestLedger) -> R,
{
    let ledger = TestLedger::memory();
    f(&ledger)
}
