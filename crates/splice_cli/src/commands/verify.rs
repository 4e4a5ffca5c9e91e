//! Verify command implementation.

use splice_core::{ContentResolver, StoreConfig};
use splice_ledger::FileLedger;
use std::path::Path;
use std::sync::Arc;

/// Runs the verify command.
///
/// Resolves the record with full validation (contiguity, duplicates,
/// digest) and reports the outcome family instead of the content.
pub fn run(ledger_dir: &Path, raw_id: &str) -> Result<(), Box<dyn std::error::Error>> {
    let id = super::parse_id(raw_id)?;

    let ledger = Arc::new(FileLedger::open(ledger_dir)?);
    let resolver = ContentResolver::new(ledger, &StoreConfig::default());

    match resolver.resolve(&id) {
        Ok(resolved) => {
            println!(
                "✓ Record {} verified: {} bytes, {}",
                id,
                resolved.content.len(),
                resolved.content_type
            );
            Ok(())
        }
        Err(err) => {
            let family = if err.is_not_found() {
                "not found"
            } else if err.is_incomplete() {
                "incomplete"
            } else if err.is_corrupt() {
                "corrupt"
            } else {
                "ledger failure"
            };
            println!("✗ Record {id} failed verification ({family}): {err}");
            Err("Verification failed".into())
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use splice_core::{ContentPublisher, StoreConfig, WriteContext};
    use splice_ledger::OwnerKey;
    use tempfile::tempdir;

    #[test]
    fn verify_published_record_succeeds() {
        let dir = tempdir().unwrap();
        let ledger = Arc::new(FileLedger::open(dir.path()).unwrap());
        let publisher = ContentPublisher::new(
            ledger,
            StoreConfig::default().segment_size(64).inline_limit(0),
        )
        .unwrap();
        let ctx = WriteContext::new(OwnerKey::from_bytes([1; 32]), [2; 32]);
        let receipt = publisher
            .publish("application/octet-stream", &[7u8; 500], &ctx)
            .unwrap();

        assert!(run(dir.path(), &receipt.id.to_hex()).is_ok());
    }

    #[test]
    fn verify_unknown_record_fails() {
        let dir = tempdir().unwrap();
        let id = "11".repeat(32);
        assert!(run(dir.path(), &id).is_err());
    }
}
