//! Resolve command implementation.

use splice_core::{ContentResolver, StoreConfig};
use splice_ledger::FileLedger;
use std::io::Write;
use std::path::Path;
use std::sync::Arc;

/// Runs the resolve command.
pub fn run(
    ledger_dir: &Path,
    raw_id: &str,
    out: Option<&Path>,
) -> Result<(), Box<dyn std::error::Error>> {
    let id = super::parse_id(raw_id)?;

    let ledger = Arc::new(FileLedger::open(ledger_dir)?);
    let resolver = ContentResolver::new(ledger, &StoreConfig::default());
    let resolved = resolver.resolve(&id)?;

    match out {
        Some(path) => {
            std::fs::write(path, &resolved.content)?;
            println!(
                "Resolved {} bytes ({}) to {}",
                resolved.content.len(),
                resolved.content_type,
                path.display()
            );
        }
        None => {
            std::io::stdout().write_all(&resolved.content)?;
        }
    }

    Ok(())
}
