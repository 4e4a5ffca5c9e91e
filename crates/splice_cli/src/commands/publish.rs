//! Publish command implementation.

use serde::Serialize;
use splice_core::{ContentPublisher, StoreConfig, WriteContext};
use splice_ledger::{FileLedger, OwnerKey};
use std::path::Path;
use std::sync::Arc;

/// Code hash stamped into descriptors minted by the CLI.
const CLI_CODE_HASH: [u8; 32] = [0x5C; 32];

/// Publish report, printable as text or JSON.
#[derive(Debug, Serialize)]
struct PublishReport {
    id: String,
    binding_key: Option<String>,
    segments: usize,
    bytes: usize,
    content_type: String,
}

/// Runs the publish command.
pub fn run(
    ledger_dir: &Path,
    file: &Path,
    content_type: &str,
    segment_size: usize,
    inline_limit: usize,
    format: &str,
) -> Result<(), Box<dyn std::error::Error>> {
    let content = std::fs::read(file)?;

    let ledger = Arc::new(FileLedger::open(ledger_dir)?);
    let config = StoreConfig::new()
        .segment_size(segment_size)
        .inline_limit(inline_limit);
    let publisher = ContentPublisher::new(ledger, config)?;

    // The CLI has no wallet; each run publishes under a fresh random lock.
    let mut owner = [0u8; 32];
    rand::Rng::fill(&mut rand::thread_rng(), &mut owner);
    let ctx = WriteContext::new(OwnerKey::from_bytes(owner), CLI_CODE_HASH);

    let receipt = publisher.publish(content_type, &content, &ctx)?;
    let report = PublishReport {
        id: receipt.id.to_hex(),
        binding_key: receipt.binding_key.map(|key| key.to_hex()),
        segments: receipt.segments,
        bytes: receipt.bytes,
        content_type: content_type.to_string(),
    };

    match format {
        "json" => println!("{}", serde_json::to_string_pretty(&report)?),
        _ => {
            println!("Published {} ({} bytes)", file.display(), report.bytes);
            println!("  id:           {}", report.id);
            match &report.binding_key {
                Some(key) => {
                    println!("  binding key:  {key}");
                    println!("  segments:     {}", report.segments);
                }
                None => println!("  storage:      inline"),
            }
        }
    }

    Ok(())
}
