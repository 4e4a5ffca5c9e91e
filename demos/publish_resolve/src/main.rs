//! Minimal end-to-end demo: publish a buffer to an in-memory ledger and
//! resolve it back.

use rand::RngCore;
use splice_core::{ContentPublisher, ContentResolver, StoreConfig, WriteContext};
use splice_ledger::{InMemoryLedger, OwnerKey};
use std::sync::Arc;

fn main() -> Result<(), Box<dyn std::error::Error>> {
    tracing_subscriber::fmt()
        .with_env_filter(
            tracing_subscriber::EnvFilter::try_from_default_env()
                .unwrap_or_else(|_| tracing_subscriber::EnvFilter::new("info")),
        )
        .init();

    let config = StoreConfig::default();
    let ledger = Arc::new(InMemoryLedger::new());
    let publisher = ContentPublisher::new(ledger.clone(), config.clone())?;
    let resolver = ContentResolver::new(ledger.clone(), &config);

    // 25 KB of random content: large enough to be segmented.
    let mut content = vec![0u8; 25_000];
    rand::thread_rng().fill_bytes(&mut content);

    let ctx = WriteContext::new(OwnerKey::from_bytes([0xDE; 32]), [0xAD; 32]);
    let receipt = publisher.publish("video/mp4", &content, &ctx)?;

    println!("published {} bytes as {}", receipt.bytes, receipt.id);
    println!("  segments:    {}", receipt.segments);
    if let Some(key) = receipt.binding_key {
        println!("  binding key: {key}");
    }
    println!("  records:     {}", ledger.record_count());

    let resolved = resolver.resolve(&receipt.id)?;
    assert_eq!(resolved.content, content);
    println!(
        "resolved {} bytes of {} - round trip ok",
        resolved.content.len(),
        resolved.content_type
    );

    Ok(())
}
