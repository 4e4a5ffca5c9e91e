//! Inspect command implementation.

use serde::Serialize;
use splice_core::{BindingKey, MediaEnvelope, StoreConfig, TypeMarker};
use splice_ledger::{FileLedger, LedgerStore};
use std::path::Path;

/// Inspection report for one parent record.
#[derive(Debug, Serialize)]
struct InspectReport {
    id: String,
    content_type: String,
    segmented: bool,
    served_content_type: String,
    /// Digest hex for segmented records, inline byte count otherwise.
    content: ContentShape,
    binding_key: Option<String>,
    segments_found: usize,
    segment_indices: Vec<u8>,
}

#[derive(Debug, Serialize)]
#[serde(rename_all = "snake_case")]
enum ContentShape {
    Inline { bytes: usize },
    Digest { hex: String },
}

/// Runs the inspect command.
pub fn run(ledger_dir: &Path, raw_id: &str, format: &str) -> Result<(), Box<dyn std::error::Error>> {
    let id = super::parse_id(raw_id)?;

    let ledger = FileLedger::open(ledger_dir)?;
    let record = ledger
        .record_by_id(&id)?
        .ok_or_else(|| format!("record not found: {id}"))?;
    let envelope = MediaEnvelope::decode(&record.data)?;

    let marker = TypeMarker::new(StoreConfig::default().marker_suffix);
    let segmented = marker.is_marked(&envelope.content_type);

    let (binding_key, segments_found, segment_indices, content) = if segmented {
        let descriptor = record
            .type_descriptor
            .ok_or("segmented parent record has no type descriptor")?;
        let key = BindingKey::derive(&descriptor);
        let mut indices: Vec<u8> = ledger
            .records_by_owner(&key.owner_key())?
            .iter()
            .filter(|r| !r.data.is_empty())
            .map(|r| r.data[0])
            .collect();
        indices.sort_unstable();
        (
            Some(key.to_hex()),
            indices.len(),
            indices,
            ContentShape::Digest {
                hex: hex::encode(&envelope.content),
            },
        )
    } else {
        (
            None,
            0,
            Vec::new(),
            ContentShape::Inline {
                bytes: envelope.content.len(),
            },
        )
    };

    let report = InspectReport {
        id: id.to_hex(),
        served_content_type: marker.unmark(&envelope.content_type),
        content_type: envelope.content_type,
        segmented,
        content,
        binding_key,
        segments_found,
        segment_indices,
    };

    match format {
        "json" => println!("{}", serde_json::to_string_pretty(&report)?),
        _ => {
            println!("Record {}", report.id);
            println!("  content type:  {}", report.content_type);
            println!("  served as:     {}", report.served_content_type);
            match &report.content {
                ContentShape::Inline { bytes } => println!("  storage:       inline ({bytes} bytes)"),
                ContentShape::Digest { hex } => println!("  digest:        {hex}"),
            }
            if let Some(key) = &report.binding_key {
                println!("  binding key:   {key}");
                println!(
                    "  segments:      {} found, indices {:?}",
                    report.segments_found, report.segment_indices
                );
            }
        }
    }

    Ok(())
}
