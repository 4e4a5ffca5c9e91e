//! CLI command implementations.

pub mod inspect;
pub mod publish;
pub mod resolve;
pub mod verify;

use splice_ledger::RecordId;

/// Parses a record id argument (hex, optional `0x` prefix).
pub fn parse_id(raw: &str) -> Result<RecordId, Box<dyn std::error::Error>> {
    RecordId::from_hex(raw.trim())
        .ok_or_else(|| format!("invalid record id (expected 32 hex bytes): {raw}").into())
}
