//! # Splice Core
//!
//! Segmented content store core.
//!
//! Media payloads that exceed a single ledger record's size limit are split
//! into ordered segment records, each carrying a one-byte index prefix, and
//! bound to their parent record by a deterministic binding key. On read the
//! segments are located by that key, sorted, validated, and spliced back
//! into the original byte stream.
//!
//! This crate provides:
//! - Content chunking with an explicit 256-segment limit
//! - Binding-key derivation from a parent's type descriptor
//! - Segment writing and locating over a [`splice_ledger::LedgerStore`]
//! - Validated reassembly (contiguity, duplicates, digest)
//! - The content-type marker convention that signals segmented storage
//! - [`ContentResolver`] and [`ContentPublisher`] orchestration
//!
//! # Storage Shapes
//!
//! A parent record's envelope holds either the literal payload (unmarked
//! content type) or a 32-byte digest of it (content type carrying the
//! marker suffix). The marker is the **only** discriminator; payload length
//! or shape is never used to infer segmentation.

#![deny(unsafe_code)]
#![warn(missing_docs)]

mod binding;
mod config;
mod content_type;
mod digest;
mod envelope;
mod error;
mod publisher;
mod resolver;
pub mod segment;

pub use binding::BindingKey;
pub use config::StoreConfig;
pub use content_type::TypeMarker;
pub use digest::ContentDigest;
pub use envelope::MediaEnvelope;
pub use error::{StoreError, StoreResult};
pub use publisher::{ContentPublisher, PublishReceipt, WriteContext};
pub use resolver::{ContentResolver, ResolvedContent};
