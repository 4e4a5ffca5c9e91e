//! # Splice Testkit
//!
//! Test utilities for splice.
//!
//! This crate provides:
//! - Test fixtures and ledger helpers
//! - Property-based test generators using proptest
//! - Cross-crate integration tests (under `tests/`)

#![deny(unsafe_code)]
#![warn(missing_docs)]

pub mod fixtures;
pub mod generators;

/// Prelude module for convenient imports
pub mod prelude {
    pub use crate::fixtures::{with_ledger, TestLedger};
    pub use crate::generators::*;
}
