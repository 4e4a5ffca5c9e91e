//! # Splice Serve
//!
//! Transport-agnostic media serving layer for splice.
//!
//! This crate maps content resolution outcomes to HTTP-equivalent
//! responses without binding to any particular HTTP framework: an outer
//! server exposes an endpoint (e.g. `GET /media/{id}`) and forwards the
//! raw id to [`MediaGateway::serve`], which returns a status code,
//! headers, and body.
//!
//! # Status Mapping
//!
//! | outcome                          | status |
//! |----------------------------------|--------|
//! | malformed or empty id            | 400    |
//! | parent or segments missing       | 404    |
//! | segment set incomplete           | 503    |
//! | corrupt content                  | 500    |
//! | ledger failure                   | 502    |
//! | success                          | 200    |
//!
//! Missing and damaged content are deliberately distinguishable so a
//! client can tell "retry later" from "gone wrong".

#![deny(unsafe_code)]
#![warn(missing_docs)]

mod config;
mod error;
mod gateway;

pub use config::ServeConfig;
pub use error::{ServeError, ServeResult};
pub use gateway::{MediaGateway, MediaResponse};
