//! Segment records: chunking, writing, locating, and reassembly.
//!
//! A segment record's data is `[1 byte: index][payload bytes]`. The index
//! is a single unsigned byte, so a parent has at most [`MAX_SEGMENTS`]
//! segments; this is a hard wire-format constraint shared with existing
//! stored data and must not be widened.

mod chunk;
mod locator;
mod reassemble;
mod writer;

pub use chunk::chunk_content;
pub use locator::SegmentLocator;
pub use reassemble::{reassemble, reassemble_verified};
pub use writer::SegmentWriter;

use bytes::Bytes;

/// Maximum number of segments per parent (single-byte index).
pub const MAX_SEGMENTS: usize = 256;

/// One ordered chunk of a segmented payload.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Segment {
    /// Position of this chunk in the original content, starting at 0.
    pub index: u8,
    /// Chunk payload. Never empty for a stored segment.
    pub payload: Bytes,
}

impl Segment {
    /// Creates a segment.
    #[must_use]
    pub fn new(index: u8, payload: Bytes) -> Self {
        Self { index, payload }
    }

    /// Encodes the segment's record data: `[index] || payload`.
    #[must_use]
    pub fn encode(&self) -> Vec<u8> {
        let mut buf = Vec::with_capacity(1 + self.payload.len());
        buf.push(self.index);
        buf.extend_from_slice(&self.payload);
        buf
    }
}
