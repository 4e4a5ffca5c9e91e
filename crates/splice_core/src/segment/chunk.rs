//! Content chunking.

use super::{Segment, MAX_SEGMENTS};
use crate::error::{StoreError, StoreResult};
use bytes::Bytes;

/// Splits `content` into ordered, index-tagged segments of at most
/// `segment_size` bytes each.
///
/// Pure transform: indices run `0..n-1` with no gaps, every payload is at
/// most `segment_size` bytes, and concatenating the payloads in index
/// order reconstructs `content` exactly. Empty content yields zero
/// segments.
///
/// # Errors
///
/// - [`StoreError::InvalidConfig`] if `segment_size` is zero
/// - [`StoreError::SizeExceeded`] if more than [`MAX_SEGMENTS`] segments
///   would be needed; checked up front, the single-byte index never wraps
pub fn chunk_content(content: &[u8], segment_size: usize) -> StoreResult<Vec<Segment>> {
    if segment_size == 0 {
        return Err(StoreError::invalid_config("segment size must be positive"));
    }

    let count = content.len().div_ceil(segment_size);
    if count > MAX_SEGMENTS {
        return Err(StoreError::SizeExceeded {
            len: content.len(),
            segment_size,
            max: MAX_SEGMENTS * segment_size,
        });
    }

    Ok(content
        .chunks(segment_size)
        .enumerate()
        .map(|(index, chunk)| Segment::new(index as u8, Bytes::copy_from_slice(chunk)))
        .collect())
}
