//! Media envelope: the parent record's data layout.

use crate::error::{StoreError, StoreResult};

/// Current envelope format version.
const FORMAT_VERSION: u8 = 1;
/// Fixed part of an envelope: version (1) + type length (2) + content length (4).
const HEADER_SIZE: usize = 7;

/// Decoded parent record data.
///
/// Wire layout (little-endian):
///
/// ```text
/// [1: format version = 1]
/// [2: content_type length, u16 LE]
/// [content_type, UTF-8]
/// [4: content length, u32 LE]
/// [content]
/// ```
///
/// `content` holds the literal payload when `content_type` is unmarked,
/// or the 32-byte content digest when it carries the marker suffix. The
/// marker alone decides which; see [`crate::TypeMarker`].
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct MediaEnvelope {
    /// Media type, possibly carrying the marker suffix.
    pub content_type: String,
    /// Literal payload or content digest, per the marker.
    pub content: Vec<u8>,
}

impl MediaEnvelope {
    /// Creates an envelope.
    #[must_use]
    pub fn new(content_type: impl Into<String>, content: Vec<u8>) -> Self {
        Self {
            content_type: content_type.into(),
            content,
        }
    }

    /// Encodes the envelope to bytes.
    ///
    /// # Errors
    ///
    /// Returns [`StoreError::InvalidEnvelope`] if a field exceeds its
    /// length prefix.
    pub fn encode(&self) -> StoreResult<Vec<u8>> {
        let type_len = u16::try_from(self.content_type.len()).map_err(|_| {
            StoreError::invalid_envelope(format!(
                "content type too long: {} bytes",
                self.content_type.len()
            ))
        })?;
        let content_len = u32::try_from(self.content.len()).map_err(|_| {
            StoreError::invalid_envelope(format!("content too long: {} bytes", self.content.len()))
        })?;

        let mut buf = Vec::with_capacity(HEADER_SIZE + self.content_type.len() + self.content.len());
        buf.push(FORMAT_VERSION);
        buf.extend_from_slice(&type_len.to_le_bytes());
        buf.extend_from_slice(self.content_type.as_bytes());
        buf.extend_from_slice(&content_len.to_le_bytes());
        buf.extend_from_slice(&self.content);
        Ok(buf)
    }

    /// Decodes an envelope from bytes.
    ///
    /// Decoding is strict: unknown versions, truncated fields, non-UTF-8
    /// content types, and trailing bytes are all rejected.
    ///
    /// # Errors
    ///
    /// Returns [`StoreError::InvalidEnvelope`] describing the defect.
    pub fn decode(data: &[u8]) -> StoreResult<Self> {
        if data.is_empty() {
            return Err(StoreError::invalid_envelope("empty data"));
        }
        if data[0] != FORMAT_VERSION {
            return Err(StoreError::invalid_envelope(format!(
                "unknown format version {}",
                data[0]
            )));
        }
        if data.len() < 3 {
            return Err(StoreError::invalid_envelope("truncated content type length"));
        }

        let type_len = u16::from_le_bytes([data[1], data[2]]) as usize;
        let type_end = 3 + type_len;
        if data.len() < type_end + 4 {
            return Err(StoreError::invalid_envelope("truncated content type"));
        }
        let content_type = std::str::from_utf8(&data[3..type_end])
            .map_err(|_| StoreError::invalid_envelope("content type is not UTF-8"))?
            .to_string();

        let content_len = u32::from_le_bytes([
            data[type_end],
            data[type_end + 1],
            data[type_end + 2],
            data[type_end + 3],
        ]) as usize;
        let content_start = type_end + 4;
        let content_end = content_start
            .checked_add(content_len)
            .ok_or_else(|| StoreError::invalid_envelope("content length overflow"))?;
        if data.len() < content_end {
            return Err(StoreError::invalid_envelope("truncated content"));
        }
        if data.len() > content_end {
            return Err(StoreError::invalid_envelope(format!(
                "{} trailing bytes",
                data.len() - content_end
            )));
        }

        Ok(Self {
            content_type,
            content: data[content_start..content_end].to_vec(),
        })
    }
}
