//! Content-type marker codec.

/// Encodes and decodes the reserved content-type suffix that signals
/// "this record's payload requires segment reassembly".
///
/// The marker is the **single source of truth** for storage shape: a
/// parent whose content type carries the suffix stores a digest and must
/// be resolved through segment reassembly; one without it stores the
/// literal payload. Content length or shape is never used to infer this.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct TypeMarker {
    suffix: String,
}

impl TypeMarker {
    /// Creates a marker codec with the given suffix.
    #[must_use]
    pub fn new(suffix: impl Into<String>) -> Self {
        Self {
            suffix: suffix.into(),
        }
    }

    /// Returns the marker suffix.
    #[must_use]
    pub fn suffix(&self) -> &str {
        &self.suffix
    }

    /// Appends the marker to a media type.
    #[must_use]
    pub fn mark(&self, content_type: &str) -> String {
        format!("{content_type}{}", self.suffix)
    }

    /// Removes the marker from a media type. No-op if absent.
    #[must_use]
    pub fn unmark(&self, content_type: &str) -> String {
        content_type
            .strip_suffix(self.suffix.as_str())
            .unwrap_or(content_type)
            .to_string()
    }

    /// Returns true if the media type carries the marker.
    #[must_use]
    pub fn is_marked(&self, content_type: &str) -> bool {
        content_type.ends_with(self.suffix.as_str())
    }
}

impl Default for TypeMarker {
    fn default() -> Self {
        Self::new(crate::StoreConfig::default().marker_suffix)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn mark_appends_suffix() {
        let marker = TypeMarker::new("+splice");
        assert_eq!(marker.mark("video/mp4"), "video/mp4+splice");
    }

    #[test]
    fn unmark_of_mark_is_identity() {
        let marker = TypeMarker::new("+splice");
        for ty in ["video/mp4", "image/png", "application/octet-stream", ""] {
            assert_eq!(marker.unmark(&marker.mark(ty)), ty);
        }
    }

    #[test]
    fn unmark_without_marker_is_noop() {
        let marker = TypeMarker::new("+splice");
        assert_eq!(marker.unmark("image/png"), "image/png");
    }

    #[test]
    fn is_marked() {
        let marker = TypeMarker::new("+splice");
        assert!(marker.is_marked("video/mp4+splice"));
        assert!(!marker.is_marked("video/mp4"));
        assert!(!marker.is_marked("video/mp4+splice2"));
    }

    #[test]
    fn custom_suffix() {
        let marker = TypeMarker::new("+seg");
        assert!(marker.is_marked(&marker.mark("audio/ogg")));
        assert!(!marker.is_marked("audio/ogg+splice"));
    }

    #[test]
    fn unmark_strips_only_one_suffix() {
        let marker = TypeMarker::new("+splice");
        assert_eq!(marker.unmark("video/mp4+splice+splice"), "video/mp4+splice");
    }
}
