//! Serving configuration.

/// Configuration for the media gateway.
#[derive(Debug, Clone, Default)]
pub struct ServeConfig {
    /// `Cache-Control` header value attached to successful responses.
    ///
    /// Resolved content is immutable (records never change once written),
    /// so long-lived public caching is safe when enabled.
    pub cache_control: Option<String>,
}

impl ServeConfig {
    /// Creates a configuration with no caching header.
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    /// Sets the `Cache-Control` header value.
    #[must_use]
    pub fn with_cache_control(mut self, value: impl Into<String>) -> Self {
        self.cache_control = Some(value.into());
        self
    }
}
