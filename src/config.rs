//! Monitor configuration.

// ============================================================================
// Imports
// ============================================================================

use url::Url;

// ============================================================================
// OriginFilter
// ============================================================================

/// Which hosting-frame origins may command the monitor.
///
/// Defaults to accepting everything; production embeds pin the builder's
/// origin.
#[derive(Debug, Clone, PartialEq, Eq, Default)]
pub enum OriginFilter {
    /// Accept commands from any origin.
    #[default]
    Any,
    /// Accept commands only from this exact origin.
    Exact(String),
}

impl OriginFilter {
    /// Returns `true` if a message from `origin` should be dispatched.
    #[must_use]
    pub fn accepts(&self, origin: &str) -> bool {
        match self {
            Self::Any => true,
            Self::Exact(expected) => expected == origin,
        }
    }
}

// ============================================================================
// MonitorConfig
// ============================================================================

/// Per-frame monitor configuration.
#[derive(Debug, Clone)]
pub struct MonitorConfig {
    /// The embedded frame's URL, stamped onto every outbound envelope.
    pub frame_url: Url,
    /// Inbound origin filter.
    pub origin: OriginFilter,
}

impl MonitorConfig {
    /// Creates a configuration with the default accept-all origin filter.
    #[must_use]
    pub fn new(frame_url: Url) -> Self {
        Self {
            frame_url,
            origin: OriginFilter::Any,
        }
    }

    /// Pins the accepted hosting-frame origin.
    #[must_use]
    pub fn with_origin(mut self, origin: impl Into<String>) -> Self {
        self.origin = OriginFilter::Exact(origin.into());
        self
    }
}

// ============================================================================
// Tests
// ============================================================================

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_origin_filter_any() {
        assert!(OriginFilter::Any.accepts("https://anything.example"));
    }

    #[test]
    fn test_origin_filter_exact() {
        let filter = OriginFilter::Exact("https://builder.example".to_string());
        assert!(filter.accepts("https://builder.example"));
        assert!(!filter.accepts("https://evil.example"));
    }

    #[test]
    fn test_config_builder() {
        let config = MonitorConfig::new(Url::parse("https://site.example/").expect("url"))
            .with_origin("https://builder.example");
        assert_eq!(
            config.origin,
            OriginFilter::Exact("https://builder.example".to_string())
        );
    }
}
