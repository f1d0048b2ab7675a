//! Public configuration for the HTTP record fetcher.

use std::time::Duration;

/// Base URL the mobile screens resolved relative ids against.
pub const DEFAULT_BASE_URL: &str = "http://localhost:3000/";

/// Configuration for the HTTP record fetcher.
///
/// # Example
///
/// ```
/// use favkit_http::FetcherConfig;
/// use std::time::Duration;
///
/// let config = FetcherConfig::new()
///     .with_base_url("https://api.jikan.moe/v4/")
///     .with_timeout(Duration::from_secs(10));
/// ```
#[derive(Debug, Clone)]
pub struct FetcherConfig {
    /// Base URL for ids that are not absolute URLs. `None` rejects them.
    pub(crate) base_url: Option<String>,
    /// User agent string for HTTP requests
    pub(crate) user_agent: String,
    /// Request timeout
    pub(crate) timeout: Duration,
}

impl Default for FetcherConfig {
    fn default() -> Self {
        Self {
            base_url: None,
            user_agent: concat!("favkit-http/", env!("CARGO_PKG_VERSION")).to_string(),
            timeout: Duration::from_secs(30),
        }
    }
}

impl FetcherConfig {
    /// Create a new configuration with default settings.
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    /// Resolve relative ids against `url`.
    #[must_use]
    pub fn with_base_url(mut self, url: impl Into<String>) -> Self {
        self.base_url = Some(url.into());
        self
    }

    /// Set an optional base URL.
    #[must_use]
    pub fn with_optional_base_url(mut self, url: Option<String>) -> Self {
        self.base_url = url;
        self
    }

    /// Set the user agent string for HTTP requests.
    #[must_use]
    pub fn with_user_agent(mut self, user_agent: impl Into<String>) -> Self {
        self.user_agent = user_agent.into();
        self
    }

    /// Set the request timeout.
    ///
    /// Defaults to 30 seconds.
    #[must_use]
    pub const fn with_timeout(mut self, timeout: Duration) -> Self {
        self.timeout = timeout;
        self
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_default_config() {
        let config = FetcherConfig::new();
        assert!(config.base_url.is_none());
        assert!(config.user_agent.starts_with("favkit-http/"));
        assert_eq!(config.timeout, Duration::from_secs(30));
    }

    #[test]
    fn test_builder_pattern() {
        let config = FetcherConfig::new()
            .with_base_url(DEFAULT_BASE_URL)
            .with_user_agent("favkit-test/1.0")
            .with_timeout(Duration::from_secs(5));

        assert_eq!(config.base_url.as_deref(), Some("http://localhost:3000/"));
        assert_eq!(config.user_agent, "favkit-test/1.0");
        assert_eq!(config.timeout, Duration::from_secs(5));

        let config = config.with_optional_base_url(None);
        assert!(config.base_url.is_none());
    }
}
