//! Client configuration

use crate::{ClientResult, NetworkHttpClient};

/// Client configuration for connecting to the storefront backend
///
/// # Environment variables
///
/// | Variable | Default | Meaning |
/// |----------|---------|---------|
/// | JARA_API_BASE_URL | http://localhost:5000 | Backend base URL |
/// | JARA_REQUEST_TIMEOUT_SECS | 30 | Default request timeout |
/// | JARA_SEARCH_TIMEOUT_SECS | 15 | Timeout for search and address lookups |
/// | JARA_AUTH_TOKEN | (unset) | Bearer token for CLI use |
#[derive(Debug, Clone)]
pub struct ClientConfig {
    /// Server base URL (e.g., "https://api.jara.ng")
    pub base_url: String,

    /// Bearer token for authenticated calls
    pub token: Option<String>,

    /// Request timeout in seconds
    pub timeout: u64,

    /// Search / address lookup timeout in seconds
    pub search_timeout: u64,
}

impl ClientConfig {
    /// Create a new client configuration
    pub fn new(base_url: impl Into<String>) -> Self {
        Self {
            base_url: base_url.into(),
            token: None,
            timeout: 30,
            search_timeout: 15,
        }
    }

    /// Load configuration from environment variables
    ///
    /// Unset or unparsable variables fall back to defaults.
    pub fn from_env() -> Self {
        let defaults = Self::new("http://localhost:5000");
        Self {
            base_url: std::env::var("JARA_API_BASE_URL").unwrap_or(defaults.base_url),
            token: std::env::var("JARA_AUTH_TOKEN").ok().filter(|t| !t.is_empty()),
            timeout: std::env::var("JARA_REQUEST_TIMEOUT_SECS")
                .ok()
                .and_then(|v| v.parse().ok())
                .unwrap_or(defaults.timeout),
            search_timeout: std::env::var("JARA_SEARCH_TIMEOUT_SECS")
                .ok()
                .and_then(|v| v.parse().ok())
                .unwrap_or(defaults.search_timeout),
        }
    }

    /// Set the bearer token
    pub fn with_token(mut self, token: impl Into<String>) -> Self {
        self.token = Some(token.into());
        self
    }

    /// Set the request timeout
    pub fn with_timeout(mut self, seconds: u64) -> Self {
        self.timeout = seconds;
        self
    }

    /// Set the search timeout
    pub fn with_search_timeout(mut self, seconds: u64) -> Self {
        self.search_timeout = seconds;
        self
    }

    /// Create an HTTP client from this configuration
    pub fn build_http_client(&self) -> ClientResult<NetworkHttpClient> {
        NetworkHttpClient::new(self)
    }
}

impl Default for ClientConfig {
    fn default() -> Self {
        Self::from_env()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_builder_overrides() {
        let config = ClientConfig::new("http://api.test")
            .with_token("abc")
            .with_timeout(5)
            .with_search_timeout(2);
        assert_eq!(config.base_url, "http://api.test");
        assert_eq!(config.token.as_deref(), Some("abc"));
        assert_eq!(config.timeout, 5);
        assert_eq!(config.search_timeout, 2);
    }
}
