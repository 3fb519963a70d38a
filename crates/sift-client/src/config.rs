//! Client configuration.

use std::time::Duration;

/// Default canonicalization endpoint.
pub const DEFAULT_ENDPOINT: &str = "http://127.0.0.1:8470/api/filters/check";

/// Default request timeout.
pub const DEFAULT_TIMEOUT: Duration = Duration::from_secs(30);

/// Canonicalization client configuration.
#[derive(Debug, Clone)]
pub struct ClientConfig {
    /// Endpoint the filter tree is POSTed to.
    pub endpoint: String,

    /// Request timeout.
    pub timeout: Duration,
}

impl ClientConfig {
    /// Create a new client configuration with the specified endpoint.
    pub fn new(endpoint: impl Into<String>) -> Self {
        Self {
            endpoint: endpoint.into(),
            timeout: DEFAULT_TIMEOUT,
        }
    }

    /// Create a configuration for the default local endpoint.
    pub fn localhost() -> Self {
        Self::new(DEFAULT_ENDPOINT)
    }

    /// Set the request timeout.
    pub fn with_timeout(mut self, timeout: Duration) -> Self {
        self.timeout = timeout;
        self
    }
}

impl Default for ClientConfig {
    fn default() -> Self {
        Self::localhost()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_default_config() {
        let config = ClientConfig::default();
        assert_eq!(config.endpoint, DEFAULT_ENDPOINT);
        assert_eq!(config.timeout, DEFAULT_TIMEOUT);
    }

    #[test]
    fn test_config_builder() {
        let config = ClientConfig::new("https://dashboard.example/api/filters/check")
            .with_timeout(Duration::from_secs(5));

        assert_eq!(
            config.endpoint,
            "https://dashboard.example/api/filters/check"
        );
        assert_eq!(config.timeout, Duration::from_secs(5));
    }
}
