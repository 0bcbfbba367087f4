//! Configuration for the HTTP gateway.
//!
//! Loaded from environment variables with sensible defaults.

use std::env;
use std::time::Duration;

/// Default API base URL for local development
const DEFAULT_BASE_URL: &str = "http://localhost:3000/api";

/// Default request timeout in seconds
const DEFAULT_TIMEOUT_SECS: u64 = 10;

/// Transport configuration for [`crate::ApiClient`]
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct GatewayConfig {
    /// API base URL, without a trailing slash
    pub base_url: String,
    /// Per-request timeout enforced by the transport
    pub timeout: Duration,
}

impl GatewayConfig {
    /// Creates a configuration with the default timeout.
    ///
    /// A trailing slash on the base URL is stripped so paths can always be
    /// joined with a leading slash.
    #[must_use]
    pub fn new(base_url: impl Into<String>) -> Self {
        let mut base_url = base_url.into();
        while base_url.ends_with('/') {
            base_url.pop();
        }
        Self {
            base_url,
            timeout: Duration::from_secs(DEFAULT_TIMEOUT_SECS),
        }
    }

    /// Sets the per-request timeout
    #[must_use]
    pub const fn with_timeout(mut self, timeout: Duration) -> Self {
        self.timeout = timeout;
        self
    }

    /// Load configuration from environment variables.
    ///
    /// Reads `JELAJAH_API_URL` (default `http://localhost:3000/api`) and
    /// `JELAJAH_API_TIMEOUT_SECS` (default 10).
    #[must_use]
    pub fn from_env() -> Self {
        let base_url =
            env::var("JELAJAH_API_URL").unwrap_or_else(|_| DEFAULT_BASE_URL.to_string());
        let timeout = env::var("JELAJAH_API_TIMEOUT_SECS")
            .ok()
            .and_then(|s| s.parse().ok())
            .unwrap_or(DEFAULT_TIMEOUT_SECS);
        Self::new(base_url).with_timeout(Duration::from_secs(timeout))
    }
}

impl Default for GatewayConfig {
    fn default() -> Self {
        Self::new(DEFAULT_BASE_URL)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn trailing_slash_is_stripped() {
        let config = GatewayConfig::new("https://api.jelajah.id/v1/");
        assert_eq!(config.base_url, "https://api.jelajah.id/v1");
    }

    #[test]
    fn default_timeout_is_ten_seconds() {
        let config = GatewayConfig::default();
        assert_eq!(config.timeout, Duration::from_secs(10));
    }
}
