//! Infisical client configuration.

use action_common::HttpConfig;
use std::collections::HashMap;
use std::time::Duration;

/// Default Infisical Cloud domain.
pub const DEFAULT_DOMAIN: &str = "https://app.infisical.com";

/// Infisical client configuration.
#[derive(Debug, Clone)]
pub struct InfisicalConfig {
    /// Base URL of the Infisical instance
    pub domain: String,
    /// Headers sent with every request
    pub extra_headers: HashMap<String, String>,
    /// Transport settings
    pub http: HttpConfig,
}

impl Default for InfisicalConfig {
    fn default() -> Self {
        Self {
            domain: DEFAULT_DOMAIN.to_string(),
            extra_headers: HashMap::new(),
            http: HttpConfig::default(),
        }
    }
}

impl InfisicalConfig {
    /// Create a configuration for `domain`.
    #[must_use]
    pub fn new(domain: impl Into<String>) -> Self {
        Self {
            domain: domain.into(),
            ..Default::default()
        }
    }

    /// Set headers sent with every request.
    #[must_use]
    pub fn with_extra_headers(mut self, headers: HashMap<String, String>) -> Self {
        self.extra_headers = headers;
        self
    }

    /// Set request timeout.
    #[must_use]
    pub fn with_timeout(mut self, timeout: Duration) -> Self {
        self.http = self.http.with_timeout(timeout);
        self
    }
}
