//! Tracing subscriber setup.
//!
//! Diagnostics always go to stderr: stdout belongs to the runner's workflow
//! command stream.

use tracing_subscriber::{EnvFilter, layer::SubscriberExt, util::SubscriberInitExt};

/// Env var the runner sets when step debug logging is enabled.
pub const RUNNER_DEBUG: &str = "RUNNER_DEBUG";

/// Env var selecting the log format; `json` enables JSON lines.
pub const LOG_FORMAT: &str = "LOG_FORMAT";

/// Tracing configuration.
#[derive(Debug, Clone)]
pub struct TracingConfig {
    /// Service name recorded on startup
    pub service_name: String,
    /// Log level filter
    pub log_level: String,
    /// Whether to output JSON format
    pub json_output: bool,
}

impl Default for TracingConfig {
    fn default() -> Self {
        Self {
            service_name: "infisical-login-action".to_string(),
            log_level: "info".to_string(),
            json_output: false,
        }
    }
}

impl TracingConfig {
    /// Derive a config from the runner environment.
    ///
    /// `RUNNER_DEBUG=1` selects the `debug` level and `LOG_FORMAT=json`
    /// switches to JSON output.
    #[must_use]
    pub fn from_env() -> Self {
        Self::from_vars(
            std::env::var(RUNNER_DEBUG).ok().as_deref(),
            std::env::var(LOG_FORMAT).ok().as_deref(),
        )
    }

    fn from_vars(runner_debug: Option<&str>, log_format: Option<&str>) -> Self {
        let mut config = Self::default();
        if runner_debug == Some("1") {
            config = config.with_log_level("debug");
        }
        if log_format.is_some_and(|f| f.eq_ignore_ascii_case("json")) {
            config = config.with_json_output();
        }
        config
    }

    /// Set the log level.
    #[must_use]
    pub fn with_log_level(mut self, level: impl Into<String>) -> Self {
        self.log_level = level.into();
        self
    }

    /// Enable JSON output.
    #[must_use]
    pub const fn with_json_output(mut self) -> Self {
        self.json_output = true;
        self
    }
}

/// Initialize tracing with the given configuration.
///
/// `RUST_LOG` overrides the configured level. Should be called once at startup.
pub fn init_tracing(config: &TracingConfig) {
    let filter =
        EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new(&config.log_level));

    if config.json_output {
        tracing_subscriber::registry()
            .with(filter)
            .with(tracing_subscriber::fmt::layer().json().with_writer(std::io::stderr))
            .init();
    } else {
        tracing_subscriber::registry()
            .with(filter)
            .with(tracing_subscriber::fmt::layer().with_writer(std::io::stderr))
            .init();
    }

    tracing::debug!(service = %config.service_name, "Tracing initialized");
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_default_config() {
        let config = TracingConfig::default();
        assert_eq!(config.service_name, "infisical-login-action");
        assert_eq!(config.log_level, "info");
        assert!(!config.json_output);
    }

    #[test]
    fn test_runner_debug() {
        let config = TracingConfig::from_vars(Some("1"), None);
        assert_eq!(config.log_level, "debug");
        assert!(!config.json_output);

        let config = TracingConfig::from_vars(Some("0"), None);
        assert_eq!(config.log_level, "info");
    }

    #[test]
    fn test_json_log_format() {
        assert!(TracingConfig::from_vars(None, Some("json")).json_output);
        assert!(TracingConfig::from_vars(None, Some("JSON")).json_output);
        assert!(!TracingConfig::from_vars(None, Some("text")).json_output);
    }
}
