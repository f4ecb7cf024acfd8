//! Mock implementations for testing.
//!
//! This module provides substitutes for the runner host and the OIDC token
//! source so the action can be exercised without a CI runner.

use action_common::{ActionError, ActionHost, ActionResult};
use async_trait::async_trait;
use infisical_client::IdTokenProvider;
use parking_lot::Mutex;
use secrecy::SecretString;
use std::collections::HashMap;

/// A single call made against [`MockActionHost`].
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum HostCall {
    /// `error(message)`
    Error(String),
    /// `info(message)`
    Info(String),
    /// `set_secret(value)`
    SetSecret(String),
    /// `export_variable(name, value)`
    ExportVariable(String, String),
    /// `set_output(name, value)`
    SetOutput(String, String),
}

/// Recording host for testing.
#[derive(Debug, Default)]
pub struct MockActionHost {
    calls: Mutex<Vec<HostCall>>,
    fail_publish: bool,
}

impl MockActionHost {
    /// Create a new mock host.
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    /// Create a mock host whose export and output primitives fail.
    #[must_use]
    pub fn failing() -> Self {
        Self {
            calls: Mutex::new(Vec::new()),
            fail_publish: true,
        }
    }

    /// Get all recorded calls in order.
    #[must_use]
    pub fn calls(&self) -> Vec<HostCall> {
        self.calls.lock().clone()
    }

    /// Messages passed to `error`.
    #[must_use]
    pub fn errors(&self) -> Vec<String> {
        self.calls
            .lock()
            .iter()
            .filter_map(|c| match c {
                HostCall::Error(m) => Some(m.clone()),
                _ => None,
            })
            .collect()
    }

    /// Messages passed to `info`.
    #[must_use]
    pub fn infos(&self) -> Vec<String> {
        self.calls
            .lock()
            .iter()
            .filter_map(|c| match c {
                HostCall::Info(m) => Some(m.clone()),
                _ => None,
            })
            .collect()
    }

    /// Values registered for masking.
    #[must_use]
    pub fn secrets(&self) -> Vec<String> {
        self.calls
            .lock()
            .iter()
            .filter_map(|c| match c {
                HostCall::SetSecret(v) => Some(v.clone()),
                _ => None,
            })
            .collect()
    }

    /// Exported variables, last write wins.
    #[must_use]
    pub fn variables(&self) -> HashMap<String, String> {
        self.calls
            .lock()
            .iter()
            .filter_map(|c| match c {
                HostCall::ExportVariable(k, v) => Some((k.clone(), v.clone())),
                _ => None,
            })
            .collect()
    }

    /// Step outputs, last write wins.
    #[must_use]
    pub fn outputs(&self) -> HashMap<String, String> {
        self.calls
            .lock()
            .iter()
            .filter_map(|c| match c {
                HostCall::SetOutput(k, v) => Some((k.clone(), v.clone())),
                _ => None,
            })
            .collect()
    }

    fn record(&self, call: HostCall) {
        self.calls.lock().push(call);
    }

    fn publish(&self, call: HostCall) -> ActionResult<()> {
        if self.fail_publish {
            return Err(ActionError::Io(std::io::Error::other("mock publish failure")));
        }
        self.record(call);
        Ok(())
    }
}

impl ActionHost for MockActionHost {
    fn error(&self, message: &str) {
        self.record(HostCall::Error(message.to_string()));
    }

    fn info(&self, message: &str) {
        self.record(HostCall::Info(message.to_string()));
    }

    fn set_secret(&self, value: &str) -> ActionResult<()> {
        self.record(HostCall::SetSecret(value.to_string()));
        Ok(())
    }

    fn export_variable(&self, name: &str, value: &str) -> ActionResult<()> {
        self.publish(HostCall::ExportVariable(name.to_string(), value.to_string()))
    }

    fn set_output(&self, name: &str, value: &str) -> ActionResult<()> {
        self.publish(HostCall::SetOutput(name.to_string(), value.to_string()))
    }
}

/// ID token provider returning a fixed token and recording requested audiences.
#[derive(Debug)]
pub struct StaticIdTokenProvider {
    token: String,
    audiences: Mutex<Vec<Option<String>>>,
}

impl StaticIdTokenProvider {
    /// Create a provider that always returns `token`.
    #[must_use]
    pub fn new(token: impl Into<String>) -> Self {
        Self {
            token: token.into(),
            audiences: Mutex::new(Vec::new()),
        }
    }

    /// Audiences requested so far.
    #[must_use]
    pub fn audiences(&self) -> Vec<Option<String>> {
        self.audiences.lock().clone()
    }
}

#[async_trait]
impl IdTokenProvider for StaticIdTokenProvider {
    async fn id_token(&self, audience: Option<&str>) -> ActionResult<SecretString> {
        self.audiences.lock().push(audience.map(String::from));
        Ok(SecretString::from(self.token.clone()))
    }
}
