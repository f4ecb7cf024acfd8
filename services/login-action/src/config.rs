//! Action inputs.
//!
//! The runner passes each `with:` input as an `INPUT_<NAME>` environment
//! variable. All inputs are read once at startup; enumerated inputs are kept
//! as raw strings here and validated by [`crate::run`].

use action_common::{ActionError, ActionResult};
use infisical_client::config::DEFAULT_DOMAIN;
use infisical_client::{AuthMethod, Credentials};
use secrecy::SecretString;
use std::collections::HashMap;
use std::env;

/// Env var name the runner uses for input `name`.
#[must_use]
pub fn input_env_var(name: &str) -> String {
    format!("INPUT_{}", name.replace(' ', "_").to_uppercase())
}

/// Read input `name`, trimmed; empty when unset.
#[must_use]
pub fn get_input(name: &str) -> String {
    env::var(input_env_var(name))
        .map(|v| v.trim().to_string())
        .unwrap_or_default()
}

fn input_or(name: &str, default: &str) -> String {
    let value = get_input(name);
    if value.is_empty() {
        default.to_string()
    } else {
        value
    }
}

/// Raw action inputs.
#[derive(Debug, Clone)]
pub struct ActionInputs {
    /// `method`
    pub method: String,
    /// `client-id`
    pub client_id: String,
    /// `client-secret`
    pub client_secret: SecretString,
    /// `identity-id`
    pub identity_id: String,
    /// `oidc-audience`
    pub oidc_audience: String,
    /// `domain`
    pub domain: String,
    /// `export-type`
    pub export_type: String,
    /// `extra-headers`, one `Name: value` per line
    pub extra_headers: String,
}

impl Default for ActionInputs {
    fn default() -> Self {
        Self {
            method: AuthMethod::Universal.as_str().to_string(),
            client_id: String::new(),
            client_secret: SecretString::from(String::new()),
            identity_id: String::new(),
            oidc_audience: String::new(),
            domain: DEFAULT_DOMAIN.to_string(),
            export_type: "env".to_string(),
            extra_headers: String::new(),
        }
    }
}

impl ActionInputs {
    /// Load inputs from the runner environment.
    ///
    /// A `.env` file in the working directory is honoured for local runs.
    #[must_use]
    pub fn from_env() -> Self {
        dotenvy::dotenv().ok();

        let defaults = Self::default();
        Self {
            method: input_or("method", &defaults.method),
            client_id: get_input("client-id"),
            client_secret: SecretString::from(get_input("client-secret")),
            identity_id: get_input("identity-id"),
            oidc_audience: get_input("oidc-audience"),
            domain: input_or("domain", &defaults.domain),
            export_type: input_or("export-type", &defaults.export_type),
            extra_headers: get_input("extra-headers"),
        }
    }

    /// Build credentials for a validated auth method.
    ///
    /// # Errors
    ///
    /// Returns [`ActionError::Required`] when an input the method needs is empty.
    pub fn credentials(&self, method: AuthMethod) -> ActionResult<Credentials> {
        use secrecy::ExposeSecret;

        match method {
            AuthMethod::Universal => {
                if self.client_id.is_empty() {
                    return Err(ActionError::required("Client ID"));
                }
                if self.client_secret.expose_secret().is_empty() {
                    return Err(ActionError::required("Client secret"));
                }
                Ok(Credentials::Universal {
                    client_id: self.client_id.clone(),
                    client_secret: self.client_secret.clone(),
                })
            }
            AuthMethod::Oidc => {
                if self.identity_id.is_empty() {
                    return Err(ActionError::required("Identity ID"));
                }
                Ok(Credentials::Oidc {
                    identity_id: self.identity_id.clone(),
                    audience: Some(self.oidc_audience.clone()).filter(|a| !a.is_empty()),
                })
            }
        }
    }

    /// Parse `extra-headers`.
    ///
    /// # Errors
    ///
    /// Returns [`ActionError::InvalidConfig`] for a non-blank line without a
    /// `:` or with an empty header name.
    pub fn headers(&self) -> ActionResult<HashMap<String, String>> {
        parse_headers(&self.extra_headers)
    }
}

/// Parse `Name: value` lines; blank lines are skipped.
///
/// # Errors
///
/// Returns [`ActionError::InvalidConfig`] for malformed lines.
pub fn parse_headers(raw: &str) -> ActionResult<HashMap<String, String>> {
    raw.lines()
        .map(str::trim)
        .filter(|line| !line.is_empty())
        .map(|line| -> ActionResult<(String, String)> {
            let (name, value) = line.split_once(':').ok_or_else(|| {
                ActionError::invalid_config(format!("Invalid header line, expected `Name: value`: {line}"))
            })?;
            let name = name.trim();
            if name.is_empty() {
                return Err(ActionError::invalid_config(format!("Header name is empty: {line}")));
            }
            Ok((name.to_string(), value.trim().to_string()))
        })
        .collect()
}
