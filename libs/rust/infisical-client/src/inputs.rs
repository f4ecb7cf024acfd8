//! Enumerated action inputs and their validators.
//!
//! Validators return the parsed enum, so every later branch is an exhaustive
//! `match` over a value that is known to be a member.

use action_common::{ActionError, ActionResult};
use std::fmt;
use std::str::FromStr;

/// How the retrieved access token is surfaced to later steps.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum ExportType {
    /// Process-scoped environment variable
    Env,
    /// Named step output
    Output,
}

impl ExportType {
    /// All members, in declaration order.
    pub const ALL: [Self; 2] = [Self::Env, Self::Output];

    /// Wire token for this member.
    #[must_use]
    pub const fn as_str(&self) -> &'static str {
        match self {
            Self::Env => "env",
            Self::Output => "output",
        }
    }
}

impl FromStr for ExportType {
    type Err = ActionError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        Self::ALL
            .into_iter()
            .find(|t| t.as_str() == s)
            .ok_or_else(|| ActionError::invalid_value("export type", s))
    }
}

impl fmt::Display for ExportType {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

/// Authentication mechanism used against the Infisical API.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum AuthMethod {
    /// Universal Auth (client ID + client secret)
    Universal,
    /// OIDC Auth using the runner's ID token
    Oidc,
}

impl AuthMethod {
    /// All members, in declaration order.
    pub const ALL: [Self; 2] = [Self::Universal, Self::Oidc];

    /// Wire token for this member.
    #[must_use]
    pub const fn as_str(&self) -> &'static str {
        match self {
            Self::Universal => "universal",
            Self::Oidc => "oidc",
        }
    }
}

impl FromStr for AuthMethod {
    type Err = ActionError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        Self::ALL
            .into_iter()
            .find(|m| m.as_str() == s)
            .ok_or_else(|| ActionError::invalid_value("auth method", s))
    }
}

impl fmt::Display for AuthMethod {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

/// Validate an export type input.
///
/// # Errors
///
/// - [`ActionError::Required`] when `value` is empty.
/// - [`ActionError::InvalidValue`] when `value` is not a member.
///
/// # Examples
///
/// ```
/// use infisical_client::{ExportType, validate_export_type};
///
/// assert_eq!(validate_export_type("output").unwrap(), ExportType::Output);
/// assert!(validate_export_type("").is_err());
/// assert!(validate_export_type("Env").is_err());
/// ```
pub fn validate_export_type(value: &str) -> ActionResult<ExportType> {
    if value.is_empty() {
        return Err(ActionError::required("Export type"));
    }
    value.parse()
}

/// Validate an auth method input. The empty string is simply not a member.
///
/// # Errors
///
/// Returns [`ActionError::InvalidValue`] when `value` is not a member.
pub fn validate_auth_method(value: &str) -> ActionResult<AuthMethod> {
    value.parse()
}
