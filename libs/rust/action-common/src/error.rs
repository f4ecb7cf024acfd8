//! Centralized error type for the login action.
//!
//! Every failure is classified into one of three kinds so callers can decide
//! how to surface it: validation problems abort the step before any network
//! call, transport errors carry the server's response for diagnostics, and
//! everything else is reported by message only.

use thiserror::Error;

/// Coarse classification of an [`ActionError`].
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ErrorKind {
    /// Empty or out-of-enumeration input.
    Validation,
    /// The server answered with a non-success status.
    Transport,
    /// Anything else.
    Generic,
}

/// Common error type for action operations.
#[derive(Error, Debug)]
pub enum ActionError {
    /// A required value was empty or absent
    #[error("{0} is required")]
    Required(String),

    /// A value is not a member of its enumeration
    #[error("Invalid {field}: {value}")]
    InvalidValue {
        /// Human-readable name of the offending field
        field: String,
        /// The rejected value
        value: String,
    },

    /// Malformed or missing configuration
    #[error("Invalid configuration: {0}")]
    InvalidConfig(String),

    /// The server responded with a non-success status
    #[error("Request failed with status code {status}")]
    Response {
        /// HTTP status code
        status: u16,
        /// Decoded response body, if any
        body: Option<serde_json::Value>,
    },

    /// HTTP request failed before a response was received
    #[error("HTTP request failed: {0}")]
    Http(#[from] reqwest::Error),

    /// Serialization/deserialization error
    #[error("Serialization error: {0}")]
    Serialization(#[from] serde_json::Error),

    /// I/O error writing to a runner file
    #[error("I/O error: {0}")]
    Io(#[from] std::io::Error),

    /// A runner command could not be issued
    #[error("Unable to issue command: {0}")]
    Command(String),

    /// Authentication did not yield a usable token
    #[error("Authentication failed: {0}")]
    AuthenticationFailed(String),
}

/// Result type for action operations.
pub type ActionResult<T> = Result<T, ActionError>;

impl ActionError {
    /// Classify this error.
    ///
    /// # Examples
    ///
    /// ```
    /// use action_common::{ActionError, ErrorKind};
    ///
    /// let err = ActionError::required("Export type");
    /// assert_eq!(err.kind(), ErrorKind::Validation);
    ///
    /// let err = ActionError::Response { status: 401, body: None };
    /// assert_eq!(err.kind(), ErrorKind::Transport);
    /// ```
    #[must_use]
    pub const fn kind(&self) -> ErrorKind {
        match self {
            Self::Required(_) | Self::InvalidValue { .. } | Self::InvalidConfig(_) => {
                ErrorKind::Validation
            }
            Self::Response { .. } => ErrorKind::Transport,
            Self::Http(_)
            | Self::Serialization(_)
            | Self::Io(_)
            | Self::Command(_)
            | Self::AuthenticationFailed(_) => ErrorKind::Generic,
        }
    }

    /// Response body, when this is a transport error that carried one.
    #[must_use]
    pub const fn response_body(&self) -> Option<&serde_json::Value> {
        match self {
            Self::Response { body, .. } => body.as_ref(),
            _ => None,
        }
    }

    /// Create a required-value error for the given field.
    #[must_use]
    pub fn required(field: impl Into<String>) -> Self {
        Self::Required(field.into())
    }

    /// Create an invalid-value error.
    #[must_use]
    pub fn invalid_value(field: impl Into<String>, value: impl Into<String>) -> Self {
        Self::InvalidValue {
            field: field.into(),
            value: value.into(),
        }
    }

    /// Create an invalid configuration error with the given message.
    #[must_use]
    pub fn invalid_config(msg: impl Into<String>) -> Self {
        Self::InvalidConfig(msg.into())
    }

    /// Create an authentication failed error.
    #[must_use]
    pub fn auth_failed(msg: impl Into<String>) -> Self {
        Self::AuthenticationFailed(msg.into())
    }
}
