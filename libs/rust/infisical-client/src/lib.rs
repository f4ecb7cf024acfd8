//! Infisical login for CI runners.
//!
//! Validates the action's enumerated inputs, logs a machine identity in via
//! Universal Auth or OIDC Auth, and exports the resulting access token to
//! later pipeline steps.

#![forbid(unsafe_code)]
#![warn(missing_docs)]

pub mod auth;
pub mod client;
pub mod config;
pub mod export;
pub mod inputs;
pub mod provider;

pub use auth::{Credentials, LoginResponse};
pub use client::InfisicalClient;
pub use config::InfisicalConfig;
pub use export::{TOKEN_ENV_VAR, TOKEN_OUTPUT_KEY, export_token};
pub use inputs::{AuthMethod, ExportType, validate_auth_method, validate_export_type};
pub use provider::{EnvIdTokenProvider, GithubOidcProvider, IdTokenProvider};
