//! Infisical login action.
//!
//! Validates the action inputs, logs a machine identity into Infisical, and
//! exports the access token for later steps.

#![forbid(unsafe_code)]
#![warn(missing_docs)]

pub mod config;

use action_common::ActionHost;
use anyhow::Context;
use config::ActionInputs;
use infisical_client::{
    IdTokenProvider, InfisicalClient, InfisicalConfig, export_token, validate_auth_method,
    validate_export_type,
};
use tracing::{info, instrument};

/// Run the action end to end.
///
/// # Errors
///
/// Returns the first validation, login, or export failure. The caller is
/// expected to report it and fail the step.
#[instrument(skip_all, fields(method = %inputs.method, export_type = %inputs.export_type))]
pub async fn run(
    host: &dyn ActionHost,
    inputs: &ActionInputs,
    id_tokens: &dyn IdTokenProvider,
) -> anyhow::Result<()> {
    let method = validate_auth_method(&inputs.method)?;
    let export_type = validate_export_type(&inputs.export_type)?;
    let credentials = inputs.credentials(method)?;

    let config = InfisicalConfig::new(&inputs.domain).with_extra_headers(inputs.headers()?);
    let client = InfisicalClient::new(config)?;

    info!(domain = %inputs.domain, %method, "Logging in to Infisical");
    let token = client
        .login(&credentials, id_tokens, host)
        .await
        .with_context(|| format!("Failed to log in with {method} auth"))?;

    export_token(host, &token, export_type)?;
    Ok(())
}
