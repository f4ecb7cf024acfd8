//! Access token export.

use crate::inputs::ExportType;
use action_common::{ActionHost, ActionResult};
use secrecy::{ExposeSecret, SecretString};
use tracing::debug;

/// Environment variable the token is exported under.
pub const TOKEN_ENV_VAR: &str = "INFISICAL_TOKEN";
/// Step output key the token is published under.
pub const TOKEN_OUTPUT_KEY: &str = "access-token";

/// Mask `token` and publish it according to `export_type`.
///
/// The token is registered for masking before it is published anywhere.
///
/// # Errors
///
/// Propagates failures of the host primitives.
pub fn export_token(
    host: &dyn ActionHost,
    token: &SecretString,
    export_type: ExportType,
) -> ActionResult<()> {
    let token = token.expose_secret();
    host.set_secret(token)?;
    debug!(%export_type, "Exporting access token");

    match export_type {
        ExportType::Env => {
            host.export_variable(TOKEN_ENV_VAR, token)?;
            host.info(&format!(
                "Injected Infisical token as environment variable [{TOKEN_ENV_VAR}]"
            ));
        }
        ExportType::Output => {
            host.set_output(TOKEN_OUTPUT_KEY, token)?;
            host.info(&format!(
                "Set Infisical token as action output [{TOKEN_OUTPUT_KEY}]"
            ));
        }
    }

    Ok(())
}
