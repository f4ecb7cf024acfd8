//! Infisical HTTP client for machine-identity logins.

use crate::{
    auth::{
        Credentials, LoginResponse, OIDC_AUTH_LOGIN_PATH, OidcAuthLogin, UNIVERSAL_AUTH_LOGIN_PATH,
        UniversalAuthLogin,
    },
    config::InfisicalConfig,
    provider::IdTokenProvider,
};
use action_common::{ActionError, ActionHost, ActionResult, RequestClient, create_client_with_config};
use secrecy::{ExposeSecret, SecretString};
use serde::Serialize;
use tracing::{debug, info, instrument};

/// Infisical client bound to one instance.
#[derive(Debug, Clone)]
pub struct InfisicalClient {
    config: InfisicalConfig,
    http: RequestClient,
}

impl InfisicalClient {
    /// Create a new Infisical client. No request is made.
    ///
    /// # Errors
    ///
    /// Returns an error if the HTTP transport cannot be initialised.
    pub fn new(config: InfisicalConfig) -> ActionResult<Self> {
        let http = create_client_with_config(&config.domain, Some(&config.extra_headers), &config.http)?;
        Ok(Self { config, http })
    }

    /// Log in with whichever method `credentials` selects.
    ///
    /// For OIDC, the runner ID token is fetched from `id_tokens` and masked on
    /// `host` before it is sent.
    ///
    /// # Errors
    ///
    /// Propagates transport, decoding, and host failures.
    pub async fn login(
        &self,
        credentials: &Credentials,
        id_tokens: &dyn IdTokenProvider,
        host: &dyn ActionHost,
    ) -> ActionResult<SecretString> {
        match credentials {
            Credentials::Universal {
                client_id,
                client_secret,
            } => self.universal_auth_login(client_id, client_secret).await,
            Credentials::Oidc {
                identity_id,
                audience,
            } => {
                let jwt = id_tokens.id_token(audience.as_deref()).await?;
                host.set_secret(jwt.expose_secret())?;
                self.oidc_login(identity_id, &jwt).await
            }
        }
    }

    /// Log in with Universal Auth.
    ///
    /// # Errors
    ///
    /// Returns [`ActionError::Response`] when the server rejects the credentials.
    #[instrument(skip(self, client_secret), fields(domain = %self.config.domain))]
    pub async fn universal_auth_login(
        &self,
        client_id: &str,
        client_secret: &SecretString,
    ) -> ActionResult<SecretString> {
        let form = UniversalAuthLogin {
            client_id,
            client_secret: client_secret.expose_secret(),
        };
        self.post_login(UNIVERSAL_AUTH_LOGIN_PATH, &form).await
    }

    /// Log in with OIDC Auth using a runner-issued `jwt`.
    ///
    /// # Errors
    ///
    /// Returns [`ActionError::Response`] when the server rejects the token.
    #[instrument(skip(self, jwt), fields(domain = %self.config.domain))]
    pub async fn oidc_login(&self, identity_id: &str, jwt: &SecretString) -> ActionResult<SecretString> {
        let form = OidcAuthLogin {
            identity_id,
            jwt: jwt.expose_secret(),
        };
        self.post_login(OIDC_AUTH_LOGIN_PATH, &form).await
    }

    async fn post_login<F: Serialize + Sync>(&self, path: &str, form: &F) -> ActionResult<SecretString> {
        debug!(path, "Sending login request");
        let request = self.http.post(path).form(form);
        let response: LoginResponse = self.http.send_json(request).await?;

        if response.access_token.expose_secret().is_empty() {
            return Err(ActionError::auth_failed("Login response did not include an access token"));
        }

        let expires_at = i64::try_from(response.expires_in)
            .ok()
            .and_then(chrono::TimeDelta::try_seconds)
            .map(|ttl| chrono::Utc::now() + ttl);
        info!(
            expires_in = response.expires_in,
            max_ttl = response.access_token_max_ttl,
            expires_at = ?expires_at,
            "Obtained Infisical access token"
        );

        Ok(response.access_token)
    }
}
