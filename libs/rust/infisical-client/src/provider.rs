//! Runner OIDC ID token retrieval.

use action_common::{ActionError, ActionResult, create_client};
use async_trait::async_trait;
use secrecy::{ExposeSecret, SecretString};
use serde::Deserialize;
use tracing::{debug, instrument};
use url::Url;

/// Env var holding the runner's ID token endpoint.
pub const ID_TOKEN_REQUEST_URL: &str = "ACTIONS_ID_TOKEN_REQUEST_URL";
/// Env var holding the bearer token for the ID token endpoint.
pub const ID_TOKEN_REQUEST_TOKEN: &str = "ACTIONS_ID_TOKEN_REQUEST_TOKEN";

/// Source of OIDC ID tokens identifying the running workflow.
#[async_trait]
pub trait IdTokenProvider: Send + Sync {
    /// Fetch an ID token, optionally scoped to `audience`.
    async fn id_token(&self, audience: Option<&str>) -> ActionResult<SecretString>;
}

#[derive(Deserialize)]
struct IdTokenResponse {
    value: Option<SecretString>,
}

/// [`IdTokenProvider`] backed by the GitHub Actions token endpoint.
#[derive(Debug, Clone)]
pub struct GithubOidcProvider {
    request_url: String,
    request_token: SecretString,
}

impl GithubOidcProvider {
    /// Create a provider for an explicit endpoint and bearer token.
    #[must_use]
    pub fn new(request_url: impl Into<String>, request_token: SecretString) -> Self {
        Self {
            request_url: request_url.into(),
            request_token,
        }
    }

    /// Read the endpoint and bearer token from the runner environment.
    ///
    /// # Errors
    ///
    /// Returns [`ActionError::InvalidConfig`] when either variable is unset,
    /// which happens when the job lacks the `id-token: write` permission.
    pub fn from_env() -> ActionResult<Self> {
        let read = |key: &str| {
            std::env::var(key).ok().filter(|v| !v.is_empty()).ok_or_else(|| {
                ActionError::invalid_config(format!(
                    "Unable to get {key} env variable. Did you grant the `id-token: write` permission to the job?"
                ))
            })
        };

        let request_url = read(ID_TOKEN_REQUEST_URL)?;
        let request_token = read(ID_TOKEN_REQUEST_TOKEN)?;
        Ok(Self::new(request_url, SecretString::from(request_token)))
    }

    /// Token endpoint URL with the audience appended as a query pair.
    ///
    /// # Errors
    ///
    /// Returns [`ActionError::InvalidConfig`] if the endpoint is not a valid URL.
    pub fn token_url(&self, audience: Option<&str>) -> ActionResult<Url> {
        let mut url = Url::parse(&self.request_url)
            .map_err(|e| ActionError::invalid_config(format!("Invalid ID token request URL: {e}")))?;
        if let Some(audience) = audience {
            url.query_pairs_mut().append_pair("audience", audience);
        }
        Ok(url)
    }
}

#[async_trait]
impl IdTokenProvider for GithubOidcProvider {
    #[instrument(skip(self))]
    async fn id_token(&self, audience: Option<&str>) -> ActionResult<SecretString> {
        let url = self.token_url(audience)?;
        let client = create_client("", None)?;

        let request = client
            .get(url.as_str())
            .bearer_auth(self.request_token.expose_secret())
            .header(reqwest::header::ACCEPT, "application/json");

        let response: IdTokenResponse = client.send_json(request).await?;
        debug!("Received runner ID token");

        response
            .value
            .filter(|v| !v.expose_secret().is_empty())
            .ok_or_else(|| ActionError::auth_failed("ID token endpoint returned no token"))
    }
}

/// [`GithubOidcProvider`] resolved from the environment on first use, so
/// jobs that never request an ID token do not need the permission.
#[derive(Debug, Clone, Copy, Default)]
pub struct EnvIdTokenProvider;

#[async_trait]
impl IdTokenProvider for EnvIdTokenProvider {
    async fn id_token(&self, audience: Option<&str>) -> ActionResult<SecretString> {
        GithubOidcProvider::from_env()?.id_token(audience).await
    }
}
