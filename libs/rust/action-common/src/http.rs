//! Request client factory.
//!
//! A [`RequestClient`] binds a base domain and a set of default headers to an
//! HTTP transport. Building one performs no network activity; URL and header
//! problems only surface once a request is built or sent.

use crate::error::{ActionError, ActionResult};
use reqwest::{Client, ClientBuilder, Method, RequestBuilder, Response};
use serde::de::DeserializeOwned;
use std::collections::{BTreeMap, HashMap};
use std::time::Duration;
use tracing::debug;

/// HTTP transport configuration.
#[derive(Debug, Clone)]
pub struct HttpConfig {
    /// Request timeout (default: 30s)
    pub timeout: Duration,
    /// Connection timeout (default: 10s)
    pub connect_timeout: Duration,
    /// User agent string
    pub user_agent: String,
}

impl Default for HttpConfig {
    fn default() -> Self {
        Self {
            timeout: Duration::from_secs(30),
            connect_timeout: Duration::from_secs(10),
            user_agent: concat!("infisical-login-action/", env!("CARGO_PKG_VERSION")).to_string(),
        }
    }
}

impl HttpConfig {
    /// Set the request timeout.
    #[must_use]
    pub const fn with_timeout(mut self, timeout: Duration) -> Self {
        self.timeout = timeout;
        self
    }

    /// Set the user agent.
    #[must_use]
    pub fn with_user_agent(mut self, user_agent: impl Into<String>) -> Self {
        self.user_agent = user_agent.into();
        self
    }
}

/// Build a configured HTTP transport.
///
/// # Errors
///
/// Returns an error if the client cannot be built (e.g., TLS initialization fails).
pub fn build_http_client(config: &HttpConfig) -> Result<Client, reqwest::Error> {
    ClientBuilder::new()
        .timeout(config.timeout)
        .connect_timeout(config.connect_timeout)
        .user_agent(&config.user_agent)
        .use_rustls_tls()
        .build()
}

/// A base domain plus default headers, ready to issue requests.
#[derive(Debug, Clone)]
pub struct RequestClient {
    base_url: String,
    default_headers: BTreeMap<String, String>,
    http: Client,
}

/// Create a request client bound to `domain` with the default transport settings.
///
/// # Errors
///
/// Returns [`ActionError::Http`] only if the transport itself cannot be
/// initialised.
///
/// # Examples
///
/// ```
/// use action_common::create_client;
/// use std::collections::HashMap;
///
/// let headers = HashMap::from([("X-Key".to_string(), "v".to_string())]);
/// let client = create_client("https://api.example.com", Some(&headers)).unwrap();
/// assert_eq!(client.base_url(), "https://api.example.com");
/// ```
pub fn create_client(
    domain: &str,
    default_headers: Option<&HashMap<String, String>>,
) -> ActionResult<RequestClient> {
    create_client_with_config(domain, default_headers, &HttpConfig::default())
}

/// Create a request client with explicit transport settings.
///
/// # Errors
///
/// Returns [`ActionError::Http`] if the transport cannot be initialised.
pub fn create_client_with_config(
    domain: &str,
    default_headers: Option<&HashMap<String, String>>,
    config: &HttpConfig,
) -> ActionResult<RequestClient> {
    let http = build_http_client(config)?;
    let default_headers: BTreeMap<String, String> = default_headers
        .map(|headers| {
            headers
                .iter()
                .map(|(k, v)| (k.clone(), v.clone()))
                .collect()
        })
        .unwrap_or_default();

    Ok(RequestClient {
        base_url: domain.to_string(),
        default_headers,
        http,
    })
}

impl RequestClient {
    /// Base URL every request path is resolved against.
    #[must_use]
    pub fn base_url(&self) -> &str {
        &self.base_url
    }

    /// Headers applied to every request.
    #[must_use]
    pub const fn default_headers(&self) -> &BTreeMap<String, String> {
        &self.default_headers
    }

    /// Resolve `path` against the base URL.
    ///
    /// Trailing slashes on the base and leading slashes on the path collapse
    /// into a single separator. Absolute URLs are used as given.
    #[must_use]
    pub fn url(&self, path: &str) -> String {
        if path.is_empty() {
            return self.base_url.clone();
        }
        if self.base_url.is_empty() || is_absolute_url(path) {
            return path.to_string();
        }
        format!(
            "{}/{}",
            self.base_url.trim_end_matches('/'),
            path.trim_start_matches('/')
        )
    }

    /// Start a request with the default headers applied.
    pub fn request(&self, method: Method, path: &str) -> RequestBuilder {
        self.default_headers.iter().fold(
            self.http.request(method, self.url(path)),
            |builder, (name, value)| builder.header(name.as_str(), value.as_str()),
        )
    }

    /// Start a GET request.
    pub fn get(&self, path: &str) -> RequestBuilder {
        self.request(Method::GET, path)
    }

    /// Start a POST request.
    pub fn post(&self, path: &str) -> RequestBuilder {
        self.request(Method::POST, path)
    }

    /// Send a request and decode a JSON success body.
    ///
    /// # Errors
    ///
    /// - [`ActionError::Http`] when no response was received.
    /// - [`ActionError::Response`] for any non-success status, carrying the body.
    /// - [`ActionError::Serialization`] when the success body is not the expected JSON.
    pub async fn send_json<T: DeserializeOwned>(&self, request: RequestBuilder) -> ActionResult<T> {
        let response = request.send().await?;
        let status = response.status();
        debug!(status = status.as_u16(), url = %response.url(), "Received response");

        if !status.is_success() {
            return Err(response_error(response).await);
        }

        let bytes = response.bytes().await?;
        serde_json::from_slice(&bytes).map_err(ActionError::from)
    }
}

/// `scheme://` or protocol-relative `//host`.
fn is_absolute_url(path: &str) -> bool {
    if path.starts_with("//") {
        return true;
    }
    path.split_once("://").is_some_and(|(scheme, _)| {
        scheme.chars().next().is_some_and(|c| c.is_ascii_alphabetic())
            && scheme
                .chars()
                .all(|c| c.is_ascii_alphanumeric() || matches!(c, '+' | '-' | '.'))
    })
}

async fn response_error(response: Response) -> ActionError {
    let status = response.status().as_u16();
    let text = response.text().await.unwrap_or_default();
    ActionError::Response {
        status,
        body: decode_body(&text),
    }
}

/// Decode a response body: JSON when possible, a JSON string otherwise.
fn decode_body(text: &str) -> Option<serde_json::Value> {
    if text.trim().is_empty() {
        return None;
    }
    Some(
        serde_json::from_str(text)
            .unwrap_or_else(|_| serde_json::Value::String(text.to_string())),
    )
}
