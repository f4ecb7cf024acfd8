//! Login request and response payloads.

use secrecy::SecretString;
use serde::{Deserialize, Serialize};

/// Universal Auth login path.
pub const UNIVERSAL_AUTH_LOGIN_PATH: &str = "/api/v1/auth/universal-auth/login";
/// OIDC Auth login path.
pub const OIDC_AUTH_LOGIN_PATH: &str = "/api/v1/auth/oidc-auth/login";

/// Credentials for one of the supported auth methods.
#[derive(Debug, Clone)]
pub enum Credentials {
    /// Universal Auth machine identity
    Universal {
        /// Client ID
        client_id: String,
        /// Client secret
        client_secret: SecretString,
    },
    /// OIDC Auth machine identity
    Oidc {
        /// Machine identity ID
        identity_id: String,
        /// Audience requested on the runner ID token
        audience: Option<String>,
    },
}

/// Universal Auth form body.
#[derive(Serialize)]
#[serde(rename_all = "camelCase")]
pub(crate) struct UniversalAuthLogin<'a> {
    pub client_id: &'a str,
    pub client_secret: &'a str,
}

/// OIDC Auth form body.
#[derive(Serialize)]
#[serde(rename_all = "camelCase")]
pub(crate) struct OidcAuthLogin<'a> {
    pub identity_id: &'a str,
    pub jwt: &'a str,
}

/// Successful login response.
#[derive(Debug, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct LoginResponse {
    /// Access token; zeroized on drop
    pub access_token: SecretString,
    /// Lifetime of the token in seconds
    #[serde(default)]
    pub expires_in: u64,
    /// Maximum lifetime including renewals, in seconds
    #[serde(default, rename = "accessTokenMaxTTL")]
    pub access_token_max_ttl: u64,
    /// Token type, usually `Bearer`
    #[serde(default)]
    pub token_type: String,
}

#[cfg(test)]
mod tests {
    use super::*;
    use secrecy::ExposeSecret;

    #[test]
    fn test_login_response_decoding() {
        let body = r#"{"accessToken":"tok","expiresIn":7200,"accessTokenMaxTTL":43200,"tokenType":"Bearer"}"#;
        let response: LoginResponse = serde_json::from_str(body).unwrap();
        assert_eq!(response.access_token.expose_secret(), "tok");
        assert_eq!(response.expires_in, 7200);
        assert_eq!(response.access_token_max_ttl, 43200);
        assert_eq!(response.token_type, "Bearer");
    }

    #[test]
    fn test_login_response_debug_redacts_token() {
        let response: LoginResponse =
            serde_json::from_str(r#"{"accessToken":"super-secret"}"#).unwrap();
        assert!(!format!("{response:?}").contains("super-secret"));
    }

    #[test]
    fn test_form_field_names() {
        let form = UniversalAuthLogin {
            client_id: "id",
            client_secret: "secret",
        };
        let json = serde_json::to_value(&form).unwrap();
        assert_eq!(json["clientId"], "id");
        assert_eq!(json["clientSecret"], "secret");

        let form = OidcAuthLogin {
            identity_id: "ident",
            jwt: "jwt",
        };
        let json = serde_json::to_value(&form).unwrap();
        assert_eq!(json["identityId"], "ident");
        assert_eq!(json["jwt"], "jwt");
    }
}
