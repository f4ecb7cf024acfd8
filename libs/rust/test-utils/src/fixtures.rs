//! Test fixtures with sample API payloads.

use serde_json::{Value, json};

/// Access token returned by the sample login responses.
pub const ACCESS_TOKEN: &str = "eyJhbGciOiJIUzI1NiJ9.test-access-token";

/// Successful login response body.
#[must_use]
pub fn login_response() -> Value {
    json!({
        "accessToken": ACCESS_TOKEN,
        "expiresIn": 7200,
        "accessTokenMaxTTL": 43200,
        "tokenType": "Bearer",
    })
}

/// Failed login response body.
#[must_use]
pub fn unauthorized_response() -> Value {
    json!({
        "statusCode": 401,
        "message": "bad token",
        "error": "UnauthorizedError",
    })
}

/// GitHub OIDC token endpoint response body.
#[must_use]
pub fn id_token_response(token: &str) -> Value {
    json!({ "count": 1, "value": token })
}
