//! Shared proptest generators.

use proptest::prelude::*;
use std::collections::HashMap;

/// Valid export type tokens.
pub fn export_type_strategy() -> impl Strategy<Value = String> {
    prop_oneof![Just("env".to_string()), Just("output".to_string())]
}

/// Valid auth method tokens.
pub fn auth_method_strategy() -> impl Strategy<Value = String> {
    prop_oneof![Just("universal".to_string()), Just("oidc".to_string())]
}

/// Arbitrary strings that are none of `members`, including case variants of them.
pub fn non_member_strategy(members: &'static [&'static str]) -> impl Strategy<Value = String> {
    prop_oneof![
        ".{0,24}",
        prop::sample::select(members).prop_map(str::to_uppercase),
        prop::sample::select(members).prop_map(|m| format!(" {m}")),
    ]
    .prop_filter("must not be a member", move |s| !members.contains(&s.as_str()))
}

/// Opaque access-token-like strings.
pub fn token_strategy() -> impl Strategy<Value = String> {
    "[A-Za-z0-9._-]{16,128}"
}

/// Header maps with valid names and printable values.
pub fn header_map_strategy() -> impl Strategy<Value = HashMap<String, String>> {
    prop::collection::hash_map("x-[a-z][a-z0-9-]{0,15}", "[A-Za-z0-9 ._/-]{1,32}", 0..4)
}

/// Response bodies in the shape the Infisical API returns on failure.
pub fn error_body_strategy() -> impl Strategy<Value = serde_json::Value> {
    ("[A-Za-z ]{1,40}", 400u16..600).prop_map(|(message, status)| {
        serde_json::json!({
            "statusCode": status,
            "message": message,
            "error": "Error",
        })
    })
}
