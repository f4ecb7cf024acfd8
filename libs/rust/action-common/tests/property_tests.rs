//! Property-based tests for action-common crate.
//!
//! These tests verify the reporter, the runner file commands, and the request
//! client factory across generated inputs.

use action_common::host::{escape_data, escape_property};
use action_common::{
    ActionError, ActionHost, GithubActionsHost, create_client, report_error,
};
use proptest::prelude::*;
use serde_json::json;
use test_utils::{MockActionHost, error_body_strategy, header_map_strategy};
use wiremock::matchers::{header, method, path};
use wiremock::{Mock, MockServer, ResponseTemplate};

fn response_error(body: Option<serde_json::Value>) -> anyhow::Error {
    ActionError::Response { status: 401, body }.into()
}

#[test]
fn test_report_response_object() {
    let host = MockActionHost::new();
    report_error(&host, &response_error(Some(json!({ "message": "bad token" }))));

    assert_eq!(
        host.errors(),
        vec![
            "bad token".to_string(),
            "{\n    \"message\": \"bad token\"\n}".to_string(),
        ]
    );
}

#[test]
fn test_report_response_without_message() {
    let host = MockActionHost::new();
    report_error(&host, &response_error(Some(json!({ "error": "x" }))));
    assert_eq!(host.errors(), vec!["{\n    \"error\": \"x\"\n}".to_string()]);
}

#[test]
fn test_report_response_plain_text_and_empty() {
    let host = MockActionHost::new();
    report_error(&host, &response_error(Some(json!("Bad Gateway"))));
    report_error(&host, &response_error(None));
    assert!(host.errors().is_empty());
}

#[test]
fn test_report_generic_error() {
    let host = MockActionHost::new();
    report_error(&host, &anyhow::anyhow!("boom"));
    assert_eq!(host.errors(), vec!["boom".to_string()]);
}

#[test]
fn test_report_finds_response_under_context() {
    let host = MockActionHost::new();
    let err = response_error(Some(json!({ "message": "denied" }))).context("Login failed");
    report_error(&host, &err);
    assert_eq!(host.errors()[0], "denied");
    assert_eq!(host.errors().len(), 2);
}

#[test]
fn test_report_structured_message() {
    let host = MockActionHost::new();
    let body = json!({
        "statusCode": 422,
        "message": [{ "path": ["clientId"], "message": "Required" }],
    });
    report_error(
        &host,
        &ActionError::Response { status: 422, body: Some(body) }.into(),
    );

    let errors = host.errors();
    assert_eq!(errors.len(), 2);
    assert_eq!(errors[0], r#"[{"path":["clientId"],"message":"Required"}]"#);
    assert!(errors[1].starts_with("{\n    \"statusCode\": 422"));
}

#[test]
fn test_report_null_body() {
    let host = MockActionHost::new();
    report_error(&host, &response_error(Some(serde_json::Value::Null)));
    assert_eq!(host.errors(), vec!["null".to_string()]);
}

#[test]
fn test_report_keeps_server_key_order() {
    let host = MockActionHost::new();
    let body: serde_json::Value = serde_json::from_str(
        r#"{"statusCode":401,"message":"Invalid credentials","error":"Unauthorized"}"#,
    )
    .unwrap();
    report_error(&host, &response_error(Some(body)));

    assert_eq!(
        host.errors()[1],
        "{\n    \"statusCode\": 401,\n    \"message\": \"Invalid credentials\",\n    \"error\": \"Unauthorized\"\n}"
    );
}

#[test]
fn test_report_generic_error_under_context() {
    let host = MockActionHost::new();
    let err = anyhow::Error::from(ActionError::Command("connection refused".to_string()))
        .context("Failed to log in with universal auth");
    report_error(&host, &err);

    let errors = host.errors();
    assert_eq!(errors.len(), 1);
    assert!(errors[0].starts_with("Failed to log in with universal auth: "));
    assert!(errors[0].contains("connection refused"));
}

#[test]
fn test_file_commands_append() {
    let dir = tempfile::tempdir().unwrap();
    let env_file = dir.path().join("env");
    let output_file = dir.path().join("output");
    std::fs::write(&env_file, "EXISTING=1\n").unwrap();

    let host = GithubActionsHost::new(Box::new(std::io::sink()))
        .with_env_file(&env_file)
        .with_output_file(&output_file);

    host.export_variable("INFISICAL_TOKEN", "tok").unwrap();
    host.set_output("access-token", "tok").unwrap();

    let env = std::fs::read_to_string(&env_file).unwrap();
    let mut lines = env.lines();
    assert_eq!(lines.next(), Some("EXISTING=1"));
    let opener = lines.next().unwrap();
    let delimiter = opener.strip_prefix("INFISICAL_TOKEN<<").unwrap();
    assert!(delimiter.starts_with("ghadelimiter_"));
    assert_eq!(lines.next(), Some("tok"));
    assert_eq!(lines.next(), Some(delimiter));
    assert_eq!(lines.next(), None);

    let output = std::fs::read_to_string(&output_file).unwrap();
    assert!(output.starts_with("access-token<<ghadelimiter_"));
    assert!(output.contains("\ntok\n"));
}

#[tokio::test]
async fn test_client_sends_default_headers() {
    let server = MockServer::start().await;
    Mock::given(method("GET"))
        .and(path("/ping"))
        .and(header("X-Key", "v"))
        .respond_with(ResponseTemplate::new(200).set_body_json(json!({ "ok": true })))
        .expect(1)
        .mount(&server)
        .await;

    let headers = std::collections::HashMap::from([("X-Key".to_string(), "v".to_string())]);
    let client = create_client(&server.uri(), Some(&headers)).unwrap();
    let body: serde_json::Value = client.send_json(client.get("/ping")).await.unwrap();
    assert_eq!(body, json!({ "ok": true }));
}

#[tokio::test]
async fn test_construction_performs_no_io() {
    let server = MockServer::start().await;
    let _client = create_client(&server.uri(), None).unwrap();
    assert!(server.received_requests().await.unwrap_or_default().is_empty());
}

proptest! {
    #![proptest_config(ProptestConfig::with_cases(100))]

    /// Structured bodies always yield the message line and the indented body.
    #[test]
    fn prop_report_structured_body(body in error_body_strategy()) {
        let host = MockActionHost::new();
        report_error(&host, &response_error(Some(body.clone())));

        let errors = host.errors();
        prop_assert_eq!(errors.len(), 2);
        prop_assert_eq!(errors[0].as_str(), body["message"].as_str().unwrap());
        prop_assert!(errors[1].contains("\n    \"message\""));
        let reparsed: serde_json::Value = serde_json::from_str(&errors[1]).unwrap();
        prop_assert_eq!(reparsed, body);
    }

    /// Generic errors yield exactly one line with their message.
    #[test]
    fn prop_report_generic(msg in "[a-zA-Z0-9 ]{1,50}") {
        let host = MockActionHost::new();
        report_error(&host, &anyhow::anyhow!("{msg}"));
        prop_assert_eq!(host.errors(), vec![msg]);
    }

    /// Escaped data never contains raw line breaks.
    #[test]
    fn prop_escaped_data_single_line(s in ".*") {
        let escaped = escape_data(&s);
        prop_assert!(!escaped.contains('\n') && !escaped.contains('\r'));
        let prop = escape_property(&s);
        prop_assert!(!prop.contains(':') && !prop.contains(','));
    }

    /// Every default header lands on every request.
    #[test]
    fn prop_default_headers_applied(headers in header_map_strategy()) {
        let client = create_client("https://api.example.com", Some(&headers)).unwrap();
        let request = client.post("/api/v1/x").build().unwrap();
        prop_assert_eq!(request.url().as_str(), "https://api.example.com/api/v1/x");
        for (name, value) in &headers {
            prop_assert_eq!(request.headers()[name.as_str()].to_str().unwrap(), value.as_str());
        }
    }
}
