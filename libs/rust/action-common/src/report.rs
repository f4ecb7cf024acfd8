//! Terminal error reporting.

use crate::error::ActionError;
use crate::host::ActionHost;
use serde::Serialize;
use serde_json::ser::PrettyFormatter;
use serde_json::Value;

/// Write a diagnostic for `err` to the host's error stream.
///
/// When the failure carries a server response, the body's `message` field is
/// emitted, followed by the whole body pretty-printed if it is structured.
/// Anything else is reported by its full context chain. This never fails.
pub fn report_error(host: &dyn ActionHost, err: &anyhow::Error) {
    let response = err
        .chain()
        .filter_map(|e| e.downcast_ref::<ActionError>())
        .find(|e| matches!(e, ActionError::Response { .. }));

    match response {
        Some(response) => report_response_body(host, response.response_body()),
        None => host.error(&format!("{err:#}")),
    }
}

fn report_response_body(host: &dyn ActionHost, body: Option<&Value>) {
    let Some(body) = body else {
        return;
    };

    match body.get("message") {
        Some(Value::String(message)) => host.error(message),
        Some(message) => host.error(&message.to_string()),
        None => {}
    }

    // `null` is reported like an object.
    if body.is_object() || body.is_array() || body.is_null() {
        if let Some(pretty) = to_indented_json(body) {
            host.error(&pretty);
        }
    }
}

/// Serialize `value` with 4-space indentation.
#[must_use]
pub fn to_indented_json(value: &Value) -> Option<String> {
    let mut buf = Vec::new();
    let mut ser = serde_json::Serializer::with_formatter(&mut buf, PrettyFormatter::with_indent(b"    "));
    value.serialize(&mut ser).ok()?;
    String::from_utf8(buf).ok()
}
