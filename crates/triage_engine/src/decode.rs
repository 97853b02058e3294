use std::collections::BTreeMap;

use serde_json::Value;
use triage_core::{AnalysisError, AnalysisResult};

/// Message used when an error response carries no usable `detail`.
pub const GENERIC_SERVER_ERROR: &str = "the analysis service returned an error";

/// Decode a success body into a result.
///
/// Decoding is permissive: unknown fields are kept, scalars are rendered as
/// text, `null` counts as absent and nested values are kept as compact JSON.
/// Only a non-object body or one without a verdict and rationale is rejected.
pub fn decode_result(body: &[u8]) -> Result<AnalysisResult, AnalysisError> {
    let value: Value = serde_json::from_slice(body).map_err(|err| {
        AnalysisError::server_rejected(format!(
            "the analysis service returned an unreadable response: {err}"
        ))
    })?;
    let Value::Object(object) = value else {
        return Err(AnalysisError::server_rejected(
            "the analysis service returned an unreadable response: expected a JSON object",
        ));
    };

    let fields: BTreeMap<String, String> = object
        .into_iter()
        .filter_map(|(key, value)| field_text(value).map(|text| (key, text)))
        .collect();
    let result = AnalysisResult::from_fields(fields);

    if let Some(missing) = result.missing_minimum_field() {
        return Err(AnalysisError::server_rejected(format!(
            "the analysis service response is missing the {missing} field"
        )));
    }
    Ok(result)
}

/// Turn a non-success response into a `ServerRejected` error.
///
/// A string `detail` is used verbatim; a validation list in the
/// `[{"msg": ...}]` form is joined. Anything else gets a generic message.
pub fn decode_error_body(status: u16, body: &[u8]) -> AnalysisError {
    let detail = serde_json::from_slice::<Value>(body)
        .ok()
        .and_then(|value| value.get("detail").and_then(detail_text));

    match detail {
        Some(message) => AnalysisError::server_rejected(message),
        None => AnalysisError::server_rejected(format!("{GENERIC_SERVER_ERROR} (HTTP {status})")),
    }
}

fn field_text(value: Value) -> Option<String> {
    match value {
        Value::Null => None,
        Value::String(text) => Some(text),
        Value::Bool(flag) => Some(flag.to_string()),
        Value::Number(number) => Some(number.to_string()),
        nested @ (Value::Array(_) | Value::Object(_)) => Some(nested.to_string()),
    }
}

fn detail_text(detail: &Value) -> Option<String> {
    match detail {
        Value::String(text) if !text.trim().is_empty() => Some(text.clone()),
        Value::Array(items) => {
            let messages: Vec<&str> = items
                .iter()
                .filter_map(|item| item.get("msg").and_then(Value::as_str))
                .collect();
            if messages.is_empty() {
                None
            } else {
                Some(messages.join("; "))
            }
        }
        _ => None,
    }
}
