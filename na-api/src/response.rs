//! Response normalization.
//!
//! v2 responses arrive wrapped in an envelope:
//! ```json
//! { "result": "success", "data": { ... } }
//! { "result": "error", "message": "...", "code": 12 }
//! ```
//! v1 responses are bare JSON. The helpers here unwrap envelopes and reshape
//! the keyed mappings some endpoints return into plain lists.

use serde_json::Value;

use na_core::error::{NaError, NaResult};

/// The envelope `result` value marking success.
pub const RESULT_SUCCESS: &str = "success";

/// Parse a body as JSON, falling back to a JSON string of the raw text.
pub fn parse_body(body: &str) -> Value {
    serde_json::from_str(body).unwrap_or_else(|_| Value::String(body.to_string()))
}

/// Whether a value looks like a v2 envelope.
pub fn is_envelope(body: &Value) -> bool {
    body.get("result").is_some()
}

/// Whether a v2 envelope reports success.
pub fn is_success_envelope(body: &Value) -> bool {
    body.get("result").and_then(Value::as_str) == Some(RESULT_SUCCESS)
}

/// Unwrap a v2 envelope.
///
/// Success yields `data` when the key is present, otherwise the whole body.
/// Anything else becomes [`NaError::Api`] with `message` as the error text
/// and the remaining fields (minus `result` and `message`) as detail.
pub fn unwrap_envelope(body: Value) -> NaResult<Value> {
    let Value::Object(mut map) = body else {
        return Err(NaError::Serialization(
            "response envelope is not a JSON object".into(),
        ));
    };

    let result = match map.get("result") {
        Some(Value::String(s)) => s.clone(),
        Some(other) => other.to_string(),
        None => {
            return Err(NaError::Serialization(
                "response envelope missing result".into(),
            ))
        }
    };

    if result == RESULT_SUCCESS {
        return match map.remove("data") {
            Some(data) => Ok(data),
            None => Ok(Value::Object(map)),
        };
    }

    map.remove("result");
    let message = match map.remove("message") {
        Some(Value::String(s)) => s,
        Some(other) => other.to_string(),
        None => format!("request failed with result {result}"),
    };

    Err(NaError::Api {
        message,
        detail: Value::Object(map),
    })
}

/// Turn a keyed mapping into the list of its values, in order.
/// Lists pass through; any other shape is a serialization error.
pub fn keyed_to_list(value: Value) -> NaResult<Vec<Value>> {
    match value {
        Value::Object(map) => Ok(map.into_iter().map(|(_, v)| v).collect()),
        Value::Array(items) => Ok(items),
        other => Err(NaError::Serialization(format!(
            "expected a mapping or list, got {}",
            describe(&other)
        ))),
    }
}

fn describe(value: &Value) -> String {
    let rendered = value.to_string();
    if rendered.chars().count() > 80 {
        let head: String = rendered.chars().take(77).collect();
        format!("{head}...")
    } else {
        rendered
    }
}

/// Rewrite a v1 locations mapping into a list, adding `country` to each entry.
///
/// A body carrying both `error` and `msg` is an API error, not a mapping.
pub fn locations_with_country(value: Value) -> NaResult<Value> {
    if let Value::Object(ref map) = value {
        if map.contains_key("error") && map.contains_key("msg") {
            let mut detail = map.clone();
            let message = match detail.remove("msg") {
                Some(Value::String(s)) => s,
                Some(other) => other.to_string(),
                None => String::new(),
            };
            return Err(NaError::Api {
                message,
                detail: Value::Object(detail),
            });
        }
    }

    let locations = keyed_to_list(value)?
        .into_iter()
        .map(|mut entry| {
            if let Value::Object(ref mut fields) = entry {
                let country = fields
                    .get("flag")
                    .and_then(Value::as_str)
                    .map(str::to_uppercase);
                if let Some(country) = country {
                    fields.insert("country".into(), Value::String(country));
                }
            }
            entry
        })
        .collect();

    Ok(Value::Array(locations))
}

/// Rename the capitalized fields of a v2 session-creation result.
///
/// `Sessions` (a keyed mapping) becomes the `sessions` list, `Modified`
/// becomes `modified`, and `success: true` is added. A payload that is not
/// an object is a serialization error.
pub fn rename_created_sessions(value: Value) -> NaResult<Value> {
    let mut map = match value {
        Value::Object(map) => map,
        other => {
            return Err(NaError::Serialization(format!(
                "session creation result is not an object: {}",
                describe(&other)
            )))
        }
    };

    if let Some(sessions) = map.remove("Sessions") {
        map.insert("sessions".into(), Value::Array(keyed_to_list(sessions)?));
    }
    if let Some(modified) = map.remove("Modified") {
        map.insert("modified".into(), modified);
    }
    map.insert("success".into(), Value::Bool(true));

    Ok(Value::Object(map))
}
