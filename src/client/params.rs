//! Merging of the user's `parameters` JSON into the request body.

use serde_json::{json, Map, Value};
use tracing::warn;

/// Parameters used when none are configured or the configured text is unusable.
pub fn default_parameters() -> Map<String, Value> {
    match json!({ "temperature": 0.1, "top_p": 0.99 }) {
        Value::Object(map) => map,
        _ => Map::new(),
    }
}

/// Parse `raw` into a parameter object.
///
/// Never fails: unparseable or non-object input is logged and replaced with
/// [`default_parameters`].
pub fn merge_parameters(raw: Option<&str>) -> Map<String, Value> {
    let Some(raw) = raw.map(str::trim).filter(|s| !s.is_empty()) else {
        return default_parameters();
    };

    match serde_json::from_str::<Value>(raw) {
        Ok(Value::Object(map)) => map,
        Ok(other) => {
            warn!(kind = json_kind(&other), "parameters is not a JSON object, using defaults");
            default_parameters()
        }
        Err(e) => {
            warn!(error = %e, "failed to parse parameters, using defaults");
            default_parameters()
        }
    }
}

fn json_kind(value: &Value) -> &'static str {
    match value {
        Value::Null => "null",
        Value::Bool(_) => "bool",
        Value::Number(_) => "number",
        Value::String(_) => "string",
        Value::Array(_) => "array",
        Value::Object(_) => "object",
    }
}
