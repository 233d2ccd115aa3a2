use crate::core::errors::BgwError;
use serde_json::{Map, Value};

/// Serialize a JSON value with every object's keys in lexicographic order and
/// no insignificant whitespace.
///
/// The output does not depend on how the value was built or on whether
/// serde_json's `preserve_order` feature is enabled somewhere in the build.
pub fn to_canonical_json(value: &Value) -> Result<String, BgwError> {
    Ok(serde_json::to_string(&sort_keys(value))?)
}

/// Wire form of an optional request body: canonical JSON, or the empty string
/// when there is no body (an empty object counts as no body).
pub fn encode_body(body: Option<&Value>) -> Result<String, BgwError> {
    match body {
        None | Some(Value::Null) => Ok(String::new()),
        Some(Value::Object(map)) if map.is_empty() => Ok(String::new()),
        Some(value) => to_canonical_json(value),
    }
}

fn sort_keys(value: &Value) -> Value {
    match value {
        Value::Object(map) => {
            let mut entries: Vec<(&String, &Value)> = map.iter().collect();
            entries.sort_by(|a, b| a.0.cmp(b.0));
            let mut sorted = Map::with_capacity(entries.len());
            for (key, inner) in entries {
                sorted.insert(key.clone(), sort_keys(inner));
            }
            Value::Object(sorted)
        }
        Value::Array(items) => Value::Array(items.iter().map(sort_keys).collect()),
        other => other.clone(),
    }
}
