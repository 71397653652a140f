//! Removal of empty values so that "no value" never registers as a difference

use serde_json::{Map, Value};

/// Recursively strip nulls, empty sequences, and empty mappings.
///
/// The outermost value keeps its shape: a top-level mapping whose fields
/// were all stripped comes back as `{}` rather than disappearing, and a
/// top-level sequence comes back as `[]`.
///
/// ```
/// use plan_diff::normalize;
/// use serde_json::json;
///
/// let cleaned = normalize(&json!({"a": null, "b": [null, {}], "c": 1}));
/// assert_eq!(cleaned, json!({"c": 1}));
/// ```
pub fn normalize(value: &Value) -> Value {
    match value {
        Value::Object(map) => Value::Object(prune_map(map)),
        Value::Array(items) => Value::Array(prune_items(items)),
        other => other.clone(),
    }
}

/// Clean a nested value, returning `None` when nothing is left of it.
fn prune(value: &Value) -> Option<Value> {
    match value {
        Value::Null => None,
        Value::Object(map) => {
            let cleaned = prune_map(map);
            (!cleaned.is_empty()).then_some(Value::Object(cleaned))
        }
        Value::Array(items) => {
            let cleaned = prune_items(items);
            (!cleaned.is_empty()).then_some(Value::Array(cleaned))
        }
        scalar => Some(scalar.clone()),
    }
}

fn prune_map(map: &Map<String, Value>) -> Map<String, Value> {
    map.iter()
        .filter_map(|(key, value)| prune(value).map(|cleaned| (key.clone(), cleaned)))
        .collect()
}

fn prune_items(items: &[Value]) -> Vec<Value> {
    items.iter().filter_map(prune).collect()
}
