//! Reduction of an update to the sub-paths whose values actually changed

use serde_json::{Map, Value};

/// Before/after pair after reduction. `None` means the side is absent.
pub type Extracted = (Option<Value>, Option<Value>);

/// Reduce `before` and `after` to the paths that differ.
///
/// Only keys of `after` are visited: a key that exists solely in `before`
/// is not reported here, removals are the renderer's concern. A key that is
/// new in `after` keeps its whole after-value and contributes nothing to the
/// before side. Sequences are compared as whole values.
///
/// ```
/// use plan_diff::extract_changes;
/// use serde_json::json;
///
/// let (before, after) = extract_changes(&json!({"a": 1, "b": 2}), &json!({"a": 1, "b": 3}));
/// assert_eq!(before, Some(json!({"b": 2})));
/// assert_eq!(after, Some(json!({"b": 3})));
/// ```
pub fn extract_changes(before: &Value, after: &Value) -> Extracted {
    match (before, after) {
        (Value::Object(before_map), Value::Object(after_map)) => extract_maps(before_map, after_map),
        _ if before == after => (None, None),
        _ => (Some(before.clone()), Some(after.clone())),
    }
}

fn extract_maps(before: &Map<String, Value>, after: &Map<String, Value>) -> Extracted {
    let mut before_out = Map::new();
    let mut after_out = Map::new();

    for (key, after_value) in after {
        let (b, a) = match before.get(key) {
            None => (None, Some(after_value.clone())),
            Some(before_value) => extract_changes(before_value, after_value),
        };

        if let Some(b) = b {
            before_out.insert(key.clone(), b);
        }
        if let Some(a) = a {
            after_out.insert(key.clone(), a);
        }
    }

    (non_empty(before_out), non_empty(after_out))
}

fn non_empty(map: Map<String, Value>) -> Option<Value> {
    (!map.is_empty()).then_some(Value::Object(map))
}
