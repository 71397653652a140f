//! Restriction of a replaced resource's prior state to the fields that survive

use std::collections::BTreeMap;

use serde_json::{Map, Value};

/// Map every key of `after` to the value `before` held for it.
///
/// Keys only `before` has are dropped. A key `before` never had maps to
/// `None`, keeping "absent" apart from an explicit null.
pub fn restrict_before(
    before: &Map<String, Value>,
    after: &Map<String, Value>,
) -> BTreeMap<String, Option<Value>> {
    after
        .keys()
        .map(|key| (key.clone(), before.get(key).cloned()))
        .collect()
}

/// Restrict `before` to the keys of `after` as a renderable value.
///
/// Absent entries are left out of the resulting mapping. When either side
/// is not a mapping there is nothing to restrict and `before` is returned
/// as-is.
pub fn restrict_value(before: &Value, after: &Value) -> Value {
    match (before, after) {
        (Value::Object(before_map), Value::Object(after_map)) => Value::Object(
            restrict_before(before_map, after_map)
                .into_iter()
                .filter_map(|(key, value)| value.map(|v| (key, v)))
                .collect(),
        ),
        _ => before.clone(),
    }
}
