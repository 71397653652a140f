//! Masking of sensitive values by key name

use std::collections::HashSet;

use serde_json::Value;

use crate::error::{Error, Result};

/// Token substituted for every redacted value.
pub const REDACTION_MASK: &str = "***REDACTED***";

/// Case-insensitive set of key names whose values must never be shown.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct RedactionKeys {
    keys: HashSet<String>,
}

impl RedactionKeys {
    /// An empty set; redaction leaves every value untouched.
    pub fn none() -> Self {
        Self::default()
    }

    pub fn new<I, S>(keys: I) -> Self
    where
        I: IntoIterator<Item = S>,
        S: AsRef<str>,
    {
        Self {
            keys: keys
                .into_iter()
                .map(|key| key.as_ref().to_lowercase())
                .collect(),
        }
    }

    /// Build the set from raw configuration, which must be a sequence of strings.
    pub fn from_value(value: &Value) -> Result<Self> {
        let items = value
            .as_array()
            .ok_or_else(|| Error::redaction_keys(format!("expected a list of strings, got {value}")))?;

        let keys = items
            .iter()
            .map(|item| {
                item.as_str()
                    .ok_or_else(|| Error::redaction_keys(format!("expected a string, got {item}")))
            })
            .collect::<Result<Vec<_>>>()?;

        Ok(Self::new(keys))
    }

    pub fn is_empty(&self) -> bool {
        self.keys.is_empty()
    }

    pub fn len(&self) -> usize {
        self.keys.len()
    }

    pub fn matches(&self, key: &str) -> bool {
        !self.keys.is_empty() && self.keys.contains(&key.to_lowercase())
    }
}

/// Replace every value stored under a matching key with [`REDACTION_MASK`].
///
/// Matching values are masked whole, whatever their shape, so the mask
/// reaches the renderer as an opaque scalar.
pub fn redact(value: &Value, keys: &RedactionKeys) -> Value {
    if keys.is_empty() {
        return value.clone();
    }

    match value {
        Value::Object(map) => Value::Object(
            map.iter()
                .map(|(key, child)| {
                    let redacted = if keys.matches(key) {
                        Value::String(REDACTION_MASK.to_string())
                    } else {
                        redact(child, keys)
                    };
                    (key.clone(), redacted)
                })
                .collect(),
        ),
        Value::Array(items) => Value::Array(items.iter().map(|item| redact(item, keys)).collect()),
        scalar => scalar.clone(),
    }
}
