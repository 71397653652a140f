//! Change entries for reporting, flat or grouped by a metadata field

use std::collections::BTreeMap;

use serde::{Deserialize, Serialize};
use serde_json::Value;

use crate::action::ActionSet;
use crate::error::{Error, Result};
use crate::redact::{RedactionKeys, redact};
use crate::resource::ResourceChange;

/// A resource with an effective difference, as handed to the caller
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct ChangeEntry {
    pub address: String,
    #[serde(rename = "type")]
    pub resource_type: String,
    pub name: String,
    pub actions: ActionSet,
    pub before: Value,
    pub after: Value,
}

impl ChangeEntry {
    /// Build the entry for `change`.
    ///
    /// Returns `None` for no-ops and for resources whose normalized before
    /// and after are equal. Both sides are redacted.
    pub fn from_change(change: &ResourceChange, keys: &RedactionKeys) -> Option<Self> {
        if !change.has_effective_change() {
            tracing::debug!(address = %change.address, "Skipping resource without effective difference");
            return None;
        }

        let before = change.normalized_before();
        let after = change.normalized_after();

        Some(Self {
            address: change.address.clone(),
            resource_type: change.resource_type.clone(),
            name: change.name.clone(),
            actions: change.actions.clone(),
            before: redact(&before, keys),
            after: redact(&after, keys),
        })
    }

    /// Take `key` out of both sides, returning the after-side value if
    /// present and the before-side value otherwise.
    fn take_field(&mut self, key: &str) -> Option<Value> {
        let after = remove_field(&mut self.after, key);
        let before = remove_field(&mut self.before, key);
        after.or(before)
    }
}

fn remove_field(value: &mut Value, key: &str) -> Option<Value> {
    match value {
        Value::Object(map) => map.remove(key),
        _ => None,
    }
}

fn group_name(value: &Value) -> String {
    match value {
        Value::String(s) => s.clone(),
        other => other.to_string(),
    }
}

/// Entries for every resource with an effective difference, in input order.
pub fn build_entries<'a, I>(changes: I, keys: &RedactionKeys) -> Vec<ChangeEntry>
where
    I: IntoIterator<Item = &'a ResourceChange>,
{
    changes
        .into_iter()
        .filter_map(|change| ChangeEntry::from_change(change, keys))
        .collect()
}

/// Entries bucketed by the value of `group_key`.
///
/// The field is looked up in the after side first, then the before side, and
/// removed from both before the entry is stored. Buckets are ordered by
/// name; entries inside a bucket keep input order. A resource with a change
/// but no such field on either side fails the whole call.
pub fn group_entries<'a, I>(
    changes: I,
    keys: &RedactionKeys,
    group_key: &str,
) -> Result<BTreeMap<String, Vec<ChangeEntry>>>
where
    I: IntoIterator<Item = &'a ResourceChange>,
{
    let mut groups: BTreeMap<String, Vec<ChangeEntry>> = BTreeMap::new();

    for change in changes {
        let Some(mut entry) = ChangeEntry::from_change(change, keys) else {
            continue;
        };

        let group = entry
            .take_field(group_key)
            .map(|value| group_name(&value))
            .ok_or_else(|| Error::missing_group_key(&entry.address, group_key))?;

        tracing::trace!(address = %entry.address, group = %group, "Grouped change entry");
        groups.entry(group).or_default().push(entry);
    }

    Ok(groups)
}

/// How a report is assembled
#[derive(Debug, Clone, Default)]
pub struct ReportOptions {
    pub redact: RedactionKeys,
    /// Group entries by this field instead of listing them flat
    pub group_by: Option<String>,
}

/// A finished report
#[derive(Debug, Clone, PartialEq, Serialize)]
#[serde(untagged)]
pub enum Report {
    Flat(Vec<ChangeEntry>),
    Grouped(BTreeMap<String, Vec<ChangeEntry>>),
}

impl Report {
    /// Total number of entries across all groups
    pub fn len(&self) -> usize {
        match self {
            Report::Flat(entries) => entries.len(),
            Report::Grouped(groups) => groups.values().map(Vec::len).sum(),
        }
    }

    pub fn is_empty(&self) -> bool {
        self.len() == 0
    }
}

pub fn build_report(changes: &[ResourceChange], options: &ReportOptions) -> Result<Report> {
    let report = match &options.group_by {
        Some(key) => Report::Grouped(group_entries(changes, &options.redact, key)?),
        None => Report::Flat(build_entries(changes, &options.redact)),
    };

    tracing::debug!(
        resources = changes.len(),
        entries = report.len(),
        "Built change report"
    );
    Ok(report)
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::action::Action;
    use pretty_assertions::assert_eq;
    use serde_json::json;

    fn change(address: &str, actions: &[Action], before: Value, after: Value) -> ResourceChange {
        ResourceChange::new(address, "aws_instance", address, ActionSet::new(actions.to_vec()))
            .with_before(before)
            .with_after(after)
    }

    #[test]
    fn test_from_change_skips_noop_and_equal() {
        let keys = RedactionKeys::none();
        let noop = change("a", &[Action::NoOp], json!({"x": 1}), json!({"x": 2}));
        assert!(ChangeEntry::from_change(&noop, &keys).is_none());

        // differs only by nulls and empty containers
        let same = change("b", &[Action::Update], json!({"x": 1, "y": null}), json!({"x": 1, "z": []}));
        assert!(ChangeEntry::from_change(&same, &keys).is_none());
    }

    #[test]
    fn test_from_change_normalizes_and_redacts() {
        let c = change(
            "db",
            &[Action::Update],
            json!({"password": "old", "size": 1, "note": null}),
            json!({"password": "new", "size": 2}),
        );
        let entry = ChangeEntry::from_change(&c, &RedactionKeys::new(["password"])).unwrap();
        assert_eq!(entry.before, json!({"password": "***REDACTED***", "size": 1}));
        assert_eq!(entry.after, json!({"password": "***REDACTED***", "size": 2}));
    }

    #[test]
    fn test_entry_serializes_type_field() {
        let c = change("web", &[Action::Create], json!(null), json!({"a": 1}));
        let entry = ChangeEntry::from_change(&c, &RedactionKeys::none()).unwrap();
        let value = serde_json::to_value(&entry).unwrap();
        assert_eq!(value["type"], json!("aws_instance"));
        assert_eq!(value["actions"], json!(["create"]));
        assert_eq!(value["before"], json!({}));
    }

    #[test]
    fn test_take_field_prefers_after() {
        let c = change("web", &[Action::Update], json!({"team": "a", "x": 1}), json!({"team": "b", "x": 2}));
        let mut entry = ChangeEntry::from_change(&c, &RedactionKeys::none()).unwrap();
        assert_eq!(entry.take_field("team"), Some(json!("b")));
        assert_eq!(entry.before, json!({"x": 1}));
        assert_eq!(entry.after, json!({"x": 2}));
    }

    #[test]
    fn test_group_name_of_non_strings() {
        assert_eq!(group_name(&json!("core")), "core");
        assert_eq!(group_name(&json!(7)), "7");
        assert_eq!(group_name(&json!(["a"])), r#"["a"]"#);
    }
}
