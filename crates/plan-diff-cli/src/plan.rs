//! Reading resource changes out of a Terraform plan JSON document
//!
//! Only `resource_changes[].{address,type,name,change.{actions,before,after}}`
//! is read; `after_unknown` and everything else in the plan is ignored.

use std::fs;
use std::path::Path;

use serde::Deserialize;
use serde_json::Value;

use plan_diff::{ActionSet, ResourceChange};

use crate::error::{CliError, Result};

#[derive(Debug, Deserialize)]
struct RawResourceChange {
    #[serde(default)]
    address: String,
    #[serde(rename = "type", default)]
    resource_type: String,
    #[serde(default)]
    name: String,
    #[serde(default)]
    change: RawChange,
}

#[derive(Debug, Default, Deserialize)]
struct RawChange {
    #[serde(default)]
    actions: Vec<String>,
    #[serde(default)]
    before: Option<Value>,
    #[serde(default)]
    after: Option<Value>,
}

impl RawResourceChange {
    fn into_change(self, actions: ActionSet) -> ResourceChange {
        let mut change = ResourceChange::new(self.address, self.resource_type, self.name, actions);
        change.before = self.change.before;
        change.after = self.change.after;
        change
    }
}

/// Load every resource change from the plan at `path`, in plan order.
pub fn load_plan(path: &Path) -> Result<Vec<ResourceChange>> {
    if !path.exists() {
        return Err(CliError::PlanNotFound {
            path: path.to_path_buf(),
        });
    }

    let content = fs::read_to_string(path).map_err(|e| CliError::io(path, e))?;
    let plan: Value =
        serde_json::from_str(&content).map_err(|e| CliError::parse(path, "JSON", e))?;

    let changes = parse_plan(&plan)?;
    tracing::debug!(path = %path.display(), resources = changes.len(), "Loaded plan");
    Ok(changes)
}

/// Extract resource changes from an already parsed plan document.
///
/// Entries whose actions fall outside create/update/delete/no-op, such as a
/// data source `read` or a `forget`, are skipped with a warning.
pub fn parse_plan(plan: &Value) -> Result<Vec<ResourceChange>> {
    let entries = plan
        .get("resource_changes")
        .and_then(Value::as_array)
        .ok_or_else(|| CliError::invalid_plan("resource_changes missing or malformed"))?;

    let mut changes = Vec::with_capacity(entries.len());
    for (index, entry) in entries.iter().enumerate() {
        let raw = serde_json::from_value::<RawResourceChange>(entry.clone())
            .map_err(|e| CliError::invalid_plan(format!("resource_changes[{index}]: {e}")))?;

        match ActionSet::parse(&raw.change.actions) {
            Ok(actions) => changes.push(raw.into_change(actions)),
            Err(e) => {
                tracing::warn!(address = %raw.address, error = %e, "Skipping resource with unsupported actions");
            }
        }
    }
    Ok(changes)
}

#[cfg(test)]
mod tests {
    use super::*;
    use plan_diff::Action;
    use pretty_assertions::assert_eq;
    use serde_json::json;
    use tempfile::TempDir;

    #[test]
    fn test_parse_plan() {
        let plan = json!({
            "format_version": "1.2",
            "resource_changes": [
                {
                    "address": "aws_instance.web",
                    "type": "aws_instance",
                    "name": "web",
                    "change": {
                        "actions": ["update"],
                        "before": {"ami": "a"},
                        "after": {"ami": "b"},
                        "after_unknown": {"id": true}
                    }
                },
                {
                    "address": "aws_s3_bucket.logs",
                    "type": "aws_s3_bucket",
                    "name": "logs",
                    "change": {"actions": ["create"], "before": null, "after": {"bucket": "logs"}}
                }
            ]
        });

        let changes = parse_plan(&plan).unwrap();
        assert_eq!(changes.len(), 2);
        assert_eq!(changes[0].address, "aws_instance.web");
        assert_eq!(changes[0].actions, ActionSet::new([Action::Update]));
        assert_eq!(changes[0].after, Some(json!({"ami": "b"})));
        assert_eq!(changes[1].resource_type, "aws_s3_bucket");
        assert_eq!(changes[1].before, None);
    }

    #[test]
    fn test_missing_resource_changes() {
        for plan in [json!({}), json!({"resource_changes": {"a": 1}})] {
            assert!(matches!(
                parse_plan(&plan),
                Err(CliError::InvalidPlan { message }) if message.contains("resource_changes")
            ));
        }
    }

    #[test]
    fn test_data_source_read_is_skipped() {
        let plan = json!({
            "resource_changes": [
                {
                    "address": "aws_instance.web",
                    "type": "aws_instance",
                    "name": "web",
                    "change": {"actions": ["update"], "before": {"ami": "a"}, "after": {"ami": "b"}}
                },
                {
                    "address": "data.aws_ami.ubuntu",
                    "type": "aws_ami",
                    "name": "ubuntu",
                    "change": {"actions": ["read"], "before": null, "after": {"id": "ami-1"}}
                },
                {
                    "address": "aws_iam_role.old",
                    "type": "aws_iam_role",
                    "name": "old",
                    "change": {"actions": ["forget"], "before": {"name": "old"}, "after": null}
                }
            ]
        });

        let changes = parse_plan(&plan).unwrap();
        assert_eq!(changes.len(), 1);
        assert_eq!(changes[0].address, "aws_instance.web");
        assert_eq!(changes[0].actions, ActionSet::new([Action::Update]));
    }

    #[test]
    fn test_malformed_entry_is_invalid() {
        let plan = json!({"resource_changes": [{"change": {"actions": "update"}}]});
        assert!(matches!(
            parse_plan(&plan),
            Err(CliError::InvalidPlan { message }) if message.starts_with("resource_changes[0]")
        ));
    }

    #[test]
    fn test_load_plan_not_found() {
        let dir = TempDir::new().unwrap();
        assert!(matches!(
            load_plan(&dir.path().join("plan.json")),
            Err(CliError::PlanNotFound { .. })
        ));
    }

    #[test]
    fn test_load_plan_invalid_json() {
        let dir = TempDir::new().unwrap();
        let path = dir.path().join("plan.json");
        fs::write(&path, "not json").unwrap();
        assert!(matches!(load_plan(&path), Err(CliError::Parse { .. })));
    }
}
