//! Integration tests for the plan-diff CLI binary.
//!
//! These tests exercise the actual compiled binary using assert_cmd.

use assert_cmd::Command;
use predicates::prelude::*;
use serde_json::Value;
use std::fs;
use std::path::PathBuf;
use tempfile::{TempDir, tempdir};

/// Get a Command for the plan-diff binary, run from an empty directory so
/// no stray config file is picked up
fn plan_diff_cmd(dir: &TempDir) -> Command {
    let mut cmd = Command::new(assert_cmd::cargo::cargo_bin!("plan-diff"));
    cmd.current_dir(dir.path()).env("NO_COLOR", "1").env_remove("PLAN_DIFF_CONFIG");
    cmd
}

fn fixture(name: &str) -> PathBuf {
    PathBuf::from(env!("CARGO_MANIFEST_DIR"))
        .join("../../test-fixtures/plans")
        .join(name)
}

// ============================================================================
// Help and Version Tests
// ============================================================================

#[test]
fn test_help_output() {
    let dir = tempdir().unwrap();
    plan_diff_cmd(&dir)
        .arg("--help")
        .assert()
        .success()
        .stdout(predicate::str::contains("render"))
        .stdout(predicate::str::contains("report"));
}

#[test]
fn test_version_output() {
    let dir = tempdir().unwrap();
    plan_diff_cmd(&dir)
        .arg("--version")
        .assert()
        .success()
        .stdout(predicate::str::contains("plan-diff"));
}

#[test]
fn test_no_command_shows_help_hint() {
    let dir = tempdir().unwrap();
    plan_diff_cmd(&dir)
        .assert()
        .success()
        .stdout(predicate::str::contains("plan-diff --help"));
}

// ============================================================================
// Show Tests
// ============================================================================

#[test]
fn test_show_plain() {
    let dir = tempdir().unwrap();
    let expected = [
        "# aws_instance.web (update)",
        "~ instance_type: t3.small",
        "",
        "# aws_db_instance.main (delete, create)",
        "  engine: postgres",
        "~ engine_version: 16.1",
        "  password: ***REDACTED***",
        "  team: data",
        "",
        "# aws_s3_bucket.logs (create)",
        "+ bucket: web-logs",
        "+ lifecycle_rule:",
        "+   -",
        "+     days: 30",
        "+     id: expire",
        "+ team: platform",
        "",
    ]
    .join("\n");

    plan_diff_cmd(&dir)
        .args(["show", "--format", "plain", "--redact", "PASSWORD"])
        .arg(fixture("web-plan.json"))
        .assert()
        .success()
        .stdout(expected);
}

#[test]
fn test_show_html_uses_markup() {
    let dir = tempdir().unwrap();
    plan_diff_cmd(&dir)
        .args(["show", "--format", "html"])
        .arg(fixture("web-plan.json"))
        .assert()
        .success()
        .stdout(predicate::str::contains(
            r#"<span class="diff-update">instance_type: t3.small</span>"#,
        ))
        .stdout(predicate::str::contains("aws_security_group.web").not())
        .stdout(predicate::str::contains("data.aws_ami.ubuntu").not())
        .stdout(predicate::str::contains("replicate_source_db").not());
}

#[test]
fn test_show_missing_plan_fails() {
    let dir = tempdir().unwrap();
    plan_diff_cmd(&dir)
        .args(["show", "missing.json"])
        .assert()
        .failure()
        .stderr(predicate::str::contains("Plan document not found"));
}

// ============================================================================
// Render Tests
// ============================================================================

#[test]
fn test_render_documents() {
    let dir = tempdir().unwrap();
    let expected = [
        "~ ports:",
        "    - 80",
        "~   - 8443",
        "~ replicas: 3",
        "  secret_token: ***REDACTED***",
        "",
    ]
    .join("\n");

    plan_diff_cmd(&dir)
        .args(["render", "-a", "update", "-f", "plain", "-r", "secret_token"])
        .arg("--before")
        .arg(fixture("before.json"))
        .arg("--after")
        .arg(fixture("after.yaml"))
        .assert()
        .success()
        .stdout(expected);
}

#[test]
fn test_render_uses_config_file() {
    let dir = tempdir().unwrap();
    fs::write(
        dir.path().join(".plan-diff.toml"),
        "[redaction]\nkeys = [\"secret_token\"]\n\n[render]\nformat = \"html\"\n",
    )
    .unwrap();

    plan_diff_cmd(&dir)
        .args(["render", "-a", "create"])
        .arg("--after")
        .arg(fixture("after.yaml"))
        .assert()
        .success()
        .stdout(predicate::str::contains(
            r#"<span class="diff-add">secret_token: ***REDACTED***</span>"#,
        ));
}

#[test]
fn test_malformed_config_fails_before_processing() {
    let dir = tempdir().unwrap();
    fs::write(dir.path().join(".plan-diff.toml"), "[redaction]\nkeys = 42\n").unwrap();

    plan_diff_cmd(&dir)
        .args(["show", "missing.json"])
        .assert()
        .failure()
        .stderr(predicate::str::contains("Failed to parse TOML"));
}

// ============================================================================
// Report Tests
// ============================================================================

#[test]
fn test_report_flat_json() {
    let dir = tempdir().unwrap();
    let output = plan_diff_cmd(&dir)
        .args(["report", "--redact", "password"])
        .arg(fixture("web-plan.json"))
        .output()
        .unwrap();
    assert!(output.status.success());

    let report: Value = serde_json::from_slice(&output.stdout).unwrap();
    let entries = report.as_array().unwrap();
    assert_eq!(entries.len(), 3);
    assert_eq!(entries[0]["address"], "aws_instance.web");
    assert_eq!(entries[1]["after"]["password"], "***REDACTED***");
    assert_eq!(entries[2]["before"], serde_json::json!({}));
}

#[test]
fn test_report_grouped_to_file() {
    let dir = tempdir().unwrap();
    let out = dir.path().join("changes.json");

    plan_diff_cmd(&dir)
        .args(["report", "--group-by", "team", "-o"])
        .arg(&out)
        .arg(fixture("web-plan.json"))
        .assert()
        .success();

    let report: Value = serde_json::from_str(&fs::read_to_string(&out).unwrap()).unwrap();
    let groups: Vec<&String> = report.as_object().unwrap().keys().collect();
    assert_eq!(groups, vec!["data", "frontend", "platform"]);
    assert!(report["frontend"][0]["after"].get("team").is_none());
}

#[test]
fn test_report_missing_group_key_fails() {
    let dir = tempdir().unwrap();
    plan_diff_cmd(&dir)
        .args(["report", "--group-by", "team"])
        .arg(fixture("unowned-plan.json"))
        .assert()
        .failure()
        .stderr(predicate::str::contains("aws_iam_role.ci"));
}

#[test]
fn test_completions_bash() {
    let dir = tempdir().unwrap();
    plan_diff_cmd(&dir)
        .args(["completions", "bash"])
        .assert()
        .success()
        .stdout(predicate::str::contains("plan-diff"));
}
