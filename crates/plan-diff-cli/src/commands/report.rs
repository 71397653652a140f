//! Report command implementation
//!
//! Turns a plan into change entries, flat or grouped, serialized as JSON or
//! YAML.

use std::fs;
use std::path::Path;

use plan_diff::{ReportOptions, build_report};

use crate::error::{CliError, Result};
use crate::output::{ReportFormat, format_report};
use crate::plan::load_plan;

/// Run the report command
pub fn run_report(
    plan: &Path,
    options: &ReportOptions,
    format: ReportFormat,
    output: Option<&Path>,
) -> Result<()> {
    let text = report_text(plan, options, format)?;

    match output {
        Some(path) => {
            fs::write(path, format!("{text}\n")).map_err(|e| CliError::io(path, e))?;
            tracing::info!(path = %path.display(), "Wrote report");
        }
        None => println!("{text}"),
    }
    Ok(())
}

/// Build and serialize the report for the plan at `plan`.
pub fn report_text(plan: &Path, options: &ReportOptions, format: ReportFormat) -> Result<String> {
    let changes = load_plan(plan)?;
    let report = build_report(&changes, options)?;
    format_report(&report, format)
}
