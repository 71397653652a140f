//! Show command implementation
//!
//! Renders each changed resource of a plan under a header line.

use std::path::Path;

use colored::Colorize;

use plan_diff::{RedactionKeys, RenderOptions, ResourceChange, escape_html, render_resource};

use crate::error::Result;
use crate::output::{OutputFormat, format_lines};
use crate::plan::load_plan;

/// Run the show command
pub fn run_show(plan: &Path, format: OutputFormat, keys: &RedactionKeys) -> Result<()> {
    let changes = load_plan(plan)?;
    let output = show_changes(&changes, format, keys);

    if output.is_empty() {
        if format == OutputFormat::Terminal {
            println!("{} No changes. Infrastructure matches the plan.", "OK".green().bold());
        }
        return Ok(());
    }

    println!("{output}");
    Ok(())
}

/// Render every resource with an effective change, separated by blank lines.
pub fn show_changes(changes: &[ResourceChange], format: OutputFormat, keys: &RedactionKeys) -> String {
    let options = RenderOptions::default().with_escape(format.escape());

    changes
        .iter()
        .filter(|change| change.has_effective_change())
        .map(|change| {
            let lines = render_resource(change, keys, &options);
            let body = format_lines(&lines, format);
            let header = header(change, format);
            if body.is_empty() {
                header
            } else {
                format!("{header}\n{body}")
            }
        })
        .collect::<Vec<_>>()
        .join("\n\n")
}

fn header(change: &ResourceChange, format: OutputFormat) -> String {
    let text = format!("{} ({})", change.address, change.actions);
    match format {
        OutputFormat::Html => format!("# {}", escape_html(&text)),
        OutputFormat::Plain => format!("# {text}"),
        OutputFormat::Terminal => format!("{} {}", "#".blue().bold(), text.bold()),
    }
}
