//! Render command implementation
//!
//! Diffs two standalone documents through the same pipeline a planned
//! resource goes through.

use std::path::Path;

use serde_json::Value;

use plan_diff::{ActionSet, RedactionKeys, RenderOptions, ResourceChange, render_resource};

use crate::document;
use crate::error::{CliError, Result};
use crate::output::{OutputFormat, format_lines};

/// Arguments of the render command after config merging
#[derive(Debug, Clone)]
pub struct RenderArgs<'a> {
    pub before: Option<&'a Path>,
    pub after: Option<&'a Path>,
    pub actions: &'a [String],
    pub format: OutputFormat,
    pub suppress_removals: bool,
}

/// Run the render command, printing the diff to stdout.
pub fn run_render(args: &RenderArgs<'_>, keys: &RedactionKeys) -> Result<()> {
    let output = render_documents(args, keys)?;
    if !output.is_empty() {
        println!("{output}");
    }
    Ok(())
}

/// Produce the rendered diff for the two documents.
pub fn render_documents(args: &RenderArgs<'_>, keys: &RedactionKeys) -> Result<String> {
    if args.before.is_none() && args.after.is_none() {
        return Err(CliError::user(
            "Nothing to diff: pass --before, --after, or both",
        ));
    }

    let actions = ActionSet::parse(args.actions)?;
    let mut change = ResourceChange::new("document", "document", "document", actions);
    change.before = args.before.map(document::load::<Value>).transpose()?;
    change.after = args.after.map(document::load::<Value>).transpose()?;

    let options = RenderOptions::default()
        .suppressing_removals(args.suppress_removals)
        .with_escape(args.format.escape());
    let lines = render_resource(&change, keys, &options);

    tracing::debug!(lines = lines.len(), actions = %change.actions, "Rendered documents");
    Ok(format_lines(&lines, args.format))
}
