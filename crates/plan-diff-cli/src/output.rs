//! Presentation of rendered lines and reports

use clap::ValueEnum;
use colored::{ColoredString, Colorize};
use serde::Deserialize;

use plan_diff::{AnnotatedLine, Escape, Report, Tag, to_markup};

use crate::error::Result;

/// How rendered diffs are printed
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, ValueEnum, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum OutputFormat {
    /// Inline HTML markup (`<span class="diff-...">`)
    Html,
    /// Colored terminal output
    #[default]
    Terminal,
    /// Uncolored text with `+`/`~`/`-` markers
    Plain,
}

impl OutputFormat {
    pub fn escape(&self) -> Escape {
        match self {
            OutputFormat::Html => Escape::Html,
            OutputFormat::Terminal | OutputFormat::Plain => Escape::None,
        }
    }
}

/// Serialization used by the report command
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, ValueEnum, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum ReportFormat {
    #[default]
    Json,
    Yaml,
}

pub fn format_lines(lines: &[AnnotatedLine], format: OutputFormat) -> String {
    match format {
        OutputFormat::Html => to_markup(lines),
        OutputFormat::Plain => lines
            .iter()
            .map(|line| format!("{} {}", line.tag.marker(), line.indented()))
            .collect::<Vec<_>>()
            .join("\n"),
        OutputFormat::Terminal => lines
            .iter()
            .map(|line| {
                let text = format!("{} {}", line.tag.marker(), line.indented());
                paint(line.tag, &text).to_string()
            })
            .collect::<Vec<_>>()
            .join("\n"),
    }
}

fn paint(tag: Tag, text: &str) -> ColoredString {
    match tag {
        Tag::Added => text.green().bold(),
        Tag::Updated => text.yellow().bold(),
        Tag::Removed => text.red().bold(),
        Tag::Unchanged => text.normal(),
    }
}

/// Serialize a report. JSON keys are sorted.
pub fn format_report(report: &Report, format: ReportFormat) -> Result<String> {
    let text = match format {
        ReportFormat::Json => {
            let value = serde_json::to_value(report)?;
            serde_json::to_string_pretty(&value)?
        }
        ReportFormat::Yaml => serde_yaml::to_string(report)?,
    };
    Ok(text)
}
