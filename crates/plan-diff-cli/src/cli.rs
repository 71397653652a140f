//! CLI argument parsing using clap derive

use std::path::PathBuf;

use clap::{Parser, Subcommand};
use clap_complete::Shell;

use crate::output::{OutputFormat, ReportFormat};

/// plan-diff - Annotated before/after diffs for infrastructure plans
#[derive(Parser, Debug)]
#[command(name = "plan-diff")]
#[command(author, version, about, long_about = None)]
pub struct Cli {
    /// Enable verbose output
    #[arg(short, long, global = true)]
    pub verbose: bool,

    /// Config file (defaults to .plan-diff.toml in the working directory)
    #[arg(short, long, global = true, env = "PLAN_DIFF_CONFIG")]
    pub config: Option<PathBuf>,

    /// Extra key to redact, case-insensitive (repeatable)
    #[arg(short, long = "redact", global = true)]
    pub redact: Vec<String>,

    /// The command to run
    #[command(subcommand)]
    pub command: Option<Commands>,
}

/// Available commands
#[derive(Subcommand, Debug, Clone, PartialEq, Eq)]
pub enum Commands {
    /// Diff two standalone documents
    ///
    /// Documents are read as JSON, YAML, or TOML by extension. A missing
    /// side is treated as empty.
    ///
    /// Examples:
    ///   plan-diff render --before old.json --after new.json -a update
    ///   plan-diff render --after new.yaml -a create --format html
    Render {
        /// Document holding the prior state
        #[arg(long)]
        before: Option<PathBuf>,

        /// Document holding the planned state
        #[arg(long)]
        after: Option<PathBuf>,

        /// Declared action tag: create, update, delete, no-op (repeatable)
        #[arg(short, long = "action")]
        actions: Vec<String>,

        /// Output format
        #[arg(short, long, value_enum)]
        format: Option<OutputFormat>,

        /// Do not list keys and items that only exist before
        #[arg(long)]
        suppress_removals: bool,
    },

    /// Render every changed resource of a plan
    Show {
        /// Terraform plan JSON (`terraform show -json`)
        plan: PathBuf,

        /// Output format
        #[arg(short, long, value_enum)]
        format: Option<OutputFormat>,
    },

    /// Summarize a plan as change entries
    ///
    /// Examples:
    ///   plan-diff report plan.json
    ///   plan-diff report plan.json --group-by team --output-format yaml
    Report {
        /// Terraform plan JSON (`terraform show -json`)
        plan: PathBuf,

        /// Group entries by this top-level field
        #[arg(short, long)]
        group_by: Option<String>,

        /// Serialization of the report
        #[arg(long, value_enum)]
        output_format: Option<ReportFormat>,

        /// Write the report to a file instead of stdout
        #[arg(short, long)]
        output: Option<PathBuf>,
    },

    /// Generate shell completions
    ///
    /// Examples:
    ///   plan-diff completions bash > ~/.local/share/bash-completion/completions/plan-diff
    ///   plan-diff completions zsh > ~/.zfunc/_plan-diff
    Completions {
        /// Shell to generate completions for
        #[arg(value_enum)]
        shell: Shell,
    },
}
