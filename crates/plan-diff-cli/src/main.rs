//! plan-diff CLI
//!
//! Renders annotated before/after diffs for infrastructure plans and
//! summarizes plans as change reports.

mod cli;
mod commands;
mod config;
mod document;
mod error;
mod output;
mod plan;

use clap::{CommandFactory, Parser};
use colored::Colorize;
use tracing::Level;
use tracing_subscriber::FmtSubscriber;

use plan_diff::ReportOptions;

use cli::{Cli, Commands};
use commands::render::RenderArgs;
use config::Config;
use error::Result;

fn main() {
    if let Err(e) = run() {
        eprintln!("{}: {}", "error".red().bold(), e);
        std::process::exit(1);
    }
}

fn run() -> Result<()> {
    let cli = Cli::parse();

    // Setup tracing if verbose
    if cli.verbose {
        let subscriber = FmtSubscriber::builder()
            .with_max_level(Level::DEBUG)
            .with_target(true)
            .with_writer(std::io::stderr)
            .finish();
        if tracing::subscriber::set_global_default(subscriber).is_ok() {
            tracing::debug!("Verbose mode enabled");
        }
    }

    let Some(command) = cli.command else {
        // No command provided - show help hint
        println!("{} Infrastructure plan diffs", "plan-diff".green().bold());
        println!();
        println!("Run {} for available commands.", "plan-diff --help".cyan());
        return Ok(());
    };

    if let Commands::Completions { shell } = command {
        clap_complete::generate(shell, &mut Cli::command(), "plan-diff", &mut std::io::stdout());
        return Ok(());
    }

    // Configuration problems surface before any document is read
    let cwd = std::env::current_dir().map_err(|e| error::CliError::io(".", e))?;
    let config = Config::load(cli.config.as_deref(), &cwd)?;
    let keys = config.redaction_keys(&cli.redact);

    execute_command(command, &config, &keys)
}

fn execute_command(cmd: Commands, config: &Config, keys: &plan_diff::RedactionKeys) -> Result<()> {
    match cmd {
        Commands::Render {
            before,
            after,
            actions,
            format,
            suppress_removals,
        } => {
            let args = RenderArgs {
                before: before.as_deref(),
                after: after.as_deref(),
                actions: &actions,
                format: config.output_format(format),
                suppress_removals,
            };
            commands::run_render(&args, keys)
        }
        Commands::Show { plan, format } => {
            commands::run_show(&plan, config.output_format(format), keys)
        }
        Commands::Report {
            plan,
            group_by,
            output_format,
            output,
        } => {
            let options = ReportOptions {
                redact: keys.clone(),
                group_by: config.group_by(group_by),
            };
            commands::run_report(
                &plan,
                &options,
                config.report_format(output_format),
                output.as_deref(),
            )
        }
        Commands::Completions { .. } => Ok(()),
    }
}
