//! Configuration file loading and merging with command-line flags
//!
//! Settings come from an optional config file, `.plan-diff.toml` in the
//! working directory unless `--config` names another one:
//!
//! ```toml
//! [redaction]
//! keys = ["password", "secret_string"]
//!
//! [report]
//! group_by = "team"
//! format = "yaml"
//!
//! [render]
//! format = "html"
//! ```

use std::path::{Path, PathBuf};

use serde::Deserialize;

use plan_diff::RedactionKeys;

use crate::document;
use crate::error::{CliError, Result};
use crate::output::{OutputFormat, ReportFormat};

/// File looked up in the working directory when no `--config` is given
pub const DEFAULT_CONFIG_FILE: &str = ".plan-diff.toml";

#[derive(Debug, Clone, Default, PartialEq, Deserialize)]
#[serde(default, deny_unknown_fields)]
pub struct Config {
    pub redaction: RedactionConfig,
    pub report: ReportConfig,
    pub render: RenderConfig,
}

#[derive(Debug, Clone, Default, PartialEq, Deserialize)]
#[serde(default, deny_unknown_fields)]
pub struct RedactionConfig {
    /// Keys whose values are masked, matched case-insensitively
    pub keys: Vec<String>,
}

#[derive(Debug, Clone, Default, PartialEq, Deserialize)]
#[serde(default, deny_unknown_fields)]
pub struct ReportConfig {
    pub group_by: Option<String>,
    pub format: Option<ReportFormat>,
}

#[derive(Debug, Clone, Default, PartialEq, Deserialize)]
#[serde(default, deny_unknown_fields)]
pub struct RenderConfig {
    pub format: Option<OutputFormat>,
}

impl Config {
    /// Load the configuration.
    ///
    /// An explicit path must exist. Without one, the default file in `cwd`
    /// is used when present and built-in defaults otherwise.
    pub fn load(explicit: Option<&Path>, cwd: &Path) -> Result<Self> {
        let path: PathBuf = match explicit {
            Some(path) if !path.exists() => {
                return Err(CliError::ConfigNotFound {
                    path: path.to_path_buf(),
                });
            }
            Some(path) => path.to_path_buf(),
            None => {
                let candidate = cwd.join(DEFAULT_CONFIG_FILE);
                if !candidate.exists() {
                    tracing::debug!("No config file found, using defaults");
                    return Ok(Self::default());
                }
                candidate
            }
        };

        tracing::debug!(path = %path.display(), "Loading config");
        document::load(&path)
    }

    /// Redaction keys from the config file plus any given on the command line
    pub fn redaction_keys(&self, extra: &[String]) -> RedactionKeys {
        RedactionKeys::new(self.redaction.keys.iter().chain(extra))
    }

    pub fn output_format(&self, flag: Option<OutputFormat>) -> OutputFormat {
        flag.or(self.render.format).unwrap_or_default()
    }

    pub fn report_format(&self, flag: Option<ReportFormat>) -> ReportFormat {
        flag.or(self.report.format).unwrap_or_default()
    }

    pub fn group_by(&self, flag: Option<String>) -> Option<String> {
        flag.or_else(|| self.report.group_by.clone())
    }
}
