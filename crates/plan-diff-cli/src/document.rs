//! Format-agnostic loading of structured documents

use std::fs;
use std::path::Path;

use serde::de::DeserializeOwned;

use crate::error::{CliError, Result};

/// Load a document from a file.
///
/// Format is detected from file extension:
/// - `.json` -> JSON
/// - `.yaml`, `.yml` -> YAML
/// - `.toml` -> TOML
pub fn load<T: DeserializeOwned>(path: &Path) -> Result<T> {
    let content = fs::read_to_string(path).map_err(|e| CliError::io(path, e))?;
    let extension = path
        .extension()
        .and_then(|ext| ext.to_str())
        .unwrap_or("");

    match extension.to_lowercase().as_str() {
        "json" => serde_json::from_str(&content).map_err(|e| CliError::parse(path, "JSON", e)),
        "yaml" | "yml" => {
            serde_yaml::from_str(&content).map_err(|e| CliError::parse(path, "YAML", e))
        }
        "toml" => toml::from_str(&content).map_err(|e| CliError::parse(path, "TOML", e)),
        _ => Err(CliError::UnsupportedFormat {
            extension: extension.to_string(),
        }),
    }
}
