pub mod types;

pub use types::LintConfig;

use crate::analyzer::types::DocumentKind;
use crate::error::{LintError, Result};
use std::fs;
use std::path::{Path, PathBuf};

pub const CONFIG_FILE_NAME: &str = ".infralint.yaml";

/// Directory searched for the config file: the chart directory itself, or
/// the directory containing the analyzed file.
pub fn config_dir(target: &Path, kind: DocumentKind) -> PathBuf {
    if kind == DocumentKind::Chart {
        return target.to_path_buf();
    }
    match target.parent() {
        Some(parent) if !parent.as_os_str().is_empty() => parent.to_path_buf(),
        _ => PathBuf::from("."),
    }
}

/// Get the local config file path for an analysis target
pub fn local_config_path(target: &Path, kind: DocumentKind) -> PathBuf {
    config_dir(target, kind).join(CONFIG_FILE_NAME)
}

/// Load configuration from a file. An empty file yields the defaults.
pub fn load_config(path: &Path) -> Result<LintConfig> {
    let content = fs::read_to_string(path).map_err(|source| LintError::Io {
        path: path.to_path_buf(),
        source,
    })?;
    parse_config(&content).map_err(|message| LintError::Config {
        path: path.to_path_buf(),
        message,
    })
}

fn parse_config(content: &str) -> std::result::Result<LintConfig, String> {
    let value: serde_yaml::Value = serde_yaml::from_str(content).map_err(|e| e.to_string())?;
    if value.is_null() {
        return Ok(LintConfig::default());
    }
    serde_yaml::from_value(value).map_err(|e| e.to_string())
}

/// Load the config next to `target`, or the defaults when there is none
pub fn discover(target: &Path, kind: DocumentKind) -> Result<LintConfig> {
    let path = local_config_path(target, kind);
    if !path.is_file() {
        log::debug!("No {} found, using defaults", path.display());
        return Ok(LintConfig::default());
    }
    log::debug!("Loading configuration from {}", path.display());
    load_config(&path)
}
