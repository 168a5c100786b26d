//! Error types for infralint
//!
//! Failures that stop a run before any rule executes. Findings about the
//! analyzed files are diagnostics, not errors.

use std::path::PathBuf;

use thiserror::Error;

use crate::analyzer::document::ParseError;

/// Errors that abort a lint run
#[derive(Debug, Error)]
pub enum LintError {
    /// The target path does not exist
    #[error("Path not found: {}", path.display())]
    NotFound { path: PathBuf },

    /// A chart path that is not a directory
    #[error("Path is not a directory: {}", path.display())]
    NotADirectory { path: PathBuf },

    /// Malformed structured input
    #[error("Invalid YAML in {}\n  {source}", path.display())]
    Parse {
        path: PathBuf,
        #[source]
        source: ParseError,
    },

    /// Reading an input failed
    #[error("Failed to read {}: {source}", path.display())]
    Io {
        path: PathBuf,
        #[source]
        source: std::io::Error,
    },

    /// The configuration file could not be used
    #[error("Invalid configuration in {}: {message}", path.display())]
    Config { path: PathBuf, message: String },
}

/// Result type alias for lint operations
pub type Result<T> = std::result::Result<T, LintError>;
