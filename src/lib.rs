//! # infralint
//!
//! Static analysis for Dockerfiles, Docker Compose manifests and Helm
//! charts. Each artifact is checked against a fixed catalog of rules and
//! the findings are reported grouped by severity.
//!
//! ## Example
//!
//! ```rust
//! use infralint::{LintConfig, Severity, lint_dockerfile};
//!
//! let result = lint_dockerfile("FROM python:latest\n", &LintConfig::default());
//! assert!(result.by_severity(Severity::Error).any(|d| d.message() == "Using :latest tag"));
//! assert_eq!(result.exit_code(), 1);
//! ```

pub mod analyzer;
pub mod cli;
pub mod config;
pub mod error;

// Re-export commonly used types and functions
pub use analyzer::{
    Diagnostic, DocumentKind, LintResult, Location, OutputFormat, Severity, lint_chart, lint_compose,
    lint_dockerfile, lint_path, render,
};
pub use config::LintConfig;
pub use error::{LintError, Result};

/// The current version of the tools
pub const VERSION: &str = env!("CARGO_PKG_VERSION");
