//! Output formatters for lint results.
//!
//! - **Text**: grouped terminal report for humans (default)
//! - **JSON**: machine-readable report for CI pipelines

mod json;
mod tty;

pub use json::JsonFormatter;
pub use tty::TextFormatter;

use std::io::Write;

use clap::ValueEnum;

use crate::analyzer::lint::LintResult;

/// Output format for lint results.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, ValueEnum)]
pub enum OutputFormat {
    /// Grouped terminal output
    #[default]
    Text,
    /// JSON document
    Json,
}

/// Trait for formatting lint results.
pub trait Formatter {
    /// Format the lint result and write to the given writer.
    fn format<W: Write>(&self, result: &LintResult, writer: &mut W) -> std::io::Result<()>;

    /// Format the lint result to a string.
    fn format_to_string(&self, result: &LintResult) -> String {
        let mut buf = Vec::new();
        if let Err(e) = self.format(result, &mut buf) {
            log::error!("Failed to format report: {}", e);
        }
        String::from_utf8_lossy(&buf).into_owned()
    }
}

/// Rendered report plus the process exit code it implies.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Report {
    pub text: String,
    pub exit_code: u8,
}

/// Render a result in the requested format.
pub fn render(result: &LintResult, format: OutputFormat, colors: bool) -> Report {
    let text = match format {
        OutputFormat::Text => TextFormatter { colors }.format_to_string(result),
        OutputFormat::Json => JsonFormatter.format_to_string(result),
    };
    Report {
        text,
        exit_code: result.exit_code(),
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::analyzer::types::{Diagnostic, DocumentKind, Location, Severity};

    #[test]
    fn test_exit_code_follows_errors_only() {
        let warnings = LintResult::new(
            "Dockerfile",
            DocumentKind::Dockerfile,
            vec![
                Diagnostic::new("DF002", Severity::Warning, Location::Line(2), "Using ADD instead of COPY"),
                Diagnostic::new("DF010", Severity::Info, Location::Line(3), "User/group created without explicit UID/GID"),
            ],
        );
        assert_eq!(render(&warnings, OutputFormat::Text, false).exit_code, 0);
        assert_eq!(render(&warnings, OutputFormat::Json, false).exit_code, 0);

        let mut errors = warnings.clone();
        errors
            .diagnostics
            .push(Diagnostic::new("DF003", Severity::Error, Location::Line(1), "Using :latest tag"));
        assert_eq!(render(&errors, OutputFormat::Text, false).exit_code, 1);
    }

    #[test]
    fn test_clean_report() {
        let clean = LintResult::new("compose.yaml", DocumentKind::Compose, Vec::new());
        let report = render(&clean, OutputFormat::Text, false);
        assert_eq!(report.text, "✅ No issues found! Compose file looks good.\n");
        assert_eq!(report.exit_code, 0);
    }
}
