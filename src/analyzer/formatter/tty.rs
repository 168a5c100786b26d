//! Text formatter.
//!
//! Groups findings by severity (errors, then warnings, then suggestions),
//! keeping discovery order inside each group.

use std::io::Write;

use colored::Colorize;

use crate::analyzer::formatter::Formatter;
use crate::analyzer::lint::LintResult;
use crate::analyzer::types::{DocumentKind, Severity};

/// Terminal output formatter.
#[derive(Debug, Clone)]
pub struct TextFormatter {
    /// Style the group headers.
    pub colors: bool,
}

impl TextFormatter {
    fn header(&self, result: &LintResult) -> String {
        let title = match result.kind {
            DocumentKind::Chart => format!("📋 Validating Helm chart at {}", result.target),
            _ => format!("📋 Analysis of {}", result.target),
        };
        if self.colors { title.bold().to_string() } else { title }
    }

    fn group_label(&self, severity: Severity) -> String {
        let label = format!("{} {}:", severity.badge(), severity.label());
        if !self.colors {
            return label;
        }
        match severity {
            Severity::Error => label.red().bold().to_string(),
            Severity::Warning => label.yellow().bold().to_string(),
            Severity::Info => label.cyan().bold().to_string(),
        }
    }
}

impl Formatter for TextFormatter {
    fn format<W: Write>(&self, result: &LintResult, writer: &mut W) -> std::io::Result<()> {
        if result.is_clean() {
            return writeln!(writer, "✅ No issues found! {} looks good.", result.kind.subject());
        }

        write!(writer, "\n{}\n\n", self.header(result))?;

        for severity in Severity::ALL {
            let mut group = result.by_severity(severity).peekable();
            if group.peek().is_none() {
                continue;
            }
            writeln!(writer, "{}", self.group_label(severity))?;
            for diagnostic in group {
                write!(writer, "  {}\n\n", diagnostic)?;
            }
        }

        let summary = result.summary();
        writeln!(
            writer,
            "\nTotal: {} errors, {} warnings, {} suggestions",
            summary.errors, summary.warnings, summary.infos
        )
    }
}
