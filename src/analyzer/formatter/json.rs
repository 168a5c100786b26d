//! JSON formatter.
//!
//! Emits `{target, kind, diagnostics, summary}` as one pretty-printed
//! document.

use std::io::Write;

use serde::Serialize;

use crate::analyzer::formatter::Formatter;
use crate::analyzer::lint::{LintResult, Summary};
use crate::analyzer::types::{Diagnostic, DocumentKind};

/// Pretty-printed JSON formatter.
#[derive(Debug, Clone, Copy, Default)]
pub struct JsonFormatter;

#[derive(Serialize)]
struct JsonReport<'a> {
    target: &'a str,
    kind: DocumentKind,
    diagnostics: &'a [Diagnostic],
    summary: Summary,
}

impl Formatter for JsonFormatter {
    fn format<W: Write>(&self, result: &LintResult, writer: &mut W) -> std::io::Result<()> {
        let report = JsonReport {
            target: &result.target,
            kind: result.kind,
            diagnostics: &result.diagnostics,
            summary: result.summary(),
        };

        serde_json::to_writer_pretty(&mut *writer, &report)?;
        writeln!(writer)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::analyzer::types::{Location, Severity};

    #[test]
    fn test_json_output() {
        let result = LintResult::new(
            "compose.yaml",
            DocumentKind::Compose,
            vec![
                Diagnostic::new("DC004", Severity::Error, Location::Path("services.web".into()), "Using :latest tag")
                    .with_suggestion("Pin to specific version"),
            ],
        );

        let output = JsonFormatter.format_to_string(&result);
        let value: serde_json::Value = serde_json::from_str(&output).unwrap();

        assert_eq!(value["target"], "compose.yaml");
        assert_eq!(value["kind"], "compose");
        assert_eq!(value["diagnostics"][0]["code"], "DC004");
        assert_eq!(value["diagnostics"][0]["severity"], "error");
        assert_eq!(value["diagnostics"][0]["location"], "services.web");
        assert_eq!(value["summary"]["errors"], 1);
        assert_eq!(value["summary"]["infos"], 0);
    }

    #[test]
    fn test_empty_result() {
        let result = LintResult::new("Dockerfile", DocumentKind::Dockerfile, Vec::new());
        let output = JsonFormatter.format_to_string(&result);
        let value: serde_json::Value = serde_json::from_str(&output).unwrap();
        assert_eq!(value["diagnostics"].as_array().map(Vec::len), Some(0));
    }
}
