//! DF001: syntax-directive
//!
//! The first line should carry a BuildKit `# syntax=` directive.

use once_cell::sync::Lazy;
use regex::Regex;

use crate::analyzer::document::Document;
use crate::analyzer::rules::{Findings, Rule, RuleFault, SimpleRule};
use crate::analyzer::types::{Diagnostic, DocumentKind, Location, Severity};

const CODE: &str = "DF001";
const NAME: &str = "syntax-directive";
const DESCRIPTION: &str = "Dockerfiles should start with a BuildKit syntax directive.";

static SYNTAX_DIRECTIVE: Lazy<Regex> =
    Lazy::new(|| Regex::new(r"(?i)^#\s*syntax\s*=").expect("valid regex"));

pub fn rule() -> impl Rule {
    SimpleRule::new(CODE, NAME, DocumentKind::Dockerfile, DESCRIPTION, check)
}

fn check(doc: &Document) -> Result<Findings, RuleFault> {
    let lines = doc.lines()?;
    let first = lines.line(1).unwrap_or("").trim();

    if SYNTAX_DIRECTIVE.is_match(first) {
        return Ok(Findings::none());
    }

    Ok(vec![
        Diagnostic::new(CODE, Severity::Warning, Location::Line(1), "Missing BuildKit syntax directive")
            .with_suggestion("Add: # syntax=docker/dockerfile:1"),
    ]
    .into())
}
