//! DF012: missing-non-root-user
//!
//! Whole-document check: at least one `USER` instruction must switch to a
//! non-root user. Reported at the last line.

use crate::analyzer::document::Document;
use crate::analyzer::rules::dockerfile::{instructions, is_root_user};
use crate::analyzer::rules::{Findings, Rule, RuleFault, SimpleRule};
use crate::analyzer::types::{Diagnostic, DocumentKind, Location, Severity};

const CODE: &str = "DF012";
const NAME: &str = "missing-non-root-user";
const DESCRIPTION: &str = "The image should switch to a non-root user.";

pub fn rule() -> impl Rule {
    SimpleRule::new(CODE, NAME, DocumentKind::Dockerfile, DESCRIPTION, check)
}

fn check(doc: &Document) -> Result<Findings, RuleFault> {
    let lines = doc.lines()?;
    let has_non_root = instructions(lines)
        .any(|inst| inst.is("USER") && !inst.args.is_empty() && !is_root_user(inst.args));

    if has_non_root {
        return Ok(Findings::none());
    }

    Ok(vec![
        Diagnostic::new(CODE, Severity::Warning, Location::Line(lines.len().max(1)), "No non-root USER defined")
            .with_suggestion("Add: RUN adduser -D appuser && USER appuser"),
    ]
    .into())
}
