//! DF005: apt-lists-cleanup
//!
//! `apt-get install` should be followed by removal of the package lists,
//! either on the same line or within the next 10 lines.

use crate::analyzer::document::Document;
use crate::analyzer::rules::{Findings, Rule, RuleFault, SimpleRule};
use crate::analyzer::types::{Diagnostic, DocumentKind, Location, Severity};

const CODE: &str = "DF005";
const NAME: &str = "apt-lists-cleanup";
const DESCRIPTION: &str = "Delete the apt-get lists after installing something.";
const CLEANUP: &str = "rm -rf /var/lib/apt/lists";
const LOOKAHEAD: usize = 10;

pub fn rule() -> impl Rule {
    SimpleRule::new(CODE, NAME, DocumentKind::Dockerfile, DESCRIPTION, check)
}

fn check(doc: &Document) -> Result<Findings, RuleFault> {
    let lines = doc.lines()?;
    let mut found = Vec::new();

    for (n, line) in lines.instructions() {
        if !line.contains("apt-get install") || line.contains(CLEANUP) {
            continue;
        }
        if lines.any_in_window(n + 1, LOOKAHEAD, |l| l.contains(CLEANUP)) {
            continue;
        }
        found.push(
            Diagnostic::new(CODE, Severity::Warning, Location::Line(n), "apt-get install without cleanup")
                .with_suggestion("Add: && rm -rf /var/lib/apt/lists/* in same RUN"),
        );
    }

    Ok(found.into())
}
