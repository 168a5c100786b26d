//! DF002: add-instead-of-copy
//!
//! `ADD` fetches URLs and unpacks archives; plain copies should use `COPY`.

use crate::analyzer::document::Document;
use crate::analyzer::rules::dockerfile::instructions;
use crate::analyzer::rules::{Findings, Rule, RuleFault, SimpleRule};
use crate::analyzer::types::{Diagnostic, DocumentKind, Location, Severity};

const CODE: &str = "DF002";
const NAME: &str = "add-instead-of-copy";
const DESCRIPTION: &str = "Use COPY instead of ADD for files and folders.";

pub fn rule() -> impl Rule {
    SimpleRule::new(CODE, NAME, DocumentKind::Dockerfile, DESCRIPTION, check)
}

fn check(doc: &Document) -> Result<Findings, RuleFault> {
    let found = instructions(doc.lines()?)
        .filter(|inst| inst.is("ADD"))
        .map(|inst| {
            Diagnostic::new(CODE, Severity::Warning, Location::Line(inst.line), "Using ADD instead of COPY")
                .with_suggestion("Use COPY unless you need URL download or tar extraction")
        })
        .collect::<Vec<_>>();

    Ok(found.into())
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::analyzer::rules::dockerfile::test_support::check;

    #[test]
    fn test_add_flagged() {
        let found = check(&rule(), "FROM alpine:3.19\nADD app.tar.gz /app\nadd . /src\n");
        let lines: Vec<&Location> = found.iter().map(|d| d.location()).collect();
        assert_eq!(lines, vec![&Location::Line(2), &Location::Line(3)]);
    }

    #[test]
    fn test_copy_and_comments_ignored() {
        assert!(check(&rule(), "COPY . /app\n# ADD old.tar /\nRUN echo ADD\n").is_empty());
    }
}
