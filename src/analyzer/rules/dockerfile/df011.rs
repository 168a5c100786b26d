//! DF011: root-user
//!
//! Switching to root with `USER` makes the following instructions and, if
//! last, the container run as root.

use crate::analyzer::document::Document;
use crate::analyzer::rules::dockerfile::{instructions, is_root_user};
use crate::analyzer::rules::{Findings, Rule, RuleFault, SimpleRule};
use crate::analyzer::types::{Diagnostic, DocumentKind, Location, Severity};

const CODE: &str = "DF011";
const NAME: &str = "root-user";
const DESCRIPTION: &str = "Do not switch to the root user.";

pub fn rule() -> impl Rule {
    SimpleRule::new(CODE, NAME, DocumentKind::Dockerfile, DESCRIPTION, check)
}

fn check(doc: &Document) -> Result<Findings, RuleFault> {
    let found = instructions(doc.lines()?)
        .filter(|inst| inst.is("USER") && is_root_user(inst.args))
        .map(|inst| {
            Diagnostic::new(CODE, Severity::Warning, Location::Line(inst.line), "Running as root user")
                .with_suggestion("Create and use non-root user for security")
        })
        .collect::<Vec<_>>();

    Ok(found.into())
}
