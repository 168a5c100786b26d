//! DF008: os-pinned-base-image
//!
//! Base image tags that name an OS release stop receiving security updates
//! from newer releases.

use once_cell::sync::Lazy;
use regex::Regex;

use crate::analyzer::document::Document;
use crate::analyzer::rules::dockerfile::instructions;
use crate::analyzer::rules::{Findings, Rule, RuleFault, SimpleRule};
use crate::analyzer::types::{Diagnostic, DocumentKind, Location, Severity};

const CODE: &str = "DF008";
const NAME: &str = "os-pinned-base-image";
const DESCRIPTION: &str = "Base image tags should not pin an OS release.";

static OS_RELEASE: Lazy<Regex> = Lazy::new(|| {
    Regex::new(r"(?i)(bookworm|bullseye|buster|jammy|focal|bionic|alpine:3\.\d+)").expect("valid regex")
});

pub fn rule() -> impl Rule {
    SimpleRule::new(CODE, NAME, DocumentKind::Dockerfile, DESCRIPTION, check)
}

fn check(doc: &Document) -> Result<Findings, RuleFault> {
    let found = instructions(doc.lines()?)
        .filter(|inst| inst.is("FROM"))
        .filter_map(|inst| {
            let release = OS_RELEASE.find(inst.text)?;
            Some(
                Diagnostic::new(
                    CODE,
                    Severity::Warning,
                    Location::Line(inst.line),
                    format!("Base image pins OS version ({})", release.as_str()),
                )
                .with_suggestion(
                    "Consider using version tag without OS release (e.g., python:3.12-slim instead of python:3.12-slim-bookworm) for automatic security updates",
                ),
            )
        })
        .collect::<Vec<_>>();

    Ok(found.into())
}
