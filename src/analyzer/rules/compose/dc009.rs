//! DC009: privileged

use crate::analyzer::document::Document;
use crate::analyzer::rules::compose::services;
use crate::analyzer::rules::{Findings, Rule, RuleFault, SimpleRule};
use crate::analyzer::types::{Diagnostic, DocumentKind, Severity};

const CODE: &str = "DC009";
const NAME: &str = "privileged";
const DESCRIPTION: &str = "Services should not run in privileged mode.";

pub fn rule() -> impl Rule {
    SimpleRule::new(CODE, NAME, DocumentKind::Compose, DESCRIPTION, check)
}

fn check(doc: &Document) -> Result<Findings, RuleFault> {
    let found = services(doc.tree()?)?
        .iter()
        .filter(|service| service.get("privileged").is_some_and(|p| p.is_truthy()))
        .map(|service| {
            Diagnostic::new(CODE, Severity::Warning, service.location(), "Service runs in privileged mode")
                .with_suggestion("Avoid privileged mode unless absolutely necessary for security")
        })
        .collect::<Vec<_>>();

    Ok(found.into())
}
