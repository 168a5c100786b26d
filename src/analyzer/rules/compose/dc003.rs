//! DC003: container-name
//!
//! A fixed `container_name` prevents `--scale`.

use crate::analyzer::document::Document;
use crate::analyzer::rules::compose::services;
use crate::analyzer::rules::{Findings, Rule, RuleFault, SimpleRule};
use crate::analyzer::types::{Diagnostic, DocumentKind, Severity};

const CODE: &str = "DC003";
const NAME: &str = "container-name";
const DESCRIPTION: &str = "Services should not set container_name.";

pub fn rule() -> impl Rule {
    SimpleRule::new(CODE, NAME, DocumentKind::Compose, DESCRIPTION, check)
}

fn check(doc: &Document) -> Result<Findings, RuleFault> {
    let mut found = Vec::new();

    for service in services(doc.tree()?)? {
        let Some(name) = service.get("container_name") else {
            continue;
        };
        let name = name.scalar_text().unwrap_or_default();
        found.push(
            Diagnostic::new(
                CODE,
                Severity::Warning,
                service.location(),
                format!("Using container_name: \"{}\"", name),
            )
            .with_suggestion(
                "Avoid container_name - it prevents scaling with --scale. Let Compose generate names automatically.",
            ),
        );
    }

    Ok(found.into())
}
