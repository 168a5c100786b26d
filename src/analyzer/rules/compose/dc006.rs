//! DC006: missing-restart-policy

use crate::analyzer::document::Document;
use crate::analyzer::rules::compose::services;
use crate::analyzer::rules::{Findings, Rule, RuleFault, SimpleRule};
use crate::analyzer::types::{Diagnostic, DocumentKind, Severity};

const CODE: &str = "DC006";
const NAME: &str = "missing-restart-policy";
const DESCRIPTION: &str = "Services should define a restart policy.";

pub fn rule() -> impl Rule {
    SimpleRule::new(CODE, NAME, DocumentKind::Compose, DESCRIPTION, check)
}

fn check(doc: &Document) -> Result<Findings, RuleFault> {
    let found = services(doc.tree()?)?
        .iter()
        .filter(|service| !service.has("restart"))
        .map(|service| {
            Diagnostic::new(CODE, Severity::Info, service.location(), "No restart policy defined")
                .with_suggestion("Add \"restart: unless-stopped\" or appropriate policy")
        })
        .collect::<Vec<_>>();

    Ok(found.into())
}
