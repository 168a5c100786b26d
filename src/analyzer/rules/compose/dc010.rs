//! DC010: host-network

use crate::analyzer::document::Document;
use crate::analyzer::rules::compose::services;
use crate::analyzer::rules::{Findings, Rule, RuleFault, SimpleRule};
use crate::analyzer::types::{Diagnostic, DocumentKind, Severity};

const CODE: &str = "DC010";
const NAME: &str = "host-network";
const DESCRIPTION: &str = "Services should not use the host network.";

pub fn rule() -> impl Rule {
    SimpleRule::new(CODE, NAME, DocumentKind::Compose, DESCRIPTION, check)
}

fn check(doc: &Document) -> Result<Findings, RuleFault> {
    let found = services(doc.tree()?)?
        .iter()
        .filter(|service| service.get("network_mode").and_then(|n| n.as_str()) == Some("host"))
        .map(|service| {
            Diagnostic::new(CODE, Severity::Warning, service.location(), "Using network_mode: host")
                .with_suggestion("Prefer bridge networks for better isolation")
        })
        .collect::<Vec<_>>();

    Ok(found.into())
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::analyzer::rules::compose::test_support::check;

    #[test]
    fn test_host_network() {
        let yaml = "services:\n  a:\n    network_mode: host\n  b:\n    network_mode: bridge\n";
        let found = check(&rule(), yaml);
        assert_eq!(found.len(), 1);
        assert_eq!(found[0].message(), "Using network_mode: host");
    }
}
