//! DC008: missing-resource-limits

use crate::analyzer::document::Document;
use crate::analyzer::rules::compose::services;
use crate::analyzer::rules::{Findings, Rule, RuleFault, SimpleRule};
use crate::analyzer::types::{Diagnostic, DocumentKind, Severity};

const CODE: &str = "DC008";
const NAME: &str = "missing-resource-limits";
const DESCRIPTION: &str = "Services should declare deploy.resources.";

pub fn rule() -> impl Rule {
    SimpleRule::new(CODE, NAME, DocumentKind::Compose, DESCRIPTION, check)
}

fn check(doc: &Document) -> Result<Findings, RuleFault> {
    let found = services(doc.tree()?)?
        .iter()
        .filter(|service| {
            !service
                .get("deploy")
                .is_some_and(|deploy| deploy.contains_key("resources"))
        })
        .map(|service| {
            Diagnostic::new(CODE, Severity::Info, service.location(), "No resource limits defined")
                .with_suggestion("Add deploy.resources.limits to prevent resource exhaustion")
        })
        .collect::<Vec<_>>();

    Ok(found.into())
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::analyzer::rules::compose::test_support::check;

    #[test]
    fn test_resource_limits() {
        let yaml = r#"
services:
  limited:
    deploy:
      resources:
        limits:
          memory: 256M
  replicated:
    deploy:
      replicas: 2
  bare:
    image: app:1.0
"#;
        let found = check(&rule(), yaml);
        let locations: Vec<String> = found.iter().map(|d| d.location().to_string()).collect();
        assert_eq!(locations, vec!["services.replicated", "services.bare"]);
    }
}
