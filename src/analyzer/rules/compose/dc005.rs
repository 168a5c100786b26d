//! DC005: missing-healthcheck
//!
//! Long-running services should declare a healthcheck. Services whose
//! command idles (`sleep`, `tail`, `watch`) are exempt.

use crate::analyzer::document::{Document, Node};
use crate::analyzer::rules::compose::services;
use crate::analyzer::rules::{Findings, Rule, RuleFault, SimpleRule};
use crate::analyzer::types::{Diagnostic, DocumentKind, Severity};

const CODE: &str = "DC005";
const NAME: &str = "missing-healthcheck";
const DESCRIPTION: &str = "Services should define a healthcheck.";
const IDLE_COMMANDS: &[&str] = &["sleep", "tail", "watch"];

pub fn rule() -> impl Rule {
    SimpleRule::new(CODE, NAME, DocumentKind::Compose, DESCRIPTION, check)
}

fn check(doc: &Document) -> Result<Findings, RuleFault> {
    let mut found = Vec::new();

    for service in services(doc.tree()?)? {
        if service.has("healthcheck") {
            continue;
        }
        let command = service.get("command").map(command_text).unwrap_or_default();
        if IDLE_COMMANDS.iter().any(|idle| command.contains(idle)) {
            continue;
        }
        found.push(
            Diagnostic::new(CODE, Severity::Info, service.location(), "No healthcheck defined")
                .with_suggestion("Add healthcheck for better service dependency management"),
        );
    }

    Ok(found.into())
}

/// Command in either string or exec (list) form.
fn command_text(node: &Node) -> String {
    match node.as_sequence() {
        Some(items) => items
            .iter()
            .filter_map(|item| item.scalar_text())
            .collect::<Vec<_>>()
            .join(" "),
        None => node.scalar_text().map(|s| s.into_owned()).unwrap_or_default(),
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::analyzer::rules::compose::test_support::check;

    #[test]
    fn test_missing_healthcheck() {
        let yaml = r#"
services:
  web:
    image: nginx:1.25
  db:
    image: postgres:16
    healthcheck:
      test: ["CMD", "pg_isready"]
"#;
        let found = check(&rule(), yaml);
        assert_eq!(found.len(), 1);
        assert_eq!(found[0].location().to_string(), "services.web");
    }

    #[test]
    fn test_idle_commands_exempt() {
        let yaml = r#"
services:
  debug:
    image: busybox:1.36
    command: sleep infinity
  logs:
    image: busybox:1.36
    command: ["tail", "-f", "/dev/null"]
"#;
        assert!(check(&rule(), yaml).is_empty());
    }
}
