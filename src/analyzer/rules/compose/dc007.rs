//! DC007: secret-in-environment
//!
//! Literal values for secret-shaped variables should not live in the
//! Compose file. `$` references are fine.

use crate::analyzer::document::{Document, Node};
use crate::analyzer::rules::compose::services;
use crate::analyzer::rules::dockerfile::df006::is_secret_name;
use crate::analyzer::rules::{Findings, Rule, RuleFault, SimpleRule, mapping_entries};
use crate::analyzer::types::{Diagnostic, DocumentKind, Location, Severity};

const CODE: &str = "DC007";
const NAME: &str = "secret-in-environment";
const DESCRIPTION: &str = "Do not hardcode secrets in service environment variables.";

pub fn rule() -> impl Rule {
    SimpleRule::new(CODE, NAME, DocumentKind::Compose, DESCRIPTION, check)
}

fn check(doc: &Document) -> Result<Findings, RuleFault> {
    let mut found = Vec::new();

    for service in services(doc.tree()?)? {
        let env_path = service.path.key("environment");
        let variables: Vec<(String, String)> = match service.get("environment") {
            Some(Node::Sequence(items)) => items
                .iter()
                .filter_map(Node::as_str)
                .map(|item| match item.split_once('=') {
                    Some((key, value)) => (key.to_string(), value.to_string()),
                    None => (item.to_string(), String::new()),
                })
                .collect(),
            other => mapping_entries(other, &env_path)?
                .into_iter()
                .map(|(key, value)| {
                    let value = value.scalar_text().map(|v| v.into_owned()).unwrap_or_default();
                    (key.to_string(), value)
                })
                .collect(),
        };

        for (key, value) in variables {
            if !is_secret_name(&key) || value.is_empty() || value.starts_with('$') {
                continue;
            }
            found.push(
                Diagnostic::new(
                    CODE,
                    Severity::Error,
                    Location::Path(env_path.key(key.as_str()).to_string()),
                    format!("Potential secret in environment variable: {}", key),
                )
                .with_suggestion("Use secrets or env_file instead. Never commit secrets to version control."),
            );
        }
    }

    Ok(found.into())
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::analyzer::rules::compose::test_support::check;

    #[test]
    fn test_mapping_form() {
        let yaml = r#"
services:
  db:
    image: postgres:16
    environment:
      POSTGRES_PASSWORD: hunter2
      POSTGRES_USER: app
      API_TOKEN: ${API_TOKEN}
      EMPTY_SECRET:
"#;
        let found = check(&rule(), yaml);
        assert_eq!(found.len(), 1);
        assert_eq!(
            found[0].location(),
            &Location::Path("services.db.environment.POSTGRES_PASSWORD".into())
        );
        assert_eq!(
            found[0].message(),
            "Potential secret in environment variable: POSTGRES_PASSWORD"
        );
    }

    #[test]
    fn test_list_form() {
        let yaml = r#"
services:
  api:
    image: api:2.1
    environment:
      - SECRET_KEY=abc=def
      - DEBUG=1
      - AWS_SECRET_ACCESS_KEY
      - STRIPE_KEY=$STRIPE_KEY
"#;
        let found = check(&rule(), yaml);
        assert_eq!(found.len(), 1);
        assert_eq!(found[0].location().to_string(), "services.api.environment.SECRET_KEY");
    }

    #[test]
    fn test_numeric_values() {
        let yaml = "services:\n  api:\n    environment:\n      PIN_TOKEN: 1234\n";
        assert_eq!(check(&rule(), yaml).len(), 1);
    }
}
