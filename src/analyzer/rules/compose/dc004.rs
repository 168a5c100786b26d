//! DC004: floating-image-tag
//!
//! Service images should be pinned to a version tag or digest.

use crate::analyzer::document::Document;
use crate::analyzer::image::ImageRef;
use crate::analyzer::rules::compose::services;
use crate::analyzer::rules::{Findings, Rule, RuleFault, SimpleRule};
use crate::analyzer::types::{Diagnostic, DocumentKind, Severity};

const CODE: &str = "DC004";
const NAME: &str = "floating-image-tag";
const DESCRIPTION: &str = "Service images should be pinned to a specific version.";

pub fn rule() -> impl Rule {
    SimpleRule::new(CODE, NAME, DocumentKind::Compose, DESCRIPTION, check)
}

fn check(doc: &Document) -> Result<Findings, RuleFault> {
    let mut found = Vec::new();

    for service in services(doc.tree()?)? {
        let Some(image) = service.get("image").and_then(|n| n.scalar_text()) else {
            continue;
        };
        if !ImageRef::parse(&image).is_floating() {
            continue;
        }
        found.push(
            Diagnostic::new(
                CODE,
                Severity::Error,
                service.location(),
                format!("Using :latest or untagged image: \"{}\"", image),
            )
            .with_suggestion("Pin to specific version (e.g., myapp:1.2.3) for reproducible deployments"),
        );
    }

    Ok(found.into())
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::analyzer::rules::compose::test_support::check;

    #[test]
    fn test_floating_images() {
        let yaml = r#"
services:
  a:
    image: app:latest
  b:
    image: redis
  c:
    image: localhost:5000/team/app
  d:
    image: postgres:16
  e:
    image: nginx@sha256:abcd
  f:
    build: .
"#;
        let found = check(&rule(), yaml);
        let messages: Vec<&str> = found.iter().map(|d| d.message()).collect();
        assert_eq!(
            messages,
            vec![
                "Using :latest or untagged image: \"app:latest\"",
                "Using :latest or untagged image: \"redis\"",
                "Using :latest or untagged image: \"localhost:5000/team/app\"",
            ]
        );
    }
}
