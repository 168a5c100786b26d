//! DC001: deprecated-version
//!
//! The top-level `version` key is obsolete under the Compose Specification.

use crate::analyzer::document::Document;
use crate::analyzer::rules::{Findings, Rule, RuleFault, SimpleRule};
use crate::analyzer::types::{Diagnostic, DocumentKind, Location, Severity};

const CODE: &str = "DC001";
const NAME: &str = "deprecated-version";
const DESCRIPTION: &str = "The top-level version field is deprecated.";

pub fn rule() -> impl Rule {
    SimpleRule::new(CODE, NAME, DocumentKind::Compose, DESCRIPTION, check)
}

fn check(doc: &Document) -> Result<Findings, RuleFault> {
    if !doc.tree()?.contains("version") {
        return Ok(Findings::none());
    }

    Ok(vec![
        Diagnostic::new(CODE, Severity::Warning, Location::Root, "Deprecated \"version:\" field found")
            .with_suggestion(
                "Remove \"version:\" field - it's deprecated since Compose V2. Use Compose Specification instead.",
            ),
    ]
    .into())
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::analyzer::rules::compose::test_support::check;

    #[test]
    fn test_version_present() {
        let found = check(&rule(), "version: \"3.8\"\nservices: {}\n");
        assert_eq!(found.len(), 1);
        assert_eq!(found[0].location(), &Location::Root);
    }

    #[test]
    fn test_version_absent() {
        assert!(check(&rule(), "services: {}\n").is_empty());
    }
}
