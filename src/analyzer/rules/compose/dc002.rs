//! DC002: missing-services
//!
//! A Compose file without a `services` mapping has nothing to check; the
//! rest of the catalog is skipped. Individual services that are not
//! mappings are reported here once and ignored by the other rules.

use crate::analyzer::document::{Document, Node, NodePath};
use crate::analyzer::rules::compose::is_service_definition;
use crate::analyzer::rules::{Findings, Rule, RuleFault, SimpleRule};
use crate::analyzer::types::{Diagnostic, DocumentKind, Location, Severity};

const CODE: &str = "DC002";
const NAME: &str = "missing-services";
const DESCRIPTION: &str = "A Compose file must define a services mapping.";

pub fn rule() -> impl Rule {
    SimpleRule::new(CODE, NAME, DocumentKind::Compose, DESCRIPTION, check)
}

fn check(doc: &Document) -> Result<Findings, RuleFault> {
    if let Some(Node::Mapping(services)) = doc.tree()?.get("services") {
        let root = NodePath::root().key("services");
        let malformed = services
            .iter()
            .filter(|(_, node)| !is_service_definition(node))
            .map(|(name, node)| {
                Diagnostic::new(
                    CODE,
                    Severity::Error,
                    Location::Path(root.key(name).to_string()),
                    format!("Service definition must be a mapping, found {}", node.kind_name()),
                )
                .with_suggestion("Define the service as a mapping (e.g., image: nginx:1.25)")
            })
            .collect::<Vec<_>>();
        return Ok(malformed.into());
    }

    Ok(Findings::halt(vec![
        Diagnostic::new(CODE, Severity::Error, Location::Root, "No \"services:\" section found")
            .with_suggestion("Compose file must have a \"services:\" section"),
    ]))
}
