//! DC011: unused-volumes
//!
//! Whole-document check: top-level volumes that no service mounts.

use std::collections::HashSet;

use crate::analyzer::document::{Document, Node, NodePath};
use crate::analyzer::rules::compose::services;
use crate::analyzer::rules::{Findings, Rule, RuleFault, SimpleRule, mapping_entries, sequence_items};
use crate::analyzer::types::{Diagnostic, DocumentKind, Location, Severity};

const CODE: &str = "DC011";
const NAME: &str = "unused-volumes";
const DESCRIPTION: &str = "Top-level volumes should be used by at least one service.";

pub fn rule() -> impl Rule {
    SimpleRule::new(CODE, NAME, DocumentKind::Compose, DESCRIPTION, check)
}

fn check(doc: &Document) -> Result<Findings, RuleFault> {
    let tree = doc.tree()?;
    let declared = mapping_entries(tree.root().get("volumes"), &NodePath::root().key("volumes"))?;
    if declared.is_empty() {
        return Ok(Findings::none());
    }

    let mut used: HashSet<String> = HashSet::new();
    for service in services(tree)? {
        let mounts_path = service.path.key("volumes");
        for mount in sequence_items(service.get("volumes"), &mounts_path)? {
            if let Some(name) = volume_reference(mount) {
                used.insert(name);
            }
        }
    }

    let unused: Vec<&str> = declared
        .iter()
        .map(|(name, _)| *name)
        .filter(|name| !used.contains(*name))
        .collect();
    if unused.is_empty() {
        return Ok(Findings::none());
    }

    log::trace!("Unused volumes: {:?}", unused);
    Ok(vec![
        Diagnostic::new(
            CODE,
            Severity::Info,
            Location::Path("volumes".to_string()),
            format!("Unused volumes defined: {}", unused.join(", ")),
        )
        .with_suggestion("Remove unused volume definitions"),
    ]
    .into())
}

/// Named volume a mount refers to. Bind mounts are not references.
fn volume_reference(mount: &Node) -> Option<String> {
    match mount {
        Node::Mapping(_) => {
            if mount.get("type").and_then(Node::as_str) == Some("bind") {
                return None;
            }
            mount
                .get("source")
                .and_then(|s| s.scalar_text())
                .map(|s| s.into_owned())
        }
        _ => {
            let (source, _) = mount.as_str()?.split_once(':')?;
            let is_path = source.starts_with('.') || source.starts_with('/') || source.starts_with('~');
            (!is_path && !source.is_empty()).then(|| source.to_string())
        }
    }
}
