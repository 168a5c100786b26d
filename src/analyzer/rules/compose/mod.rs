//! Compose rules (DC001-DC011).
//!
//! Rules read the tree view of the document. Per-service rules report at
//! `services.<name>`.

use crate::analyzer::document::{Node, NodePath, StructuredDocument};
use crate::analyzer::rules::{Rule, RuleFault, mapping_entries};
use crate::analyzer::types::Location;

pub mod dc001;
pub mod dc002;
pub mod dc003;
pub mod dc004;
pub mod dc005;
pub mod dc006;
pub mod dc007;
pub mod dc008;
pub mod dc009;
pub mod dc010;
pub mod dc011;

/// Get all Compose rules in catalog order.
///
/// The missing-services check runs first so that a file without services
/// reports nothing else.
pub fn all_rules() -> Vec<Box<dyn Rule>> {
    vec![
        Box::new(dc002::rule()),
        Box::new(dc001::rule()),
        Box::new(dc003::rule()),
        Box::new(dc004::rule()),
        Box::new(dc005::rule()),
        Box::new(dc006::rule()),
        Box::new(dc007::rule()),
        Box::new(dc008::rule()),
        Box::new(dc009::rule()),
        Box::new(dc010::rule()),
        Box::new(dc011::rule()),
    ]
}

/// One entry of the `services` mapping.
#[derive(Debug, Clone)]
pub(crate) struct Service<'a> {
    pub name: &'a str,
    pub node: &'a Node,
    pub path: NodePath,
}

impl Service<'_> {
    pub fn get(&self, key: &str) -> Option<&Node> {
        self.node.get(key)
    }

    pub fn has(&self, key: &str) -> bool {
        self.node.contains_key(key)
    }

    pub fn location(&self) -> Location {
        Location::Path(self.path.to_string())
    }
}

/// Services in declaration order. A `null` service is treated as empty.
/// Services that are not mappings are skipped here and reported once by
/// DC002.
pub(crate) fn services(doc: &StructuredDocument) -> Result<Vec<Service<'_>>, RuleFault> {
    let root = NodePath::root().key("services");
    let found = mapping_entries(doc.root().get("services"), &root)?
        .into_iter()
        .filter(|(_, node)| is_service_definition(node))
        .map(|(name, node)| Service {
            name,
            node,
            path: root.key(name),
        })
        .collect();
    Ok(found)
}

/// A service body the rules can read: a mapping, or `null` for an empty one.
pub(crate) fn is_service_definition(node: &Node) -> bool {
    matches!(node, Node::Mapping(_)) || node.is_null()
}


#[cfg(test)]
mod tests {
    use super::*;
    use crate::analyzer::document::parse_mapping;

    #[test]
    fn test_services_in_order() {
        let doc = parse_mapping("services:\n  web:\n    image: nginx:1.25\n  worker:\n").unwrap();
        let found = services(&doc).unwrap();

        let names: Vec<&str> = found.iter().map(|s| s.name).collect();
        assert_eq!(names, vec!["web", "worker"]);
        assert_eq!(found[1].location(), Location::Path("services.worker".into()));
        assert!(found[1].get("image").is_none());
    }

    #[test]
    fn test_scalar_service_is_skipped() {
        let doc = parse_mapping("services:\n  web: nginx\n  db:\n    image: postgres:16\n").unwrap();
        let names: Vec<&str> = services(&doc).unwrap().iter().map(|s| s.name).collect();
        assert_eq!(names, vec!["db"]);
    }
}
