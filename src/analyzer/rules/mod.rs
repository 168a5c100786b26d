//! Rule system framework.
//!
//! Provides the infrastructure for defining rules and assembling them into
//! catalogs:
//! - `Rule` trait for all rules
//! - `SimpleRule` for rules built from metadata and a pure check function
//! - `Catalog` for the ordered rule list of one document kind

use crate::analyzer::document::{Document, Mapping, Node, NodePath};
use crate::analyzer::types::{Diagnostic, DocumentKind, RuleCode};

pub mod chart;
pub mod compose;
pub mod dockerfile;

/// Group shared by rules that are not split into independent validators.
pub const DEFAULT_GROUP: &str = "default";

/// Unexpected failure while evaluating a rule.
#[derive(Debug, Clone, PartialEq, Eq, thiserror::Error)]
pub enum RuleFault {
    #[error("{capability} view is not available for {kind} documents")]
    Unsupported {
        capability: &'static str,
        kind: DocumentKind,
    },

    #[error("expected {expected} at {path}, found {found}")]
    UnexpectedShape {
        path: String,
        expected: &'static str,
        found: &'static str,
    },

    #[error("panicked: {0}")]
    Panicked(String),
}

impl RuleFault {
    pub fn unexpected_shape(path: &NodePath, expected: &'static str, node: &Node) -> Self {
        let path = if path.is_root() {
            "document root".to_string()
        } else {
            path.to_string()
        };
        Self::UnexpectedShape {
            path,
            expected,
            found: node.kind_name(),
        }
    }
}

/// What a rule reports for one document.
#[derive(Debug, Clone, Default, PartialEq)]
pub struct Findings {
    pub diagnostics: Vec<Diagnostic>,
    /// Stop the remaining rules of the same group.
    pub halt: bool,
}

impl Findings {
    pub fn none() -> Self {
        Self::default()
    }

    /// Findings that end evaluation of the rule's group.
    pub fn halt(diagnostics: Vec<Diagnostic>) -> Self {
        Self {
            diagnostics,
            halt: true,
        }
    }
}

impl From<Vec<Diagnostic>> for Findings {
    fn from(diagnostics: Vec<Diagnostic>) -> Self {
        Self {
            diagnostics,
            halt: false,
        }
    }
}

/// A rule that can check a document.
pub trait Rule: Send + Sync {
    /// Get the rule code (e.g., "DF003").
    fn code(&self) -> &RuleCode;

    /// Get the human-readable rule name (e.g., "floating-base-tag").
    fn name(&self) -> &str;

    /// Kind of document the rule applies to.
    fn kind(&self) -> DocumentKind;

    /// Short-circuit group. A halting rule stops later rules of its group.
    fn group(&self) -> &str {
        DEFAULT_GROUP
    }

    fn description(&self) -> &str;

    /// Check the document.
    fn check(&self, document: &Document) -> Result<Findings, RuleFault>;
}

/// A rule built from metadata and a check function.
pub struct SimpleRule<F>
where
    F: Fn(&Document) -> Result<Findings, RuleFault> + Send + Sync,
{
    code: RuleCode,
    name: String,
    kind: DocumentKind,
    group: &'static str,
    description: String,
    check_fn: F,
}

impl<F> SimpleRule<F>
where
    F: Fn(&Document) -> Result<Findings, RuleFault> + Send + Sync,
{
    pub fn new(
        code: impl Into<RuleCode>,
        name: impl Into<String>,
        kind: DocumentKind,
        description: impl Into<String>,
        check_fn: F,
    ) -> Self {
        Self {
            code: code.into(),
            name: name.into(),
            kind,
            group: DEFAULT_GROUP,
            description: description.into(),
            check_fn,
        }
    }

    /// Place the rule in a short-circuit group.
    pub fn in_group(mut self, group: &'static str) -> Self {
        self.group = group;
        self
    }
}

impl<F> Rule for SimpleRule<F>
where
    F: Fn(&Document) -> Result<Findings, RuleFault> + Send + Sync,
{
    fn code(&self) -> &RuleCode {
        &self.code
    }

    fn name(&self) -> &str {
        &self.name
    }

    fn kind(&self) -> DocumentKind {
        self.kind
    }

    fn group(&self) -> &str {
        self.group
    }

    fn description(&self) -> &str {
        &self.description
    }

    fn check(&self, document: &Document) -> Result<Findings, RuleFault> {
        (self.check_fn)(document)
    }
}

/// Create a simple rule.
pub fn simple_rule<F>(
    code: impl Into<RuleCode>,
    name: impl Into<String>,
    kind: DocumentKind,
    description: impl Into<String>,
    check_fn: F,
) -> SimpleRule<F>
where
    F: Fn(&Document) -> Result<Findings, RuleFault> + Send + Sync,
{
    SimpleRule::new(code, name, kind, description, check_fn)
}

/// Ordered rules for one document kind.
pub struct Catalog {
    kind: DocumentKind,
    rules: Vec<Box<dyn Rule>>,
}

impl Catalog {
    /// An empty catalog.
    pub fn new(kind: DocumentKind) -> Self {
        Self {
            kind,
            rules: Vec::new(),
        }
    }

    pub fn dockerfile() -> Self {
        Self {
            kind: DocumentKind::Dockerfile,
            rules: dockerfile::all_rules(),
        }
    }

    pub fn compose() -> Self {
        Self {
            kind: DocumentKind::Compose,
            rules: compose::all_rules(),
        }
    }

    pub fn chart() -> Self {
        Self {
            kind: DocumentKind::Chart,
            rules: chart::all_rules(),
        }
    }

    /// The built-in catalog for a document kind.
    pub fn for_kind(kind: DocumentKind) -> Self {
        match kind {
            DocumentKind::Dockerfile => Self::dockerfile(),
            DocumentKind::Compose => Self::compose(),
            DocumentKind::Chart => Self::chart(),
        }
    }

    /// Append a rule.
    pub fn push(&mut self, rule: impl Rule + 'static) {
        self.rules.push(Box::new(rule));
    }

    /// Drop rules by code.
    pub fn without<S: AsRef<str>>(mut self, codes: &[S]) -> Self {
        self.rules.retain(|rule| {
            !codes
                .iter()
                .any(|code| code.as_ref().eq_ignore_ascii_case(rule.code().as_str()))
        });
        self
    }

    pub fn codes(&self) -> Vec<&RuleCode> {
        self.rules.iter().map(|rule| rule.code()).collect()
    }

    pub fn kind(&self) -> DocumentKind {
        self.kind
    }

    pub fn rules(&self) -> &[Box<dyn Rule>] {
        &self.rules
    }

    pub fn len(&self) -> usize {
        self.rules.len()
    }

    pub fn is_empty(&self) -> bool {
        self.rules.is_empty()
    }
}

/// Entries of a section that must be a mapping. Absent and `null` sections
/// have no entries.
pub(crate) fn mapping_entries<'a>(
    node: Option<&'a Node>,
    path: &NodePath,
) -> Result<Vec<(&'a str, &'a Node)>, RuleFault> {
    match node {
        None => Ok(Vec::new()),
        Some(n) if n.is_null() => Ok(Vec::new()),
        Some(Node::Mapping(map)) => Ok(map.iter().collect()),
        Some(other) => Err(RuleFault::unexpected_shape(path, "a mapping", other)),
    }
}

/// Items of a section that must be a sequence. Absent and `null` sections
/// have no items.
pub(crate) fn sequence_items<'a>(
    node: Option<&'a Node>,
    path: &NodePath,
) -> Result<&'a [Node], RuleFault> {
    match node {
        None => Ok(&[]),
        Some(n) if n.is_null() => Ok(&[]),
        Some(Node::Sequence(items)) => Ok(items),
        Some(other) => Err(RuleFault::unexpected_shape(path, "a sequence", other)),
    }
}

/// A node that must be a mapping, with `null` read as an empty one.
pub(crate) fn mapping_or_empty<'a>(
    node: &'a Node,
    path: &NodePath,
) -> Result<Option<&'a Mapping>, RuleFault> {
    match node {
        Node::Mapping(map) => Ok(Some(map)),
        n if n.is_null() => Ok(None),
        other => Err(RuleFault::unexpected_shape(path, "a mapping", other)),
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::analyzer::document::{LineDocument, parse_yaml};
    use crate::analyzer::types::{Location, Severity};

    #[test]
    fn test_builtin_catalogs() {
        assert_eq!(Catalog::dockerfile().len(), 12);
        assert_eq!(Catalog::compose().len(), 11);
        assert_eq!(Catalog::chart().len(), 12);

        for kind in [DocumentKind::Dockerfile, DocumentKind::Compose, DocumentKind::Chart] {
            let catalog = Catalog::for_kind(kind);
            assert!(catalog.rules().iter().all(|r| r.kind() == kind));
        }
    }

    #[test]
    fn test_rule_codes_and_names_unique() {
        for catalog in [Catalog::dockerfile(), Catalog::compose(), Catalog::chart()] {
            let mut codes: Vec<String> = catalog.codes().iter().map(|c| c.to_string()).collect();
            let mut names: Vec<String> = catalog.rules().iter().map(|r| r.name().to_string()).collect();
            let total = codes.len();
            codes.sort();
            codes.dedup();
            names.sort();
            names.dedup();
            assert_eq!(codes.len(), total, "Rule codes should be unique");
            assert_eq!(names.len(), total, "Rule names should be unique");
        }
    }

    #[test]
    fn test_without_is_case_insensitive() {
        let catalog = Catalog::dockerfile().without(&["df001", "DF012"]);
        let codes: Vec<&str> = catalog.codes().iter().map(|c| c.as_str()).collect();
        assert!(!codes.contains(&"DF001"));
        assert!(!codes.contains(&"DF012"));
        assert_eq!(codes.len(), 10);
    }

    #[test]
    fn test_push_and_group() {
        let mut catalog = Catalog::new(DocumentKind::Dockerfile);
        catalog.push(
            simple_rule("X001", "always", DocumentKind::Dockerfile, "", |_| {
                Ok(vec![Diagnostic::new("X001", Severity::Info, Location::Root, "hit")].into())
            })
            .in_group("extra"),
        );

        assert_eq!(catalog.len(), 1);
        let rule = &catalog.rules()[0];
        assert_eq!(rule.group(), "extra");
        let doc = Document::Dockerfile(LineDocument::from_text(""));
        let findings = rule.check(&doc).unwrap();
        assert_eq!(findings.diagnostics.len(), 1);
        assert!(!findings.halt);
    }

    #[test]
    fn test_section_helpers() {
        let doc = parse_yaml("a: {x: 1}\nb: null\nc: [1, 2]\nd: text\n").unwrap();
        let root = NodePath::root();

        assert_eq!(mapping_entries(doc.get("a"), &root.key("a")).unwrap().len(), 1);
        assert!(mapping_entries(doc.get("b"), &root.key("b")).unwrap().is_empty());
        assert!(mapping_entries(doc.get("missing"), &root.key("missing")).unwrap().is_empty());
        assert_eq!(sequence_items(doc.get("c"), &root.key("c")).unwrap().len(), 2);

        let fault = mapping_entries(doc.get("d"), &root.key("d")).unwrap_err();
        assert_eq!(fault.to_string(), "expected a mapping at d, found string");
    }
}
