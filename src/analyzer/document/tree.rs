//! Structured (YAML) document model.
//!
//! YAML is read with `serde_yaml` and converted into an owned tree of
//! mappings, sequences and scalars. Mapping order follows the source and keys
//! are unique, so a dotted path names exactly one node.

use std::borrow::Cow;
use std::fmt;

use serde_yaml::Value;

use super::ParseError;

/// A scalar leaf.
#[derive(Debug, Clone, PartialEq)]
pub enum Scalar {
    Null,
    Bool(bool),
    /// Numbers keep their source spelling.
    Number(String),
    String(String),
}

/// An ordered mapping with unique keys.
#[derive(Debug, Clone, Default, PartialEq)]
pub struct Mapping {
    entries: Vec<(String, Node)>,
}

impl Mapping {
    pub fn new() -> Self {
        Self::default()
    }

    /// Insert a key. The first occurrence of a key wins.
    pub fn insert(&mut self, key: impl Into<String>, node: Node) {
        let key = key.into();
        if !self.contains_key(&key) {
            self.entries.push((key, node));
        }
    }

    pub fn get(&self, key: &str) -> Option<&Node> {
        self.entries
            .iter()
            .find(|(k, _)| k == key)
            .map(|(_, node)| node)
    }

    pub fn contains_key(&self, key: &str) -> bool {
        self.entries.iter().any(|(k, _)| k == key)
    }

    pub fn iter(&self) -> impl Iterator<Item = (&str, &Node)> {
        self.entries.iter().map(|(k, node)| (k.as_str(), node))
    }

    pub fn keys(&self) -> impl Iterator<Item = &str> {
        self.entries.iter().map(|(k, _)| k.as_str())
    }

    pub fn len(&self) -> usize {
        self.entries.len()
    }

    pub fn is_empty(&self) -> bool {
        self.entries.is_empty()
    }
}

/// A node of the structured tree.
#[derive(Debug, Clone, PartialEq)]
pub enum Node {
    Mapping(Mapping),
    Sequence(Vec<Node>),
    Scalar(Scalar),
}

impl Node {
    /// Shorthand for a string scalar.
    pub fn string(s: impl Into<String>) -> Self {
        Self::Scalar(Scalar::String(s.into()))
    }

    pub fn null() -> Self {
        Self::Scalar(Scalar::Null)
    }

    pub fn as_mapping(&self) -> Option<&Mapping> {
        match self {
            Self::Mapping(map) => Some(map),
            _ => None,
        }
    }

    pub fn as_sequence(&self) -> Option<&[Node]> {
        match self {
            Self::Sequence(items) => Some(items),
            _ => None,
        }
    }

    /// The value if this node is a string scalar.
    pub fn as_str(&self) -> Option<&str> {
        match self {
            Self::Scalar(Scalar::String(s)) => Some(s),
            _ => None,
        }
    }

    pub fn is_null(&self) -> bool {
        matches!(self, Self::Scalar(Scalar::Null))
    }

    /// Child of a mapping node.
    pub fn get(&self, key: &str) -> Option<&Node> {
        self.as_mapping().and_then(|map| map.get(key))
    }

    /// Whether a mapping node has the key (an explicit `null` counts).
    pub fn contains_key(&self, key: &str) -> bool {
        self.as_mapping().is_some_and(|map| map.contains_key(key))
    }

    /// Any non-null scalar rendered as text.
    pub fn scalar_text(&self) -> Option<Cow<'_, str>> {
        match self {
            Self::Scalar(Scalar::String(s)) => Some(Cow::Borrowed(s)),
            Self::Scalar(Scalar::Number(n)) => Some(Cow::Borrowed(n)),
            Self::Scalar(Scalar::Bool(b)) => Some(Cow::Owned(b.to_string())),
            _ => None,
        }
    }

    /// YAML truthiness: null, false, zero, empty strings and empty
    /// collections are falsy.
    pub fn is_truthy(&self) -> bool {
        match self {
            Self::Mapping(map) => !map.is_empty(),
            Self::Sequence(items) => !items.is_empty(),
            Self::Scalar(Scalar::Null) => false,
            Self::Scalar(Scalar::Bool(b)) => *b,
            Self::Scalar(Scalar::Number(n)) => n.parse::<f64>().map_or(true, |v| v != 0.0),
            Self::Scalar(Scalar::String(s)) => !s.is_empty(),
        }
    }

    /// Short name of the node's shape, for messages.
    pub fn kind_name(&self) -> &'static str {
        match self {
            Self::Mapping(_) => "mapping",
            Self::Sequence(_) => "sequence",
            Self::Scalar(Scalar::Null) => "null",
            Self::Scalar(Scalar::Bool(_)) => "boolean",
            Self::Scalar(Scalar::Number(_)) => "number",
            Self::Scalar(Scalar::String(_)) => "string",
        }
    }

    /// Resolve a path below this node.
    pub fn lookup(&self, path: &NodePath) -> Lookup<'_> {
        let mut current = self;
        for segment in &path.segments {
            let next = match segment {
                Segment::Key(key) => current.get(key),
                Segment::Index(index) => current.as_sequence().and_then(|items| items.get(*index)),
            };
            match next {
                Some(node) => current = node,
                None => return Lookup::Absent,
            }
        }
        Lookup::Present(current)
    }

    fn from_yaml(value: Value) -> Self {
        match value {
            Value::Null => Self::null(),
            Value::Bool(b) => Self::Scalar(Scalar::Bool(b)),
            Value::Number(n) => Self::Scalar(Scalar::Number(n.to_string())),
            Value::String(s) => Self::string(s),
            Value::Sequence(items) => {
                Self::Sequence(items.into_iter().map(Self::from_yaml).collect())
            }
            Value::Mapping(source) => {
                let mut map = Mapping::new();
                for (key, value) in source {
                    map.insert(key_text(&key), Self::from_yaml(value));
                }
                Self::Mapping(map)
            }
            Value::Tagged(tagged) => Self::from_yaml(tagged.value),
        }
    }
}

fn key_text(key: &Value) -> String {
    match key {
        Value::String(s) => s.clone(),
        Value::Number(n) => n.to_string(),
        Value::Bool(b) => b.to_string(),
        Value::Null => "null".to_string(),
        other => serde_yaml::to_string(other)
            .map(|s| s.trim_end().to_string())
            .unwrap_or_default(),
    }
}

/// Result of resolving a path.
///
/// `Absent` means the path does not exist; an explicit `null` is
/// `Present` with a null scalar.
#[derive(Debug, Clone, Copy, PartialEq)]
pub enum Lookup<'a> {
    Absent,
    Present(&'a Node),
}

impl<'a> Lookup<'a> {
    pub fn is_present(&self) -> bool {
        matches!(self, Self::Present(_))
    }

    pub fn node(&self) -> Option<&'a Node> {
        match self {
            Self::Present(node) => Some(node),
            Self::Absent => None,
        }
    }
}

#[derive(Debug, Clone, PartialEq, Eq)]
enum Segment {
    Key(String),
    Index(usize),
}

/// A dotted/indexed path from the document root.
///
/// Renders as `services.db.environment.PASSWORD` or `ingress.main.hosts[0]`.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct NodePath {
    segments: Vec<Segment>,
}

impl NodePath {
    pub fn root() -> Self {
        Self::default()
    }

    /// Parse `a.b[2].c`. Keys containing dots cannot be expressed this way;
    /// build those paths with [`NodePath::key`].
    pub fn parse(path: &str) -> Self {
        let mut segments = Vec::new();
        for part in path.split('.').filter(|p| !p.is_empty()) {
            let (key, mut rest) = match part.find('[') {
                Some(pos) => (&part[..pos], &part[pos..]),
                None => (part, ""),
            };
            if !key.is_empty() {
                segments.push(Segment::Key(key.to_string()));
            }
            while let Some(stripped) = rest.strip_prefix('[') {
                let Some(end) = stripped.find(']') else { break };
                match stripped[..end].parse() {
                    Ok(index) => segments.push(Segment::Index(index)),
                    Err(_) => segments.push(Segment::Key(stripped[..end].to_string())),
                }
                rest = &stripped[end + 1..];
            }
        }
        Self { segments }
    }

    /// Extend with a mapping key.
    pub fn key(&self, key: impl Into<String>) -> Self {
        let mut next = self.clone();
        next.segments.push(Segment::Key(key.into()));
        next
    }

    /// Extend with a sequence index.
    pub fn index(&self, index: usize) -> Self {
        let mut next = self.clone();
        next.segments.push(Segment::Index(index));
        next
    }

    pub fn is_root(&self) -> bool {
        self.segments.is_empty()
    }
}

impl fmt::Display for NodePath {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        for (i, segment) in self.segments.iter().enumerate() {
            match segment {
                Segment::Key(key) if i == 0 => write!(f, "{}", key)?,
                Segment::Key(key) => write!(f, ".{}", key)?,
                Segment::Index(index) => write!(f, "[{}]", index)?,
            }
        }
        Ok(())
    }
}

/// A parsed YAML document.
#[derive(Debug, Clone, PartialEq)]
pub struct StructuredDocument {
    root: Node,
}

impl StructuredDocument {
    pub fn new(root: Node) -> Self {
        Self { root }
    }

    pub fn root(&self) -> &Node {
        &self.root
    }

    /// Resolve a dotted path such as `deploy.resources`.
    pub fn lookup(&self, path: &str) -> Lookup<'_> {
        self.root.lookup(&NodePath::parse(path))
    }

    pub fn get(&self, path: &str) -> Option<&Node> {
        self.lookup(path).node()
    }

    pub fn contains(&self, path: &str) -> bool {
        self.lookup(path).is_present()
    }
}

/// Parse YAML into a structured document with any root shape.
pub fn parse_yaml(content: &str) -> Result<StructuredDocument, ParseError> {
    let value: Value = serde_yaml::from_str(content).map_err(|e| {
        let location = e.location();
        ParseError::Yaml {
            message: e.to_string(),
            line: location.as_ref().map(|l| l.line()),
            column: location.as_ref().map(|l| l.column()),
        }
    })?;
    Ok(StructuredDocument::new(Node::from_yaml(value)))
}

/// Parse YAML and require a mapping at the root.
pub fn parse_mapping(content: &str) -> Result<StructuredDocument, ParseError> {
    let doc = parse_yaml(content)?;
    if doc.root().as_mapping().is_none() {
        return Err(ParseError::RootNotMapping {
            found: doc.root().kind_name(),
        });
    }
    Ok(doc)
}

#[cfg(test)]
mod tests {
    use super::*;

    const COMPOSE: &str = r#"
services:
  db:
    image: postgres:16
    environment:
      PASSWORD: hunter2
      EMPTY:
  web:
    ports:
      - "80:80"
      - "443:443"
"#;

    #[test]
    fn test_lookup_distinguishes_absent_from_null() {
        let doc = parse_yaml(COMPOSE).unwrap();

        assert!(doc.contains("services.db.environment.PASSWORD"));
        assert_eq!(
            doc.lookup("services.db.environment.EMPTY"),
            Lookup::Present(&Node::null())
        );
        assert_eq!(doc.lookup("services.db.healthcheck"), Lookup::Absent);
    }

    #[test]
    fn test_indexed_lookup() {
        let doc = parse_yaml(COMPOSE).unwrap();
        let port = doc.get("services.web.ports[1]").and_then(Node::as_str);
        assert_eq!(port, Some("443:443"));
        assert!(!doc.contains("services.web.ports[2]"));
    }

    #[test]
    fn test_mapping_preserves_source_order() {
        let doc = parse_yaml(COMPOSE).unwrap();
        let services = doc.get("services").and_then(Node::as_mapping).unwrap();
        assert_eq!(services.keys().collect::<Vec<_>>(), vec!["db", "web"]);
    }

    #[test]
    fn test_node_path_display() {
        let path = NodePath::root()
            .key("ingress")
            .key("main")
            .key("hosts")
            .index(0)
            .key("paths");
        assert_eq!(path.to_string(), "ingress.main.hosts[0].paths");
        assert_eq!(NodePath::parse("ingress.main.hosts[0].paths"), path);
        assert!(NodePath::root().is_root());
    }

    #[test]
    fn test_truthiness() {
        let doc = parse_yaml("a: 0\nb: ''\nc: {}\nd: [1]\ne: true\nf: null\ng: text\n").unwrap();
        let truthy = |k: &str| doc.get(k).unwrap().is_truthy();
        assert!(!truthy("a"));
        assert!(!truthy("b"));
        assert!(!truthy("c"));
        assert!(truthy("d"));
        assert!(truthy("e"));
        assert!(!truthy("f"));
        assert!(truthy("g"));
    }

    #[test]
    fn test_non_string_keys_and_scalars() {
        let doc = parse_yaml("1: one\ntrue: yes-string\nport: 8080\n").unwrap();
        assert!(doc.contains("1"));
        assert!(doc.contains("true"));
        assert_eq!(
            doc.get("port").and_then(Node::scalar_text).as_deref(),
            Some("8080")
        );
    }

    #[test]
    fn test_parse_error_carries_position() {
        let err = parse_yaml("services:\n  web: [unclosed\n").unwrap_err();
        match err {
            ParseError::Yaml { line, message, .. } => {
                assert!(line.is_some());
                assert!(!message.is_empty());
            }
            other => panic!("unexpected error: {other:?}"),
        }
    }

    #[test]
    fn test_parse_mapping_rejects_other_roots() {
        assert!(matches!(
            parse_mapping("- a\n- b\n"),
            Err(ParseError::RootNotMapping { found: "sequence" })
        ));
        assert!(matches!(
            parse_mapping(""),
            Err(ParseError::RootNotMapping { found: "null" })
        ));
        assert!(parse_mapping("services: {}\n").is_ok());
    }
}
