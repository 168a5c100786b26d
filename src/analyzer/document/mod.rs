//! Document models the rules evaluate.
//!
//! Two shapes are supported:
//! - [`LineDocument`] - raw, line-addressable text (Dockerfiles)
//! - [`StructuredDocument`] - a path-addressable YAML tree (Compose files)
//!
//! A Helm chart is a directory of such files, see [`ChartDocument`].

pub mod chart;
pub mod lines;
pub mod tree;

pub use chart::{ChartDocument, ChartFile, TemplatesDir};
pub use lines::LineDocument;
pub use tree::{Lookup, Mapping, Node, NodePath, Scalar, StructuredDocument, parse_mapping, parse_yaml};

use crate::analyzer::rules::RuleFault;
use crate::analyzer::types::DocumentKind;

/// Failure to turn raw text into a document model.
#[derive(Debug, Clone, PartialEq, Eq, thiserror::Error)]
pub enum ParseError {
    #[error("{message}")]
    Yaml {
        message: String,
        line: Option<usize>,
        column: Option<usize>,
    },

    #[error("expected a mapping at the document root, found {found}")]
    RootNotMapping { found: &'static str },
}

/// A parsed input, tagged by the kind of artifact it came from.
#[derive(Debug, Clone, PartialEq)]
pub enum Document {
    Dockerfile(LineDocument),
    Compose(StructuredDocument),
    Chart(ChartDocument),
}

impl Document {
    pub fn kind(&self) -> DocumentKind {
        match self {
            Self::Dockerfile(_) => DocumentKind::Dockerfile,
            Self::Compose(_) => DocumentKind::Compose,
            Self::Chart(_) => DocumentKind::Chart,
        }
    }

    /// Line-addressable view.
    pub fn lines(&self) -> Result<&LineDocument, RuleFault> {
        match self {
            Self::Dockerfile(doc) => Ok(doc),
            other => Err(RuleFault::Unsupported {
                capability: "lines",
                kind: other.kind(),
            }),
        }
    }

    /// Tree view of a single structured file.
    pub fn tree(&self) -> Result<&StructuredDocument, RuleFault> {
        match self {
            Self::Compose(doc) => Ok(doc),
            other => Err(RuleFault::Unsupported {
                capability: "tree",
                kind: other.kind(),
            }),
        }
    }

    /// Chart directory view.
    pub fn chart(&self) -> Result<&ChartDocument, RuleFault> {
        match self {
            Self::Chart(doc) => Ok(doc),
            other => Err(RuleFault::Unsupported {
                capability: "chart",
                kind: other.kind(),
            }),
        }
    }
}
