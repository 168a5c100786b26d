//! Main linting orchestration.
//!
//! Ties together document loading, the rule catalogs and the engine to
//! provide the linting API used by the binaries.

use std::fs;
use std::path::Path;

use serde::Serialize;

use crate::analyzer::document::{ChartDocument, Document, LineDocument, ParseError, parse_mapping};
use crate::analyzer::engine;
use crate::analyzer::rules::Catalog;
use crate::analyzer::types::{Diagnostic, DocumentKind, Severity};
use crate::config::LintConfig;
use crate::error::{LintError, Result};

/// Target name used when linting in-memory content.
pub const INLINE_TARGET: &str = "<inline>";

/// Result of linting one artifact.
#[derive(Debug, Clone, PartialEq)]
pub struct LintResult {
    /// The file or directory that was linted.
    pub target: String,
    pub kind: DocumentKind,
    /// Findings in catalog order.
    pub diagnostics: Vec<Diagnostic>,
}

/// Per-severity counts.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize)]
pub struct Summary {
    pub errors: usize,
    pub warnings: usize,
    pub infos: usize,
}

impl LintResult {
    pub fn new(target: impl Into<String>, kind: DocumentKind, diagnostics: Vec<Diagnostic>) -> Self {
        Self {
            target: target.into(),
            kind,
            diagnostics,
        }
    }

    pub fn summary(&self) -> Summary {
        let count = |severity| self.by_severity(severity).count();
        Summary {
            errors: count(Severity::Error),
            warnings: count(Severity::Warning),
            infos: count(Severity::Info),
        }
    }

    /// Diagnostics of one severity, in discovery order.
    pub fn by_severity(&self, severity: Severity) -> impl Iterator<Item = &Diagnostic> {
        self.diagnostics
            .iter()
            .filter(move |d| d.severity() == severity)
    }

    pub fn is_clean(&self) -> bool {
        self.diagnostics.is_empty()
    }

    /// Check if there are any Error diagnostics.
    pub fn has_errors(&self) -> bool {
        self.diagnostics.iter().any(|d| d.severity() == Severity::Error)
    }

    /// Process exit code: 1 if any Error diagnostic exists, else 0.
    pub fn exit_code(&self) -> u8 {
        u8::from(self.has_errors())
    }
}

/// Lint Dockerfile content.
pub fn lint_dockerfile(content: &str, config: &LintConfig) -> LintResult {
    let document = Document::Dockerfile(LineDocument::from_text(content));
    lint_document(INLINE_TARGET, &document, config)
}

/// Lint Compose file content.
pub fn lint_compose(content: &str, config: &LintConfig) -> std::result::Result<LintResult, ParseError> {
    let document = Document::Compose(parse_mapping(content)?);
    Ok(lint_document(INLINE_TARGET, &document, config))
}

/// Lint a chart directory.
pub fn lint_chart(dir: &Path, config: &LintConfig) -> Result<LintResult> {
    let document = Document::Chart(ChartDocument::load(dir)?);
    Ok(lint_document(dir.display().to_string(), &document, config))
}

/// Lint a path as the given kind of artifact.
pub fn lint_path(kind: DocumentKind, path: &Path, config: &LintConfig) -> Result<LintResult> {
    if !path.exists() {
        return Err(LintError::NotFound {
            path: path.to_path_buf(),
        });
    }

    let target = path.display().to_string();
    match kind {
        DocumentKind::Chart => {
            if !path.is_dir() {
                return Err(LintError::NotADirectory {
                    path: path.to_path_buf(),
                });
            }
            lint_chart(path, config)
        }
        DocumentKind::Dockerfile => {
            let content = read_text(path)?;
            let document = Document::Dockerfile(LineDocument::from_text(&content));
            Ok(lint_document(target, &document, config))
        }
        DocumentKind::Compose => {
            let content = read_text(path)?;
            let tree = parse_mapping(&content).map_err(|source| LintError::Parse {
                path: path.to_path_buf(),
                source,
            })?;
            Ok(lint_document(target, &Document::Compose(tree), config))
        }
    }
}

/// Run the built-in catalog for the document, minus ignored rules.
pub fn lint_document(target: impl Into<String>, document: &Document, config: &LintConfig) -> LintResult {
    let kind = document.kind();
    let catalog = Catalog::for_kind(kind).without(config.ignored.as_slice());
    let diagnostics = engine::run(document, &catalog, &config.engine_options());

    let result = LintResult::new(target, kind, diagnostics);
    log::info!(
        "Linted {} as {}: {} diagnostics",
        result.target,
        kind,
        result.diagnostics.len()
    );
    result
}

fn read_text(path: &Path) -> Result<String> {
    let bytes = fs::read(path).map_err(|source| LintError::Io {
        path: path.to_path_buf(),
        source,
    })?;
    Ok(String::from_utf8_lossy(&bytes).into_owned())
}
