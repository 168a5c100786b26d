//! # Analyzer Module
//!
//! Rule-based static analysis for container build and deployment
//! artifacts:
//! - Dockerfiles (line oriented)
//! - Docker Compose manifests (YAML tree)
//! - Helm chart directories (`Chart.yaml`, `templates/`, `values.yaml`)

pub mod document;
pub mod engine;
pub mod formatter;
pub mod image;
pub mod lint;
pub mod rules;
pub mod types;

pub use document::{ChartDocument, Document, LineDocument, ParseError, StructuredDocument};
pub use engine::EngineOptions;
pub use formatter::{OutputFormat, Report, render};
pub use lint::{LintResult, Summary, lint_chart, lint_compose, lint_dockerfile, lint_path};
pub use rules::{Catalog, Findings, Rule, RuleFault};
pub use types::{Diagnostic, DocumentKind, Location, RuleCode, Severity};
