//! HC1xx - Chart.yaml rules
//!
//! Chart.yaml must exist, carry the required fields and depend on the bjw-s
//! common library.

use crate::analyzer::document::chart::CHART_FILE;
use crate::analyzer::document::{ChartFile, Document, Mapping, NodePath};
use crate::analyzer::rules::{Findings, Rule, RuleFault, sequence_items, simple_rule};
use crate::analyzer::types::{Diagnostic, DocumentKind, Location, Severity};

pub const GROUP: &str = "metadata";

pub const COMMON_LIBRARY: &str = "common";
pub const COMMON_REPOSITORY: &str = "https://bjw-s-labs.github.io/helm-charts";
const REQUIRED_FIELDS: [&str; 4] = ["apiVersion", "name", "version", "type"];

/// Get all HC1xx rules.
pub fn rules() -> Vec<Box<dyn Rule>> {
    vec![
        Box::new(
            simple_rule(
                "HC101",
                "chart-file",
                DocumentKind::Chart,
                "Chart.yaml must exist and be valid YAML",
                check_chart_file,
            )
            .in_group(GROUP),
        ),
        Box::new(
            simple_rule(
                "HC102",
                "chart-required-fields",
                DocumentKind::Chart,
                "Chart.yaml must define apiVersion, name, version and type",
                check_required_fields,
            )
            .in_group(GROUP),
        ),
        Box::new(
            simple_rule(
                "HC103",
                "common-library-dependency",
                DocumentKind::Chart,
                "Chart.yaml must depend on the bjw-s common library",
                check_common_dependency,
            )
            .in_group(GROUP),
        ),
    ]
}

fn location() -> Location {
    Location::File(CHART_FILE.to_string())
}

/// Top-level fields of a readable Chart.yaml. An empty file has none.
fn chart_fields(doc: &Document) -> Result<Option<Option<&Mapping>>, RuleFault> {
    Ok(match doc.chart()?.chart() {
        ChartFile::Loaded(tree) => Some(tree.root().as_mapping()),
        ChartFile::Empty => Some(None),
        ChartFile::Missing | ChartFile::Invalid(_) => None,
    })
}

/// HC101: Chart.yaml present and parseable
fn check_chart_file(doc: &Document) -> Result<Findings, RuleFault> {
    let diagnostic = match doc.chart()?.chart() {
        ChartFile::Missing => Diagnostic::new("HC101", Severity::Error, location(), "Chart.yaml not found")
            .with_suggestion("Create Chart.yaml with apiVersion, name, version, and dependencies"),
        ChartFile::Invalid(e) => {
            Diagnostic::new("HC101", Severity::Error, location(), format!("Invalid YAML: {}", e))
                .with_suggestion("Fix YAML syntax errors")
        }
        ChartFile::Empty | ChartFile::Loaded(_) => return Ok(Findings::none()),
    };
    Ok(Findings::halt(vec![diagnostic]))
}

/// HC102: required fields
fn check_required_fields(doc: &Document) -> Result<Findings, RuleFault> {
    let Some(fields) = chart_fields(doc)? else {
        return Ok(Findings::none());
    };

    let found = REQUIRED_FIELDS
        .iter()
        .filter(|field| !fields.is_some_and(|f| f.contains_key(field)))
        .map(|field| {
            Diagnostic::new(
                "HC102",
                Severity::Error,
                location(),
                format!("Missing required field: {}", field),
            )
            .with_suggestion(format!("Add {} to Chart.yaml", field))
        })
        .collect::<Vec<_>>();

    Ok(found.into())
}

/// HC103: common library dependency
fn check_common_dependency(doc: &Document) -> Result<Findings, RuleFault> {
    let Some(fields) = chart_fields(doc)? else {
        return Ok(Findings::none());
    };

    let Some(dependencies) = fields.and_then(|f| f.get("dependencies")) else {
        return Ok(vec![
            Diagnostic::new("HC103", Severity::Error, location(), "No dependencies defined")
                .with_suggestion("Add bjw-s common library as dependency"),
        ]
        .into());
    };

    let path = NodePath::root().key("dependencies");
    let common = sequence_items(Some(dependencies), &path)?
        .iter()
        .find(|dep| dep.get("name").and_then(|n| n.as_str()) == Some(COMMON_LIBRARY));

    let mut found = Vec::new();
    match common {
        Some(dep) => {
            if dep.get("repository").and_then(|r| r.as_str()) != Some(COMMON_REPOSITORY) {
                found.push(
                    Diagnostic::new(
                        "HC103",
                        Severity::Warning,
                        location(),
                        "Common library repository URL may be incorrect",
                    )
                    .with_suggestion(format!("Use: {}", COMMON_REPOSITORY)),
                );
            }
        }
        None => found.push(
            Diagnostic::new(
                "HC103",
                Severity::Error,
                location(),
                "bjw-s common library not found in dependencies",
            )
            .with_suggestion("Add common library dependency"),
        ),
    }

    Ok(found.into())
}
