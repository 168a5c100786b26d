//! Chart directory model.
//!
//! A chart is read as three independent slots (`Chart.yaml`, `templates/`,
//! `values.yaml`). A malformed or missing file is recorded in its slot and
//! left for the owning validator to report.

use std::fs;
use std::io;
use std::path::{Path, PathBuf};

use super::ParseError;
use super::tree::{Node, StructuredDocument, parse_yaml};
use crate::error::{LintError, Result};

pub const CHART_FILE: &str = "Chart.yaml";
pub const VALUES_FILE: &str = "values.yaml";
pub const TEMPLATES_DIR: &str = "templates";
pub const COMMON_TEMPLATE: &str = "common.yaml";
pub const NOTES_FILE: &str = "NOTES.txt";

/// State of one YAML file of the chart.
#[derive(Debug, Clone, PartialEq)]
pub enum ChartFile {
    Missing,
    Invalid(ParseError),
    /// Parsed to `null` or an empty mapping.
    Empty,
    /// Parsed to a non-empty mapping.
    Loaded(StructuredDocument),
}

impl ChartFile {
    fn from_content(content: &str) -> Self {
        let doc = match parse_yaml(content) {
            Ok(doc) => doc,
            Err(e) => return Self::Invalid(e),
        };
        match doc.root() {
            Node::Mapping(map) if map.is_empty() => Self::Empty,
            Node::Mapping(_) => Self::Loaded(doc),
            root if root.is_null() => Self::Empty,
            root => Self::Invalid(ParseError::RootNotMapping {
                found: root.kind_name(),
            }),
        }
    }
}

/// Contents of `templates/` that the validators look at.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct TemplatesDir {
    /// Text of `templates/common.yaml`, if present.
    pub common: Option<String>,
    pub has_notes: bool,
}

/// A chart directory loaded for validation.
#[derive(Debug, Clone, PartialEq)]
pub struct ChartDocument {
    root: PathBuf,
    chart: ChartFile,
    templates: Option<TemplatesDir>,
    values: ChartFile,
}

impl ChartDocument {
    /// Load the chart files below `dir`.
    ///
    /// Only I/O failures other than "not found" are errors.
    pub fn load(dir: &Path) -> Result<Self> {
        let chart = match read_optional(&dir.join(CHART_FILE))? {
            Some(content) => ChartFile::from_content(&content),
            None => ChartFile::Missing,
        };

        let templates_path = dir.join(TEMPLATES_DIR);
        let templates = if templates_path.exists() {
            Some(TemplatesDir {
                common: read_optional(&templates_path.join(COMMON_TEMPLATE))?,
                has_notes: templates_path.join(NOTES_FILE).exists(),
            })
        } else {
            None
        };

        let values = match read_optional(&dir.join(VALUES_FILE))? {
            Some(content) => ChartFile::from_content(&content),
            None => ChartFile::Missing,
        };

        log::debug!(
            "Loaded chart at {} (templates: {})",
            dir.display(),
            templates.is_some()
        );

        Ok(Self {
            root: dir.to_path_buf(),
            chart,
            templates,
            values,
        })
    }

    /// Build a chart from in-memory parts.
    pub fn from_parts(
        chart: ChartFile,
        templates: Option<TemplatesDir>,
        values: ChartFile,
    ) -> Self {
        Self {
            root: PathBuf::new(),
            chart,
            templates,
            values,
        }
    }

    /// Parse in-memory file contents. `None` means the file is missing.
    pub fn from_sources(
        chart: Option<&str>,
        templates: Option<TemplatesDir>,
        values: Option<&str>,
    ) -> Self {
        let slot = |content: Option<&str>| content.map_or(ChartFile::Missing, ChartFile::from_content);
        Self::from_parts(slot(chart), templates, slot(values))
    }

    pub fn root(&self) -> &Path {
        &self.root
    }

    pub fn chart(&self) -> &ChartFile {
        &self.chart
    }

    pub fn templates(&self) -> Option<&TemplatesDir> {
        self.templates.as_ref()
    }

    pub fn values(&self) -> &ChartFile {
        &self.values
    }
}

fn read_optional(path: &Path) -> Result<Option<String>> {
    match fs::read(path) {
        Ok(bytes) => Ok(Some(String::from_utf8_lossy(&bytes).into_owned())),
        Err(e) if e.kind() == io::ErrorKind::NotFound => Ok(None),
        Err(source) => Err(LintError::Io {
            path: path.to_path_buf(),
            source,
        }),
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::fs;
    use tempfile::TempDir;

    #[test]
    fn test_load_full_chart() {
        let dir = TempDir::new().unwrap();
        fs::write(dir.path().join(CHART_FILE), "apiVersion: v2\nname: app\n").unwrap();
        fs::create_dir(dir.path().join(TEMPLATES_DIR)).unwrap();
        fs::write(
            dir.path().join(TEMPLATES_DIR).join(COMMON_TEMPLATE),
            "{{- include \"bjw-s.common.loader.all\" . }}\n",
        )
        .unwrap();
        fs::write(dir.path().join(VALUES_FILE), "controllers: {}\n").unwrap();

        let chart = ChartDocument::load(dir.path()).unwrap();

        assert!(matches!(chart.chart(), ChartFile::Loaded(_)));
        let templates = chart.templates().unwrap();
        assert!(templates.common.as_deref().unwrap().contains("loader.all"));
        assert!(!templates.has_notes);
        assert!(matches!(chart.values(), ChartFile::Loaded(_)));
    }

    #[test]
    fn test_load_empty_directory() {
        let dir = TempDir::new().unwrap();
        let chart = ChartDocument::load(dir.path()).unwrap();

        assert_eq!(chart.chart(), &ChartFile::Missing);
        assert!(chart.templates().is_none());
        assert_eq!(chart.values(), &ChartFile::Missing);
    }

    #[test]
    fn test_slot_states() {
        assert_eq!(ChartFile::from_content(""), ChartFile::Empty);
        assert_eq!(ChartFile::from_content("{}\n"), ChartFile::Empty);
        assert!(matches!(
            ChartFile::from_content("- a\n"),
            ChartFile::Invalid(ParseError::RootNotMapping { .. })
        ));
        assert!(matches!(
            ChartFile::from_content("a: [1,\n"),
            ChartFile::Invalid(ParseError::Yaml { .. })
        ));
    }
}
