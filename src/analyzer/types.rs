//! Core types shared by every catalog.
//!
//! - `Severity` - Closed set of finding levels
//! - `RuleCode` - Rule identifiers (e.g., "DF003", "DC002")
//! - `DocumentKind` - Which artifact a rule or document targets
//! - `Location` - Where a finding points
//! - `Diagnostic` - A single finding

use serde::{Serialize, Serializer};
use std::cmp::Ordering;
use std::fmt;

/// Severity levels for findings.
///
/// Ordered from most severe to least severe:
/// `Error > Warning > Info`
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize)]
#[serde(rename_all = "lowercase")]
pub enum Severity {
    /// Must be fixed; makes the run fail
    Error,
    /// Should usually be fixed
    Warning,
    /// Suggestion for improvement
    Info,
}

impl Severity {
    /// All severities, most severe first.
    pub const ALL: [Severity; 3] = [Self::Error, Self::Warning, Self::Info];

    /// Get the string representation.
    pub fn as_str(&self) -> &'static str {
        match self {
            Self::Error => "error",
            Self::Warning => "warning",
            Self::Info => "info",
        }
    }

    /// Icon printed in front of each finding.
    pub fn icon(&self) -> &'static str {
        match self {
            Self::Error => "❌",
            Self::Warning => "⚠️",
            Self::Info => "ℹ️",
        }
    }

    /// Badge printed in front of the group header.
    pub fn badge(&self) -> &'static str {
        match self {
            Self::Error => "🔴",
            Self::Warning => "🟡",
            Self::Info => "🔵",
        }
    }

    /// Group header label.
    pub fn label(&self) -> &'static str {
        match self {
            Self::Error => "Errors",
            Self::Warning => "Warnings",
            Self::Info => "Suggestions",
        }
    }

    fn rank(&self) -> u8 {
        match self {
            Self::Error => 2,
            Self::Warning => 1,
            Self::Info => 0,
        }
    }
}

impl fmt::Display for Severity {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.as_str())
    }
}

impl Ord for Severity {
    fn cmp(&self, other: &Self) -> Ordering {
        self.rank().cmp(&other.rank())
    }
}

impl PartialOrd for Severity {
    fn partial_cmp(&self, other: &Self) -> Option<Ordering> {
        Some(self.cmp(other))
    }
}

/// A rule code identifier (e.g., "DF003").
#[derive(Debug, Clone, PartialEq, Eq, Hash, PartialOrd, Ord)]
pub struct RuleCode(pub String);

impl RuleCode {
    /// Create a new rule code.
    pub fn new(code: impl Into<String>) -> Self {
        Self(code.into())
    }

    /// Get the code as a string slice.
    pub fn as_str(&self) -> &str {
        &self.0
    }
}

impl fmt::Display for RuleCode {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.0)
    }
}

impl From<&str> for RuleCode {
    fn from(s: &str) -> Self {
        Self::new(s)
    }
}

impl From<String> for RuleCode {
    fn from(s: String) -> Self {
        Self(s)
    }
}

impl Serialize for RuleCode {
    fn serialize<S: Serializer>(&self, serializer: S) -> Result<S::Ok, S::Error> {
        serializer.serialize_str(&self.0)
    }
}

/// The kind of artifact being analyzed.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize)]
#[serde(rename_all = "lowercase")]
pub enum DocumentKind {
    /// Line-oriented build script
    Dockerfile,
    /// Docker Compose service manifest
    Compose,
    /// Helm chart directory
    Chart,
}

impl DocumentKind {
    /// Binary name of the tool that analyzes this kind.
    pub fn tool_name(&self) -> &'static str {
        match self {
            Self::Dockerfile => "dockerfile-lint",
            Self::Compose => "compose-lint",
            Self::Chart => "chart-lint",
        }
    }

    /// Subject used in the success line ("<subject> looks good.").
    pub fn subject(&self) -> &'static str {
        match self {
            Self::Dockerfile => "Dockerfile",
            Self::Compose => "Compose file",
            Self::Chart => "Chart structure",
        }
    }

    /// Name of the positional argument in usage output.
    pub fn path_label(&self) -> &'static str {
        match self {
            Self::Dockerfile => "path_to_Dockerfile",
            Self::Compose => "path_to_compose_file",
            Self::Chart => "path-to-chart",
        }
    }
}

impl fmt::Display for DocumentKind {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let name = match self {
            Self::Dockerfile => "dockerfile",
            Self::Compose => "compose",
            Self::Chart => "chart",
        };
        write!(f, "{}", name)
    }
}

/// Where a diagnostic points.
#[derive(Debug, Clone, PartialEq, Eq, Hash)]
pub enum Location {
    /// 1-indexed line of a line document.
    Line(usize),
    /// Dotted structural path (e.g., `services.db.environment.PASSWORD`).
    Path(String),
    /// The document as a whole.
    Root,
    /// A file relative to the analyzed directory (e.g., `templates/common.yaml`).
    File(String),
}

impl fmt::Display for Location {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::Line(n) => write!(f, "Line {}", n),
            Self::Path(path) => write!(f, "{}", path),
            Self::Root => write!(f, "Root"),
            Self::File(file) => write!(f, "{}", file),
        }
    }
}

impl Serialize for Location {
    fn serialize<S: Serializer>(&self, serializer: S) -> Result<S::Ok, S::Error> {
        serializer.collect_str(self)
    }
}

/// A finding about the analyzed input.
///
/// Immutable once built: fields are only reachable through getters.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct Diagnostic {
    code: RuleCode,
    severity: Severity,
    location: Location,
    message: String,
    #[serde(skip_serializing_if = "Option::is_none")]
    suggestion: Option<String>,
}

impl Diagnostic {
    /// Create a new diagnostic without a suggestion.
    pub fn new(
        code: impl Into<RuleCode>,
        severity: Severity,
        location: Location,
        message: impl Into<String>,
    ) -> Self {
        Self {
            code: code.into(),
            severity,
            location,
            message: message.into(),
            suggestion: None,
        }
    }

    /// Attach a remediation hint.
    pub fn with_suggestion(mut self, suggestion: impl Into<String>) -> Self {
        let suggestion = suggestion.into();
        self.suggestion = (!suggestion.is_empty()).then_some(suggestion);
        self
    }

    pub fn code(&self) -> &RuleCode {
        &self.code
    }

    pub fn severity(&self) -> Severity {
        self.severity
    }

    pub fn location(&self) -> &Location {
        &self.location
    }

    pub fn message(&self) -> &str {
        &self.message
    }

    pub fn suggestion(&self) -> Option<&str> {
        self.suggestion.as_deref()
    }
}

impl fmt::Display for Diagnostic {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(
            f,
            "{} {}: {}",
            self.severity.icon(),
            self.location,
            self.message
        )?;
        if let Some(suggestion) = &self.suggestion {
            write!(f, "\n   → {}", suggestion)?;
        }
        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_severity_ordering() {
        assert!(Severity::Error > Severity::Warning);
        assert!(Severity::Warning > Severity::Info);
        assert_eq!(
            [Severity::Info, Severity::Error, Severity::Warning]
                .iter()
                .max(),
            Some(&Severity::Error)
        );
    }

    #[test]
    fn test_location_display() {
        assert_eq!(Location::Line(7).to_string(), "Line 7");
        assert_eq!(
            Location::Path("services.db.environment.PASSWORD".into()).to_string(),
            "services.db.environment.PASSWORD"
        );
        assert_eq!(Location::Root.to_string(), "Root");
        assert_eq!(
            Location::File("templates/".into()).to_string(),
            "templates/"
        );
    }

    #[test]
    fn test_diagnostic_display_with_suggestion() {
        let diag = Diagnostic::new("DF002", Severity::Warning, Location::Line(3), "Using ADD instead of COPY")
            .with_suggestion("Use COPY unless you need URL download or tar extraction");

        assert_eq!(
            diag.to_string(),
            "⚠️ Line 3: Using ADD instead of COPY\n   → Use COPY unless you need URL download or tar extraction"
        );
    }

    #[test]
    fn test_empty_suggestion_is_dropped() {
        let diag = Diagnostic::new("DC001", Severity::Info, Location::Root, "msg").with_suggestion("");
        assert!(diag.suggestion().is_none());
        assert_eq!(diag.to_string(), "ℹ️ Root: msg");
    }

    #[test]
    fn test_diagnostic_json_shape() {
        let diag = Diagnostic::new("DC004", Severity::Error, Location::Path("services.web".into()), "bad");
        let json = serde_json::to_value(&diag).unwrap();
        assert_eq!(json["code"], "DC004");
        assert_eq!(json["severity"], "error");
        assert_eq!(json["location"], "services.web");
        assert!(json.get("suggestion").is_none());
    }
}
