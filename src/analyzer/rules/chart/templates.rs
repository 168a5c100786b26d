//! HC2xx - templates/ rules

use crate::analyzer::document::Document;
use crate::analyzer::rules::{Findings, Rule, RuleFault, simple_rule};
use crate::analyzer::types::{Diagnostic, DocumentKind, Location, Severity};

pub const GROUP: &str = "templates";

const LOADER_INCLUDE: &str = "bjw-s.common.loader.all";

/// Get all HC2xx rules.
pub fn rules() -> Vec<Box<dyn Rule>> {
    vec![
        Box::new(
            simple_rule(
                "HC201",
                "templates-dir",
                DocumentKind::Chart,
                "Charts must have a templates/ directory",
                check_templates_dir,
            )
            .in_group(GROUP),
        ),
        Box::new(
            simple_rule(
                "HC202",
                "common-template",
                DocumentKind::Chart,
                "templates/common.yaml must include the common library loader",
                check_common_template,
            )
            .in_group(GROUP),
        ),
        Box::new(
            simple_rule(
                "HC203",
                "notes-file",
                DocumentKind::Chart,
                "Charts should ship post-install notes",
                check_notes,
            )
            .in_group(GROUP),
        ),
    ]
}

fn check_templates_dir(doc: &Document) -> Result<Findings, RuleFault> {
    if doc.chart()?.templates().is_some() {
        return Ok(Findings::none());
    }
    Ok(Findings::halt(vec![
        Diagnostic::new(
            "HC201",
            Severity::Error,
            Location::File("templates/".to_string()),
            "templates directory not found",
        )
        .with_suggestion("Create templates/ directory"),
    ]))
}

fn check_common_template(doc: &Document) -> Result<Findings, RuleFault> {
    let Some(templates) = doc.chart()?.templates() else {
        return Ok(Findings::none());
    };
    let location = Location::File("templates/common.yaml".to_string());

    let diagnostic = match &templates.common {
        None => Diagnostic::new("HC202", Severity::Error, location, "common.yaml not found").with_suggestion(
            format!("Create templates/common.yaml with: {{{{- include \"{}\" . }}}}", LOADER_INCLUDE),
        ),
        Some(content) if !content.contains(LOADER_INCLUDE) => Diagnostic::new(
            "HC202",
            Severity::Error,
            location,
            format!("Missing {} include", LOADER_INCLUDE),
        )
        .with_suggestion(format!("Add: {{{{- include \"{}\" . }}}}", LOADER_INCLUDE)),
        Some(_) => return Ok(Findings::none()),
    };

    Ok(vec![diagnostic].into())
}

fn check_notes(doc: &Document) -> Result<Findings, RuleFault> {
    match doc.chart()?.templates() {
        Some(templates) if !templates.has_notes => Ok(vec![
            Diagnostic::new(
                "HC203",
                Severity::Info,
                Location::File("templates/NOTES.txt".to_string()),
                "NOTES.txt not found",
            )
            .with_suggestion("Consider adding NOTES.txt for post-install instructions"),
        ]
        .into()),
        _ => Ok(Findings::none()),
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::analyzer::document::TemplatesDir;
    use crate::analyzer::rules::chart::test_support::{CHART_YAML, chart, complete_templates, findings};

    fn run(templates: Option<TemplatesDir>) -> Vec<Findings> {
        let doc = chart(Some(CHART_YAML), templates, Some("controllers: {}\n"));
        rules().iter().map(|r| findings(r.as_ref(), &doc)).collect()
    }

    #[test]
    fn test_missing_directory_halts() {
        let results = run(None);
        assert!(results[0].halt);
        assert_eq!(results[0].diagnostics[0].location().to_string(), "templates/");
        assert!(results[1].diagnostics.is_empty());
        assert!(results[2].diagnostics.is_empty());
    }

    #[test]
    fn test_missing_common_and_notes() {
        let results = run(Some(TemplatesDir::default()));
        assert!(!results[0].halt);
        assert_eq!(
            results[1].diagnostics[0].suggestion(),
            Some("Create templates/common.yaml with: {{- include \"bjw-s.common.loader.all\" . }}")
        );
        assert_eq!(results[2].diagnostics[0].severity(), Severity::Info);
    }

    #[test]
    fn test_common_without_loader() {
        let templates = TemplatesDir {
            common: Some("# nothing here\n".to_string()),
            has_notes: true,
        };
        let results = run(Some(templates));
        assert_eq!(
            results[1].diagnostics[0].message(),
            "Missing bjw-s.common.loader.all include"
        );
        assert_eq!(
            results[1].diagnostics[0].suggestion(),
            Some("Add: {{- include \"bjw-s.common.loader.all\" . }}")
        );
    }

    #[test]
    fn test_complete_templates() {
        assert!(run(Some(complete_templates())).iter().all(|f| f.diagnostics.is_empty()));
    }
}
