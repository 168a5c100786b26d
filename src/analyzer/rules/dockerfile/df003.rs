//! DF003: floating-base-tag
//!
//! Base images must be pinned: `:latest` and untagged references resolve to
//! whatever was pushed last.

use crate::analyzer::document::Document;
use crate::analyzer::image::ImageRef;
use crate::analyzer::rules::dockerfile::instructions;
use crate::analyzer::rules::{Findings, Rule, RuleFault, SimpleRule};
use crate::analyzer::types::{Diagnostic, DocumentKind, Location, Severity};

const CODE: &str = "DF003";
const NAME: &str = "floating-base-tag";
const DESCRIPTION: &str = "Base images should be pinned to a version tag or digest.";
const SUGGESTION: &str = "Pin to specific version: alpine:3.19 or SHA256";

pub fn rule() -> impl Rule {
    SimpleRule::new(CODE, NAME, DocumentKind::Dockerfile, DESCRIPTION, check)
}

fn check(doc: &Document) -> Result<Findings, RuleFault> {
    let mut stages: Vec<String> = Vec::new();
    let mut found = Vec::new();

    for inst in instructions(doc.lines()?).filter(|i| i.is("FROM")) {
        let mut tokens = inst.args.split_whitespace().filter(|t| !t.starts_with("--"));
        let Some(image) = tokens.next() else {
            continue;
        };
        let alias = match (tokens.next(), tokens.next()) {
            (Some(keyword), Some(name)) if keyword.eq_ignore_ascii_case("as") => {
                Some(name.to_lowercase())
            }
            _ => None,
        };

        if !is_exempt(image, &stages) {
            let reference = ImageRef::parse(image);
            let message = if reference.is_latest() {
                Some("Using :latest tag".to_string())
            } else if reference.is_untagged() {
                Some(format!("Base image is untagged ({})", image))
            } else {
                None
            };
            if let Some(message) = message {
                found.push(
                    Diagnostic::new(CODE, Severity::Error, Location::Line(inst.line), message)
                        .with_suggestion(SUGGESTION),
                );
            }
        }

        if let Some(alias) = alias {
            stages.push(alias);
        }
    }

    Ok(found.into())
}

/// `scratch`, earlier build stages and build-arg substitutions carry no tag.
fn is_exempt(image: &str, stages: &[String]) -> bool {
    image.eq_ignore_ascii_case("scratch")
        || image.contains('$')
        || stages.iter().any(|s| s.eq_ignore_ascii_case(image))
}
