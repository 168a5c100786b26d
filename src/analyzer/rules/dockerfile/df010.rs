//! DF010: implicit-uid-gid
//!
//! User and group creation without an explicit id gets whatever the base
//! image hands out next.

use once_cell::sync::Lazy;
use regex::Regex;

use crate::analyzer::document::Document;
use crate::analyzer::rules::{Findings, Rule, RuleFault, SimpleRule};
use crate::analyzer::types::{Diagnostic, DocumentKind, Location, Severity};

const CODE: &str = "DF010";
const NAME: &str = "implicit-uid-gid";
const DESCRIPTION: &str = "Created users and groups should carry an explicit id.";

static ACCOUNT_CREATION: Lazy<Regex> =
    Lazy::new(|| Regex::new(r"(useradd|adduser|groupadd|addgroup)").expect("valid regex"));
static EXPLICIT_ID: Lazy<Regex> =
    Lazy::new(|| Regex::new(r"(-[ug]|--uid|--gid)[\s=]+\d+").expect("valid regex"));

pub fn rule() -> impl Rule {
    SimpleRule::new(CODE, NAME, DocumentKind::Dockerfile, DESCRIPTION, check)
}

fn check(doc: &Document) -> Result<Findings, RuleFault> {
    let found = doc
        .lines()?
        .instructions()
        .filter(|(_, line)| ACCOUNT_CREATION.is_match(line) && !EXPLICIT_ID.is_match(line))
        .map(|(n, _)| {
            Diagnostic::new(CODE, Severity::Info, Location::Line(n), "User/group created without explicit UID/GID")
                .with_suggestion(
                    "Consider explicit UID/GID >10000 if consistent permissions across environments are needed",
                )
        })
        .collect::<Vec<_>>();

    Ok(found.into())
}
