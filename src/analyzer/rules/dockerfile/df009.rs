//! DF009: low-uid-gid
//!
//! Users and groups created with an id below 10000 may collide with host
//! accounts.

use once_cell::sync::Lazy;
use regex::Regex;

use crate::analyzer::document::Document;
use crate::analyzer::rules::{Findings, Rule, RuleFault, SimpleRule};
use crate::analyzer::types::{Diagnostic, DocumentKind, Location, Severity};

const CODE: &str = "DF009";
const NAME: &str = "low-uid-gid";
const DESCRIPTION: &str = "Created users and groups should use ids of 10000 or above.";
const MIN_ID: u64 = 10000;

static UID: Lazy<Regex> =
    Lazy::new(|| Regex::new(r"(useradd|adduser).*?(-u|--uid)[\s=]+(\d+)").expect("valid regex"));
static GID: Lazy<Regex> =
    Lazy::new(|| Regex::new(r"(groupadd|addgroup).*?(-g|--gid)[\s=]+(\d+)").expect("valid regex"));

pub fn rule() -> impl Rule {
    SimpleRule::new(CODE, NAME, DocumentKind::Dockerfile, DESCRIPTION, check)
}

fn check(doc: &Document) -> Result<Findings, RuleFault> {
    let mut found = Vec::new();

    for (n, line) in doc.lines()?.instructions() {
        if let Some(uid) = low_id(&UID, line) {
            found.push(
                Diagnostic::new(
                    CODE,
                    Severity::Warning,
                    Location::Line(n),
                    format!("User created with UID {} (< {})", uid, MIN_ID),
                )
                .with_suggestion("Consider using UID >10000 to avoid conflicts with host system users"),
            );
        }
        if let Some(gid) = low_id(&GID, line) {
            found.push(
                Diagnostic::new(
                    CODE,
                    Severity::Warning,
                    Location::Line(n),
                    format!("Group created with GID {} (< {})", gid, MIN_ID),
                )
                .with_suggestion("Consider using GID >10000 to avoid conflicts with host system users"),
            );
        }
    }

    Ok(found.into())
}

fn low_id(pattern: &Regex, line: &str) -> Option<u64> {
    let id = pattern.captures(line)?.get(3)?.as_str().parse::<u64>().ok()?;
    (id < MIN_ID).then_some(id)
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::analyzer::rules::dockerfile::test_support::check;

    #[test]
    fn test_low_uid_and_gid() {
        let found = check(&rule(), "RUN addgroup -g 1000 app && adduser -u 1000 -G app -D app\n");
        let messages: Vec<&str> = found.iter().map(|d| d.message()).collect();
        assert_eq!(
            messages,
            vec!["User created with UID 1000 (< 10000)", "Group created with GID 1000 (< 10000)"]
        );
    }

    #[test]
    fn test_long_flags() {
        let found = check(&rule(), "RUN useradd --uid=999 svc\n");
        assert_eq!(found.len(), 1);
    }

    #[test]
    fn test_high_ids() {
        assert!(check(&rule(), "RUN groupadd -g 10001 app && useradd -u 10001 -g app app\n").is_empty());
    }
}
