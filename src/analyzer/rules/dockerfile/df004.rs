//! DF004: missing-cache-mount
//!
//! Package manager runs should use a BuildKit cache mount. Each package
//! manager is checked independently.

use crate::analyzer::document::Document;
use crate::analyzer::rules::dockerfile::instructions;
use crate::analyzer::rules::{Findings, Rule, RuleFault, SimpleRule};
use crate::analyzer::types::{Diagnostic, DocumentKind, Location, Severity};

const CODE: &str = "DF004";
const NAME: &str = "missing-cache-mount";
const DESCRIPTION: &str = "Package manager runs should use a BuildKit cache mount.";
const CACHE_MOUNT: &str = "--mount=type=cache";

/// `(trigger, message, cache target)` per package manager.
const MANAGERS: &[(&str, &str, &str)] = &[
    ("pip install", "pip install without cache mount", "/root/.cache/pip"),
    ("npm install", "npm install without cache mount", "/root/.npm"),
    ("yarn install", "yarn install without cache mount", "/usr/local/share/.cache/yarn"),
    ("apt-get", "apt-get without cache mount", "/var/cache/apt"),
];

pub fn rule() -> impl Rule {
    SimpleRule::new(CODE, NAME, DocumentKind::Dockerfile, DESCRIPTION, check)
}

fn check(doc: &Document) -> Result<Findings, RuleFault> {
    let mut found = Vec::new();

    for inst in instructions(doc.lines()?).filter(|i| i.is("RUN")) {
        if inst.args.contains(CACHE_MOUNT) {
            continue;
        }
        for (trigger, message, target) in MANAGERS {
            if inst.args.contains(trigger) {
                found.push(
                    Diagnostic::new(CODE, Severity::Info, Location::Line(inst.line), *message)
                        .with_suggestion(format!("Add: RUN {},target={}", CACHE_MOUNT, target)),
                );
            }
        }
    }

    Ok(found.into())
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::analyzer::rules::dockerfile::test_support::check;

    #[test]
    fn test_each_manager_reported() {
        let found = check(&rule(), "RUN pip install -r req.txt && npm install && yarn install\n");
        let messages: Vec<&str> = found.iter().map(|d| d.message()).collect();
        assert_eq!(
            messages,
            vec![
                "pip install without cache mount",
                "npm install without cache mount",
                "yarn install without cache mount",
            ]
        );
    }

    #[test]
    fn test_apt_suggestion() {
        let found = check(&rule(), "RUN apt-get update\n");
        assert_eq!(found.len(), 1);
        assert_eq!(
            found[0].suggestion(),
            Some("Add: RUN --mount=type=cache,target=/var/cache/apt")
        );
    }

    #[test]
    fn test_cache_mount_present() {
        assert!(check(&rule(), "RUN --mount=type=cache,target=/root/.cache/pip pip install x\n").is_empty());
    }

    #[test]
    fn test_only_run_lines() {
        assert!(check(&rule(), "# RUN pip install x\nENV NOTE=\"pip install\"\n").is_empty());
    }
}
