//! DF006: secret-in-arg-env
//!
//! Build args and environment variables end up in the image metadata. Names
//! that look like credentials should be passed as BuildKit secrets instead.

use crate::analyzer::document::Document;
use crate::analyzer::rules::dockerfile::instructions;
use crate::analyzer::rules::{Findings, Rule, RuleFault, SimpleRule};
use crate::analyzer::types::{Diagnostic, DocumentKind, Location, Severity};

const CODE: &str = "DF006";
const NAME: &str = "secret-in-arg-env";
const DESCRIPTION: &str = "Do not declare secrets with ARG or ENV.";

/// Substrings that mark a variable name as secret-shaped.
pub(crate) const SECRET_MARKERS: &[&str] = &["PASSWORD", "SECRET", "TOKEN", "KEY"];

pub fn rule() -> impl Rule {
    SimpleRule::new(CODE, NAME, DocumentKind::Dockerfile, DESCRIPTION, check)
}

fn check(doc: &Document) -> Result<Findings, RuleFault> {
    let found = instructions(doc.lines()?)
        .filter(|inst| inst.is("ARG") || inst.is("ENV"))
        .filter(|inst| declared_names(inst.args).any(is_secret_name))
        .map(|inst| {
            Diagnostic::new(CODE, Severity::Error, Location::Line(inst.line), "Potential secret in ARG/ENV")
                .with_suggestion("Use: RUN --mount=type=secret,id=mysecret")
        })
        .collect::<Vec<_>>();

    Ok(found.into())
}

pub(crate) fn is_secret_name(name: &str) -> bool {
    let upper = name.to_ascii_uppercase();
    SECRET_MARKERS.iter().any(|marker| upper.contains(marker))
}

/// Names declared by `ARG name[=default]`, `ENV k=v k2=v2` or `ENV k v`.
fn declared_names(args: &str) -> impl Iterator<Item = &str> {
    let mut tokens = args.split_whitespace();
    let first = tokens.next();
    let pairs = first.is_some_and(|t| t.contains('='));

    first
        .into_iter()
        .chain(tokens.filter(move |_| pairs))
        .filter_map(|token| {
            let name = token.split('=').next().unwrap_or(token);
            (!name.is_empty()).then_some(name)
        })
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::analyzer::rules::dockerfile::test_support::check;

    #[test]
    fn test_secret_names() {
        let content = "\
ARG GITHUB_TOKEN
ENV DB_PASSWORD=hunter2
env api_key value
ENV A=1 CLIENT_SECRET=x
";
        let found = check(&rule(), content);
        assert_eq!(found.len(), 4);
        assert!(found.iter().all(|d| d.severity() == Severity::Error));
    }

    #[test]
    fn test_values_are_not_names() {
        // Legacy `ENV key value` form: only the first token is a name.
        assert!(check(&rule(), "ENV HINT use the PASSWORD file\n").is_empty());
        assert!(check(&rule(), "ARG VERSION=1.0\nENV PATH=/usr/local/bin:$PATH\n").is_empty());
    }
}
