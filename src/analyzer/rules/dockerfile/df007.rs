//! DF007: run-cd
//!
//! Changing directory inside `RUN` does not persist; use `WORKDIR`.

use crate::analyzer::document::Document;
use crate::analyzer::rules::dockerfile::instructions;
use crate::analyzer::rules::{Findings, Rule, RuleFault, SimpleRule};
use crate::analyzer::types::{Diagnostic, DocumentKind, Location, Severity};

const CODE: &str = "DF007";
const NAME: &str = "run-cd";
const DESCRIPTION: &str = "Use WORKDIR to switch to a directory.";

pub fn rule() -> impl Rule {
    SimpleRule::new(CODE, NAME, DocumentKind::Dockerfile, DESCRIPTION, check)
}

fn check(doc: &Document) -> Result<Findings, RuleFault> {
    let found = instructions(doc.lines()?)
        .filter(|inst| inst.is("RUN") && inst.args.starts_with("cd "))
        .map(|inst| {
            Diagnostic::new(CODE, Severity::Warning, Location::Line(inst.line), "Using RUN cd instead of WORKDIR")
                .with_suggestion("Use: WORKDIR /path")
        })
        .collect::<Vec<_>>();

    Ok(found.into())
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::analyzer::rules::dockerfile::test_support::check;

    #[test]
    fn test_run_cd() {
        let found = check(&rule(), "RUN cd /app && make\nRUN make -C /app\n");
        assert_eq!(found.len(), 1);
        assert_eq!(found[0].location(), &Location::Line(1));
    }

    #[test]
    fn test_cd_later_in_command_is_fine() {
        assert!(check(&rule(), "RUN make && cd /tmp\nWORKDIR /app\n").is_empty());
    }
}
