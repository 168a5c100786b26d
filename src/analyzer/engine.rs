//! Rule evaluation.
//!
//! Runs a catalog over one document. Every rule is isolated: a rule that
//! fails or panics becomes one synthetic Error diagnostic and the run goes
//! on. Results are merged in catalog order, so parallel and sequential
//! evaluation produce the same output.

use std::any::Any;
use std::panic::{self, AssertUnwindSafe};

use rayon::prelude::*;

use crate::analyzer::document::Document;
use crate::analyzer::rules::{Catalog, Findings, Rule, RuleFault};
use crate::analyzer::types::{Diagnostic, Location, Severity};

/// Evaluation settings.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct EngineOptions {
    /// Evaluate rules on the rayon pool.
    pub parallel: bool,
}

impl Default for EngineOptions {
    fn default() -> Self {
        Self { parallel: true }
    }
}

/// Run every rule of `catalog` that applies to `document`.
pub fn run(document: &Document, catalog: &Catalog, options: &EngineOptions) -> Vec<Diagnostic> {
    let kind = document.kind();
    let rules: Vec<&dyn Rule> = catalog
        .rules()
        .iter()
        .map(|rule| rule.as_ref())
        .filter(|rule| rule.kind() == kind)
        .collect();

    log::debug!(
        "Evaluating {} {} rules ({})",
        rules.len(),
        kind,
        if options.parallel { "parallel" } else { "sequential" }
    );

    let outcomes: Vec<Findings> = if options.parallel && rules.len() > 1 {
        rules.par_iter().map(|rule| evaluate(*rule, document)).collect()
    } else {
        rules.iter().map(|rule| evaluate(*rule, document)).collect()
    };

    merge(&rules, outcomes)
}

/// Concatenate findings in catalog order, skipping rules whose group was
/// halted by an earlier rule.
fn merge(rules: &[&dyn Rule], outcomes: Vec<Findings>) -> Vec<Diagnostic> {
    let mut diagnostics = Vec::new();
    let mut halted: Vec<&str> = Vec::new();

    for (rule, findings) in rules.iter().zip(outcomes) {
        if halted.contains(&rule.group()) {
            log::trace!("Skipping {} (group {} halted)", rule.code(), rule.group());
            continue;
        }
        diagnostics.extend(findings.diagnostics);
        if findings.halt {
            log::debug!("{} halted group {}", rule.code(), rule.group());
            halted.push(rule.group());
        }
    }

    diagnostics
}

fn evaluate(rule: &dyn Rule, document: &Document) -> Findings {
    log::trace!("Running {} ({}): {}", rule.code(), rule.name(), rule.description());
    let outcome = panic::catch_unwind(AssertUnwindSafe(|| rule.check(document)));

    let fault = match outcome {
        Ok(Ok(findings)) => return findings,
        Ok(Err(fault)) => fault,
        Err(payload) => RuleFault::Panicked(panic_message(payload.as_ref())),
    };

    log::warn!("Rule {} ({}) failed: {}", rule.code(), rule.name(), fault);
    vec![Diagnostic::new(
        rule.code().clone(),
        Severity::Error,
        Location::Root,
        format!("Rule {} ({}) failed: {}", rule.code(), rule.name(), fault),
    )]
    .into()
}

fn panic_message(payload: &(dyn Any + Send)) -> String {
    if let Some(message) = payload.downcast_ref::<&str>() {
        message.to_string()
    } else if let Some(message) = payload.downcast_ref::<String>() {
        message.clone()
    } else {
        "unknown panic".to_string()
    }
}
