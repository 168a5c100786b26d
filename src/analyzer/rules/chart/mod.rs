//! Chart rules (HC1xx-HC3xx).
//!
//! Three independent validators, one short-circuit group each:
//! - `metadata` (HC1xx) - Chart.yaml
//! - `templates` (HC2xx) - templates/ directory
//! - `values` (HC3xx) - values.yaml
//!
//! A fatal finding in one group never stops the others.

use crate::analyzer::rules::Rule;

pub mod metadata;
pub mod templates;
pub mod values;

/// Get all chart rules in catalog order.
pub fn all_rules() -> Vec<Box<dyn Rule>> {
    let mut rules = metadata::rules();
    rules.extend(templates::rules());
    rules.extend(values::rules());
    rules
}
