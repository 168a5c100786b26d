use serde::{Deserialize, Serialize};

use crate::analyzer::engine::EngineOptions;

/// Main configuration structure (`.infralint.yaml`)
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default, deny_unknown_fields)]
pub struct LintConfig {
    /// Rule codes to skip (e.g., `DF001`)
    pub ignored: Vec<String>,
    /// Evaluate rules on the rayon pool
    pub parallel: bool,
}

impl Default for LintConfig {
    fn default() -> Self {
        Self {
            ignored: Vec::new(),
            parallel: true,
        }
    }
}

impl LintConfig {
    /// Add a rule to ignore.
    pub fn ignore(mut self, code: impl Into<String>) -> Self {
        self.ignored.push(code.into());
        self
    }

    pub fn engine_options(&self) -> EngineOptions {
        EngineOptions {
            parallel: self.parallel,
        }
    }
}
