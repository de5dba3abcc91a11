//! Validator configuration structures

use serde::Deserialize;

/// Validator behaviour switches
#[derive(Debug, Clone, PartialEq, Eq, Deserialize)]
#[serde(default, deny_unknown_fields)]
pub struct ValidatorConfig {
    /// Reuse parsed requirements across calls
    pub cache_requirements: bool,
}

impl Default for ValidatorConfig {
    fn default() -> Self {
        Self {
            cache_requirements: true,
        }
    }
}
