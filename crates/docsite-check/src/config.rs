//! Checker settings.

use serde::Deserialize;

/// Settings controlling which findings are reported and which fail a check.
#[derive(Debug, Clone, Default, Deserialize, PartialEq, Eq)]
#[serde(default)]
pub struct CheckConfig {
    /// Fail on warnings as well as errors
    pub strict: bool,

    /// Diagnostic codes to suppress
    pub ignore: Vec<String>,

    /// Extra top-level keys to accept (e.g. keys read by plugins)
    pub known_keys: Vec<String>,
}

impl CheckConfig {
    pub fn is_ignored(&self, code: &str) -> bool {
        self.ignore.iter().any(|c| c == code)
    }

    pub fn is_known_key(&self, key: &str) -> bool {
        self.known_keys.iter().any(|k| k == key)
    }
}
