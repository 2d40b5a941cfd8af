//! Errors raised while loading or writing a manifest.

use std::path::PathBuf;

/// Errors that can occur when loading a manifest.
#[derive(Debug, thiserror::Error)]
pub enum ManifestError {
    #[error("Failed to read {path}: {source}")]
    Io {
        path: PathBuf,
        #[source]
        source: std::io::Error,
    },

    #[error("Invalid YAML: {0}")]
    Yaml(#[from] serde_yaml::Error),

    #[error("Manifest must be a mapping of configuration keys")]
    NotAMapping,

    #[error("Invalid value for '{key}': {message}")]
    InvalidValue { key: String, message: String },

    #[error("Invalid navigation entry at {location}: {message}")]
    NavShape { location: String, message: String },

    #[error("'{0}' and '{1}' cannot both be set")]
    ConflictingKeys(&'static str, &'static str),
}

impl ManifestError {
    pub(crate) fn invalid(key: impl Into<String>, message: impl Into<String>) -> Self {
        Self::InvalidValue {
            key: key.into(),
            message: message.into(),
        }
    }
}
