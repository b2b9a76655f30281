//! Error types for template file loading.

use std::path::PathBuf;
use thiserror::Error;

/// Template file loading error
#[derive(Debug, Error)]
pub enum ConfigError {
    /// JSON / JSONC parsing error
    #[error("JSON parsing error: {0}")]
    Json(#[from] serde_json::Error),
    /// YAML parsing error
    #[error("YAML parsing error: {0}")]
    Yaml(#[from] serde_yaml::Error),
    /// File could not be read
    #[error("Failed to read {}: {source}", path.display())]
    Io {
        path: PathBuf,
        #[source]
        source: std::io::Error,
    },
    /// Invalid glob pattern
    #[error("Invalid file pattern: {0}")]
    Pattern(#[from] glob::PatternError),
    /// Unknown file type
    #[error("Unknown file type: {0}")]
    UnknownFileType(String),
}
