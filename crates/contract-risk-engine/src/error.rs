//! Error types for the knowledge store, explainers and configuration
//!
//! None of these escape an analysis run: the store adapter turns
//! [`StoreError`] into a fallback and callers of an [`crate::explain::Explainer`]
//! substitute fallback text on [`ExplainError`].

use std::path::PathBuf;

use thiserror::Error;

use crate::explain::Language;

/// Failures reading the external pattern/baseline store
#[derive(Error, Debug)]
pub enum StoreError {
    #[error("Knowledge source unavailable: {0}")]
    Unavailable(String),

    #[error("Failed to read knowledge file {path}: {source}")]
    Io {
        path: PathBuf,
        #[source]
        source: std::io::Error,
    },

    #[error("Malformed knowledge file {path}: {source}")]
    Parse {
        path: PathBuf,
        #[source]
        source: serde_json::Error,
    },
}

/// Failures of an explanation collaborator
#[derive(Error, Debug, Clone, PartialEq)]
pub enum ExplainError {
    #[error("Explanations are not available in language '{0}'")]
    UnsupportedLanguage(Language),

    #[error("Explanation failed: {0}")]
    Failed(String),
}

/// Invalid engine configuration values
#[derive(Error, Debug, Clone, PartialEq)]
pub enum ConfigError {
    #[error("Unknown language code '{0}'. Supported: en, hi")]
    UnknownLanguage(String),

    #[error("{key} must be a positive integer (found '{value}')")]
    InvalidNumber { key: String, value: String },
}
