//! Engine configuration
//!
//! Environment variables:
//! - `CONTRACT_KNOWLEDGE_PATH`: JSON knowledge file (optional, built-in patterns otherwise)
//! - `CONTRACT_DEFAULT_LANGUAGE`: `en` (default) or `hi`
//! - `CONTRACT_MAX_TEXT_BYTES`: largest accepted contract text, default 10 MiB

use std::path::PathBuf;

use anyhow::Result;
use tracing::info;

use crate::error::ConfigError;
use crate::explain::Language;
use crate::store::{JsonKnowledgeSource, PatternStore};

pub const KNOWLEDGE_PATH_VAR: &str = "CONTRACT_KNOWLEDGE_PATH";
pub const DEFAULT_LANGUAGE_VAR: &str = "CONTRACT_DEFAULT_LANGUAGE";
pub const MAX_TEXT_BYTES_VAR: &str = "CONTRACT_MAX_TEXT_BYTES";

/// 10 MiB, the upload cap of the web front end
pub const DEFAULT_MAX_TEXT_BYTES: usize = 10 * 1024 * 1024;

#[derive(Debug, Clone, PartialEq)]
pub struct EngineConfig {
    pub knowledge_path: Option<PathBuf>,
    pub default_language: Language,
    pub max_text_bytes: usize,
}

impl Default for EngineConfig {
    fn default() -> Self {
        Self {
            knowledge_path: None,
            default_language: Language::En,
            max_text_bytes: DEFAULT_MAX_TEXT_BYTES,
        }
    }
}

impl EngineConfig {
    /// Load configuration from environment variables
    pub fn from_env() -> Result<Self> {
        Ok(Self::from_lookup(|key| std::env::var(key).ok())?)
    }

    /// Load configuration from any key lookup (the environment in production)
    pub fn from_lookup<F>(lookup: F) -> Result<Self, ConfigError>
    where
        F: Fn(&str) -> Option<String>,
    {
        let knowledge_path = lookup(KNOWLEDGE_PATH_VAR)
            .filter(|p| !p.trim().is_empty())
            .map(PathBuf::from);

        let default_language = match lookup(DEFAULT_LANGUAGE_VAR) {
            Some(code) if !code.trim().is_empty() => code.parse()?,
            _ => Language::default(),
        };

        let max_text_bytes = match lookup(MAX_TEXT_BYTES_VAR) {
            Some(raw) => match raw.trim().parse::<usize>() {
                Ok(n) if n > 0 => n,
                _ => {
                    return Err(ConfigError::InvalidNumber {
                        key: MAX_TEXT_BYTES_VAR.to_string(),
                        value: raw,
                    })
                }
            },
            None => DEFAULT_MAX_TEXT_BYTES,
        };

        Ok(Self {
            knowledge_path,
            default_language,
            max_text_bytes,
        })
    }

    /// Build the pattern store this configuration describes
    pub fn pattern_store(&self) -> PatternStore {
        match &self.knowledge_path {
            Some(path) => {
                info!("Using knowledge file {}", path.display());
                PatternStore::with_source(JsonKnowledgeSource::new(path.clone()))
            }
            None => {
                info!("No knowledge file configured, using built-in patterns");
                PatternStore::builtin()
            }
        }
    }
}
