//! Pattern store adapter
//!
//! Reads violation patterns and fair-practice baselines from an external
//! [`KnowledgeSource`] and hands out immutable [`RuleSnapshot`]s. When the
//! source is absent, failing or empty the embedded [`BuiltinRuleSet`] is used
//! instead. The two pattern sets are never merged.

use std::path::{Path, PathBuf};
use std::sync::Arc;

use serde::{Deserialize, Serialize};
use serde_json::Value;
use shared_types::{FairBaseline, KeywordSet, Pattern, RuleSetOrigin, Severity};
use tracing::{debug, info, warn};

use crate::defaults::{BuiltinRuleSet, CONTRACT_ACT_URL};
use crate::error::StoreError;

/// Citation title used when a record leaves it blank
pub const DEFAULT_SECTION_TITLE: &str = "Indian Contract Act, 1872";

/// A pattern row as stored externally, before validation
///
/// Accepts both camelCase keys and the snake_case column names of the
/// legacy knowledge database.
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct PatternRecord {
    #[serde(alias = "clause_type")]
    pub violation_type: String,
    /// A JSON array of strings, or a string holding one
    #[serde(default)]
    pub keywords: Value,
    #[serde(alias = "risk_level")]
    pub risk_level: Severity,
    #[serde(alias = "risk_score")]
    pub risk_score: i64,
    #[serde(default, alias = "section_number")]
    pub section_number: String,
    #[serde(default, alias = "section_title")]
    pub section_title: String,
    #[serde(default, alias = "full_text", alias = "section_full_text")]
    pub section_full_text: String,
    #[serde(default)]
    pub description: String,
    #[serde(default, alias = "gov_url", alias = "source_url")]
    pub source_url: String,
}

impl PatternRecord {
    /// Validate into a [`Pattern`]
    ///
    /// Invalid keyword payloads and non-positive scores neutralize the pattern
    /// (empty keyword set, never fires) rather than dropping it, so the
    /// position of every other pattern in the sequence is unchanged.
    pub fn into_pattern(self) -> Pattern {
        let mut keywords = parse_keywords(&self.keywords).unwrap_or_else(|| {
            warn!(
                "Pattern '{}' has an invalid keyword list; it will never match",
                self.violation_type
            );
            KeywordSet::empty()
        });

        let risk_score = if self.risk_score > 0 {
            u32::try_from(self.risk_score).unwrap_or(u32::MAX)
        } else {
            warn!(
                "Pattern '{}' has non-positive risk score {}; it will never match",
                self.violation_type, self.risk_score
            );
            keywords = KeywordSet::empty();
            0
        };

        let section_full_text = if self.section_full_text.is_empty() {
            self.description.clone()
        } else {
            self.section_full_text
        };

        Pattern {
            violation_type: self.violation_type,
            keywords,
            risk_level: self.risk_level,
            risk_score,
            section_number: self.section_number,
            section_title: non_empty_or(self.section_title, DEFAULT_SECTION_TITLE),
            section_full_text,
            description: self.description,
            source_url: non_empty_or(self.source_url, CONTRACT_ACT_URL),
        }
    }
}

fn non_empty_or(value: String, default: &str) -> String {
    if value.trim().is_empty() {
        default.to_string()
    } else {
        value
    }
}

/// Parse a keyword payload: an array of strings, or a string containing a
/// JSON array of strings. Anything else is invalid.
pub fn parse_keywords(raw: &Value) -> Option<KeywordSet> {
    match raw {
        Value::Array(items) => {
            let words: Option<Vec<&str>> = items.iter().map(Value::as_str).collect();
            words.map(KeywordSet::new)
        }
        Value::String(encoded) => serde_json::from_str::<Vec<String>>(encoded)
            .ok()
            .map(KeywordSet::new),
        _ => None,
    }
}

/// External read-only knowledge store
pub trait KnowledgeSource: Send + Sync {
    fn load_patterns(&self) -> Result<Vec<PatternRecord>, StoreError>;

    fn load_baselines(&self) -> Result<Vec<FairBaseline>, StoreError>;

    /// Patterns and baselines for one snapshot
    ///
    /// Sources that can change between calls should override this and read
    /// both from a single version of the data. A baseline failure here only
    /// costs the baselines.
    fn load_document(&self) -> Result<KnowledgeDocument, StoreError> {
        let patterns = self.load_patterns()?;
        let baselines = self.load_baselines().unwrap_or_else(|err| {
            warn!(
                "Could not load fair contract baselines from {}: {}",
                self.name(),
                err
            );
            Vec::new()
        });

        Ok(KnowledgeDocument {
            patterns,
            baselines,
        })
    }

    /// Human-readable name for logs
    fn name(&self) -> &str;
}

/// On-disk layout of a JSON knowledge file
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct KnowledgeDocument {
    #[serde(default)]
    pub patterns: Vec<PatternRecord>,
    #[serde(default)]
    pub baselines: Vec<FairBaseline>,
}

/// Knowledge source backed by a JSON file
///
/// The file is re-read on every load, so edits are picked up by the next
/// snapshot. One snapshot reads it once.
pub struct JsonKnowledgeSource {
    path: PathBuf,
    name: String,
}

impl JsonKnowledgeSource {
    pub fn new(path: impl Into<PathBuf>) -> Self {
        let path = path.into();
        let name = format!("json:{}", path.display());
        Self { path, name }
    }

    pub fn path(&self) -> &Path {
        &self.path
    }

    fn read_document(&self) -> Result<KnowledgeDocument, StoreError> {
        let contents = std::fs::read_to_string(&self.path).map_err(|source| {
            if source.kind() == std::io::ErrorKind::NotFound {
                StoreError::Unavailable(format!("{} does not exist", self.path.display()))
            } else {
                StoreError::Io {
                    path: self.path.clone(),
                    source,
                }
            }
        })?;

        serde_json::from_str(&contents).map_err(|source| StoreError::Parse {
            path: self.path.clone(),
            source,
        })
    }
}

impl KnowledgeSource for JsonKnowledgeSource {
    fn load_patterns(&self) -> Result<Vec<PatternRecord>, StoreError> {
        Ok(self.read_document()?.patterns)
    }

    fn load_baselines(&self) -> Result<Vec<FairBaseline>, StoreError> {
        Ok(self.read_document()?.baselines)
    }

    fn load_document(&self) -> Result<KnowledgeDocument, StoreError> {
        self.read_document()
    }

    fn name(&self) -> &str {
        &self.name
    }
}

/// In-memory knowledge source
#[derive(Debug, Clone, Default)]
pub struct StaticKnowledgeSource {
    patterns: Vec<PatternRecord>,
    baselines: Vec<FairBaseline>,
}

impl StaticKnowledgeSource {
    pub fn new(patterns: Vec<PatternRecord>, baselines: Vec<FairBaseline>) -> Self {
        Self {
            patterns,
            baselines,
        }
    }
}

impl KnowledgeSource for StaticKnowledgeSource {
    fn load_patterns(&self) -> Result<Vec<PatternRecord>, StoreError> {
        Ok(self.patterns.clone())
    }

    fn load_baselines(&self) -> Result<Vec<FairBaseline>, StoreError> {
        Ok(self.baselines.clone())
    }

    fn name(&self) -> &str {
        "static"
    }
}

/// Immutable patterns and baselines bound to one or more analysis runs
#[derive(Debug, Clone)]
pub struct RuleSnapshot {
    patterns: Arc<[Pattern]>,
    baselines: Arc<[FairBaseline]>,
    origin: RuleSetOrigin,
}

impl RuleSnapshot {
    pub fn new(patterns: Vec<Pattern>, baselines: Vec<FairBaseline>, origin: RuleSetOrigin) -> Self {
        Self {
            patterns: patterns.into(),
            baselines: baselines.into(),
            origin,
        }
    }

    /// The embedded defaults with no baselines
    pub fn builtin(defaults: &BuiltinRuleSet) -> Self {
        Self {
            patterns: defaults.patterns(),
            baselines: Vec::<FairBaseline>::new().into(),
            origin: RuleSetOrigin::Builtin {
                version: defaults.version().to_string(),
            },
        }
    }

    pub fn patterns(&self) -> &[Pattern] {
        &self.patterns
    }

    pub fn baselines(&self) -> &[FairBaseline] {
        &self.baselines
    }

    pub fn origin(&self) -> &RuleSetOrigin {
        &self.origin
    }
}

/// Loads snapshots from a knowledge source with built-in fallback
pub struct PatternStore {
    source: Option<Box<dyn KnowledgeSource>>,
    defaults: BuiltinRuleSet,
}

impl PatternStore {
    pub fn new(source: Option<Box<dyn KnowledgeSource>>, defaults: BuiltinRuleSet) -> Self {
        Self { source, defaults }
    }

    /// A store with no external source: always the built-in defaults
    pub fn builtin() -> Self {
        Self::new(None, BuiltinRuleSet::current())
    }

    pub fn with_source(source: impl KnowledgeSource + 'static) -> Self {
        Self::new(Some(Box::new(source)), BuiltinRuleSet::current())
    }

    pub fn defaults(&self) -> &BuiltinRuleSet {
        &self.defaults
    }

    /// Load a fresh snapshot. Never fails.
    ///
    /// The source is read once, so patterns and baselines always come from
    /// the same version of the data.
    pub fn snapshot(&self) -> RuleSnapshot {
        let document = self.load_document();

        if document.patterns.is_empty() {
            let mut snapshot = RuleSnapshot::builtin(&self.defaults);
            snapshot.baselines = document.baselines.into();
            return snapshot;
        }

        let patterns = document
            .patterns
            .into_iter()
            .map(PatternRecord::into_pattern)
            .collect();
        RuleSnapshot::new(patterns, document.baselines, RuleSetOrigin::External)
    }

    /// Empty patterns mean "fall back to the defaults"
    fn load_document(&self) -> KnowledgeDocument {
        let Some(source) = &self.source else {
            debug!(
                "No knowledge source configured, using built-in patterns v{}",
                self.defaults.version()
            );
            return KnowledgeDocument::default();
        };

        match source.load_document() {
            Ok(document) if document.patterns.is_empty() => {
                info!(
                    "Knowledge source {} has no patterns, using built-in patterns v{}",
                    source.name(),
                    self.defaults.version()
                );
                document
            }
            Ok(document) => {
                debug!(
                    "Loaded {} patterns and {} baselines from {}",
                    document.patterns.len(),
                    document.baselines.len(),
                    source.name()
                );
                document
            }
            Err(err) => {
                warn!(
                    "Could not load knowledge from {}: {}; using built-in patterns v{}",
                    source.name(),
                    err,
                    self.defaults.version()
                );
                KnowledgeDocument::default()
            }
        }
    }
}

impl Default for PatternStore {
    fn default() -> Self {
        Self::builtin()
    }
}
