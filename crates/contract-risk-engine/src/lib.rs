pub mod config;
pub mod defaults;
pub mod error;
pub mod explain;
pub mod extractors;
pub mod patterns;
pub mod rules;
pub mod scoring;
pub mod segmenter;
pub mod store;

pub use config::EngineConfig;
pub use defaults::{BuiltinRuleSet, BUILTIN_RULESET_VERSION};
pub use error::{ConfigError, ExplainError, StoreError};
pub use explain::{
    explain_or_fallback, Explainer, Explanation, ExplanationRequest, Language, TemplateExplainer,
    FALLBACK_IMPACT,
};
pub use store::{
    JsonKnowledgeSource, KnowledgeSource, PatternRecord, PatternStore, RuleSnapshot,
    StaticKnowledgeSource,
};

use shared_types::AnalysisResult;
use tracing::{debug, info};

/// ContractAnalyzer entry point
///
/// Owns the pattern store. Every call to [`ContractAnalyzer::analyze_text`]
/// takes a fresh [`RuleSnapshot`] and binds the whole run to it.
pub struct ContractAnalyzer {
    store: PatternStore,
}

impl ContractAnalyzer {
    pub fn new(store: PatternStore) -> Self {
        Self { store }
    }

    /// Analyzer over the built-in patterns only
    pub fn builtin() -> Self {
        Self::new(PatternStore::builtin())
    }

    pub fn from_config(config: &EngineConfig) -> Self {
        Self::new(config.pattern_store())
    }

    /// Load the current patterns and baselines
    pub fn snapshot(&self) -> RuleSnapshot {
        self.store.snapshot()
    }

    /// Analyze against a caller-held snapshot
    pub fn analyze(&self, text: &str, snapshot: &RuleSnapshot) -> AnalysisResult {
        analyze_contract(text, snapshot)
    }

    /// Analyze against a freshly loaded snapshot
    pub fn analyze_text(&self, text: &str) -> AnalysisResult {
        let snapshot = self.snapshot();
        analyze_contract(text, &snapshot)
    }
}

impl Default for ContractAnalyzer {
    fn default() -> Self {
        Self::builtin()
    }
}

/// Segment, detect, compare against baselines, score and classify
pub fn analyze_contract(text: &str, snapshot: &RuleSnapshot) -> AnalysisResult {
    let (strategy, clauses) = segmenter::segment_with_strategy(text);
    debug!("Segmented {} clauses using {:?}", clauses.len(), strategy);

    let violations = rules::statutory::detect_violations(&clauses, snapshot.patterns());
    debug!(
        "Matched {} violations against {} patterns ({})",
        violations.len(),
        snapshot.patterns().len(),
        snapshot.origin()
    );

    let deviations = rules::fair_practice::check_fair_practice(&clauses, snapshot.baselines());
    debug!("Found {} fair-practice deviations", deviations.len());

    let overall_score = scoring::calculate_risk_score(&violations);
    let risk_level = scoring::risk_level(overall_score);
    debug!("Scored {} ({})", overall_score, risk_level);

    info!(
        "Analyzed contract: {} clauses, {} violations, {} deviations, score {}",
        clauses.len(),
        violations.len(),
        deviations.len(),
        overall_score
    );

    AnalysisResult {
        overall_score,
        risk_level,
        violations,
        deviations,
        clauses,
        rule_set: snapshot.origin().clone(),
    }
}
