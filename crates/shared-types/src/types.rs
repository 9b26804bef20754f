use std::fmt;

use crate::keywords::KeywordSet;

/// One segmented unit of contract text
#[derive(Debug, Clone, PartialEq, Eq, serde::Serialize, serde::Deserialize)]
pub struct Clause {
    pub id: u32,       // Sequential, starting at 1
    pub text: String,  // Trimmed, never empty
    pub position: u32, // 0-based index in the segmenter's output
}

/// Severity attached to a statutory pattern and the violations it produces
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, serde::Serialize, serde::Deserialize)]
#[serde(rename_all = "UPPERCASE")]
pub enum Severity {
    Critical,
    High,
    Medium,
    Low,
}

impl Severity {
    pub fn as_str(&self) -> &'static str {
        match self {
            Severity::Critical => "CRITICAL",
            Severity::High => "HIGH",
            Severity::Medium => "MEDIUM",
            Severity::Low => "LOW",
        }
    }
}

impl fmt::Display for Severity {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

/// A statutory violation rule: keyword evidence plus its legal citation
#[derive(Debug, Clone, PartialEq, serde::Serialize, serde::Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Pattern {
    pub violation_type: String, // e.g., "non_compete"
    pub keywords: KeywordSet,
    pub risk_level: Severity,
    pub risk_score: u32,
    pub section_number: String, // e.g., "Section 27"
    pub section_title: String,
    pub section_full_text: String,
    pub description: String,
    pub source_url: String,
}

/// One pattern firing on one clause
#[derive(Debug, Clone, PartialEq, serde::Serialize, serde::Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Violation {
    pub clause_id: u32,
    pub violation_type: String,
    pub section_number: String,
    pub section_title: String,
    pub section_full_text: String,
    pub risk_level: Severity,
    pub risk_score: u32,
    pub matched_keywords: Vec<String>,
    pub explanation: String,
    pub source_url: String,
}

/// Reference phrasing of what a fair term looks like for one category
#[derive(Debug, Clone, PartialEq, Eq, serde::Serialize, serde::Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct FairBaseline {
    #[serde(alias = "clause_category")]
    pub category: String, // e.g., "payment_terms"
    #[serde(alias = "fair_standard")]
    pub fair_standard: String,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, serde::Serialize, serde::Deserialize)]
pub enum DeviationCategory {
    #[serde(rename = "Payment Terms")]
    PaymentTerms,
    #[serde(rename = "Termination Notice")]
    TerminationNotice,
    #[serde(rename = "Liability Cap")]
    LiabilityCap,
    #[serde(rename = "Jurisdiction")]
    Jurisdiction,
}

impl DeviationCategory {
    /// Key used to look up the matching [`FairBaseline`]
    pub fn baseline_key(&self) -> &'static str {
        match self {
            DeviationCategory::PaymentTerms => "payment_terms",
            DeviationCategory::TerminationNotice => "termination_notice",
            DeviationCategory::LiabilityCap => "liability_cap",
            DeviationCategory::Jurisdiction => "jurisdiction",
        }
    }

    pub fn name(&self) -> &'static str {
        match self {
            DeviationCategory::PaymentTerms => "Payment Terms",
            DeviationCategory::TerminationNotice => "Termination Notice",
            DeviationCategory::LiabilityCap => "Liability Cap",
            DeviationCategory::Jurisdiction => "Jurisdiction",
        }
    }
}

impl fmt::Display for DeviationCategory {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.name())
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, serde::Serialize, serde::Deserialize)]
#[serde(rename_all = "UPPERCASE")]
pub enum DeviationLevel {
    Extreme,
    Significant,
    Minor,
}

/// A departure from a fair-practice baseline
#[derive(Debug, Clone, PartialEq, Eq, serde::Serialize, serde::Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Deviation {
    pub category: DeviationCategory,
    pub found_in_contract: String,
    pub fair_standard: String,
    pub deviation_level: DeviationLevel,
    pub explanation: String,
}

/// Qualitative bucket for an overall score
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash, serde::Serialize, serde::Deserialize)]
pub enum RiskLevel {
    #[serde(rename = "SAFE")]
    Safe,
    #[serde(rename = "MODERATE RISK")]
    ModerateRisk,
    #[serde(rename = "HIGH RISK")]
    HighRisk,
    #[serde(rename = "DANGEROUS")]
    Dangerous,
}

impl RiskLevel {
    pub fn as_str(&self) -> &'static str {
        match self {
            RiskLevel::Safe => "SAFE",
            RiskLevel::ModerateRisk => "MODERATE RISK",
            RiskLevel::HighRisk => "HIGH RISK",
            RiskLevel::Dangerous => "DANGEROUS",
        }
    }
}

impl fmt::Display for RiskLevel {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

/// Which pattern set produced a result
#[derive(Debug, Clone, PartialEq, Eq, serde::Serialize, serde::Deserialize)]
#[serde(tag = "source", rename_all = "lowercase")]
pub enum RuleSetOrigin {
    /// Loaded from the external knowledge source
    External,
    /// The embedded default set, identified by its version
    Builtin { version: String },
}

impl fmt::Display for RuleSetOrigin {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            RuleSetOrigin::External => f.write_str("external"),
            RuleSetOrigin::Builtin { version } => write!(f, "builtin:{}", version),
        }
    }
}

/// Violation counts per severity
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, serde::Serialize, serde::Deserialize)]
#[serde(rename_all = "UPPERCASE")]
pub struct SeverityBreakdown {
    pub critical: usize,
    pub high: usize,
    pub medium: usize,
    pub low: usize,
}

/// Outcome of one analysis run over one document
#[derive(Debug, Clone, PartialEq, serde::Serialize, serde::Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct AnalysisResult {
    pub overall_score: u32, // 0..=100
    pub risk_level: RiskLevel,
    pub violations: Vec<Violation>,
    pub deviations: Vec<Deviation>,
    pub clauses: Vec<Clause>,
    pub rule_set: RuleSetOrigin,
}

impl AnalysisResult {
    /// Resolve a violation's clause within this run
    pub fn clause(&self, clause_id: u32) -> Option<&Clause> {
        self.clauses.iter().find(|c| c.id == clause_id)
    }
}
