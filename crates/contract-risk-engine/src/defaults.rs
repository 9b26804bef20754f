//! Built-in statutory patterns
//!
//! Used whenever the knowledge source is missing, failing or empty. The set
//! is versioned so results can say which defaults produced them, and it is
//! never mutated after construction.

use std::sync::Arc;

use shared_types::{KeywordSet, Pattern, Severity};

/// Version tag of the embedded pattern set
pub const BUILTIN_RULESET_VERSION: &str = "2024.1";

/// Indian Contract Act, 1872 (official consolidated text)
pub const CONTRACT_ACT_URL: &str =
    "https://www.indiacode.nic.in/bitstream/123456789/2187/2/A187209.pdf";

const SECTION_10_TITLE: &str = "What agreements are contracts";
const SECTION_10_TEXT: &str = "All agreements are contracts if they are made by the free consent of parties competent to contract, for a lawful consideration and with a lawful object.";

/// An immutable, versioned default pattern set
#[derive(Debug, Clone)]
pub struct BuiltinRuleSet {
    version: &'static str,
    patterns: Arc<[Pattern]>,
}

impl BuiltinRuleSet {
    /// The current embedded set: non-compete, unlimited liability, excessive
    /// penalty, unilateral termination, foreign jurisdiction (in that order)
    pub fn current() -> Self {
        Self {
            version: BUILTIN_RULESET_VERSION,
            patterns: vec![
                non_compete(),
                unlimited_liability(),
                excessive_penalty(),
                unilateral_termination(),
                foreign_jurisdiction(),
            ]
            .into(),
        }
    }

    pub fn version(&self) -> &'static str {
        self.version
    }

    pub fn patterns(&self) -> Arc<[Pattern]> {
        Arc::clone(&self.patterns)
    }
}

impl Default for BuiltinRuleSet {
    fn default() -> Self {
        Self::current()
    }
}

fn non_compete() -> Pattern {
    Pattern {
        violation_type: "non_compete".to_string(),
        keywords: KeywordSet::new([
            "non-compete",
            "non compete",
            "shall not compete",
            "restraint of trade",
            "not engage in similar",
            "cannot work for competitor",
        ]),
        risk_level: Severity::Critical,
        risk_score: 40,
        section_number: "Section 27".to_string(),
        section_title: "Agreement in restraint of trade void".to_string(),
        section_full_text: "Every agreement by which any one is restrained from exercising a lawful profession, trade or business of any kind, is to that extent void.".to_string(),
        description: "Non-compete clause restricting freelancer from taking other work".to_string(),
        source_url: CONTRACT_ACT_URL.to_string(),
    }
}

fn unlimited_liability() -> Pattern {
    Pattern {
        violation_type: "unlimited_liability".to_string(),
        keywords: KeywordSet::new([
            "unlimited liability",
            "all damages",
            "consequential damages",
            "indirect damages",
            "liable for all losses",
            "without limitation",
        ]),
        risk_level: Severity::High,
        risk_score: 25,
        section_number: "Section 73".to_string(),
        section_title: "Compensation for loss or damage caused by breach of contract".to_string(),
        section_full_text: "When a contract has been broken, the party who suffers by such breach is entitled to receive, from the party who has broken the contract, compensation for any loss or damage caused to him thereby.".to_string(),
        description: "Freelancer liable for unlimited damages without reasonable cap".to_string(),
        source_url: CONTRACT_ACT_URL.to_string(),
    }
}

fn excessive_penalty() -> Pattern {
    Pattern {
        violation_type: "excessive_penalty".to_string(),
        keywords: KeywordSet::new([
            "penalty of",
            "liquidated damages",
            "shall pay",
            "penalty equal to",
            "forfeit",
            "breach penalty",
        ]),
        risk_level: Severity::High,
        risk_score: 20,
        section_number: "Section 74".to_string(),
        section_title: "Compensation for breach of contract where penalty stipulated for".to_string(),
        section_full_text: "When a contract has been broken, if a sum is named in the contract as the amount to be paid in case of such breach, the party complaining of the breach is entitled, whether or not actual damage or loss is proved to have been caused thereby, to receive from the party who has broken the contract reasonable compensation.".to_string(),
        description: "Excessive penalty that exceeds reasonable compensation for breach".to_string(),
        source_url: CONTRACT_ACT_URL.to_string(),
    }
}

fn unilateral_termination() -> Pattern {
    Pattern {
        violation_type: "unilateral_termination".to_string(),
        keywords: KeywordSet::new([
            "terminate at will",
            "without cause",
            "immediate termination",
            "terminate without notice",
            "at sole discretion",
            "cancel anytime",
        ]),
        risk_level: Severity::Medium,
        risk_score: 15,
        section_number: "Section 10".to_string(),
        section_title: SECTION_10_TITLE.to_string(),
        section_full_text: SECTION_10_TEXT.to_string(),
        description: "Client can terminate without reason or notice period".to_string(),
        source_url: CONTRACT_ACT_URL.to_string(),
    }
}

fn foreign_jurisdiction() -> Pattern {
    Pattern {
        violation_type: "foreign_jurisdiction".to_string(),
        keywords: KeywordSet::new([
            "governed by laws of",
            "jurisdiction of",
            "courts of USA",
            "UK jurisdiction",
            "Singapore courts",
            "Delaware",
            "California law",
        ]),
        risk_level: Severity::Medium,
        risk_score: 12,
        section_number: "Section 10".to_string(),
        section_title: SECTION_10_TITLE.to_string(),
        section_full_text: SECTION_10_TEXT.to_string(),
        description: "Disputes must be resolved in foreign jurisdiction (expensive for freelancer)".to_string(),
        source_url: CONTRACT_ACT_URL.to_string(),
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use pretty_assertions::assert_eq;

    #[test]
    fn test_builtin_order_is_fixed() {
        let types: Vec<String> = BuiltinRuleSet::current()
            .patterns()
            .iter()
            .map(|p| p.violation_type.clone())
            .collect();
        assert_eq!(
            types,
            vec![
                "non_compete",
                "unlimited_liability",
                "excessive_penalty",
                "unilateral_termination",
                "foreign_jurisdiction",
            ]
        );
    }

    #[test]
    fn test_builtin_patterns_are_well_formed() {
        for pattern in BuiltinRuleSet::current().patterns().iter() {
            assert!(pattern.risk_score > 0, "{} has no score", pattern.violation_type);
            assert!(pattern.keywords.len() >= 2, "{} can never fire", pattern.violation_type);
            assert!(pattern.keywords.iter().all(|k| k == k.to_lowercase()));
        }
    }

    #[test]
    fn test_version_is_exposed() {
        assert_eq!(BuiltinRuleSet::current().version(), BUILTIN_RULESET_VERSION);
    }
}
