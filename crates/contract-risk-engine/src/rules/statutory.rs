//! Statutory violation detection
//!
//! Every clause is checked against the patterns in stored order. A pattern
//! fires when at least [`MIN_KEYWORD_MATCHES`] of its keywords occur in the
//! clause, and the first pattern to fire is the only one reported for that
//! clause, even if a later pattern is more severe.

use shared_types::{Clause, Pattern, Violation};

/// Absolute number of distinct keywords a clause must contain
pub const MIN_KEYWORD_MATCHES: usize = 2;

/// Match every clause against the patterns; at most one violation per clause
pub fn detect_violations(clauses: &[Clause], patterns: &[Pattern]) -> Vec<Violation> {
    clauses
        .iter()
        .filter_map(|clause| check_clause(clause, patterns))
        .collect()
}

/// First pattern that fires on this clause, if any
pub fn check_clause(clause: &Clause, patterns: &[Pattern]) -> Option<Violation> {
    let text_lower = clause.text.to_lowercase();

    patterns.iter().find_map(|pattern| {
        let matched_keywords = pattern.keywords.found_in(&text_lower);
        if matched_keywords.len() >= MIN_KEYWORD_MATCHES {
            Some(build_violation(clause, pattern, matched_keywords))
        } else {
            None
        }
    })
}

fn build_violation(clause: &Clause, pattern: &Pattern, matched_keywords: Vec<String>) -> Violation {
    Violation {
        clause_id: clause.id,
        violation_type: pattern.violation_type.clone(),
        section_number: pattern.section_number.clone(),
        section_title: pattern.section_title.clone(),
        section_full_text: pattern.section_full_text.clone(),
        risk_level: pattern.risk_level,
        risk_score: pattern.risk_score,
        matched_keywords,
        explanation: pattern.description.clone(),
        source_url: pattern.source_url.clone(),
    }
}
