//! Deterministic 0-100 risk score

use shared_types::{RiskLevel, Severity, SeverityBreakdown, Violation};

pub const MAX_RISK_SCORE: u32 = 100;

/// Sum of violation scores, capped at [`MAX_RISK_SCORE`]
pub fn calculate_risk_score(violations: &[Violation]) -> u32 {
    violations
        .iter()
        .fold(0u32, |total, v| total.saturating_add(v.risk_score))
        .min(MAX_RISK_SCORE)
}

/// Bucket a score into a qualitative level
pub fn risk_level(score: u32) -> RiskLevel {
    match score {
        76.. => RiskLevel::Dangerous,
        51..=75 => RiskLevel::HighRisk,
        26..=50 => RiskLevel::ModerateRisk,
        _ => RiskLevel::Safe,
    }
}

/// Number of violations at each severity
pub fn severity_breakdown(violations: &[Violation]) -> SeverityBreakdown {
    violations
        .iter()
        .fold(SeverityBreakdown::default(), |mut breakdown, v| {
            match v.risk_level {
                Severity::Critical => breakdown.critical += 1,
                Severity::High => breakdown.high += 1,
                Severity::Medium => breakdown.medium += 1,
                Severity::Low => breakdown.low += 1,
            }
            breakdown
        })
}
