pub mod keywords;
pub mod types;

pub use keywords::KeywordSet;
pub use types::{
    AnalysisResult, Clause, Deviation, DeviationCategory, DeviationLevel, FairBaseline, Pattern,
    RiskLevel, RuleSetOrigin, Severity, SeverityBreakdown, Violation,
};
