//! Plain-language explanations for violations
//!
//! The engine never depends on an explainer succeeding. [`explain_or_fallback`]
//! is the only way callers should obtain text: on failure it substitutes the
//! violation's own explanation and [`FALLBACK_IMPACT`].

use std::fmt;
use std::str::FromStr;

use serde::{Deserialize, Serialize};
use shared_types::{AnalysisResult, Violation};
use tracing::warn;

use crate::error::{ConfigError, ExplainError};

/// Impact text used whenever an explainer fails
pub const FALLBACK_IMPACT: &str =
    "This clause may put you at a significant disadvantage. Consider negotiating better terms.";

/// `generated_by` value for fallback explanations
pub const FALLBACK_SOURCE: &str = "fallback";

#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum Language {
    #[default]
    En,
    Hi,
}

impl Language {
    pub fn code(&self) -> &'static str {
        match self {
            Language::En => "en",
            Language::Hi => "hi",
        }
    }
}

impl fmt::Display for Language {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.code())
    }
}

impl FromStr for Language {
    type Err = ConfigError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.trim().to_lowercase().as_str() {
            "en" | "english" => Ok(Language::En),
            "hi" | "hindi" => Ok(Language::Hi),
            other => Err(ConfigError::UnknownLanguage(other.to_string())),
        }
    }
}

/// What the engine hands to an explanation collaborator
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct ExplanationRequest {
    pub clause_text: String,
    pub violation_type: String,
    pub section_full_text: String,
    pub language: Language,
}

impl ExplanationRequest {
    /// Build the request for a violation of `result`
    pub fn for_violation(result: &AnalysisResult, violation: &Violation, language: Language) -> Self {
        let clause_text = result
            .clause(violation.clause_id)
            .map(|c| c.text.clone())
            .unwrap_or_default();

        Self {
            clause_text,
            violation_type: violation.violation_type.clone(),
            section_full_text: violation.section_full_text.clone(),
            language,
        }
    }
}

/// What an explanation collaborator returns
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Explanation {
    pub simple_explanation: String,
    pub real_life_impact: String,
    pub generated_by: String,
}

/// An explanation collaborator (template engine, LLM client, ...)
pub trait Explainer: Send + Sync {
    fn explain(&self, request: &ExplanationRequest) -> Result<Explanation, ExplainError>;

    /// Get the name of this explainer
    fn name(&self) -> &str;
}

/// Ask the explainer, substituting the violation's own text on failure
pub fn explain_or_fallback(
    explainer: &dyn Explainer,
    request: &ExplanationRequest,
    violation: &Violation,
) -> Explanation {
    explainer.explain(request).unwrap_or_else(|err| {
        warn!(
            "Explainer {} failed for {}: {}; using fallback text",
            explainer.name(),
            violation.violation_type,
            err
        );
        fallback_explanation(violation)
    })
}

pub fn fallback_explanation(violation: &Violation) -> Explanation {
    Explanation {
        simple_explanation: violation.explanation.clone(),
        real_life_impact: FALLBACK_IMPACT.to_string(),
        generated_by: FALLBACK_SOURCE.to_string(),
    }
}

/// Deterministic English explanations keyed on the clause wording
#[derive(Debug, Clone, Copy, Default)]
pub struct TemplateExplainer;

impl TemplateExplainer {
    pub fn new() -> Self {
        Self
    }
}

impl Explainer for TemplateExplainer {
    fn explain(&self, request: &ExplanationRequest) -> Result<Explanation, ExplainError> {
        if request.language != Language::En {
            return Err(ExplainError::UnsupportedLanguage(request.language));
        }

        let clause_lower = request.clause_text.to_lowercase();
        let (simple, impact) = if clause_lower.contains("compete")
            || clause_lower.contains("competitor")
        {
            (
                "This non-compete clause tries to stop you from working with competitors. \
                 Agreements in restraint of a lawful trade or profession are generally void.",
                "You can likely keep working wherever you want after this contract ends; \
                 this restriction is unlikely to be enforceable.",
            )
        } else if clause_lower.contains("intellectual property")
            || clause_lower.contains("invention")
            || clause_lower.contains(" ip ")
        {
            (
                "This clause affects ownership of work you create. It may claim rights over your personal projects too.",
                "Your side projects might belong to the client if this clause is too broad.",
            )
        } else if clause_lower.contains("termination") || clause_lower.contains("notice period") {
            (
                "This termination clause may allow the client to end your contract with limited notice.",
                "You may have less income security than expected. Check for mutual termination rights.",
            )
        } else {
            (
                "This clause may affect your rights. Review it carefully before signing.",
                "Consider negotiating or seeking legal advice on unfavorable terms.",
            )
        };

        Ok(Explanation {
            simple_explanation: simple.to_string(),
            real_life_impact: impact.to_string(),
            generated_by: self.name().to_string(),
        })
    }

    fn name(&self) -> &str {
        "template"
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use pretty_assertions::assert_eq;
    use shared_types::{Clause, RiskLevel, RuleSetOrigin, Severity};

    struct BrokenExplainer;

    impl Explainer for BrokenExplainer {
        fn explain(&self, _request: &ExplanationRequest) -> Result<Explanation, ExplainError> {
            Err(ExplainError::Failed("upstream timed out".to_string()))
        }

        fn name(&self) -> &str {
            "broken"
        }
    }

    fn violation() -> Violation {
        Violation {
            clause_id: 2,
            violation_type: "non_compete".to_string(),
            section_number: "Section 27".to_string(),
            section_title: "Agreement in restraint of trade void".to_string(),
            section_full_text: "Every agreement ... is to that extent void.".to_string(),
            risk_level: Severity::Critical,
            risk_score: 40,
            matched_keywords: vec!["non-compete".to_string(), "restraint of trade".to_string()],
            explanation: "Non-compete clause restricting freelancer from taking other work".to_string(),
            source_url: String::new(),
        }
    }

    fn request(clause_text: &str, language: Language) -> ExplanationRequest {
        ExplanationRequest {
            clause_text: clause_text.to_string(),
            violation_type: "non_compete".to_string(),
            section_full_text: String::new(),
            language,
        }
    }

    #[test]
    fn test_language_parsing() {
        assert_eq!("EN".parse::<Language>().unwrap(), Language::En);
        assert_eq!("hindi".parse::<Language>().unwrap(), Language::Hi);
        assert_eq!(
            "fr".parse::<Language>(),
            Err(ConfigError::UnknownLanguage("fr".to_string()))
        );
    }

    #[test]
    fn test_request_resolves_clause_text() {
        let result = AnalysisResult {
            overall_score: 40,
            risk_level: RiskLevel::ModerateRisk,
            violations: vec![violation()],
            deviations: vec![],
            clauses: vec![
                Clause {
                    id: 1,
                    text: "1. Scope".to_string(),
                    position: 0,
                },
                Clause {
                    id: 2,
                    text: "2. Non-compete and restraint of trade".to_string(),
                    position: 1,
                },
            ],
            rule_set: RuleSetOrigin::External,
        };

        let request = ExplanationRequest::for_violation(&result, &result.violations[0], Language::Hi);

        assert_eq!(request.clause_text, "2. Non-compete and restraint of trade");
        assert_eq!(request.violation_type, "non_compete");
        assert_eq!(request.language, Language::Hi);
    }

    #[test]
    fn test_template_explainer_non_compete() {
        let explanation = TemplateExplainer
            .explain(&request("You shall not compete with the Client", Language::En))
            .unwrap();
        assert!(explanation.simple_explanation.contains("non-compete"));
        assert_eq!(explanation.generated_by, "template");
    }

    #[test]
    fn test_template_explainer_generic() {
        let explanation = TemplateExplainer
            .explain(&request("Fees are due monthly", Language::En))
            .unwrap();
        assert!(explanation.simple_explanation.contains("Review it carefully"));
    }

    #[test]
    fn test_template_explainer_rejects_other_languages() {
        let err = TemplateExplainer
            .explain(&request("non-compete", Language::Hi))
            .unwrap_err();
        assert_eq!(err, ExplainError::UnsupportedLanguage(Language::Hi));
    }

    #[test]
    fn test_fallback_on_failure() {
        let v = violation();
        let explanation = explain_or_fallback(&BrokenExplainer, &request("x", Language::En), &v);
        assert_eq!(explanation.simple_explanation, v.explanation);
        assert_eq!(explanation.real_life_impact, FALLBACK_IMPACT);
        assert_eq!(explanation.generated_by, FALLBACK_SOURCE);
    }

    #[test]
    fn test_fallback_on_unsupported_language() {
        let v = violation();
        let explanation =
            explain_or_fallback(&TemplateExplainer, &request("non-compete", Language::Hi), &v);
        assert_eq!(explanation, fallback_explanation(&v));
    }

    #[test]
    fn test_no_fallback_on_success() {
        let v = violation();
        let explanation =
            explain_or_fallback(&TemplateExplainer, &request("non-compete", Language::En), &v);
        assert_eq!(explanation.generated_by, "template");
    }
}
