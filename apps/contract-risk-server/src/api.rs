//! API handlers for the contract risk server
//!
//! Provides REST endpoints for:
//! - Contract analysis
//! - Listing the active violation patterns

use std::time::Instant;

use axum::{extract::State, Json};
use contract_risk_engine::defaults::CONTRACT_ACT_URL;
use contract_risk_engine::store::DEFAULT_SECTION_TITLE;
use contract_risk_engine::{explain_or_fallback, Explainer, ExplanationRequest, Language};
use serde::{Deserialize, Serialize};
use shared_types::{
    AnalysisResult, Deviation, RiskLevel, RuleSetOrigin, Severity, SeverityBreakdown, Violation,
};
use tracing::{debug, info};
use uuid::Uuid;

use crate::error::ServerError;
use crate::position::locate_clause;
use crate::AppState;

/// Attached to every analysis response
pub const DISCLAIMER: &str = "This analysis is for educational purposes only. It does not constitute legal advice. Consult a qualified lawyer before signing any contract.";

/// Used when the client does not name the document
pub const DEFAULT_FILE_NAME: &str = "contract.txt";

/// Health check response
#[derive(Serialize)]
pub struct HealthResponse {
    pub status: &'static str,
    pub service: &'static str,
    pub version: &'static str,
}

/// Handler: GET /health
pub async fn handle_health() -> Json<HealthResponse> {
    Json(HealthResponse {
        status: "healthy",
        service: "contract-risk-server",
        version: env!("CARGO_PKG_VERSION"),
    })
}

/// Analysis request body
#[derive(Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct AnalyzeRequest {
    /// Extracted contract text
    pub text: String,

    /// Explanation language code ("en" or "hi"), server default if absent
    pub language: Option<String>,

    /// Original file name, echoed back in the response
    pub file_name: Option<String>,
}

/// Analysis response
#[derive(Serialize)]
#[serde(rename_all = "camelCase")]
pub struct AnalyzeResponse {
    pub success: bool,
    pub analysis_id: Uuid,
    pub processing_time_ms: u64,
    /// Unix seconds
    pub analyzed_at: i64,
    pub document: DocumentInfo,
    pub analysis: AnalysisSummary,
    pub risky_clauses: Vec<RiskyClause>,
    pub deviations: Vec<Deviation>,
    pub disclaimer: &'static str,
}

#[derive(Serialize)]
#[serde(rename_all = "camelCase")]
pub struct DocumentInfo {
    pub file_name: String,
    pub extracted_characters: usize,
}

#[derive(Serialize)]
#[serde(rename_all = "camelCase")]
pub struct AnalysisSummary {
    pub overall_risk_score: u32,
    pub risk_level: RiskLevel,
    pub total_clauses: usize,
    pub risky_clauses_found: usize,
    pub deviations_from_fair_contract: usize,
    pub breakdown: SeverityBreakdown,
    pub rule_set: RuleSetOrigin,
}

/// A violation with its location, citation and explanation
#[derive(Serialize)]
#[serde(rename_all = "camelCase")]
pub struct RiskyClause {
    pub id: usize,
    pub clause_number: u32,
    pub original_text: String,
    pub violation_type: String,
    pub risk_level: Severity,
    pub risk_score: u32,
    pub start_index: usize,
    pub end_index: usize,
    pub law_reference: LawReference,
    pub explanation: ClauseExplanation,
    pub matched_keywords: Vec<String>,
}

#[derive(Serialize)]
#[serde(rename_all = "camelCase")]
pub struct LawReference {
    pub section: String,
    pub title: String,
    pub full_text: String,
    pub summary: String,
    pub url: String,
}

#[derive(Serialize)]
#[serde(rename_all = "camelCase")]
pub struct ClauseExplanation {
    pub simple: String,
    pub real_life_impact: String,
    pub generated_by: String,
}

/// Handler: POST /api/analyze
pub async fn handle_analyze(
    State(state): State<AppState>,
    Json(req): Json<AnalyzeRequest>,
) -> Result<Json<AnalyzeResponse>, ServerError> {
    let started = Instant::now();

    let limit = state.config.max_text_bytes;
    if req.text.len() > limit {
        return Err(ServerError::PayloadTooLarge {
            size: req.text.len(),
            limit,
        });
    }

    let language = match req.language.as_deref() {
        Some(code) => code.parse::<Language>()?,
        None => state.config.default_language,
    };
    let file_name = req
        .file_name
        .filter(|name| !name.trim().is_empty())
        .unwrap_or_else(|| DEFAULT_FILE_NAME.to_string());

    info!(
        "Analyze request: file={}, bytes={}, language={}",
        file_name,
        req.text.len(),
        language
    );

    let analyzer = state.analyzer.clone();
    let text = req.text;
    let (text, result) = tokio::task::spawn_blocking(move || {
        let result = analyzer.analyze_text(&text);
        (text, result)
    })
    .await?;

    let risky_clauses = explain_violations(&text, &result, language, state.explainer.as_ref());

    let analysis = AnalysisSummary {
        overall_risk_score: result.overall_score,
        risk_level: result.risk_level,
        total_clauses: result.clauses.len(),
        risky_clauses_found: result.violations.len(),
        deviations_from_fair_contract: result.deviations.len(),
        breakdown: contract_risk_engine::scoring::severity_breakdown(&result.violations),
        rule_set: result.rule_set.clone(),
    };

    let processing_time_ms = u64::try_from(started.elapsed().as_millis()).unwrap_or(u64::MAX);
    debug!("Analysis finished in {}ms", processing_time_ms);

    Ok(Json(AnalyzeResponse {
        success: true,
        analysis_id: Uuid::new_v4(),
        processing_time_ms,
        analyzed_at: chrono::Utc::now().timestamp(),
        document: DocumentInfo {
            file_name,
            extracted_characters: text.chars().count(),
        },
        analysis,
        risky_clauses,
        deviations: result.deviations,
        disclaimer: DISCLAIMER,
    }))
}

fn explain_violations(
    text: &str,
    result: &AnalysisResult,
    language: Language,
    explainer: &dyn Explainer,
) -> Vec<RiskyClause> {
    let total = result.violations.len();

    result
        .violations
        .iter()
        .enumerate()
        .map(|(index, violation)| {
            let request = ExplanationRequest::for_violation(result, violation, language);
            let explanation = explain_or_fallback(explainer, &request, violation);
            let span = locate_clause(text, &request.clause_text, index, total);

            RiskyClause {
                id: index + 1,
                clause_number: violation.clause_id,
                original_text: request.clause_text,
                violation_type: violation.violation_type.clone(),
                risk_level: violation.risk_level,
                risk_score: violation.risk_score,
                start_index: span.start,
                end_index: span.end,
                law_reference: law_reference(violation),
                explanation: ClauseExplanation {
                    simple: explanation.simple_explanation,
                    real_life_impact: explanation.real_life_impact,
                    generated_by: explanation.generated_by,
                },
                matched_keywords: violation.matched_keywords.clone(),
            }
        })
        .collect()
}

fn law_reference(violation: &Violation) -> LawReference {
    LawReference {
        section: violation.section_number.clone(),
        title: violation.section_title.clone(),
        full_text: violation.section_full_text.clone(),
        summary: violation.explanation.clone(),
        url: violation.source_url.clone(),
    }
}

/// Active pattern listing
#[derive(Serialize)]
#[serde(rename_all = "camelCase")]
pub struct PatternListResponse {
    pub success: bool,
    pub total_patterns: usize,
    pub rule_set: RuleSetOrigin,
    pub source: &'static str,
    pub source_url: &'static str,
    pub patterns: Vec<PatternInfo>,
}

#[derive(Serialize)]
#[serde(rename_all = "camelCase")]
pub struct PatternInfo {
    pub violation_type: String,
    pub section_number: String,
    pub section_title: String,
    pub risk_level: Severity,
    pub risk_score: u32,
    pub source_url: String,
}

/// Handler: GET /api/patterns
pub async fn handle_list_patterns(
    State(state): State<AppState>,
) -> Result<Json<PatternListResponse>, ServerError> {
    let analyzer = state.analyzer.clone();
    let snapshot = tokio::task::spawn_blocking(move || analyzer.snapshot()).await?;

    let patterns: Vec<PatternInfo> = snapshot
        .patterns()
        .iter()
        .map(|p| PatternInfo {
            violation_type: p.violation_type.clone(),
            section_number: p.section_number.clone(),
            section_title: p.section_title.clone(),
            risk_level: p.risk_level,
            risk_score: p.risk_score,
            source_url: p.source_url.clone(),
        })
        .collect();

    Ok(Json(PatternListResponse {
        success: true,
        total_patterns: patterns.len(),
        rule_set: snapshot.origin().clone(),
        source: DEFAULT_SECTION_TITLE,
        source_url: CONTRACT_ACT_URL,
        patterns,
    }))
}
