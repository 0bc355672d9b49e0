//! Advisor: the three LLM-backed operations of the assessment API.
//!
//! Flow per operation: build prompt → one completion call → (validate) → return.
//! Nothing is retried; a provider failure fails the request.

use tracing::info;

use crate::assessment::models::{AssessmentResult, InstitutionInfo, RecommendationSet};
use crate::assessment::prompt_builder::{
    build_question_prompt, build_recommendations_prompt, build_report_prompt,
};
use crate::assessment::prompts::{ASK_SYSTEM, RECOMMENDATIONS_SYSTEM, REPORT_SYSTEM};
use crate::assessment::validator::validate_recommendations;
use crate::errors::AppError;
use crate::llm_client::{CompletionProvider, CompletionRequest};

const TEMPERATURE: f32 = 0.7;
const RECOMMENDATIONS_MAX_TOKENS: u32 = 1500;
const REPORT_MAX_TOKENS: u32 = 2000;
const ASK_MAX_TOKENS: u32 = 1000;

pub fn recommendations_request(results: &[AssessmentResult]) -> CompletionRequest {
    CompletionRequest {
        system: RECOMMENDATIONS_SYSTEM.to_string(),
        prompt: build_recommendations_prompt(results),
        temperature: TEMPERATURE,
        max_tokens: RECOMMENDATIONS_MAX_TOKENS,
        json_mode: true,
    }
}

pub fn report_request(
    info: &InstitutionInfo,
    results: &[AssessmentResult],
    recommendations: &RecommendationSet,
) -> CompletionRequest {
    CompletionRequest {
        system: REPORT_SYSTEM.to_string(),
        prompt: build_report_prompt(info, results, recommendations),
        temperature: TEMPERATURE,
        max_tokens: REPORT_MAX_TOKENS,
        json_mode: false,
    }
}

pub fn question_request(question: &str) -> CompletionRequest {
    CompletionRequest {
        system: ASK_SYSTEM.to_string(),
        prompt: build_question_prompt(question),
        temperature: TEMPERATURE,
        max_tokens: ASK_MAX_TOKENS,
        json_mode: false,
    }
}

/// Asks the provider for recommendations and validates the returned shape.
pub async fn generate_recommendations(
    llm: &dyn CompletionProvider,
    results: &[AssessmentResult],
) -> Result<RecommendationSet, AppError> {
    check_scores(results)?;

    info!("Generating recommendations for {} results", results.len());
    let text = llm.complete(&recommendations_request(results)).await?;
    let set = validate_recommendations(&text)?;

    info!(
        "Recommendations validated: {} categories, {} evidence, {} kpis",
        set.recommendations.len(),
        set.evidence.len(),
        set.kpis.len()
    );
    Ok(set)
}

/// Generates the Markdown compliance report.
pub async fn generate_report(
    llm: &dyn CompletionProvider,
    info: &InstitutionInfo,
    results: &[AssessmentResult],
    recommendations: &RecommendationSet,
) -> Result<String, AppError> {
    check_scores(results)?;

    info!(
        "Generating report for program '{}' ({} results)",
        info.program_name(),
        results.len()
    );
    let report = llm
        .complete(&report_request(info, results, recommendations))
        .await?;
    Ok(report)
}

/// Answers a free-form accreditation question.
pub async fn answer_question(
    llm: &dyn CompletionProvider,
    question: &str,
) -> Result<String, AppError> {
    if question.trim().is_empty() {
        return Err(AppError::Validation("question cannot be empty".to_string()));
    }

    let answer = llm.complete(&question_request(question)).await?;
    Ok(answer)
}

fn check_scores(results: &[AssessmentResult]) -> Result<(), AppError> {
    results
        .iter()
        .try_for_each(AssessmentResult::check_score)
        .map_err(AppError::Validation)
}
