//! Axum route handlers for the Assessment API.

use axum::{extract::State, Json};
use serde::{Deserialize, Serialize};

use crate::assessment::advisor::{answer_question, generate_recommendations, generate_report};
use crate::assessment::models::{AssessmentResult, InstitutionInfo, RecommendationSet};
use crate::assessment::questions::QuestionBank;
use crate::errors::AppError;
use crate::routes::ApiJson;
use crate::state::AppState;

// ────────────────────────────────────────────────────────────────────────────
// Request / Response types
// ────────────────────────────────────────────────────────────────────────────

#[derive(Debug, Deserialize)]
pub struct RecommendationsRequest {
    #[serde(default)]
    pub assessment_results: Vec<AssessmentResult>,
}

#[derive(Debug, Deserialize)]
pub struct ReportRequest {
    #[serde(default)]
    pub institution_info: InstitutionInfo,
    #[serde(default)]
    pub assessment_results: Vec<AssessmentResult>,
    #[serde(default)]
    pub recommendations: RecommendationSet,
}

#[derive(Debug, Serialize)]
pub struct ReportResponse {
    pub report: String,
}

#[derive(Debug, Deserialize)]
pub struct AskRequest {
    #[serde(default)]
    pub question: String,
}

#[derive(Debug, Serialize)]
pub struct AskResponse {
    pub response: String,
}

// ────────────────────────────────────────────────────────────────────────────
// Handlers
// ────────────────────────────────────────────────────────────────────────────

/// POST /api/generate-recommendations
///
/// Returns the validated RecommendationSet as the response body.
pub async fn handle_generate_recommendations(
    State(state): State<AppState>,
    ApiJson(request): ApiJson<RecommendationsRequest>,
) -> Result<Json<RecommendationSet>, AppError> {
    let set = generate_recommendations(state.llm.as_ref(), &request.assessment_results).await?;
    Ok(Json(set))
}

/// POST /api/generate-report
pub async fn handle_generate_report(
    State(state): State<AppState>,
    ApiJson(request): ApiJson<ReportRequest>,
) -> Result<Json<ReportResponse>, AppError> {
    let report = generate_report(
        state.llm.as_ref(),
        &request.institution_info,
        &request.assessment_results,
        &request.recommendations,
    )
    .await?;

    Ok(Json(ReportResponse { report }))
}

/// POST /api/ask
pub async fn handle_ask(
    State(state): State<AppState>,
    ApiJson(request): ApiJson<AskRequest>,
) -> Result<Json<AskResponse>, AppError> {
    let response = answer_question(state.llm.as_ref(), &request.question).await?;
    Ok(Json(AskResponse { response }))
}

/// GET /api/questions
///
/// Serves the question bank loaded at startup.
pub async fn handle_questions(State(state): State<AppState>) -> Json<QuestionBank> {
    Json(state.questions.as_ref().clone())
}
