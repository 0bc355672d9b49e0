//! Axum route handlers for the Report API.

use axum::{
    extract::State,
    http::header,
    response::{IntoResponse, Response},
    Json,
};
use bytes::Bytes;
use chrono::Local;
use serde::{Deserialize, Serialize};
use tracing::info;
use uuid::Uuid;

use crate::assessment::models::{AssessmentResult, InstitutionInfo, RecommendationSet};
use crate::errors::AppError;
use crate::report::markdown::render_markdown;
use crate::report::notifier::{parse_mailbox, ReportDelivery};
use crate::report::template::{assemble_report, ReportVariant};
use crate::report::REPORT_FILENAME;
use crate::routes::ApiJson;
use crate::state::AppState;

// ────────────────────────────────────────────────────────────────────────────
// Request / Response types
// ────────────────────────────────────────────────────────────────────────────

#[derive(Debug, Deserialize)]
pub struct PdfRequest {
    #[serde(default)]
    pub html_content: Option<String>,
    #[serde(default)]
    pub institution_info: InstitutionInfo,
}

#[derive(Debug, Deserialize)]
pub struct PreviewRequest {
    /// Ready HTML fragment. Takes precedence over `report`.
    #[serde(default)]
    pub html_content: Option<String>,
    /// Markdown report as returned by /api/generate-report.
    #[serde(default)]
    pub report: Option<String>,
    #[serde(default)]
    pub institution_info: InstitutionInfo,
}

#[derive(Debug, Serialize)]
pub struct PreviewResponse {
    pub html_report: String,
}

#[derive(Debug, Deserialize)]
pub struct ShareRequest {
    #[serde(default)]
    pub institution_info: InstitutionInfo,
    #[serde(default)]
    pub assessment_results: Vec<AssessmentResult>,
    #[serde(default)]
    pub recommendations: RecommendationSet,
    #[serde(default)]
    pub report: String,
    #[serde(default)]
    pub email: String,
}

#[derive(Debug, Serialize)]
pub struct ShareResponse {
    pub message: String,
}

// ────────────────────────────────────────────────────────────────────────────
// Handlers
// ────────────────────────────────────────────────────────────────────────────

/// POST /api/generate-pdf
///
/// Wraps client HTML in the report template and returns it as a PDF download.
pub async fn handle_generate_pdf(
    State(state): State<AppState>,
    ApiJson(request): ApiJson<PdfRequest>,
) -> Result<Response, AppError> {
    let report_id = Uuid::new_v4();
    info!(%report_id, "Rendering PDF for program '{}'", request.institution_info.program_name());

    let html = assemble_report(
        request.html_content.as_deref().unwrap_or_default(),
        &request.institution_info,
        Local::now().date_naive(),
        ReportVariant::Print,
    );
    let pdf = state.pdf.render(&html).await?;

    info!(%report_id, "PDF ready: {} bytes", pdf.len());
    Ok(pdf_response(pdf))
}

/// POST /api/preview-report
///
/// Returns the browser variant of the report as an HTML string.
pub async fn handle_preview_report(
    ApiJson(request): ApiJson<PreviewRequest>,
) -> Result<Json<PreviewResponse>, AppError> {
    let content = match (&request.html_content, &request.report) {
        (Some(html), _) => html.clone(),
        (None, Some(markdown)) => render_markdown(markdown),
        (None, None) => String::new(),
    };

    let html_report = assemble_report(
        &content,
        &request.institution_info,
        Local::now().date_naive(),
        ReportVariant::Browser,
    );
    Ok(Json(PreviewResponse { html_report }))
}

/// POST /api/share-report
///
/// Markdown report → HTML → PDF → email to `email`.
pub async fn handle_share_report(
    State(state): State<AppState>,
    ApiJson(request): ApiJson<ShareRequest>,
) -> Result<Json<ShareResponse>, AppError> {
    let recipient = request.email.trim().to_string();
    if recipient.is_empty() {
        return Err(AppError::Validation("email cannot be empty".to_string()));
    }
    parse_mailbox(&recipient)?;

    let report_id = Uuid::new_v4();
    info!(
        %report_id,
        results = request.assessment_results.len(),
        recommendation_categories = request.recommendations.recommendations.len(),
        "Sharing report for program '{}'",
        request.institution_info.program_name()
    );

    let html = assemble_report(
        &render_markdown(&request.report),
        &request.institution_info,
        Local::now().date_naive(),
        ReportVariant::Print,
    );
    let pdf = state.pdf.render(&html).await?;

    let delivery = ReportDelivery {
        recipient,
        pdf,
        institution_info: request.institution_info,
    };
    state.mailer.send_report(&delivery).await?;

    info!(%report_id, "Report delivered");
    Ok(Json(ShareResponse {
        message: format!("Report sent to {}", delivery.recipient),
    }))
}

fn pdf_response(pdf: Vec<u8>) -> Response {
    (
        [
            (header::CONTENT_TYPE, "application/pdf".to_string()),
            (
                header::CONTENT_DISPOSITION,
                format!("attachment; filename=\"{REPORT_FILENAME}\""),
            ),
        ],
        Bytes::from(pdf),
    )
        .into_response()
}
