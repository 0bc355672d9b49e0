pub mod health;

use axum::{
    extract::FromRequest,
    routing::{get, post},
    Router,
};

use crate::assessment::handlers as assessment;
use crate::errors::AppError;
use crate::report::handlers as report;
use crate::state::AppState;

/// `Json` extractor whose rejections render as `{"error": ...}` like every other failure.
#[derive(FromRequest)]
#[from_request(via(axum::Json), rejection(AppError))]
pub struct ApiJson<T>(pub T);

pub fn build_router(state: AppState) -> Router {
    Router::new()
        .route("/health", get(health::health_handler))
        // Assessment API
        .route("/api/questions", get(assessment::handle_questions))
        .route(
            "/api/generate-recommendations",
            post(assessment::handle_generate_recommendations),
        )
        .route("/api/generate-report", post(assessment::handle_generate_report))
        .route("/api/ask", post(assessment::handle_ask))
        // Report API
        .route("/api/generate-pdf", post(report::handle_generate_pdf))
        .route("/api/preview-report", post(report::handle_preview_report))
        .route("/api/share-report", post(report::handle_share_report))
        .with_state(state)
}
