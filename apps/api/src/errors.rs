use axum::{
    extract::rejection::JsonRejection,
    http::StatusCode,
    response::{IntoResponse, Response},
    Json,
};
use serde_json::json;
use thiserror::Error;

use crate::assessment::validator::RecommendationError;
use crate::llm_client::LlmError;
use crate::report::notifier::NotifyError;
use crate::report::pdf::PdfError;

/// Application-level error type.
/// Implements `IntoResponse` so Axum handlers can return `Result<T, AppError>`.
/// Every variant renders as `{"error": "<message>"}`.
#[derive(Debug, Error)]
pub enum AppError {
    #[error("Validation error: {0}")]
    Validation(String),

    #[error("LLM provider error: {0}")]
    Provider(String),

    #[error("Malformed LLM response: {0}")]
    MalformedResponse(String),

    #[error("Invalid recommendations format: {0}")]
    SchemaViolation(String),

    #[error("PDF renderer unavailable: {0}")]
    RendererUnavailable(String),

    #[error("PDF rendering failed: {0}")]
    RenderFailed(String),

    #[error("Email delivery failed: {0}")]
    DeliveryFailed(String),

    #[error("Internal server error: {0}")]
    Internal(#[from] anyhow::Error),
}

impl IntoResponse for AppError {
    fn into_response(self) -> Response {
        let (status, message) = match &self {
            AppError::Validation(msg) => (StatusCode::BAD_REQUEST, msg.clone()),
            AppError::Provider(msg) => {
                tracing::error!("LLM provider error: {msg}");
                (StatusCode::INTERNAL_SERVER_ERROR, msg.clone())
            }
            AppError::MalformedResponse(msg) => {
                tracing::error!("Failed to parse LLM response as JSON: {msg}");
                (
                    StatusCode::INTERNAL_SERVER_ERROR,
                    "Failed to generate valid recommendations".to_string(),
                )
            }
            AppError::SchemaViolation(msg) => {
                tracing::error!("Invalid recommendations format: {msg}");
                (StatusCode::INTERNAL_SERVER_ERROR, self.to_string())
            }
            AppError::RendererUnavailable(msg) | AppError::RenderFailed(msg) => {
                tracing::error!("PDF error: {msg}");
                (StatusCode::INTERNAL_SERVER_ERROR, self.to_string())
            }
            AppError::DeliveryFailed(msg) => {
                tracing::error!("Email delivery error: {msg}");
                (StatusCode::INTERNAL_SERVER_ERROR, self.to_string())
            }
            AppError::Internal(e) => {
                tracing::error!("Internal error: {e:?}");
                (
                    StatusCode::INTERNAL_SERVER_ERROR,
                    "An internal server error occurred".to_string(),
                )
            }
        };

        (status, Json(json!({ "error": message }))).into_response()
    }
}

impl From<JsonRejection> for AppError {
    fn from(rejection: JsonRejection) -> Self {
        AppError::Validation(rejection.body_text())
    }
}

impl From<LlmError> for AppError {
    fn from(err: LlmError) -> Self {
        if let LlmError::Api { status, .. } = &err {
            tracing::warn!("LLM API returned status {status}");
        }
        AppError::Provider(err.to_string())
    }
}

impl From<RecommendationError> for AppError {
    fn from(err: RecommendationError) -> Self {
        match err {
            RecommendationError::Malformed { source, raw } => {
                tracing::error!("Response content: {raw}");
                AppError::MalformedResponse(source.to_string())
            }
            RecommendationError::Schema(detail) => AppError::SchemaViolation(detail),
        }
    }
}

impl From<PdfError> for AppError {
    fn from(err: PdfError) -> Self {
        match err {
            PdfError::Unavailable(_) => AppError::RendererUnavailable(err.to_string()),
            PdfError::Failed(_) | PdfError::Io(_) => AppError::RenderFailed(err.to_string()),
        }
    }
}

impl From<NotifyError> for AppError {
    fn from(err: NotifyError) -> Self {
        AppError::DeliveryFailed(err.to_string())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    async fn body_of(err: AppError) -> (StatusCode, serde_json::Value) {
        let response = err.into_response();
        let status = response.status();
        let bytes = axum::body::to_bytes(response.into_body(), usize::MAX)
            .await
            .unwrap();
        (status, serde_json::from_slice(&bytes).unwrap())
    }

    #[tokio::test]
    async fn test_validation_is_bad_request() {
        let (status, body) = body_of(AppError::Validation("question cannot be empty".into())).await;
        assert_eq!(status, StatusCode::BAD_REQUEST);
        assert_eq!(body["error"], "question cannot be empty");
    }

    #[tokio::test]
    async fn test_provider_error_carries_provider_message() {
        let (status, body) = body_of(AppError::Provider("Incorrect API key provided".into())).await;
        assert_eq!(status, StatusCode::INTERNAL_SERVER_ERROR);
        assert_eq!(body["error"], "Incorrect API key provided");
    }

    #[tokio::test]
    async fn test_malformed_response_hides_parser_detail() {
        let (status, body) =
            body_of(AppError::MalformedResponse("expected value at line 1".into())).await;
        assert_eq!(status, StatusCode::INTERNAL_SERVER_ERROR);
        assert_eq!(body["error"], "Failed to generate valid recommendations");
    }

    #[tokio::test]
    async fn test_schema_violation_is_descriptive() {
        let (status, body) =
            body_of(AppError::SchemaViolation("missing required key 'evidence'".into())).await;
        assert_eq!(status, StatusCode::INTERNAL_SERVER_ERROR);
        assert_eq!(
            body["error"],
            "Invalid recommendations format: missing required key 'evidence'"
        );
    }

    #[tokio::test]
    async fn test_body_has_single_error_field() {
        let (_, body) = body_of(AppError::DeliveryFailed("connection refused".into())).await;
        let object = body.as_object().unwrap();
        assert_eq!(object.len(), 1);
        assert!(object["error"].as_str().unwrap().contains("connection refused"));
    }
}
