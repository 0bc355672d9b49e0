use std::sync::Arc;

use crate::assessment::questions::QuestionBank;
use crate::llm_client::CompletionProvider;
use crate::report::notifier::ReportMailer;
use crate::report::pdf::PdfRenderer;

/// Shared application state injected into all route handlers via Axum extractors.
/// Everything in here is read-only after startup.
#[derive(Clone)]
pub struct AppState {
    /// Chat-completion backend. Default: `LlmClient` (OpenAI).
    pub llm: Arc<dyn CompletionProvider>,
    pub questions: Arc<QuestionBank>,
    pub pdf: PdfRenderer,
    /// Email backend. Default: `SmtpMailer`.
    pub mailer: Arc<dyn ReportMailer>,
}
