mod assessment;
mod config;
mod errors;
mod llm_client;
mod report;
mod routes;
mod state;

use anyhow::{Context, Result};
use std::net::SocketAddr;
use std::sync::Arc;
use tower_http::{cors::CorsLayer, trace::TraceLayer};
use tracing::{info, warn};
use tracing_subscriber::{layer::SubscriberExt, util::SubscriberInitExt, EnvFilter};

use crate::assessment::questions::QuestionBank;
use crate::config::Config;
use crate::llm_client::LlmClient;
use crate::report::notifier::SmtpMailer;
use crate::report::pdf::PdfRenderer;
use crate::routes::build_router;
use crate::state::AppState;

#[tokio::main]
async fn main() -> Result<()> {
    // Load configuration first (fails on missing required env vars)
    let config = Config::from_env()?;

    // Initialize structured logging
    tracing_subscriber::registry()
        .with(EnvFilter::try_from_default_env().unwrap_or_else(|_| {
            EnvFilter::new(format!("{}={}", env!("CARGO_CRATE_NAME"), &config.rust_log))
        }))
        .with(tracing_subscriber::fmt::layer())
        .init();

    info!("Starting AccreditAI API v{}", env!("CARGO_PKG_VERSION"));

    // Question bank is read once and shared read-only
    let questions = QuestionBank::load(&config.questions_path)?;
    info!(
        "Question bank loaded from {} ({} entries)",
        config.questions_path.display(),
        questions.entry_count()
    );

    let llm = LlmClient::new(config.openai_api_key.clone())
        .context("Failed to build LLM HTTP client")?;
    info!("LLM client initialized (model: {})", llm_client::MODEL);

    let pdf = PdfRenderer::new(config.wkhtmltopdf_path.clone());
    if pdf.is_available() {
        info!("PDF renderer: {}", pdf.binary().display());
    } else {
        warn!(
            "PDF renderer not found at {}; PDF endpoints will fail",
            pdf.binary().display()
        );
    }

    let mailer = SmtpMailer::from_config(&config).context("Invalid email configuration")?;
    info!("SMTP relay: {}:{}", config.smtp_host, config.smtp_port);

    let state = AppState {
        llm: Arc::new(llm),
        questions: Arc::new(questions),
        pdf,
        mailer: Arc::new(mailer),
    };

    let app = build_router(state)
        .layer(TraceLayer::new_for_http())
        .layer(CorsLayer::permissive());

    let addr: SocketAddr = format!("0.0.0.0:{}", config.port).parse()?;
    info!("Listening on {addr}");

    let listener = tokio::net::TcpListener::bind(addr).await?;
    axum::serve(listener, app).await?;

    Ok(())
}
