//! Notifier: emails a rendered report as a PDF attachment over SMTP.
//!
//! `AppState` holds an `Arc<dyn ReportMailer>`; `SmtpMailer` is the production
//! backend. Delivery is a single attempt with no queue.

use async_trait::async_trait;
use lettre::message::{header::ContentType, Attachment, Mailbox, MultiPart, SinglePart};
use lettre::transport::smtp::authentication::Credentials;
use lettre::{AsyncSmtpTransport, AsyncTransport, Message, Tokio1Executor};
use thiserror::Error;
use tracing::{info, warn};

use crate::assessment::models::InstitutionInfo;
use crate::config::Config;
use crate::report::REPORT_FILENAME;

#[derive(Debug, Error)]
pub enum NotifyError {
    #[error("email transport is not configured")]
    NotConfigured,

    #[error("invalid email address '{address}': {reason}")]
    Address { address: String, reason: String },

    #[error("failed to build message: {0}")]
    Build(String),

    #[error("SMTP error: {0}")]
    Smtp(#[from] lettre::transport::smtp::Error),
}

/// Everything needed to send one report.
#[derive(Debug, Clone)]
pub struct ReportDelivery {
    pub recipient: String,
    pub pdf: Vec<u8>,
    pub institution_info: InstitutionInfo,
}

#[async_trait]
pub trait ReportMailer: Send + Sync {
    async fn send_report(&self, delivery: &ReportDelivery) -> Result<(), NotifyError>;
}

pub fn report_subject(info: &InstitutionInfo) -> String {
    format!("Program Assessment Report - {}", info.program_name())
}

pub fn parse_mailbox(address: &str) -> Result<Mailbox, NotifyError> {
    address
        .trim()
        .parse::<Mailbox>()
        .map_err(|e| NotifyError::Address {
            address: address.to_string(),
            reason: e.to_string(),
        })
}

/// Builds the MIME message: a short plain-text body plus the PDF attachment.
pub fn build_message(sender: &Mailbox, delivery: &ReportDelivery) -> Result<Message, NotifyError> {
    let recipient = parse_mailbox(&delivery.recipient)?;
    let info = &delivery.institution_info;

    let body = format!(
        "Please find attached the program assessment report for {} at {}.\n\nGenerated by AccreditAI.",
        info.program_name(),
        info.institution_name()
    );

    let content_type =
        ContentType::parse("application/pdf").map_err(|e| NotifyError::Build(e.to_string()))?;
    let attachment =
        Attachment::new(REPORT_FILENAME.to_string()).body(delivery.pdf.clone(), content_type);

    Message::builder()
        .from(sender.clone())
        .to(recipient)
        .subject(report_subject(info))
        .multipart(
            MultiPart::mixed()
                .singlepart(SinglePart::plain(body))
                .singlepart(attachment),
        )
        .map_err(|e| NotifyError::Build(e.to_string()))
}

/// STARTTLS SMTP relay mailer. Without a password the transport is absent and
/// every send fails with `NotConfigured`.
pub struct SmtpMailer {
    sender: Mailbox,
    transport: Option<AsyncSmtpTransport<Tokio1Executor>>,
}

impl SmtpMailer {
    pub fn from_config(config: &Config) -> Result<Self, NotifyError> {
        let sender = parse_mailbox(&config.email_sender)?;

        let transport = match &config.email_password {
            Some(password) => Some(
                AsyncSmtpTransport::<Tokio1Executor>::starttls_relay(&config.smtp_host)?
                    .port(config.smtp_port)
                    .credentials(Credentials::new(
                        config.email_sender.clone(),
                        password.clone(),
                    ))
                    .build(),
            ),
            None => {
                warn!("EMAIL_PASSWORD not set; report sharing by email is disabled");
                None
            }
        };

        Ok(Self { sender, transport })
    }
}

#[async_trait]
impl ReportMailer for SmtpMailer {
    async fn send_report(&self, delivery: &ReportDelivery) -> Result<(), NotifyError> {
        let transport = self.transport.as_ref().ok_or(NotifyError::NotConfigured)?;
        let message = build_message(&self.sender, delivery)?;

        transport.send(message).await?;
        info!("Report emailed to {}", delivery.recipient);
        Ok(())
    }
}
