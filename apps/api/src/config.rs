use std::path::PathBuf;

use anyhow::{Context, Result};

/// Application configuration loaded from environment variables.
/// Startup fails if `OPENAI_API_KEY` is missing; everything else has a default.
#[derive(Debug, Clone)]
pub struct Config {
    pub openai_api_key: String,
    /// SMTP secret. Sharing reports by email is disabled when unset.
    pub email_password: Option<String>,
    pub email_sender: String,
    pub smtp_host: String,
    pub smtp_port: u16,
    pub wkhtmltopdf_path: PathBuf,
    pub questions_path: PathBuf,
    pub port: u16,
    pub rust_log: String,
}

impl Config {
    pub fn from_env() -> Result<Self> {
        dotenvy::dotenv().ok(); // load .env if present; ignore if missing

        Ok(Config {
            openai_api_key: require_env("OPENAI_API_KEY")?,
            email_password: optional_env("EMAIL_PASSWORD"),
            email_sender: env_or("EMAIL_SENDER", "noreply@accreditai.local"),
            smtp_host: env_or("SMTP_HOST", "smtp.gmail.com"),
            smtp_port: env_or("SMTP_PORT", "587")
                .parse::<u16>()
                .context("SMTP_PORT must be a valid port number")?,
            wkhtmltopdf_path: PathBuf::from(env_or(
                "WKHTMLTOPDF_PATH",
                "/usr/local/bin/wkhtmltopdf",
            )),
            questions_path: PathBuf::from(env_or("QUESTIONS_PATH", "backend/questions.json")),
            port: env_or("PORT", "8080")
                .parse::<u16>()
                .context("PORT must be a valid port number")?,
            rust_log: env_or("RUST_LOG", "info"),
        })
    }
}

fn require_env(key: &str) -> Result<String> {
    std::env::var(key).with_context(|| format!("Required environment variable '{key}' is not set"))
}

/// Returns the variable only when it is set to a non-blank value.
fn optional_env(key: &str) -> Option<String> {
    std::env::var(key).ok().filter(|v| !v.trim().is_empty())
}

fn env_or(key: &str, default: &str) -> String {
    optional_env(key).unwrap_or_else(|| default.to_string())
}

#[cfg(test)]
impl Config {
    /// Configuration for router tests; never touches the environment.
    pub fn for_tests() -> Self {
        Config {
            openai_api_key: "test-key".to_string(),
            email_password: None,
            email_sender: "noreply@accreditai.local".to_string(),
            smtp_host: "localhost".to_string(),
            smtp_port: 2525,
            wkhtmltopdf_path: PathBuf::from("/nonexistent/wkhtmltopdf"),
            questions_path: PathBuf::from("backend/questions.json"),
            port: 0,
            rust_log: "debug".to_string(),
        }
    }
}
