//! PDF Renderer: drives an external wkhtmltopdf-compatible engine.
//!
//! Each call gets its own temporary directory holding the HTML input and the
//! PDF output. The child is killed if the request future is dropped.

use std::ffi::OsString;
use std::io::ErrorKind;
use std::path::{Path, PathBuf};

use thiserror::Error;
use tokio::process::Command;
use tracing::{debug, warn};

#[derive(Debug, Error)]
pub enum PdfError {
    #[error("rendering engine not available: {0}")]
    Unavailable(String),

    #[error("rendering engine failed: {0}")]
    Failed(String),

    #[error("I/O error while rendering: {0}")]
    Io(#[from] std::io::Error),
}

/// Page layout handed to the engine.
#[derive(Debug, Clone)]
pub struct PdfOptions {
    pub page_size: String,
    pub margin_top_mm: u32,
    pub margin_right_mm: u32,
    pub margin_bottom_mm: u32,
    pub margin_left_mm: u32,
    /// `[page]` and `[topage]` are expanded by the engine.
    pub footer_center: String,
    pub footer_font_size: u32,
}

impl Default for PdfOptions {
    fn default() -> Self {
        Self {
            page_size: "A4".to_string(),
            margin_top_mm: 20,
            margin_right_mm: 15,
            margin_bottom_mm: 20,
            margin_left_mm: 15,
            footer_center: "Page [page] of [topage]".to_string(),
            footer_font_size: 8,
        }
    }
}

#[derive(Debug, Clone)]
pub struct PdfRenderer {
    binary: PathBuf,
    options: PdfOptions,
}

impl PdfRenderer {
    pub fn new(binary: PathBuf) -> Self {
        Self {
            binary,
            options: PdfOptions::default(),
        }
    }

    pub fn binary(&self) -> &Path {
        &self.binary
    }

    /// A bare command name is looked up on `PATH`; anything else must point at a file.
    pub fn is_available(&self) -> bool {
        if self.binary.components().count() > 1 {
            return self.binary.is_file();
        }
        std::env::var_os("PATH").is_some_and(|path| {
            std::env::split_paths(&path).any(|dir| dir.join(&self.binary).is_file())
        })
    }

    fn args(&self, input: &Path, output: &Path) -> Vec<OsString> {
        let o = &self.options;
        let mut args: Vec<OsString> = [
            "--quiet".to_string(),
            "--encoding".to_string(),
            "UTF-8".to_string(),
            "--page-size".to_string(),
            o.page_size.clone(),
            "--margin-top".to_string(),
            format!("{}mm", o.margin_top_mm),
            "--margin-right".to_string(),
            format!("{}mm", o.margin_right_mm),
            "--margin-bottom".to_string(),
            format!("{}mm", o.margin_bottom_mm),
            "--margin-left".to_string(),
            format!("{}mm", o.margin_left_mm),
            "--footer-center".to_string(),
            o.footer_center.clone(),
            "--footer-font-size".to_string(),
            o.footer_font_size.to_string(),
        ]
        .into_iter()
        .map(OsString::from)
        .collect();

        args.push(input.as_os_str().to_owned());
        args.push(output.as_os_str().to_owned());
        args
    }

    /// Renders a complete HTML document to PDF bytes.
    pub async fn render(&self, html: &str) -> Result<Vec<u8>, PdfError> {
        if !self.is_available() {
            return Err(PdfError::Unavailable(format!(
                "no executable at {}",
                self.binary.display()
            )));
        }

        let workdir = tempfile::tempdir()?;
        let input = workdir.path().join("report.html");
        let output = workdir.path().join("report.pdf");
        tokio::fs::write(&input, html).await?;

        let result = Command::new(&self.binary)
            .args(self.args(&input, &output))
            .kill_on_drop(true)
            .output()
            .await;

        let result = match result {
            Ok(result) => result,
            Err(e) if matches!(e.kind(), ErrorKind::NotFound | ErrorKind::PermissionDenied) => {
                return Err(PdfError::Unavailable(format!(
                    "cannot execute {}: {e}",
                    self.binary.display()
                )));
            }
            Err(e) => return Err(PdfError::Io(e)),
        };

        let stderr = String::from_utf8_lossy(&result.stderr);
        let pdf = tokio::fs::read(&output).await.unwrap_or_default();

        if !looks_like_pdf(&pdf) {
            return Err(PdfError::Failed(format!(
                "{} produced no PDF: {}",
                result.status,
                stderr.trim()
            )));
        }

        // wkhtmltopdf exits 1 on recoverable resource warnings but still writes the file.
        if !result.status.success() {
            warn!("PDF engine exited with {}: {}", result.status, stderr.trim());
        }

        debug!("Rendered PDF: {} bytes", pdf.len());
        Ok(pdf)
    }
}

fn looks_like_pdf(bytes: &[u8]) -> bool {
    bytes.starts_with(b"%PDF")
}


#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_args_carry_layout_and_paths() {
        let renderer = PdfRenderer::new(PathBuf::from("/usr/local/bin/wkhtmltopdf"));
        let args = renderer.args(Path::new("/tmp/in.html"), Path::new("/tmp/out.pdf"));
        let args: Vec<String> = args
            .into_iter()
            .map(|a| a.to_string_lossy().into_owned())
            .collect();

        let page_size = args.iter().position(|a| a == "--page-size").unwrap();
        assert_eq!(args[page_size + 1], "A4");
        let margin = args.iter().position(|a| a == "--margin-top").unwrap();
        assert_eq!(args[margin + 1], "20mm");
        assert!(args.contains(&"Page [page] of [topage]".to_string()));
        assert_eq!(args[args.len() - 2], "/tmp/in.html");
        assert_eq!(args[args.len() - 1], "/tmp/out.pdf");
    }

    #[tokio::test]
    async fn test_missing_engine_is_unavailable() {
        let renderer = PdfRenderer::new(PathBuf::from("/nonexistent/wkhtmltopdf"));
        assert!(!renderer.is_available());
        let err = renderer.render("<html></html>").await.unwrap_err();
        assert!(matches!(err, PdfError::Unavailable(ref m) if m.contains("/nonexistent/wkhtmltopdf")));
    }

    #[tokio::test]
    async fn test_engine_without_output_is_render_failure() {
        let engine = Path::new("/bin/true");
        if !engine.is_file() {
            return;
        }
        let renderer = PdfRenderer::new(engine.to_path_buf());
        let err = renderer.render("<html></html>").await.unwrap_err();
        assert!(matches!(err, PdfError::Failed(ref m) if m.contains("produced no PDF")));
    }

    #[tokio::test]
    async fn test_failing_engine_is_render_failure() {
        let engine = Path::new("/bin/false");
        if !engine.is_file() {
            return;
        }
        let renderer = PdfRenderer::new(engine.to_path_buf());
        assert!(matches!(
            renderer.render("<html></html>").await,
            Err(PdfError::Failed(_))
        ));
    }

    #[tokio::test]
    async fn test_engine_output_is_returned() {
        let renderer = PdfRenderer::new(testing::fake_engine());
        assert!(renderer.is_available());
        let pdf = renderer.render("<html><body>Report</body></html>").await.unwrap();
        assert_eq!(pdf, testing::FAKE_PDF);
    }

    #[test]
    fn test_bare_command_name_is_looked_up_on_path() {
        if !Path::new("/bin/sh").is_file() {
            return;
        }
        let on_path = std::env::var_os("PATH")
            .is_some_and(|path| std::env::split_paths(&path).any(|dir| dir.join("sh").is_file()));
        assert_eq!(PdfRenderer::new(PathBuf::from("sh")).is_available(), on_path);
        assert!(!PdfRenderer::new(PathBuf::from("accredit-no-such-engine")).is_available());
    }

    #[tokio::test]
    async fn test_unknown_bare_command_is_unavailable() {
        let renderer = PdfRenderer::new(PathBuf::from("accredit-no-such-engine"));
        assert!(matches!(
            renderer.render("<html></html>").await,
            Err(PdfError::Unavailable(_))
        ));
    }

    #[test]
    fn test_pdf_magic_check() {
        assert!(looks_like_pdf(b"%PDF-1.4\n..."));
        assert!(!looks_like_pdf(b""));
        assert!(!looks_like_pdf(b"<html>"));
    }
}
