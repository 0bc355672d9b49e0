// Report API: HTML assembly, PDF rendering and email delivery.

pub mod handlers;
pub mod markdown;
pub mod notifier;
pub mod pdf;
pub mod template;

/// File name used for downloaded and emailed PDF reports.
pub const REPORT_FILENAME: &str = "assessment_report.pdf";
