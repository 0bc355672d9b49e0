//! Report Assembler: wraps report content in the self-contained HTML shell.
//!
//! Deterministic apart from the date passed in by the caller. Institution
//! fields are escaped; the content fragment is inserted verbatim.

use chrono::NaiveDate;

use crate::assessment::models::InstitutionInfo;

/// Which audience the document is for.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ReportVariant {
    /// Opened in a browser: carries print / save-as-PDF buttons.
    Browser,
    /// Fed to the PDF renderer: no interactive elements.
    Print,
}

const REPORT_STYLES: &str = r#"
        * { margin: 0; padding: 0; box-sizing: border-box; }
        body {
            font-family: 'Inter', Arial, Helvetica, sans-serif;
            line-height: 1.6;
            color: #2c3e50;
            background-color: #f8f9fa;
            padding: 2rem;
        }
        .report-container {
            max-width: 1200px;
            margin: 0 auto;
            background: white;
            border-radius: 12px;
            box-shadow: 0 10px 30px rgba(0,0,0,0.1);
            overflow: hidden;
        }
        .report-header {
            background: linear-gradient(135deg, #2874a6 0%, #3498db 100%);
            color: white;
            padding: 3rem 2rem;
            text-align: center;
        }
        .report-header h1 { font-size: 2.5rem; font-weight: 700; margin-bottom: 1rem; }
        .report-header h2 { font-size: 1.5rem; font-weight: 500; margin-bottom: 0.5rem; opacity: 0.9; }
        .report-header p { font-size: 1.1rem; opacity: 0.8; }
        .report-content { padding: 3rem 2rem; }
        .report-content h1 {
            color: #2874a6;
            font-size: 2rem;
            margin-bottom: 1.5rem;
            padding-bottom: 1rem;
            border-bottom: 3px solid #3498db;
        }
        .report-content h2 {
            color: #2874a6;
            font-size: 1.5rem;
            margin: 2rem 0 1rem;
            padding-bottom: 0.5rem;
            border-bottom: 1px solid #e9ecef;
        }
        .report-content h3 { color: #2c3e50; font-size: 1.2rem; margin: 1.5rem 0 0.75rem; }
        .report-content p { margin-bottom: 1rem; font-size: 1.1rem; }
        .report-content table {
            width: 100%;
            border-collapse: collapse;
            margin: 1.5rem 0;
            background: white;
            box-shadow: 0 2px 10px rgba(0,0,0,0.1);
        }
        .report-content th {
            background: #2874a6;
            color: white;
            padding: 1rem;
            text-align: left;
            font-weight: 600;
            font-size: 1rem;
        }
        .report-content td { padding: 1rem; border-bottom: 1px solid #e9ecef; vertical-align: top; }
        .report-content tr:nth-child(even) { background-color: #f8f9fa; }
        .report-content ul, .report-content ol { margin: 1rem 0; padding-left: 2rem; }
        .report-content li { margin-bottom: 0.5rem; font-size: 1.1rem; }
        .report-content blockquote {
            border-left: 4px solid #3498db;
            margin: 1.5rem 0;
            color: #6c757d;
            font-style: italic;
            background: #f8f9fa;
            padding: 1rem 1rem 1rem 1.5rem;
            border-radius: 0 8px 8px 0;
        }
        .report-footer {
            background: #f8f9fa;
            padding: 2rem;
            text-align: center;
            border-top: 1px solid #e9ecef;
        }
        .report-footer p { color: #6c757d; margin-bottom: 0.5rem; }
        .report-actions {
            text-align: center;
            margin: 2rem 0;
            padding: 2rem;
            background: #f8f9fa;
            border-radius: 8px;
        }
        .report-actions button {
            display: inline-block;
            background: #2874a6;
            color: white;
            padding: 1rem 2rem;
            border-radius: 8px;
            font-weight: 600;
            margin: 0.5rem;
            border: none;
            cursor: pointer;
            font-size: 1rem;
        }
        .report-actions button.secondary { background: #28a745; }
        @media print {
            body { background: white; padding: 0; }
            .report-container { box-shadow: none; border-radius: 0; }
            .report-actions { display: none; }
        }
        @media (max-width: 768px) {
            body { padding: 1rem; }
            .report-header { padding: 2rem 1rem; }
            .report-header h1 { font-size: 2rem; }
            .report-content { padding: 2rem 1rem; }
            .report-content table { font-size: 0.9rem; }
        }
"#;

const REPORT_ACTIONS: &str = r#"        <div class="report-actions">
            <button onclick="window.print()">Print Report</button>
            <button class="secondary" onclick="window.print()">Save as PDF</button>
        </div>
"#;

const REPORT_FOOTER: &str = r#"        <div class="report-footer">
            <p><strong>Generated by AccreditAI</strong></p>
            <p>Developed by Prof. Yasser Mansour &amp; Ahmed Yasser</p>
            <p>Prince Sultan University</p>
        </div>
"#;

/// Builds the complete HTML document around `content`.
pub fn assemble_report(
    content: &str,
    info: &InstitutionInfo,
    generated_on: NaiveDate,
    variant: ReportVariant,
) -> String {
    let program = escape_html(&info.program_name());
    let institution = escape_html(&info.institution_name());
    let date = generated_on.format("%B %d, %Y");
    let actions = match variant {
        ReportVariant::Browser => REPORT_ACTIONS,
        ReportVariant::Print => "",
    };

    format!(
        r#"<!DOCTYPE html>
<html lang="en">
<head>
    <meta charset="UTF-8">
    <meta name="viewport" content="width=device-width, initial-scale=1.0">
    <title>Program Assessment Report - {program}</title>
    <style>{REPORT_STYLES}    </style>
</head>
<body>
    <div class="report-container">
        <div class="report-header">
            <h1>Program Assessment Report</h1>
            <h2>{program}</h2>
            <p>{institution}</p>
            <p>Generated on {date}</p>
        </div>
        <div class="report-content">
{content}
        </div>
{actions}{REPORT_FOOTER}    </div>
</body>
</html>
"#
    )
}

fn escape_html(text: &str) -> String {
    text.replace('&', "&amp;")
        .replace('<', "&lt;")
        .replace('>', "&gt;")
        .replace('"', "&quot;")
        .replace('\'', "&#39;")
}

#[cfg(test)]
mod tests {
    use super::*;
    use serde_json::json;

    fn date() -> NaiveDate {
        NaiveDate::from_ymd_opt(2026, 3, 5).unwrap()
    }

    #[test]
    fn test_header_carries_program_institution_and_date() {
        let info: InstitutionInfo = serde_json::from_value(json!({
            "institutionName": "Prince Sultan University",
            "programName": "BSc Software Engineering"
        }))
        .unwrap();
        let html = assemble_report("<p>Body</p>", &info, date(), ReportVariant::Print);
        assert!(html.starts_with("<!DOCTYPE html>"));
        assert!(html.contains("<title>Program Assessment Report - BSc Software Engineering</title>"));
        assert!(html.contains("<h2>BSc Software Engineering</h2>"));
        assert!(html.contains("<p>Prince Sultan University</p>"));
        assert!(html.contains("Generated on March 05, 2026"));
        assert!(html.contains("<p>Body</p>"));
    }

    #[test]
    fn test_missing_fields_render_placeholder() {
        let html = assemble_report("", &InstitutionInfo::default(), date(), ReportVariant::Print);
        assert!(html.contains("<title>Program Assessment Report - -</title>"));
        assert!(html.contains("<h2>-</h2>"));
        assert!(html.contains("<p>-</p>"));
    }

    #[test]
    fn test_footer_is_fixed() {
        let html = assemble_report("", &InstitutionInfo::default(), date(), ReportVariant::Browser);
        assert!(html.contains("Generated by AccreditAI"));
        assert!(html.contains("Prince Sultan University"));
    }

    #[test]
    fn test_print_variant_has_no_buttons() {
        let print = assemble_report("", &InstitutionInfo::default(), date(), ReportVariant::Print);
        let browser = assemble_report("", &InstitutionInfo::default(), date(), ReportVariant::Browser);
        assert!(!print.contains("<button"));
        assert!(browser.contains("window.print()"));
    }

    #[test]
    fn test_institution_fields_are_escaped() {
        let info: InstitutionInfo = serde_json::from_value(json!({
            "programName": "<script>alert(1)</script>",
            "institutionName": "A & B College"
        }))
        .unwrap();
        let html = assemble_report("<b>kept</b>", &info, date(), ReportVariant::Print);
        assert!(!html.contains("<script>"));
        assert!(html.contains("&lt;script&gt;alert(1)&lt;/script&gt;"));
        assert!(html.contains("A &amp; B College"));
        assert!(html.contains("<b>kept</b>"));
    }

    #[test]
    fn test_same_inputs_give_same_document() {
        let info = InstitutionInfo::default();
        assert_eq!(
            assemble_report("<p>x</p>", &info, date(), ReportVariant::Print),
            assemble_report("<p>x</p>", &info, date(), ReportVariant::Print)
        );
    }
}
