// Shared prompt fragments.
// Each module that needs LLM calls defines its own prompts.rs alongside it.
// This file contains the rubric text reused across those prompts.

/// Performance reading of the 1-4 scale, used when asking for recommendations.
pub const PERFORMANCE_SCALE: &str = "\
The assessment uses a 1-4 scale where 1-2 indicates weak performance, \
3 indicates moderate performance, and 4 indicates strong performance.";

/// Compliance reading of the 1-4 scale, used for the full report.
pub const COMPLIANCE_SCALE: &str = "\
The assessment uses a 4-point scale where:
1 = Non-Compliant
2 = Minimal Compliance
3 = Substantial Compliance
4 = Full Compliance";

/// Placeholder rendered wherever a data point is missing.
pub const MISSING_PLACEHOLDER: &str = "-";

/// Instruction appended to report prompts so the model follows the same convention.
pub const MISSING_DATA_INSTRUCTION: &str = "If any data point is missing, use a '-' as a placeholder.";

/// Fills `{name}` placeholders in a single pass over `template`.
///
/// Substituted values are never re-scanned, so user text containing
/// `{something}` is inserted literally. Unknown placeholders are left as-is.
pub fn fill_template(template: &str, values: &[(&str, &str)]) -> String {
    let mut out = String::with_capacity(template.len());
    let mut rest = template;

    while let Some(open) = rest.find('{') {
        out.push_str(&rest[..open]);
        let after = &rest[open + 1..];
        let substituted = after.find('}').and_then(|close| {
            let key = &after[..close];
            values
                .iter()
                .find(|(name, _)| *name == key)
                .map(|(_, value)| (close, *value))
        });

        match substituted {
            Some((close, value)) => {
                out.push_str(value);
                rest = &after[close + 1..];
            }
            None => {
                out.push('{');
                rest = after;
            }
        }
    }

    out.push_str(rest);
    out
}
