use pulldown_cmark::{html, Options, Parser};

/// Renders LLM Markdown to an HTML fragment. GitHub-style tables are enabled
/// because the compliance report is laid out as one table per standard.
pub fn render_markdown(markdown: &str) -> String {
    let mut options = Options::empty();
    options.insert(Options::ENABLE_TABLES);
    options.insert(Options::ENABLE_STRIKETHROUGH);

    let parser = Parser::new_ext(markdown, options);
    let mut out = String::with_capacity(markdown.len() * 3 / 2);
    html::push_html(&mut out, parser);
    out
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_renders_headings_and_lists() {
        let html = render_markdown("# Executive Summary\n\n- Strong faculty\n- Weak facilities\n");
        assert!(html.contains("<h1>Executive Summary</h1>"));
        assert!(html.contains("<li>Strong faculty</li>"));
    }

    #[test]
    fn test_renders_tables() {
        let markdown = "\
| Strengths | Weaknesses |
|---|---|
| • Clear mission | • No KPI tracking |
";
        let html = render_markdown(markdown);
        assert!(html.contains("<table>"));
        assert!(html.contains("<th>Strengths</th>"));
        assert!(html.contains("<td>• No KPI tracking</td>"));
    }

    #[test]
    fn test_empty_markdown_renders_nothing() {
        assert_eq!(render_markdown(""), "");
    }
}
