//! Safe display markup for chat bubbles.
//!
//! Raw turn content is escaped first, then enriched: absolute URLs become
//! links, asterisk pairs become bold/emphasis, and newlines become `<br>`.
//! Escaping always runs before enrichment so user-supplied characters can
//! never inject structural markup.

use regex::Regex;

use std::sync::LazyLock;

/// Conservative absolute-URL pattern: `scheme://` followed by non-space.
static URL_RE: LazyLock<Regex> = LazyLock::new(|| {
    Regex::new(r"[a-zA-Z][a-zA-Z0-9+.-]*://[^\s]+").expect("URL pattern compiles")
});

static BOLD_RE: LazyLock<Regex> =
    LazyLock::new(|| Regex::new(r"\*\*(.*?)\*\*").expect("bold pattern compiles"));

static EM_RE: LazyLock<Regex> =
    LazyLock::new(|| Regex::new(r"\*(.*?)\*").expect("emphasis pattern compiles"));

/// Escape characters meaningful to the display markup language.
pub fn escape(content: &str) -> String {
    let mut escaped = String::with_capacity(content.len());
    for c in content.chars() {
        match c {
            '&' => escaped.push_str("&amp;"),
            '<' => escaped.push_str("&lt;"),
            '>' => escaped.push_str("&gt;"),
            '"' => escaped.push_str("&quot;"),
            '\'' => escaped.push_str("&#39;"),
            _ => escaped.push(c),
        }
    }
    escaped
}

/// Convert raw turn content into safe display markup.
///
/// Pipeline, in fixed order: escape, linkify URLs (opening in a new view
/// context), `**bold**`, `*emphasis*`, then newline to `<br>`.
///
/// Unmatched asterisks are left literal. The styling regexes are non-greedy
/// and single-pass, which can give surprising results on malformed input;
/// that quirk is intentional and kept.
pub fn render(content: &str) -> String {
    if content.is_empty() {
        return String::new();
    }

    let escaped = escape(content);
    let linked = URL_RE.replace_all(
        &escaped,
        r#"<a href="${0}" target="_blank" rel="noopener">${0}</a>"#,
    );
    let bold = BOLD_RE.replace_all(&linked, "<strong>${1}</strong>");
    let emphasized = EM_RE.replace_all(&bold, "<em>${1}</em>");
    emphasized.replace('\n', "<br>")
}
