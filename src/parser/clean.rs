use std::sync::LazyLock;

use regex::Regex;
use scraper::{Html, Node};

/// Upper bound on cleaned page text handed to the model.
pub const MAX_CONTENT_CHARS: usize = 8000;

/// Elements whose text never counts as page content.
const SKIP_TAGS: &[&str] = &["script", "style", "nav", "footer", "header"];

static WHITESPACE_RE: LazyLock<Regex> = LazyLock::new(|| Regex::new(r"\s+").unwrap());

/// Strip boilerplate regions from raw HTML and flatten the rest into one
/// whitespace-normalised line of at most [`MAX_CONTENT_CHARS`] characters.
pub fn clean_html(html: &str) -> String {
    if html.trim().is_empty() {
        return String::new();
    }

    let doc = Html::parse_document(html);
    let mut fragments: Vec<&str> = Vec::new();

    for node in doc.tree.root().descendants() {
        let Node::Text(text) = node.value() else {
            continue;
        };
        let skipped = node.ancestors().any(|a| match a.value() {
            Node::Element(el) => SKIP_TAGS.contains(&el.name()),
            _ => false,
        });
        if skipped {
            continue;
        }
        let fragment = text.trim();
        if !fragment.is_empty() {
            fragments.push(fragment);
        }
    }

    truncate_chars(&collapse_whitespace(&fragments.join(" ")), MAX_CONTENT_CHARS)
}

/// Collapse every run of whitespace (newlines included) into one space.
pub fn collapse_whitespace(text: &str) -> String {
    WHITESPACE_RE.replace_all(text.trim(), " ").into_owned()
}

/// Hard cap on character count, no ellipsis.
pub fn truncate_chars(s: &str, max: usize) -> String {
    match s.char_indices().nth(max) {
        Some((idx, _)) => s[..idx].to_string(),
        None => s.to_string(),
    }
}

/// Cap at `max` characters and mark the cut with `...`.
pub fn truncate_with_ellipsis(s: &str, max: usize) -> String {
    if s.chars().count() <= max {
        s.to_string()
    } else {
        format!("{}...", truncate_chars(s, max))
    }
}

// ── Tests ──
