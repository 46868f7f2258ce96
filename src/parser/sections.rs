use crate::records::{SectionBody, SectionedDocument};

const HEADING_DELIMITER: &str = "###";
const BULLET_MARKERS: &[char] = &['-', '*', '•'];

/// Split a `###`-headed model response into titled sections.
///
/// A body that opens with a bullet becomes a list of that bullet's lines;
/// anything else is kept as one raw string, even when it holds several
/// numbered or comma-separated items.
pub fn parse_sections(text: &str) -> SectionedDocument {
    let mut doc = SectionedDocument::default();

    for fragment in text.split(HEADING_DELIMITER) {
        if fragment.trim().is_empty() {
            continue;
        }
        let (title_line, body) = fragment.split_once('\n').unwrap_or((fragment, ""));
        let title = title_line.trim().trim_start_matches('#').trim();
        let body = body.trim();
        if body.is_empty() {
            continue;
        }

        let content = match bullet_marker(body) {
            Some(marker) => SectionBody::Bullets(collect_bullets(body, marker)),
            None => SectionBody::Raw(body.to_string()),
        };
        // Repeated titles keep their first position and take the newer body.
        doc.sections.insert(title.to_string(), content);
    }

    doc
}

/// The marker opening `body`, if it starts with a bullet followed by whitespace.
fn bullet_marker(body: &str) -> Option<char> {
    let mut chars = body.chars();
    let first = chars.next()?;
    let second = chars.next()?;
    (BULLET_MARKERS.contains(&first) && second.is_whitespace()).then_some(first)
}

fn collect_bullets(body: &str, marker: char) -> Vec<String> {
    body.lines()
        .filter_map(|line| {
            let rest = line.trim_start().strip_prefix(marker)?;
            if !rest.is_empty() && !rest.starts_with(char::is_whitespace) {
                return None;
            }
            let item = rest.trim();
            (!item.is_empty()).then(|| item.to_string())
        })
        .collect()
}

// ── Tests ──

#[cfg(test)]
mod tests {
    use super::*;

    fn bullets(items: &[&str]) -> SectionBody {
        SectionBody::Bullets(items.iter().map(|s| s.to_string()).collect())
    }

    #[test]
    fn bullets_and_raw() {
        let doc = parse_sections("### A\n- x\n- y\n### B\nraw text");
        let titles: Vec<&str> = doc.titles().collect();
        assert_eq!(titles, vec!["A", "B"]);
        assert_eq!(doc.get("A"), Some(&bullets(&["x", "y"])));
        assert_eq!(doc.get("B"), Some(&SectionBody::Raw("raw text".into())));
    }

    #[test]
    fn serializes_as_ordered_map() {
        let doc = parse_sections("### A\n- x\n- y\n### B\nraw text");
        let json = serde_json::to_string(&doc).unwrap();
        assert_eq!(json, r#"{"A":["x","y"],"B":"raw text"}"#);
    }

    #[test]
    fn drops_empty_sections() {
        let doc = parse_sections("### Empty\n\n### Filled\n- one\n###\n");
        let titles: Vec<&str> = doc.titles().collect();
        assert_eq!(titles, vec!["Filled"]);
    }

    #[test]
    fn bullet_lines_only() {
        let doc = parse_sections("### Channels\n- Instagram\n  - TikTok\nsee above\n-not a bullet\n- Local press");
        assert_eq!(
            doc.get("Channels"),
            Some(&bullets(&["Instagram", "TikTok", "Local press"]))
        );
    }

    #[test]
    fn star_marker_is_not_bold() {
        let doc = parse_sections("### Stars\n* alpha\n* beta\n### Bold\n**Key point** matters");
        assert_eq!(doc.get("Stars"), Some(&bullets(&["alpha", "beta"])));
        assert_eq!(
            doc.get("Bold"),
            Some(&SectionBody::Raw("**Key point** matters".into()))
        );
    }

    // Multi-item content without bullet markers is not split up.
    #[test]
    fn numbered_items_stay_raw() {
        let doc = parse_sections("### Steps\n1. Bake\n2. Sell");
        assert_eq!(doc.get("Steps"), Some(&SectionBody::Raw("1. Bake\n2. Sell".into())));
    }

    #[test]
    fn repeated_title_replaces_in_place() {
        let doc = parse_sections("### A\nfirst\n### B\n- b\n### A\nsecond");
        let titles: Vec<&str> = doc.titles().collect();
        assert_eq!(titles, vec!["A", "B"]);
        assert_eq!(doc.get("A"), Some(&SectionBody::Raw("second".into())));
    }

    #[test]
    fn preamble_and_deeper_headings() {
        let doc = parse_sections("Overview\nintro words\n#### Detail\n- d");
        assert_eq!(doc.get("Overview"), Some(&SectionBody::Raw("intro words".into())));
        assert_eq!(doc.get("Detail"), Some(&bullets(&["d"])));
    }

    #[test]
    fn analysis_fixture() {
        let text = std::fs::read_to_string("tests/fixtures/analysis.md").unwrap();
        let doc = parse_sections(&text);
        assert_eq!(doc.len(), 4);
        match doc.get("Strengths") {
            Some(SectionBody::Bullets(items)) => assert_eq!(items.len(), 3),
            other => panic!("expected bullets, got {:?}", other),
        }
        assert!(matches!(doc.get("Summary"), Some(SectionBody::Raw(_))));
    }

    #[test]
    fn empty_input() {
        assert!(parse_sections("").is_empty());
        assert!(parse_sections("######").is_empty());
    }
}
