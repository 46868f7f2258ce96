use std::sync::LazyLock;

use regex::Regex;
use tracing::warn;

use crate::records::RecommendationRecord;

/// Records the recommendations prompt asks for.
pub const EXPECTED_RECOMMENDATIONS: usize = 5;

const FIELD_SEPARATOR: char = '|';

static NUMBERING_RE: LazyLock<Regex> =
    LazyLock::new(|| Regex::new(r"^\s*\d+\s*[.)]?\s*").unwrap());

/// Parse `N. Type|Value|Rationale` lines, keeping input order.
///
/// Lines without a separator, without a digit near the start, or with fewer
/// than three fields are skipped. A response that drifts from the format
/// yields a shorter list, never an error.
pub fn parse_recommendations(text: &str) -> Vec<RecommendationRecord> {
    let records: Vec<RecommendationRecord> = text.lines().filter_map(parse_line).collect();

    if records.len() < EXPECTED_RECOMMENDATIONS {
        warn!(
            "Parsed {} of {} recommendations",
            records.len(),
            EXPECTED_RECOMMENDATIONS
        );
    }

    records
}

fn parse_line(line: &str) -> Option<RecommendationRecord> {
    let line = line.trim();
    if !line.contains(FIELD_SEPARATOR) || !line.chars().take(3).any(|c| c.is_ascii_digit()) {
        return None;
    }

    let parts: Vec<&str> = line.split(FIELD_SEPARATOR).map(str::trim).collect();
    if parts.len() < 3 {
        return None;
    }

    Some(RecommendationRecord {
        kind: NUMBERING_RE.replace(parts[0], "").trim().to_string(),
        value: parts[1].to_string(),
        rationale: parts[2].to_string(),
    })
}

// ── Tests ──

#[cfg(test)]
mod tests {
    use super::*;
    use crate::records::RecommendationType;
    use proptest::prelude::*;

    #[test]
    fn two_well_formed_lines() {
        let recs = parse_recommendations("1. Tone of Voice|Bold|Because fun\n2. Tagline|Go!|Short and punchy");
        assert_eq!(recs.len(), 2);
        assert_eq!(
            recs[0],
            RecommendationRecord {
                kind: "Tone of Voice".into(),
                value: "Bold".into(),
                rationale: "Because fun".into(),
            }
        );
        assert_eq!(recs[1].kind, "Tagline");
        assert_eq!(recs[1].value, "Go!");
    }

    #[test]
    fn skips_malformed_lines() {
        let text = "Here are your recommendations:\n\
                    1. Tone of Voice|Warm\n\
                    Logo Style|Minimal|Clean lines\n\
                    2. Font | Lora | Friendly serif | extra\n\
                    3) Color Scheme|Terracotta and cream|Evokes ovens";
        let recs = parse_recommendations(text);
        assert_eq!(recs.len(), 2);
        assert_eq!(recs[0].kind, "Font");
        assert_eq!(recs[0].rationale, "Friendly serif");
        assert_eq!(recs[1].kind, "Color Scheme");
        assert_eq!(recs[1].recommendation_type().unwrap(), RecommendationType::ColorScheme);
    }

    #[test]
    fn multi_digit_numbering() {
        let recs = parse_recommendations("10. Tagline|Rise early|Bakery hours");
        assert_eq!(recs[0].kind, "Tagline");
    }

    #[test]
    fn fixture_yields_five_typed_records() {
        let text = std::fs::read_to_string("tests/fixtures/recommendations.md").unwrap();
        let recs = parse_recommendations(&text);
        assert_eq!(recs.len(), EXPECTED_RECOMMENDATIONS);
        let kinds: Vec<RecommendationType> = recs
            .iter()
            .map(|r| r.recommendation_type().unwrap())
            .collect();
        assert_eq!(kinds, RecommendationType::ALL.to_vec());
    }

    #[test]
    fn empty_input() {
        assert!(parse_recommendations("").is_empty());
    }

    proptest! {
        #[test]
        fn never_more_records_than_lines(text in "[0-9a-z|. \n]{0,200}") {
            let recs = parse_recommendations(&text);
            prop_assert!(recs.len() <= text.lines().count());
        }
    }
}
