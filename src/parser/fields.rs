use tracing::debug;

use crate::records::{BusinessField, BusinessRecord};

/// Label keys in match priority. A normalised label is assigned to the first
/// key it contains, so more specific keys come before generic ones.
const SCHEMA: &[(&str, BusinessField)] = &[
    ("business name", BusinessField::Name),
    ("company name", BusinessField::Name),
    ("description", BusinessField::Description),
    ("industry", BusinessField::Industry),
    ("website", BusinessField::Website),
    ("target audience", BusinessField::TargetAudience),
    ("audience", BusinessField::TargetAudience),
    ("selling point", BusinessField::UniqueSellingPoint),
    ("values", BusinessField::Values),
    ("name", BusinessField::Name),
];

/// Parse `Label: value` lines into a business record.
///
/// Each line splits on its first colon only, so values may contain colons
/// (URLs, times). Labels match by substring, not equality, and a later line
/// for the same field overwrites an earlier one. This tolerates the many
/// ways a model phrases its labels, at the price of ambiguity: a stray
/// "Description:" further down replaces the real one, and a label naming two
/// fields goes to whichever comes first in [`SCHEMA`]. Fields with no
/// matching line stay empty.
pub fn extract_fields(text: &str) -> BusinessRecord {
    let mut record = BusinessRecord::default();

    for line in text.lines() {
        let Some((label, value)) = line.split_once(':') else {
            continue;
        };
        let label = normalize_label(label);
        if label.is_empty() {
            continue;
        }
        let Some(field) = match_field(&label) else {
            debug!("Unmatched label: {}", label);
            continue;
        };
        record.set(field, clean_value(value));
    }

    record
}

/// Lower-case, punctuation to spaces, whitespace collapsed.
fn normalize_label(label: &str) -> String {
    label
        .chars()
        .map(|c| {
            if c.is_alphanumeric() {
                c.to_ascii_lowercase()
            } else {
                ' '
            }
        })
        .collect::<String>()
        .split_whitespace()
        .collect::<Vec<_>>()
        .join(" ")
}

fn match_field(label: &str) -> Option<BusinessField> {
    SCHEMA
        .iter()
        .find(|(key, _)| label.contains(key))
        .map(|(_, field)| *field)
}

fn clean_value(value: &str) -> String {
    value
        .trim_matches(|c: char| c.is_whitespace() || c == '*')
        .to_string()
}

// ── Tests ──

#[cfg(test)]
mod tests {
    use super::*;
    use proptest::prelude::*;

    #[test]
    fn business_name_amid_noise() {
        let text = "Here is what I found.\nBusiness Name: Acme\nSome closing remark";
        assert_eq!(extract_fields(text).name, "Acme");
    }

    #[test]
    fn splits_on_first_colon_only() {
        let r = extract_fields("Website: https://acme.example:8080/about");
        assert_eq!(r.website, "https://acme.example:8080/about");
    }

    #[test]
    fn markdown_labels() {
        let text = "**Business Name:** Acme\n- **Target Audience**: Road runners\n## Industry: Hardware";
        let r = extract_fields(text);
        assert_eq!(r.name, "Acme");
        assert_eq!(r.target_audience, "Road runners");
        assert_eq!(r.industry, "Hardware");
    }

    #[test]
    fn substring_label_match() {
        let text = "Unique Selling Points: Drop-forged\nCore Business Values: Reliability\nPrimary Industry Sector: Tools";
        let r = extract_fields(text);
        assert_eq!(r.unique_selling_point, "Drop-forged");
        assert_eq!(r.values, "Reliability");
        assert_eq!(r.industry, "Tools");
    }

    #[test]
    fn business_description_is_not_a_name() {
        let r = extract_fields("Business Description: We sell anvils");
        assert_eq!(r.description, "We sell anvils");
        assert!(r.name.is_empty());
    }

    #[test]
    fn last_write_wins() {
        let r = extract_fields("Industry: Retail\nIndustry: Hardware");
        assert_eq!(r.industry, "Hardware");
    }

    #[test]
    fn extraction_fixture() {
        let text = std::fs::read_to_string("tests/fixtures/extraction.md").unwrap();
        let r = extract_fields(&text);
        assert_eq!(r.name, "Rosa's Bakery");
        assert_eq!(r.industry, "Food & Beverage");
        assert!(r.description.starts_with("Neighbourhood bakery"));
        assert_eq!(r.target_audience, "Local families and office workers");
        assert!(r.website.is_empty());
    }

    #[test]
    fn no_labels_gives_defaults() {
        assert_eq!(extract_fields(""), BusinessRecord::default());
        assert_eq!(
            extract_fields("just prose\nwith no labels at all"),
            BusinessRecord::default()
        );
        assert_eq!(extract_fields(": orphan value"), BusinessRecord::default());
    }

    proptest! {
        #[test]
        fn colon_free_text_is_all_default(text in "[^:]*") {
            prop_assert_eq!(extract_fields(&text), BusinessRecord::default());
        }

        #[test]
        fn name_survives_surrounding_lines(
            before in "[a-z ]{0,40}",
            after in "[a-z ]{0,40}",
        ) {
            let text = format!("{}\nBusiness Name: Acme\n{}", before, after);
            prop_assert_eq!(extract_fields(&text).name, "Acme");
        }
    }
}
