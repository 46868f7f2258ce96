pub mod clean;
pub mod competitors;
pub mod fields;
pub mod recommendations;
pub mod sections;

use crate::records::{BusinessRecord, NOT_ON_WEBSITE};

/// Finish a website import: model answer → fields → placeholders.
///
/// The scraped URL stands in for the website when the model left it out.
pub fn business_from_model_output(response: &str, url: &str) -> BusinessRecord {
    let mut record = fields::extract_fields(response);
    if record.website.trim().is_empty() {
        record.website = url.to_string();
    }
    record.fill_missing(NOT_ON_WEBSITE);
    record
}
