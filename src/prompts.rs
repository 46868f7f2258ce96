//! Prompt text for the model calls and the competitor search queries.
//!
//! Only fields holding real data are rendered, so placeholders such as
//! "Not specified" never reach the model.

use crate::records::{AppliedRecommendations, BusinessField, BusinessRecord, RecommendationType};

/// Image prompts longer than this are cut before the image call.
pub const LOGO_PROMPT_MAX_CHARS: usize = 1000;

pub fn extraction_prompt(url: &str, content: &str) -> String {
    format!(
        "Read the following text scraped from the website {url} and extract the business details.\n\
         \n\
         Answer with exactly these lines and nothing else. Write \"Not clearly specified on website\" \
         when the text does not say.\n\
         Business Name: <name>\n\
         Business Description: <one or two sentences>\n\
         Industry: <industry>\n\
         Target Audience: <who the customers are>\n\
         Unique Selling Point: <what sets it apart>\n\
         Business Values: <values the business stands for>\n\
         \n\
         Website text:\n\
         {content}"
    )
}

pub fn recommendations_prompt(business: &BusinessRecord) -> String {
    let types = RecommendationType::ALL
        .iter()
        .map(|t| t.label())
        .collect::<Vec<_>>()
        .join(", ");
    format!(
        "You are a brand strategist. Based on this business:\n\
         {profile}\n\
         \n\
         Give exactly 5 recommendations, one for each of: {types}.\n\
         Use this exact format, one per line, with no extra text:\n\
         1. Type|Recommendation|Description\n\
         \n\
         Keep each Recommendation short (a few words). The Description explains why it fits.",
        profile = render_profile(business),
    )
}

pub fn tagline_prompt(business: &BusinessRecord, tone: &str) -> String {
    format!(
        "Generate a tagline for the following business:\n\
         {profile}\n\
         Tagline Tone: {tone}\n\
         \n\
         Return only the tagline. Be concise and to the point.",
        profile = render_profile(business),
    )
}

pub fn analysis_prompt(business: &BusinessRecord) -> String {
    format!(
        "Write a short strategic analysis of this business:\n\
         {profile}\n\
         \n\
         Use these sections, each starting with a line \"### <title>\":\n\
         ### Strengths\n\
         ### Opportunities\n\
         ### Marketing Channels\n\
         ### Summary\n\
         Under every section except Summary, list points as lines starting with \"- \". \
         The Summary is one paragraph.",
        profile = render_profile(business),
    )
}

/// Ask the model to write the image-generation prompt for a logo.
pub fn logo_brief_prompt(business: &BusinessRecord, applied: &AppliedRecommendations) -> String {
    let mut guidance = String::new();
    for kind in [
        RecommendationType::LogoStyle,
        RecommendationType::ColorScheme,
        RecommendationType::Font,
        RecommendationType::ToneOfVoice,
    ] {
        if let Some(value) = applied.get(kind) {
            guidance.push_str(&format!("{}: {}\n", kind.label(), value));
        }
    }
    if guidance.is_empty() {
        guidance.push_str("No design guidance yet; choose what suits the business.\n");
    }

    format!(
        "Write one prompt for an image model that will draw a logo for this business:\n\
         {profile}\n\
         Design guidance:\n\
         {guidance}\n\
         The logo must be simple, flat, on a plain background, with no more text than the business name. \
         Reply with the image prompt only, under {LOGO_PROMPT_MAX_CHARS} characters.",
        profile = render_profile(business),
    )
}

/// Queries for the industry-wide search and the name-based search, in that order.
pub fn competitor_queries(business: &BusinessRecord) -> (String, String) {
    (
        format!("{} companies competitors", business.industry.trim()),
        format!("{} competitors alternatives", business.name.trim()),
    )
}

fn render_profile(business: &BusinessRecord) -> String {
    BusinessField::ALL
        .iter()
        .filter(|f| business.is_known(**f))
        .map(|f| format!("{}: {}", f.label(), business.get(*f).trim()))
        .collect::<Vec<_>>()
        .join("\n")
}
