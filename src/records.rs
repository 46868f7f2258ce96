use std::fmt;
use std::str::FromStr;

use indexmap::IndexMap;
use serde::{Deserialize, Serialize};

use crate::error::AssistError;

/// Placeholder for fields left blank on the manual-entry form.
pub const NOT_SPECIFIED: &str = "Not specified";
/// Placeholder for fields the website did not reveal.
pub const NOT_ON_WEBSITE: &str = "Not clearly specified on website";

// ── Business profile ──

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum BusinessField {
    Name,
    Description,
    Industry,
    Website,
    Values,
    TargetAudience,
    UniqueSellingPoint,
}

impl BusinessField {
    pub const ALL: [BusinessField; 7] = [
        BusinessField::Name,
        BusinessField::Description,
        BusinessField::Industry,
        BusinessField::Website,
        BusinessField::Values,
        BusinessField::TargetAudience,
        BusinessField::UniqueSellingPoint,
    ];

    pub fn label(self) -> &'static str {
        match self {
            BusinessField::Name => "Business Name",
            BusinessField::Description => "Business Description",
            BusinessField::Industry => "Industry",
            BusinessField::Website => "Website",
            BusinessField::Values => "Business Values",
            BusinessField::TargetAudience => "Target Audience",
            BusinessField::UniqueSellingPoint => "Unique Selling Point",
        }
    }
}

#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct BusinessRecord {
    pub name: String,
    pub description: String,
    pub industry: String,
    pub website: String,
    pub values: String,
    pub target_audience: String,
    pub unique_selling_point: String,
}

impl BusinessRecord {
    pub fn get(&self, field: BusinessField) -> &str {
        match field {
            BusinessField::Name => &self.name,
            BusinessField::Description => &self.description,
            BusinessField::Industry => &self.industry,
            BusinessField::Website => &self.website,
            BusinessField::Values => &self.values,
            BusinessField::TargetAudience => &self.target_audience,
            BusinessField::UniqueSellingPoint => &self.unique_selling_point,
        }
    }

    pub fn set(&mut self, field: BusinessField, value: impl Into<String>) {
        let slot = match field {
            BusinessField::Name => &mut self.name,
            BusinessField::Description => &mut self.description,
            BusinessField::Industry => &mut self.industry,
            BusinessField::Website => &mut self.website,
            BusinessField::Values => &mut self.values,
            BusinessField::TargetAudience => &mut self.target_audience,
            BusinessField::UniqueSellingPoint => &mut self.unique_selling_point,
        };
        *slot = value.into();
    }

    /// Replace every blank field with `sentinel`.
    pub fn fill_missing(&mut self, sentinel: &str) {
        for field in BusinessField::ALL {
            if self.get(field).trim().is_empty() {
                self.set(field, sentinel);
            }
        }
    }

    pub fn has_content(&self) -> bool {
        BusinessField::ALL
            .iter()
            .any(|f| !self.get(*f).trim().is_empty())
    }

    /// True when the field holds real data rather than blank or a placeholder.
    pub fn is_known(&self, field: BusinessField) -> bool {
        let v = self.get(field).trim();
        !v.is_empty() && v != NOT_SPECIFIED && v != NOT_ON_WEBSITE
    }

    /// Build a record from the manual-entry form. Name, description and
    /// industry are required; the rest default to [`NOT_SPECIFIED`].
    pub fn from_manual(entry: ManualEntry) -> Result<Self, AssistError> {
        if entry.name.trim().is_empty() {
            return Err(AssistError::MissingField("business name"));
        }
        if entry.description.trim().is_empty() {
            return Err(AssistError::MissingField("business description"));
        }
        if entry.industry.trim().is_empty() {
            return Err(AssistError::MissingField("business industry"));
        }

        let mut record = BusinessRecord {
            name: entry.name.trim().to_string(),
            description: entry.description.trim().to_string(),
            industry: entry.industry.trim().to_string(),
            website: entry.website.trim().to_string(),
            values: entry.values.trim().to_string(),
            target_audience: entry.target_audience.trim().to_string(),
            unique_selling_point: entry.unique_selling_point.trim().to_string(),
        };
        record.fill_missing(NOT_SPECIFIED);
        Ok(record)
    }
}

/// Raw manual-entry form contents.
#[derive(Debug, Clone, Default, Deserialize)]
pub struct ManualEntry {
    pub name: String,
    pub description: String,
    pub industry: String,
    #[serde(default)]
    pub website: String,
    #[serde(default)]
    pub values: String,
    #[serde(default)]
    pub target_audience: String,
    #[serde(default)]
    pub unique_selling_point: String,
}

// ── Recommendations ──

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct RecommendationRecord {
    /// Label as the model wrote it, e.g. "Tone of Voice".
    #[serde(rename = "type")]
    pub kind: String,
    pub value: String,
    pub rationale: String,
}

impl RecommendationRecord {
    pub fn recommendation_type(&self) -> Result<RecommendationType, AssistError> {
        self.kind.parse()
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize)]
pub enum RecommendationType {
    ToneOfVoice,
    Tagline,
    LogoStyle,
    ColorScheme,
    Font,
}

const TYPE_LABELS: &[(&str, RecommendationType)] = &[
    ("Tone of Voice", RecommendationType::ToneOfVoice),
    ("Tagline", RecommendationType::Tagline),
    ("Logo Style", RecommendationType::LogoStyle),
    ("Color Scheme", RecommendationType::ColorScheme),
    ("Font", RecommendationType::Font),
];

impl RecommendationType {
    pub const ALL: [RecommendationType; 5] = [
        RecommendationType::ToneOfVoice,
        RecommendationType::Tagline,
        RecommendationType::LogoStyle,
        RecommendationType::ColorScheme,
        RecommendationType::Font,
    ];

    pub fn label(self) -> &'static str {
        TYPE_LABELS
            .iter()
            .find(|(_, t)| *t == self)
            .map(|(l, _)| *l)
            .unwrap_or_default()
    }
}

impl fmt::Display for RecommendationType {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.label())
    }
}

/// Exact label match; anything else is an unknown type.
impl FromStr for RecommendationType {
    type Err = AssistError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        let label = s.trim();
        TYPE_LABELS
            .iter()
            .find(|(l, _)| *l == label)
            .map(|(_, t)| *t)
            .ok_or_else(|| AssistError::UnknownRecommendationType(label.to_string()))
    }
}

/// Recommendations the user has accepted, one slot per type.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize)]
pub struct AppliedRecommendations {
    pub tone_of_voice: Option<String>,
    pub tagline: Option<String>,
    pub logo_style: Option<String>,
    pub color_scheme: Option<String>,
    pub font: Option<String>,
}

impl AppliedRecommendations {
    pub fn get(&self, kind: RecommendationType) -> Option<&str> {
        match kind {
            RecommendationType::ToneOfVoice => self.tone_of_voice.as_deref(),
            RecommendationType::Tagline => self.tagline.as_deref(),
            RecommendationType::LogoStyle => self.logo_style.as_deref(),
            RecommendationType::ColorScheme => self.color_scheme.as_deref(),
            RecommendationType::Font => self.font.as_deref(),
        }
    }

    pub fn set(&mut self, kind: RecommendationType, value: impl Into<String>) {
        let slot = match kind {
            RecommendationType::ToneOfVoice => &mut self.tone_of_voice,
            RecommendationType::Tagline => &mut self.tagline,
            RecommendationType::LogoStyle => &mut self.logo_style,
            RecommendationType::ColorScheme => &mut self.color_scheme,
            RecommendationType::Font => &mut self.font,
        };
        *slot = Some(value.into());
    }

    pub fn has_any(&self) -> bool {
        RecommendationType::ALL.iter().any(|k| self.get(*k).is_some())
    }
}

// ── Sectioned model output ──

#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
#[serde(untagged)]
pub enum SectionBody {
    Bullets(Vec<String>),
    Raw(String),
}

/// Sections keyed by title, in order of first appearance.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize)]
#[serde(transparent)]
pub struct SectionedDocument {
    pub sections: IndexMap<String, SectionBody>,
}

impl SectionedDocument {
    pub fn get(&self, title: &str) -> Option<&SectionBody> {
        self.sections.get(title)
    }

    pub fn titles(&self) -> impl Iterator<Item = &str> {
        self.sections.keys().map(String::as_str)
    }

    pub fn len(&self) -> usize {
        self.sections.len()
    }

    pub fn is_empty(&self) -> bool {
        self.sections.is_empty()
    }
}

// ── Competitors ──

/// One hit from the web-search capability.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct SearchResult {
    #[serde(default)]
    pub title: String,
    #[serde(default)]
    pub url: String,
    #[serde(default)]
    pub content: String,
}

/// The business a competitor search is run for.
#[derive(Debug, Clone, Default)]
pub struct CompetitorContext {
    pub business_name: String,
    pub industry: String,
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct CompetitorCandidate {
    pub name: String,
    pub source_url: String,
    pub industry: String,
    pub description: String,
}
