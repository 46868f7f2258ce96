use tracing::{info, warn};

use crate::error::{AssistError, Result};
use crate::fetch::fetch_clean_text;
use crate::parser::business_from_model_output;
use crate::parser::clean::truncate_chars;
use crate::parser::competitors::aggregate_competitors;
use crate::parser::recommendations::parse_recommendations;
use crate::parser::sections::parse_sections;
use crate::prompts::{self, LOGO_PROMPT_MAX_CHARS};
use crate::records::*;

/// Hits requested per competitor search query.
pub const RESULTS_PER_QUERY: usize = 5;

// ── External capabilities ──

/// Raw HTML for a URL. Transport errors and non-2xx statuses are failures.
#[allow(async_fn_in_trait)]
pub trait PageFetcher {
    async fn fetch(&self, url: &str) -> Result<String>;
}

#[allow(async_fn_in_trait)]
pub trait TextCompletion {
    async fn complete(&self, prompt: &str) -> Result<String>;
}

/// Returns the URL of the generated image.
#[allow(async_fn_in_trait)]
pub trait ImageGenerator {
    async fn generate_image(&self, prompt: &str) -> Result<String>;
}

#[allow(async_fn_in_trait)]
pub trait WebSearch {
    async fn search(&self, query: &str, max_results: usize) -> Result<Vec<SearchResult>>;
}

// ── Session state ──

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ImportMethod {
    Website,
    Manual,
}

/// Everything one user has produced so far.
///
/// Handlers only touch state after every external call they make has
/// succeeded, so a failure leaves the session as it was.
#[derive(Debug, Clone, Default)]
pub struct Session {
    pub business: BusinessRecord,
    pub recommendations: Vec<RecommendationRecord>,
    pub applied: AppliedRecommendations,
    pub competitors: Vec<CompetitorCandidate>,
    pub analysis: Option<SectionedDocument>,
    pub logo_url: Option<String>,
    pub import_method: Option<ImportMethod>,
}

impl Session {
    pub fn new() -> Self {
        Self::default()
    }

    /// Back to an empty profile with nothing generated.
    pub fn reset(&mut self) {
        *self = Self::default();
    }

    pub async fn import_from_website(
        &mut self,
        url: &str,
        fetcher: &impl PageFetcher,
        llm: &impl TextCompletion,
    ) -> Result<&BusinessRecord> {
        let content = fetch_clean_text(fetcher, url).await?;
        if content.is_empty() {
            return Err(AssistError::Fetch {
                url: url.to_string(),
                message: "page has no readable text".to_string(),
            });
        }

        let response = ask(llm, &prompts::extraction_prompt(url, &content)).await?;
        let record = business_from_model_output(&response, url.trim());
        info!("Imported business '{}' from {}", record.name, url);

        self.business = record;
        self.import_method = Some(ImportMethod::Website);
        Ok(&self.business)
    }

    pub fn import_manual(&mut self, entry: ManualEntry) -> Result<&BusinessRecord> {
        self.business = BusinessRecord::from_manual(entry)?;
        self.import_method = Some(ImportMethod::Manual);
        Ok(&self.business)
    }

    /// Replace the current recommendation list with a fresh batch.
    pub async fn generate_recommendations(
        &mut self,
        llm: &impl TextCompletion,
    ) -> Result<&[RecommendationRecord]> {
        self.require_business()?;
        let response = ask(llm, &prompts::recommendations_prompt(&self.business)).await?;
        self.recommendations = parse_recommendations(&response);
        info!("Generated {} recommendations", self.recommendations.len());
        Ok(self.recommendations.as_slice())
    }

    /// Store `value` in the slot named by `kind`. Unknown kinds change nothing.
    pub fn apply_recommendation(&mut self, kind: &str, value: &str) -> Result<RecommendationType> {
        let parsed: RecommendationType = kind.parse().inspect_err(|_| {
            warn!("Refusing to apply recommendation of unknown type '{}'", kind);
        })?;
        self.applied.set(parsed, value.trim());
        Ok(parsed)
    }

    pub async fn generate_tagline(&self, llm: &impl TextCompletion, tone: &str) -> Result<String> {
        self.require_business()?;
        let response = ask(llm, &prompts::tagline_prompt(&self.business, tone)).await?;
        Ok(response.trim().trim_matches('"').to_string())
    }

    pub async fn generate_analysis(
        &mut self,
        llm: &impl TextCompletion,
    ) -> Result<&SectionedDocument> {
        self.require_business()?;
        let response = ask(llm, &prompts::analysis_prompt(&self.business)).await?;
        let doc = parse_sections(&response);
        if doc.is_empty() {
            warn!("Analysis response had no sections");
        }
        Ok(&*self.analysis.insert(doc))
    }

    /// The model writes the image prompt from the profile and applied
    /// guidance, then the image model draws it.
    pub async fn generate_logo(
        &mut self,
        llm: &impl TextCompletion,
        images: &impl ImageGenerator,
    ) -> Result<&str> {
        self.require_business()?;
        if !self.applied.has_any() {
            info!("Generating logo without applied recommendations");
        }

        let brief = ask(llm, &prompts::logo_brief_prompt(&self.business, &self.applied)).await?;
        let image_prompt = truncate_chars(brief.trim(), LOGO_PROMPT_MAX_CHARS);
        let url = images.generate_image(&image_prompt).await?;
        if url.trim().is_empty() {
            return Err(AssistError::EmptyResponse { service: "image" });
        }

        info!("Logo generated for '{}'", self.business.name);
        Ok(self.logo_url.insert(url.trim().to_string()).as_str())
    }

    pub async fn search_competitors(
        &mut self,
        search: &impl WebSearch,
    ) -> Result<&[CompetitorCandidate]> {
        self.require_business()?;
        let (industry_query, name_query) = prompts::competitor_queries(&self.business);

        let industry_hits = search.search(&industry_query, RESULTS_PER_QUERY).await?;
        let name_hits = search.search(&name_query, RESULTS_PER_QUERY).await?;

        let ctx = CompetitorContext {
            business_name: self.business.name.clone(),
            industry: self.business.industry.clone(),
        };
        self.competitors = aggregate_competitors(&industry_hits, &name_hits, &ctx);
        info!(
            "Found {} competitor candidates from {} search hits",
            self.competitors.len(),
            industry_hits.len() + name_hits.len()
        );
        Ok(self.competitors.as_slice())
    }

    fn require_business(&self) -> Result<()> {
        if self.business.has_content() {
            Ok(())
        } else {
            Err(AssistError::NoBusinessInfo)
        }
    }
}

async fn ask(llm: &impl TextCompletion, prompt: &str) -> Result<String> {
    let response = llm.complete(prompt).await?;
    if response.trim().is_empty() {
        return Err(AssistError::EmptyResponse { service: "completion" });
    }
    Ok(response)
}

// ── Tests ──
