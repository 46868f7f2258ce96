use std::collections::HashSet;
use std::sync::LazyLock;

use regex::Regex;

use super::clean::truncate_with_ellipsis;
use crate::records::{CompetitorCandidate, CompetitorContext, SearchResult};

pub const MAX_COMPETITORS: usize = 10;
pub const DESCRIPTION_MAX_CHARS: usize = 200;

const STOPWORDS: &[&str] = &["the", "and", "or"];
const MAX_TITLE_TOKENS: usize = 3;

static LEGAL_SUFFIX_RE: LazyLock<Regex> =
    LazyLock::new(|| Regex::new(r"(?i)\b(?:inc|llc|corp|company|ltd|limited)\b\.?").unwrap());
static PUNCT_RE: LazyLock<Regex> = LazyLock::new(|| Regex::new(r"[^\w\s]").unwrap());
static VERB_CUE_RE: LazyLock<Regex> = LazyLock::new(|| {
    Regex::new(r"\b([A-Z][a-zA-Z]+(?:\s+[A-Z][a-zA-Z]+){0,2})\s+(?:is|provides|offers|specializes)\b")
        .unwrap()
});
static SUFFIX_CUE_RE: LazyLock<Regex> = LazyLock::new(|| {
    Regex::new(r"\b([A-Z][a-zA-Z]+(?:\s+[A-Z][a-zA-Z]+){0,2})\s+(?:Inc|LLC|Corp|Company|Ltd|Limited)\b")
        .unwrap()
});

/// Plausible organisation names in one search hit.
///
/// Best-effort heuristic, not entity recognition: leading title words plus
/// capitalised phrases in the body that precede a verb cue ("is", "offers")
/// or a legal suffix. Generic capitalised phrases slip through. Duplicates
/// are removed case-sensitively and the searching business is never
/// returned, neither as written nor in the punctuation-stripped form title
/// candidates take.
pub fn extract_names(title: &str, content: &str, ctx: &CompetitorContext) -> Vec<String> {
    let mut seen = HashSet::new();
    let mut names = Vec::new();
    let own = ctx.business_name.trim().to_lowercase();
    let own_spaced = PUNCT_RE
        .replace_all(&own, " ")
        .split_whitespace()
        .collect::<Vec<_>>()
        .join(" ");

    let candidates = title_candidates(title)
        .into_iter()
        .chain(content_candidates(content));
    for name in candidates {
        let lowered = name.to_lowercase();
        if !own.is_empty() && (lowered == own || lowered == own_spaced) {
            continue;
        }
        if seen.insert(name.clone()) {
            names.push(name);
        }
    }

    names
}

fn title_candidates(title: &str) -> Vec<String> {
    let stripped = LEGAL_SUFFIX_RE.replace_all(title, " ");
    let spaced = PUNCT_RE.replace_all(&stripped, " ");
    let tokens: Vec<&str> = spaced.split_whitespace().collect();

    (1..=tokens.len().min(MAX_TITLE_TOKENS))
        .map(|n| tokens[..n].join(" "))
        .filter(|c| c.chars().count() > 2 && !STOPWORDS.contains(&c.to_lowercase().as_str()))
        .collect()
}

fn content_candidates(content: &str) -> Vec<String> {
    [&*VERB_CUE_RE, &*SUFFIX_CUE_RE]
        .into_iter()
        .flat_map(|re| re.captures_iter(content))
        .map(|caps| caps[1].trim().to_string())
        .collect()
}

/// Merge candidates across search hits into the competitor list.
///
/// Industry hits are read before name hits, each in API order. The first
/// spelling of a name wins under case-insensitive comparison, and the list
/// stops at [`MAX_COMPETITORS`].
pub fn aggregate_competitors(
    industry_hits: &[SearchResult],
    name_hits: &[SearchResult],
    ctx: &CompetitorContext,
) -> Vec<CompetitorCandidate> {
    let mut seen: HashSet<String> = HashSet::new();
    let mut out = Vec::new();

    for hit in industry_hits.iter().chain(name_hits) {
        for name in extract_names(&hit.title, &hit.content, ctx) {
            if out.len() >= MAX_COMPETITORS {
                return out;
            }
            if !seen.insert(name.to_lowercase()) {
                continue;
            }
            out.push(CompetitorCandidate {
                name,
                source_url: hit.url.clone(),
                industry: ctx.industry.clone(),
                description: truncate_with_ellipsis(hit.content.trim(), DESCRIPTION_MAX_CHARS),
            });
        }
    }

    out
}

// ── Tests ──
