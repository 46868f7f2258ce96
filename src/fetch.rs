use std::time::{Duration, Instant};

use reqwest::Client;
use tracing::{info, warn};
use url::Url;

use crate::error::{AssistError, Result};
use crate::parser::clean::clean_html;
use crate::session::PageFetcher;

pub const FETCH_TIMEOUT: Duration = Duration::from_secs(10);

const USER_AGENT: &str =
    "Mozilla/5.0 (X11; Linux x86_64) AppleWebKit/537.36 (KHTML, like Gecko) Chrome/124.0 Safari/537.36";

/// Accept absolute http(s) URLs with a host.
pub fn validate_url(raw: &str) -> Result<Url> {
    let invalid = |reason: &str| AssistError::InvalidUrl {
        url: raw.to_string(),
        reason: reason.to_string(),
    };

    let url = Url::parse(raw.trim()).map_err(|e| invalid(&e.to_string()))?;
    if url.scheme() != "http" && url.scheme() != "https" {
        return Err(invalid("scheme must be http or https"));
    }
    if url.host_str().map_or(true, str::is_empty) {
        return Err(invalid("missing host"));
    }
    Ok(url)
}

/// Plain HTTP page fetcher with a fixed timeout.
pub struct HttpFetcher {
    client: Client,
}

impl HttpFetcher {
    pub fn new() -> Result<Self> {
        let client = Client::builder()
            .timeout(FETCH_TIMEOUT)
            .user_agent(USER_AGENT)
            .build()
            .map_err(|e| AssistError::Fetch {
                url: String::new(),
                message: format!("failed to build HTTP client: {}", e),
            })?;
        Ok(Self { client })
    }
}

impl PageFetcher for HttpFetcher {
    async fn fetch(&self, url: &str) -> Result<String> {
        let fail = |e: reqwest::Error| AssistError::Fetch {
            url: url.to_string(),
            message: e.to_string(),
        };

        let start = Instant::now();
        let response = self.client.get(url).send().await.map_err(fail)?;
        let status = response.status();
        if !status.is_success() {
            warn!("Fetch {} returned {}", url, status);
            return Err(AssistError::Fetch {
                url: url.to_string(),
                message: format!("HTTP {}", status),
            });
        }
        let body = response.text().await.map_err(fail)?;

        info!(
            "Fetched {} ({} bytes in {}ms)",
            url,
            body.len(),
            start.elapsed().as_millis()
        );
        Ok(body)
    }
}

/// Fetch a page and return its cleaned text.
pub async fn fetch_clean_text(fetcher: &impl PageFetcher, url: &str) -> Result<String> {
    let url = validate_url(url)?;
    let html = fetcher.fetch(url.as_str()).await?;
    Ok(clean_html(&html))
}

#[cfg(test)]
mod tests {
    use super::*;

    struct StaticPage(&'static str);

    impl PageFetcher for StaticPage {
        async fn fetch(&self, _url: &str) -> Result<String> {
            Ok(self.0.to_string())
        }
    }

    #[test]
    fn accepts_http_and_https() {
        assert!(validate_url("https://example.com").is_ok());
        assert!(validate_url("  http://example.com/about?x=1 ").is_ok());
    }

    #[test]
    fn rejects_bad_urls() {
        for raw in ["example.com", "ftp://example.com", "https://", "", "mailto:a@b.c"] {
            let err = validate_url(raw).unwrap_err();
            assert!(matches!(err, AssistError::InvalidUrl { .. }), "{raw}");
        }
    }

    #[tokio::test]
    async fn fetch_then_clean() {
        let page = StaticPage("<nav>Menu</nav><p>Hello   there</p>");
        let text = fetch_clean_text(&page, "https://example.com").await.unwrap();
        assert_eq!(text, "Hello there");
    }

    #[tokio::test]
    async fn invalid_url_never_fetches() {
        let page = StaticPage("<p>unused</p>");
        let err = fetch_clean_text(&page, "not a url").await.unwrap_err();
        assert!(matches!(err, AssistError::InvalidUrl { .. }));
    }
}
