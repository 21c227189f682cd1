//! Page fetching and content extraction.
//!
//! Validates the URL before any network I/O, performs one GET with a
//! deadline, and extracts the page title plus the primary content region.
//! When no named content region exists the whole body is used instead;
//! `ContentNotFound` is raised only when even that yields no text.

use crate::error::{AgentError, Result};
use docsum_core::Document;
use scraper::{Html, Selector};
use std::time::Duration;
use tracing::{debug, instrument};
use url::Url;

const USER_AGENT: &str = concat!("docsum/", env!("CARGO_PKG_VERSION"));

/// Deadline for the outbound page request
const REQUEST_TIMEOUT: Duration = Duration::from_secs(30);

/// Content-region selectors, tried in order before the body fallback.
/// `main#main` first: it is the named region the ingested doc sites use.
const CONTENT_SELECTORS: &[&str] = &["main#main", "article", "main", "[role='main']"];

/// Fetches pages and extracts their content region
#[derive(Clone)]
pub struct PageFetcher {
    client: reqwest::Client,
}

impl PageFetcher {
    /// Create a fetcher with its long-lived HTTP client
    pub fn new() -> Result<Self> {
        let client = reqwest::Client::builder()
            .user_agent(USER_AGENT)
            .timeout(REQUEST_TIMEOUT)
            .build()
            .map_err(|e| AgentError::Config(format!("failed to build HTTP client: {e}")))?;

        Ok(Self { client })
    }

    /// Validate that a string is a well-formed absolute http(s) URL.
    ///
    /// Runs before any network call so malformed input fails fast.
    pub fn validate_url(raw: &str) -> Result<Url> {
        let url =
            Url::parse(raw).map_err(|e| AgentError::InvalidUrl(format!("{raw}: {e}")))?;

        if !matches!(url.scheme(), "http" | "https") {
            return Err(AgentError::InvalidUrl(format!(
                "{raw}: unsupported scheme '{}'",
                url.scheme()
            )));
        }
        if url.host_str().is_none() {
            return Err(AgentError::InvalidUrl(format!("{raw}: missing host")));
        }

        Ok(url)
    }

    /// Fetch a URL and extract its title and content text
    #[instrument(skip(self))]
    pub async fn fetch(&self, raw_url: &str) -> Result<Document> {
        let url = Self::validate_url(raw_url)?;

        let response = self
            .client
            .get(url.clone())
            .send()
            .await
            .map_err(|e| AgentError::Fetch(format!("{raw_url}: {e}")))?
            .error_for_status()
            .map_err(|e| AgentError::Fetch(format!("{raw_url}: {e}")))?;

        let html = response
            .text()
            .await
            .map_err(|e| AgentError::Fetch(format!("{raw_url}: {e}")))?;

        let (title, content_text) = extract(&html, &url);
        if content_text.trim().is_empty() {
            return Err(AgentError::ContentNotFound(raw_url.to_string()));
        }

        debug!(
            "Extracted {} chars of content from {raw_url}",
            content_text.len()
        );

        Ok(Document::new(raw_url, title, html, content_text))
    }
}

/// Human-readable source name for a URL (its host)
pub fn external_source_name(url: &str) -> String {
    Url::parse(url)
        .ok()
        .and_then(|u| u.host_str().map(str::to_string))
        .unwrap_or_else(|| "web".to_string())
}

/// Extract (title, content text) from raw HTML
fn extract(html: &str, url: &Url) -> (String, String) {
    let document = Html::parse_document(html);

    let title = extract_title(&document).unwrap_or_else(|| url.to_string());
    let content = extract_content(&document);

    (title, content)
}

/// Page title from `<title>`, falling back to the first `<h1>`
fn extract_title(document: &Html) -> Option<String> {
    for selector_str in ["title", "h1"] {
        if let Ok(selector) = Selector::parse(selector_str) {
            if let Some(element) = document.select(&selector).next() {
                let title: String = element.text().collect();
                let title = title.trim();
                if !title.is_empty() {
                    return Some(title.to_string());
                }
            }
        }
    }

    None
}

/// Primary content text: named/semantic regions first, then whole body
fn extract_content(document: &Html) -> String {
    for selector_str in CONTENT_SELECTORS {
        if let Ok(selector) = Selector::parse(selector_str) {
            if let Some(element) = document.select(&selector).next() {
                let fragment = Html::parse_fragment(&element.html());
                let text = extract_text(&fragment);
                if !text.trim().is_empty() {
                    return text;
                }
            }
        }
    }

    // Fallback: whole body, not a failure
    extract_text(document)
}

/// Readable text from content-bearing elements, normalized whitespace.
///
/// Pages that carry their text in bare `div`s or text nodes have no
/// content-bearing elements at all; those fall back to the full text of
/// the body (or of the fragment, for a named region) so they still
/// produce a document instead of a false `ContentNotFound`.
fn extract_text(document: &Html) -> String {
    let Ok(selector) = Selector::parse("p, h1, h2, h3, h4, h5, h6, li") else {
        return String::new();
    };

    let mut paragraphs: Vec<String> = Vec::new();
    for element in document.select(&selector) {
        let text: String = element.text().collect::<Vec<_>>().join(" ");
        let cleaned = text.split_whitespace().collect::<Vec<_>>().join(" ");
        if !cleaned.is_empty() {
            paragraphs.push(cleaned);
        }
    }

    if !paragraphs.is_empty() {
        return paragraphs.join("\n\n");
    }

    let body = Selector::parse("body")
        .ok()
        .and_then(|selector| document.select(&selector).next());
    let text: String = match body {
        Some(element) => element.text().collect::<Vec<_>>().join(" "),
        None => document.root_element().text().collect::<Vec<_>>().join(" "),
    };
    text.split_whitespace().collect::<Vec<_>>().join(" ")
}
