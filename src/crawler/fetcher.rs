//! Page fetching
//!
//! This module defines the fetcher seam the orchestrator crawls through:
//! the [`PageFetcher`] trait, the [`FetchedPage`] it yields, and the
//! [`FetchError`] taxonomy. [`HttpFetcher`] is the production
//! implementation; it reuses one HTTP session for every page of a run and
//! delegates HTML-to-text conversion to a pluggable function, so the crawl
//! core never prescribes how conversion happens.

use crate::config::UserAgentConfig;
use reqwest::Client;
use scraper::{Html, Selector};
use std::time::Duration;
use thiserror::Error;
use url::Url;

/// A successfully fetched page
///
/// The raw markup is used only for link discovery; the converted text is
/// what ends up in the aggregated document (and may be empty).
#[derive(Debug, Clone)]
pub struct FetchedPage {
    /// The URL that was fetched
    pub url: Url,

    /// Raw page markup, kept for link extraction
    pub markup: String,

    /// Normalized text representation of the page content
    pub text: String,
}

/// Ways a fetch can fail; none of them aborts the crawl
#[derive(Debug, Error)]
pub enum FetchError {
    /// The page could not be retrieved at all (network error, timeout,
    /// or non-success HTTP status). Fatal for this URL only.
    #[error("transport failure for {url}: {reason}")]
    Transport { url: Url, reason: String },

    /// The page loaded but conversion produced no usable content
    /// (e.g. a non-HTML Content-Type). Worth a warning, nothing more.
    #[error("no extractable content at {url}")]
    EmptyContent { url: Url },
}

/// The page-fetch collaborator interface
///
/// Implementations are expected to reuse one session across all pages of a
/// crawl and are not assumed to be reentrant; the orchestrator never issues
/// concurrent fetches against the same fetcher.
pub trait PageFetcher {
    /// Fetches a URL, returning its raw markup and converted text
    fn fetch(
        &self,
        url: &Url,
    ) -> impl std::future::Future<Output = Result<FetchedPage, FetchError>> + Send;
}

/// Signature of the markup-to-text conversion hook
pub type Converter = Box<dyn Fn(&str) -> String + Send + Sync>;

/// HTTP fetcher backed by a single shared reqwest client
pub struct HttpFetcher {
    client: Client,
    convert: Converter,
}

impl HttpFetcher {
    /// Creates a fetcher with the default text converter
    pub fn new(user_agent: &UserAgentConfig) -> Result<Self, reqwest::Error> {
        Ok(Self {
            client: build_http_client(user_agent)?,
            convert: Box::new(|markup| markup_to_text(markup)),
        })
    }

    /// Creates a fetcher with a caller-supplied conversion function
    ///
    /// The converter receives raw markup and returns the normalized text
    /// for aggregation; returning an empty string marks the page as
    /// content-free without failing it.
    pub fn with_converter(
        user_agent: &UserAgentConfig,
        convert: Converter,
    ) -> Result<Self, reqwest::Error> {
        Ok(Self {
            client: build_http_client(user_agent)?,
            convert,
        })
    }
}

impl PageFetcher for HttpFetcher {
    async fn fetch(&self, url: &Url) -> Result<FetchedPage, FetchError> {
        let response = self
            .client
            .get(url.clone())
            .send()
            .await
            .map_err(|e| classify_request_error(url, e))?;

        let status = response.status();
        if !status.is_success() {
            return Err(FetchError::Transport {
                url: url.clone(),
                reason: format!("HTTP {}", status.as_u16()),
            });
        }

        let content_type = response
            .headers()
            .get("content-type")
            .and_then(|v| v.to_str().ok())
            .unwrap_or("")
            .to_string();

        if !content_type.contains("text/html") {
            tracing::debug!("Skipping non-HTML content type '{}' at {}", content_type, url);
            return Err(FetchError::EmptyContent { url: url.clone() });
        }

        let markup = response.text().await.map_err(|e| FetchError::Transport {
            url: url.clone(),
            reason: format!("failed to read body: {}", e),
        })?;

        let text = (self.convert)(&markup);

        Ok(FetchedPage {
            url: url.clone(),
            markup,
            text,
        })
    }
}

/// Builds the HTTP client shared across every page of a crawl
///
/// # Example
///
/// ```no_run
/// use sitefold::config::UserAgentConfig;
/// use sitefold::crawler::build_http_client;
///
/// let config = UserAgentConfig {
///     crawler_name: "sitefold".to_string(),
///     crawler_version: "0.3".to_string(),
///     contact_url: "https://example.test/about".to_string(),
///     contact_email: "crawler@example.test".to_string(),
/// };
///
/// let client = build_http_client(&config).unwrap();
/// ```
pub fn build_http_client(config: &UserAgentConfig) -> Result<Client, reqwest::Error> {
    Client::builder()
        .user_agent(config.header_value())
        .timeout(Duration::from_secs(30))
        .connect_timeout(Duration::from_secs(10))
        .gzip(true)
        .brotli(true)
        .build()
}

/// Maps reqwest request errors onto the fetch taxonomy
fn classify_request_error(url: &Url, error: reqwest::Error) -> FetchError {
    let reason = if error.is_timeout() {
        "request timeout".to_string()
    } else if error.is_connect() {
        "connection refused".to_string()
    } else {
        error.to_string()
    };

    FetchError::Transport {
        url: url.clone(),
        reason,
    }
}

/// Default markup-to-text conversion
///
/// Walks the parsed document and collects the visible text, dropping
/// script and style contents and collapsing runs of whitespace. Block
/// elements are separated by newlines so headings and paragraphs stay
/// readable in the aggregated document.
fn markup_to_text(markup: &str) -> String {
    let document = Html::parse_document(markup);

    let root = match Selector::parse("body") {
        Ok(body_selector) => document.select(&body_selector).next(),
        Err(_) => None,
    };

    let mut lines: Vec<String> = Vec::new();

    let blocks = [
        "h1", "h2", "h3", "h4", "h5", "h6", "p", "li", "pre", "blockquote", "td", "th",
    ];
    let block_selector = match Selector::parse(&blocks.join(", ")) {
        Ok(s) => s,
        Err(_) => return String::new(),
    };

    if let Some(body) = root {
        for element in body.select(&block_selector) {
            let line = collapse_whitespace(&element.text().collect::<String>());
            if !line.is_empty() {
                lines.push(line);
            }
        }

        // A body without any block elements still counts as content
        if lines.is_empty() {
            let flat = collapse_whitespace(&body.text().collect::<String>());
            if !flat.is_empty() {
                lines.push(flat);
            }
        }
    }

    lines.join("\n")
}

/// Collapses internal whitespace runs and trims the ends
fn collapse_whitespace(text: &str) -> String {
    text.split_whitespace().collect::<Vec<_>>().join(" ")
}
