//! Link extraction
//!
//! Pulls anchor references out of raw page markup, resolves them against
//! the page URL, and keeps only those inside the crawl scope. Extraction
//! never fails: malformed markup yields whatever links can be recovered,
//! and a single bad href is skipped rather than aborting the page.

use crate::url::{resolve, CrawlScope};
use scraper::{Html, Selector};
use std::collections::HashSet;
use url::Url;

/// Extracts the in-scope links from a page
///
/// Anchors are resolved against `page_url`, but scope membership is always
/// judged against the crawl `root` - not the page the link was found on -
/// so a redirect onto another host cannot widen the crawl.
///
/// The result is deduplicated while preserving first-seen document order,
/// which keeps breadth-first visitation deterministic.
///
/// # Link Exclusion Rules
///
/// - `javascript:`, `mailto:`, `tel:`, `data:` schemes
/// - fragment-only anchors (`#section`)
/// - anchors carrying the `download` attribute
/// - anything that fails URL resolution
///
/// # Example
///
/// ```
/// use sitefold::crawler::extract_links;
/// use sitefold::url::CrawlScope;
/// use url::Url;
///
/// let root = Url::parse("https://example.test/").unwrap();
/// let markup = r#"<a href="/about">About</a> <a href="https://other.test/x">Away</a>"#;
/// let links = extract_links(markup, &root, &root, CrawlScope::Domain);
/// assert_eq!(links.len(), 1);
/// assert_eq!(links[0].as_str(), "https://example.test/about");
/// ```
pub fn extract_links(markup: &str, page_url: &Url, root: &Url, scope: CrawlScope) -> Vec<Url> {
    let document = Html::parse_document(markup);

    let anchor_selector = match Selector::parse("a[href]") {
        Ok(s) => s,
        Err(_) => return Vec::new(),
    };

    let mut seen = HashSet::new();
    let mut links = Vec::new();

    for element in document.select(&anchor_selector) {
        if element.value().attr("download").is_some() {
            continue;
        }

        let href = match element.value().attr("href") {
            Some(h) => h.trim(),
            None => continue,
        };

        if href.is_empty() || href.starts_with('#') {
            continue;
        }

        let resolved = match resolve(page_url, href) {
            Ok(url) => url,
            Err(e) => {
                tracing::debug!("Skipping link '{}' on {}: {}", href, page_url, e);
                continue;
            }
        };

        if !scope.permits(root, &resolved) {
            tracing::debug!("Skipping out-of-scope link {} on {}", resolved, page_url);
            continue;
        }

        if seen.insert(resolved.clone()) {
            links.push(resolved);
        }
    }

    links
}
