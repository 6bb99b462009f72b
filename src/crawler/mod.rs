//! Crawler module: fetching, link discovery, and crawl orchestration
//!
//! This module contains the crawl core:
//! - The frontier and visited-set manager
//! - The page fetcher seam and its HTTP implementation
//! - Link extraction with crawl-scope filtering
//! - The orchestrator driving the breadth-first loop

mod extractor;
mod fetcher;
mod frontier;
mod orchestrator;

pub use extractor::extract_links;
pub use fetcher::{build_http_client, Converter, FetchError, FetchedPage, HttpFetcher, PageFetcher};
pub use frontier::{Frontier, UrlState};
pub use orchestrator::{CrawlReport, Crawler, StopSignal};

use crate::config::Config;
use crate::Result;

/// Runs a complete crawl with the HTTP fetcher
///
/// Builds the shared HTTP session from the configured user agent, seeds
/// the crawler, and drives it until the frontier empties or cancellation
/// triggers. The returned stop signal from [`Crawler::stop_signal`] is not
/// exposed here; callers needing cancellation should construct the
/// [`Crawler`] themselves.
///
/// # Arguments
///
/// * `config` - The crawler configuration
///
/// # Returns
///
/// * `Ok(CrawlReport)` - The finalized document and run statistics
/// * `Err(SitefoldError)` - Startup failed (bad seed or HTTP client)
pub async fn crawl(config: &Config) -> Result<CrawlReport> {
    let fetcher = HttpFetcher::new(&config.user_agent)?;
    let crawler = Crawler::new(&config.crawler, fetcher)?;
    Ok(crawler.run().await)
}
