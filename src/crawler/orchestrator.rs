//! Crawl orchestration
//!
//! The orchestrator drives the traversal: pop a URL from the frontier,
//! fetch it, hand its text to the document builder, discover its in-scope
//! links, enqueue the new ones, repeat until the frontier empties or the
//! crawl is cancelled. It exclusively owns the frontier and the document
//! builder for the duration of one run; a single logical worker processes
//! one URL at a time, so the fetch session is never used reentrantly.

use crate::config::CrawlerConfig;
use crate::crawler::extractor::extract_links;
use crate::crawler::fetcher::{FetchError, PageFetcher};
use crate::crawler::frontier::Frontier;
use crate::output::{AggregatedDocument, DocumentBuilder};
use crate::url::{normalize_url, CrawlScope};
use crate::SitefoldError;
use std::sync::atomic::{AtomicBool, Ordering};
use std::sync::Arc;
use std::time::{Duration, Instant};
use url::Url;

/// Cloneable cancellation handle
///
/// The crawl loop checks the signal at each iteration boundary, before the
/// next dequeue, and finalizes gracefully when it fires: everything
/// aggregated so far is kept, nothing half-written.
#[derive(Debug, Clone, Default)]
pub struct StopSignal(Arc<AtomicBool>);

impl StopSignal {
    /// Creates an unfired stop signal
    pub fn new() -> Self {
        Self::default()
    }

    /// Requests cancellation; takes effect before the next dequeue
    pub fn stop(&self) {
        self.0.store(true, Ordering::Relaxed);
    }

    /// Returns whether cancellation has been requested
    pub fn is_stopped(&self) -> bool {
        self.0.load(Ordering::Relaxed)
    }
}

/// Outcome of a crawl run
#[derive(Debug)]
pub struct CrawlReport {
    /// The aggregated document, finalized
    pub document: AggregatedDocument,

    /// Every URL visited, in breadth-first visitation order
    pub visited: Vec<Url>,

    /// Pages that could not be retrieved at all
    pub fetch_failures: usize,

    /// Pages that loaded but yielded no text
    pub empty_pages: usize,

    /// Wall-clock duration of the run
    pub elapsed: Duration,
}

/// Drives one crawl from seed to exhausted frontier
pub struct Crawler<F: PageFetcher> {
    fetcher: F,
    frontier: Frontier,
    document: DocumentBuilder,
    seed: Url,
    root: Url,
    scope: CrawlScope,
    max_pages: Option<usize>,
    stop: StopSignal,
}

impl<F: PageFetcher> Crawler<F> {
    /// Creates a crawler for the configured seed
    ///
    /// The root domain defaults to the seed's network location;
    /// `root-domain-override` swaps in another host while keeping the
    /// seed's scheme and port. An unusable seed URL is the one fatal
    /// condition and is rejected here, before the loop begins.
    pub fn new(config: &CrawlerConfig, fetcher: F) -> Result<Self, SitefoldError> {
        let seed = normalize_url(&config.seed_url)?;

        let root = match &config.root_domain_override {
            Some(host) => {
                let mut root = seed.clone();
                root.set_host(Some(host))?;
                root
            }
            None => seed.clone(),
        };

        Ok(Self {
            fetcher,
            frontier: Frontier::new(),
            document: DocumentBuilder::new(),
            seed,
            root,
            scope: config.scope,
            max_pages: config.max_pages,
            stop: StopSignal::new(),
        })
    }

    /// Returns a handle that cancels this crawl when fired
    pub fn stop_signal(&self) -> StopSignal {
        self.stop.clone()
    }

    /// Runs the crawl to completion
    ///
    /// The loop ends when the frontier empties, the stop signal fires, or
    /// the page cap is reached; all three finalize gracefully. Individual
    /// fetch failures never abort the run, so this always yields a report,
    /// even one with zero sections.
    pub async fn run(mut self) -> CrawlReport {
        let started = Instant::now();

        let mut visited: Vec<Url> = Vec::new();
        let mut fetch_failures = 0;
        let mut empty_pages = 0;

        self.frontier.enqueue(self.seed.clone());

        loop {
            if self.stop.is_stopped() {
                tracing::info!("Stop requested, finalizing {} sections", self.document.len());
                break;
            }

            if let Some(cap) = self.max_pages {
                if visited.len() >= cap {
                    tracing::info!("Reached max-pages cap of {}, finalizing", cap);
                    break;
                }
            }

            let url = match self.frontier.dequeue() {
                Some(url) => url,
                None => {
                    tracing::info!("Frontier is empty, crawl complete");
                    break;
                }
            };

            tracing::info!("Crawling: {}", url);

            match self.fetcher.fetch(&url).await {
                Ok(page) => {
                    self.frontier.mark_visited(&url);
                    visited.push(url.clone());

                    let text = page.text.trim();
                    if text.is_empty() {
                        tracing::warn!("No text extracted for {}", url);
                        empty_pages += 1;
                    } else {
                        self.document.add_section(&url, text);
                    }

                    let links = extract_links(&page.markup, &page.url, &self.root, self.scope);
                    tracing::debug!("Found {} in-scope links on {}", links.len(), url);
                    for link in links {
                        self.frontier.enqueue(link);
                    }
                }

                Err(FetchError::Transport { reason, .. }) => {
                    tracing::error!("Failed to fetch {}: {}", url, reason);
                    self.frontier.mark_visited(&url);
                    visited.push(url);
                    fetch_failures += 1;
                }

                Err(FetchError::EmptyContent { .. }) => {
                    tracing::warn!("No extractable content at {}", url);
                    self.frontier.mark_visited(&url);
                    visited.push(url);
                    empty_pages += 1;
                }
            }

            tracing::debug!(
                "Progress: {} visited, {} queued",
                visited.len(),
                self.frontier.queued_len()
            );
        }

        let elapsed = started.elapsed();
        tracing::info!(
            "Crawled {} unique pages from {} in {:.2}s",
            visited.len(),
            self.seed,
            elapsed.as_secs_f64()
        );

        CrawlReport {
            document: self.document.finalize(),
            visited,
            fetch_failures,
            empty_pages,
            elapsed,
        }
    }
}
