//! URL handling module for Sitefold
//!
//! This module provides URL normalization, relative-reference resolution,
//! domain extraction, and the crawl-scope membership rule.

mod domain;
mod normalize;

use serde::Deserialize;
use url::Url;

// Re-export main functions
pub use domain::{extract_domain, same_domain};
pub use normalize::{normalize_url, resolve};

/// Rule deciding which discovered URLs belong to the crawl
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default, Deserialize)]
#[serde(rename_all = "kebab-case")]
pub enum CrawlScope {
    /// Accept any URL on the same network location as the crawl root
    #[default]
    Domain,

    /// Accept only URLs whose string form starts with the seed URL,
    /// i.e. the seed's path must prefix the candidate's path
    SeedPrefix,
}

impl CrawlScope {
    /// Returns true if `candidate` belongs to a crawl rooted at `root`
    ///
    /// The decision is always made against the crawl root, never the page
    /// the link was found on, so a redirect onto another host cannot drag
    /// the crawl off-domain.
    ///
    /// # Examples
    ///
    /// ```
    /// use sitefold::url::CrawlScope;
    /// use url::Url;
    ///
    /// let root = Url::parse("https://example.test/docs/").unwrap();
    /// let inside = Url::parse("https://example.test/docs/setup").unwrap();
    /// let elsewhere = Url::parse("https://example.test/blog").unwrap();
    ///
    /// assert!(CrawlScope::Domain.permits(&root, &elsewhere));
    /// assert!(CrawlScope::SeedPrefix.permits(&root, &inside));
    /// assert!(!CrawlScope::SeedPrefix.permits(&root, &elsewhere));
    /// ```
    pub fn permits(&self, root: &Url, candidate: &Url) -> bool {
        match self {
            Self::Domain => same_domain(root, candidate),
            Self::SeedPrefix => {
                same_domain(root, candidate) && candidate.path().starts_with(root.path())
            }
        }
    }
}
