use crate::url::CrawlScope;
use serde::Deserialize;

/// Main configuration structure for Sitefold
#[derive(Debug, Clone, Deserialize)]
pub struct Config {
    pub crawler: CrawlerConfig,
    #[serde(rename = "user-agent")]
    pub user_agent: UserAgentConfig,
    pub output: OutputConfig,
}

/// Crawler behavior configuration
#[derive(Debug, Clone, Deserialize)]
pub struct CrawlerConfig {
    /// Absolute URL the crawl starts from
    #[serde(rename = "seed-url")]
    pub seed_url: String,

    /// Cap on the total number of pages visited (unbounded when absent)
    #[serde(rename = "max-pages")]
    pub max_pages: Option<usize>,

    /// Which discovered URLs belong to the crawl
    #[serde(default)]
    pub scope: CrawlScope,

    /// Overrides the root domain derived from the seed URL
    #[serde(rename = "root-domain-override")]
    pub root_domain_override: Option<String>,
}

/// User agent identification configuration
#[derive(Debug, Clone, Deserialize)]
pub struct UserAgentConfig {
    /// Name of the crawler
    #[serde(rename = "crawler-name")]
    pub crawler_name: String,

    /// Version of the crawler
    #[serde(rename = "crawler-version")]
    pub crawler_version: String,

    /// URL with information about the crawler
    #[serde(rename = "contact-url")]
    pub contact_url: String,

    /// Email address for crawler-related contact
    #[serde(rename = "contact-email")]
    pub contact_email: String,
}

impl UserAgentConfig {
    /// Formats the user agent header value
    ///
    /// Format: `CrawlerName/Version (+ContactURL; ContactEmail)`
    pub fn header_value(&self) -> String {
        format!(
            "{}/{} (+{}; {})",
            self.crawler_name, self.crawler_version, self.contact_url, self.contact_email
        )
    }
}

/// Output configuration
#[derive(Debug, Clone, Deserialize)]
pub struct OutputConfig {
    /// Path the aggregated document is written to
    #[serde(rename = "document-path")]
    pub document_path: String,
}
