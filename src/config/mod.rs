//! Configuration module for Sitefold
//!
//! This module handles loading, parsing, and validating TOML configuration
//! files.
//!
//! # Example
//!
//! ```no_run
//! use sitefold::config::load_config;
//! use std::path::Path;
//!
//! let config = load_config(Path::new("sitefold.toml")).unwrap();
//! println!("Crawling from: {}", config.crawler.seed_url);
//! ```

mod parser;
mod types;
mod validation;

// Re-export types
pub use types::{Config, CrawlerConfig, OutputConfig, UserAgentConfig};

// Re-export parser functions
pub use parser::{compute_config_hash, load_config, load_config_with_hash};
