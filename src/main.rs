//! Sitefold main entry point
//!
//! Command-line interface for the Sitefold site-to-document crawler.

use clap::Parser;
use sitefold::config::load_config_with_hash;
use sitefold::crawler::{Crawler, HttpFetcher};
use sitefold::output::write_document;
use std::path::PathBuf;
use tracing_subscriber::EnvFilter;

/// Sitefold: fold a website into a single document
///
/// Sitefold crawls a site breadth-first from a seed URL, staying on the
/// seed's domain, converts each page to text, and writes one combined
/// markdown document in visitation order.
#[derive(Parser, Debug)]
#[command(name = "sitefold")]
#[command(version)]
#[command(about = "Fold a website into a single document", long_about = None)]
struct Cli {
    /// Path to TOML configuration file
    #[arg(value_name = "CONFIG")]
    config: PathBuf,

    /// Increase logging verbosity (-v, -vv, -vvv)
    #[arg(short, long, action = clap::ArgAction::Count)]
    verbose: u8,

    /// Suppress non-error output
    #[arg(short, long, conflicts_with = "verbose")]
    quiet: bool,

    /// Validate config and show what would be crawled without fetching
    #[arg(long)]
    dry_run: bool,
}

#[tokio::main]
async fn main() -> Result<(), Box<dyn std::error::Error>> {
    let cli = Cli::parse();

    setup_logging(cli.verbose, cli.quiet);

    tracing::info!("Loading configuration from: {}", cli.config.display());
    let (config, config_hash) = match load_config_with_hash(&cli.config) {
        Ok((cfg, hash)) => {
            tracing::info!("Configuration loaded successfully (hash: {})", hash);
            (cfg, hash)
        }
        Err(e) => {
            tracing::error!("Failed to load configuration: {}", e);
            return Err(e.into());
        }
    };

    if cli.dry_run {
        handle_dry_run(&config, &config_hash);
        return Ok(());
    }

    handle_crawl(config).await
}

/// Sets up the logging/tracing subscriber based on verbosity level
fn setup_logging(verbose: u8, quiet: bool) {
    let filter = if quiet {
        EnvFilter::new("error")
    } else {
        match verbose {
            0 => EnvFilter::new("sitefold=info,warn"),
            1 => EnvFilter::new("sitefold=debug,info"),
            2 => EnvFilter::new("sitefold=trace,debug"),
            _ => EnvFilter::new("trace"),
        }
    };

    tracing_subscriber::fmt()
        .with_env_filter(filter)
        .with_target(false)
        .with_thread_ids(false)
        .with_file(false)
        .init();
}

/// Handles the --dry-run mode: validates config and shows the crawl plan
fn handle_dry_run(config: &sitefold::config::Config, config_hash: &str) {
    println!("=== Sitefold Dry Run ===\n");

    println!("Crawler Configuration:");
    println!("  Seed URL: {}", config.crawler.seed_url);
    match config.crawler.max_pages {
        Some(cap) => println!("  Max pages: {}", cap),
        None => println!("  Max pages: unbounded"),
    }
    println!("  Scope: {:?}", config.crawler.scope);
    if let Some(root) = &config.crawler.root_domain_override {
        println!("  Root domain override: {}", root);
    }

    println!("\nUser Agent:");
    println!("  {}", config.user_agent.header_value());

    println!("\nOutput:");
    println!("  Document: {}", config.output.document_path);

    println!("\nConfig hash: {}", config_hash);
    println!("\n✓ Configuration is valid");
}

/// Handles the main crawl operation
async fn handle_crawl(
    config: sitefold::config::Config,
) -> Result<(), Box<dyn std::error::Error>> {
    let fetcher = HttpFetcher::new(&config.user_agent)?;
    let crawler = Crawler::new(&config.crawler, fetcher)?;

    // Ctrl-C finalizes whatever has been aggregated so far
    let stop = crawler.stop_signal();
    tokio::spawn(async move {
        if tokio::signal::ctrl_c().await.is_ok() {
            tracing::info!("Interrupt received, finishing the current page");
            stop.stop();
        }
    });

    let report = crawler.run().await;

    tracing::info!(
        "Visited {} pages ({} failed, {} without content) in {:.2}s",
        report.visited.len(),
        report.fetch_failures,
        report.empty_pages,
        report.elapsed.as_secs_f64()
    );

    if report.document.is_empty() {
        tracing::warn!(
            "No content extracted; {} was not written",
            config.output.document_path
        );
        return Ok(());
    }

    let output_path = PathBuf::from(&config.output.document_path);
    write_document(&report.document, &output_path)?;
    tracing::info!(
        "Wrote {} sections to {}",
        report.document.sections().len(),
        output_path.display()
    );

    Ok(())
}
