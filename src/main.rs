//! Alinino scraper main entry point
//!
//! This is the command-line interface for the collection scraper.

use alinino_scraper::config::{load_config_with_hash, Config};
use alinino_scraper::crawler::run_crawl;
use alinino_scraper::output::print_report;
use anyhow::Context;
use clap::Parser;
use std::path::PathBuf;
use tracing_subscriber::EnvFilter;

/// Alinino scraper: collects book data from a storefront collection
///
/// Walks every page of the configured collection, scrapes each book's detail
/// page with bounded concurrency and writes the results to a CSV dataset.
#[derive(Parser, Debug)]
#[command(name = "alinino-scraper")]
#[command(version = "1.0.0")]
#[command(about = "Scrapes a book collection into a CSV dataset", long_about = None)]
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

    /// Validate config and show what would be crawled without crawling
    #[arg(long)]
    dry_run: bool,

    /// Override the number of listing pages to walk
    #[arg(long, value_name = "N", value_parser = clap::value_parser!(u32).range(1..))]
    max_pages: Option<u32>,

    /// Override the dataset output path
    #[arg(short, long, value_name = "PATH")]
    output: Option<PathBuf>,
}

#[tokio::main]
async fn main() -> anyhow::Result<()> {
    let cli = Cli::parse();

    setup_logging(cli.verbose, cli.quiet);

    tracing::info!("Loading configuration from: {}", cli.config.display());
    let (mut config, config_hash) = load_config_with_hash(&cli.config)
        .with_context(|| format!("failed to load {}", cli.config.display()))?;
    tracing::info!("Configuration loaded successfully (hash: {})", config_hash);

    if let Some(max_pages) = cli.max_pages {
        config.scraper.max_pages = Some(max_pages);
    }
    if let Some(output) = &cli.output {
        config.output.dataset_path = output.display().to_string();
    }

    if cli.dry_run {
        handle_dry_run(&config);
        return Ok(());
    }

    let report = run_crawl(config).await.context("crawl failed")?;
    if !cli.quiet {
        print_report(&report);
    }

    Ok(())
}

/// Sets up the logging/tracing subscriber based on verbosity level
fn setup_logging(verbose: u8, quiet: bool) {
    let filter = if quiet {
        EnvFilter::new("error")
    } else {
        match verbose {
            0 => EnvFilter::new("alinino_scraper=info,warn"),
            1 => EnvFilter::new("alinino_scraper=debug,info"),
            2 => EnvFilter::new("alinino_scraper=trace,debug"),
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

/// Handles the --dry-run mode: shows the resolved configuration
fn handle_dry_run(config: &Config) {
    println!("=== Alinino Scraper Dry Run ===\n");

    println!("Collection:");
    println!("  URL: {}", config.scraper.collection_url);
    match config.scraper.max_pages {
        Some(max_pages) => println!("  Page limit: {}", max_pages),
        None => println!("  Page limit: none (until an empty page)"),
    }

    println!("\nScheduling:");
    println!("  Max concurrent requests: {}", config.scraper.max_concurrent);
    println!("  Batch size: {}", config.scraper.batch_size);
    println!("  Batch delay: {}ms", config.scraper.batch_delay_ms);
    println!("  Request timeout: {}s", config.scraper.request_timeout_secs);

    println!("\nHTTP:");
    println!("  User agent: {}", config.http.user_agent);

    println!("\nOutput:");
    println!("  Dataset: {}", config.output.dataset_path);

    println!("\n✓ Configuration is valid");
}
