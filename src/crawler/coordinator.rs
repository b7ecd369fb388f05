//! Crawler coordinator - main crawl orchestration logic
//!
//! This module ties the pipeline together:
//! - Building the HTTP client and the shared concurrency gate
//! - Walking the collection pages for product links
//! - Scraping detail pages batch by batch
//! - Writing the dataset and producing the run report

use crate::config::Config;
use crate::crawler::batch::{BatchOrchestrator, BatchOutcome};
use crate::crawler::fetcher::{build_http_client, Fetcher};
use crate::crawler::gate::ConcurrencyGate;
use crate::crawler::pagination::{PaginationWalker, WalkOutcome};
use crate::output::{write_dataset, CrawlReport};
use crate::Result;
use std::path::Path;
use url::Url;

/// Main crawler coordinator structure
pub struct Coordinator {
    config: Config,
    collection_url: Url,
    fetcher: Fetcher,
}

impl Coordinator {
    /// Creates a new coordinator instance
    ///
    /// # Arguments
    ///
    /// * `config` - The scraper configuration
    ///
    /// # Returns
    ///
    /// * `Ok(Coordinator)` - Successfully created coordinator
    /// * `Err(ScraperError)` - Invalid collection URL or HTTP client failure
    pub fn new(config: Config) -> Result<Self> {
        let collection_url = Url::parse(&config.scraper.collection_url)?;
        let client = build_http_client(&config.http, config.scraper.request_timeout())?;
        let gate = ConcurrencyGate::new(config.scraper.max_concurrent as usize);

        Ok(Self {
            config,
            collection_url,
            fetcher: Fetcher::new(client, gate),
        })
    }

    /// Walks the collection and scrapes every discovered book
    ///
    /// Nothing is written to disk; see [`Coordinator::run`] for the full
    /// pipeline.
    pub async fn scrape(&self) -> (WalkOutcome, BatchOutcome) {
        let walker = PaginationWalker::new(self.fetcher.clone());
        let walk = walker
            .walk(&self.collection_url, self.config.scraper.max_pages)
            .await;

        tracing::info!("Total books to scrape: {}", walk.links.len());

        let orchestrator = BatchOrchestrator::new(
            self.fetcher.clone(),
            self.config.scraper.batch_size as usize,
            self.config.scraper.batch_delay(),
        );
        let batches = orchestrator.run(&walk.links).await;

        (walk, batches)
    }

    /// Runs the full crawl and writes the dataset
    pub async fn run(&self) -> Result<CrawlReport> {
        let mut report = CrawlReport::new(self.collection_url.as_str());
        tracing::info!("Starting crawl of {}", self.collection_url);

        let (walk, batches) = self.scrape().await;
        report.record_walk(&walk);
        report.record_batches(&batches);

        let dataset_path = Path::new(&self.config.output.dataset_path);
        let outcome = write_dataset(&batches.records, dataset_path)?;
        report.finish(outcome);

        tracing::info!(
            "Crawl completed: {} books scraped, {} failed",
            report.records_scraped,
            report.failed
        );

        Ok(report)
    }
}

/// Runs the main crawl operation
///
/// # Example
///
/// ```no_run
/// use alinino_scraper::config::load_config;
/// use alinino_scraper::crawler::run_crawl;
/// use std::path::Path;
///
/// # async fn example() -> Result<(), Box<dyn std::error::Error>> {
/// let config = load_config(Path::new("scraper.toml"))?;
/// let report = run_crawl(config).await?;
/// println!("{} books", report.records_scraped);
/// # Ok(())
/// # }
/// ```
pub async fn run_crawl(config: Config) -> Result<CrawlReport> {
    let coordinator = Coordinator::new(config)?;
    coordinator.run().await
}
