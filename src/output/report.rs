//! Run report for a completed crawl

use crate::crawler::{BatchOutcome, WalkOutcome};
use crate::output::dataset::WriteOutcome;
use chrono::{DateTime, Utc};

/// Counters and timestamps describing one crawl run
#[derive(Debug, Clone)]
pub struct CrawlReport {
    pub collection_url: String,
    pub started_at: DateTime<Utc>,
    pub finished_at: Option<DateTime<Utc>>,

    /// Listing pages requested, including the terminating one
    pub pages_requested: u32,

    /// Product links discovered on listing pages
    pub links_found: usize,

    /// Books scraped successfully
    pub records_scraped: usize,

    /// Detail pages dropped after a fetch or parse failure
    pub failed: usize,

    pub batches: usize,

    /// Result of the dataset write, once done
    pub dataset: Option<WriteOutcome>,
}

impl CrawlReport {
    /// Starts a report for `collection_url`, stamped with the current time
    pub fn new(collection_url: &str) -> Self {
        Self {
            collection_url: collection_url.to_string(),
            started_at: Utc::now(),
            finished_at: None,
            pages_requested: 0,
            links_found: 0,
            records_scraped: 0,
            failed: 0,
            batches: 0,
            dataset: None,
        }
    }

    pub fn record_walk(&mut self, walk: &WalkOutcome) {
        self.pages_requested = walk.pages_requested;
        self.links_found = walk.links.len();
    }

    pub fn record_batches(&mut self, batches: &BatchOutcome) {
        self.records_scraped = batches.records.len();
        self.failed = batches.failed;
        self.batches = batches.batches;
    }

    /// Stores the dataset outcome and stamps the finish time
    pub fn finish(&mut self, dataset: WriteOutcome) {
        self.dataset = Some(dataset);
        self.finished_at = Some(Utc::now());
    }

    pub fn duration_seconds(&self) -> Option<i64> {
        self.finished_at
            .map(|finished| (finished - self.started_at).num_seconds())
    }

    /// Percentage of discovered links that were scraped
    pub fn success_rate(&self) -> f64 {
        if self.links_found == 0 {
            0.0
        } else {
            (self.records_scraped as f64 / self.links_found as f64) * 100.0
        }
    }
}

/// Formats a report as plain text
pub fn format_report(report: &CrawlReport) -> String {
    let mut text = String::new();

    text.push_str("=== Crawl Report ===\n\n");
    text.push_str(&format!("Collection: {}\n", report.collection_url));
    text.push_str(&format!("Started: {}\n", report.started_at.to_rfc3339()));
    if let Some(finished) = report.finished_at {
        text.push_str(&format!("Finished: {}\n", finished.to_rfc3339()));
    }
    if let Some(duration) = report.duration_seconds() {
        text.push_str(&format!("Duration: {} seconds\n", duration));
    }
    text.push('\n');

    text.push_str(&format!("Listing pages requested: {}\n", report.pages_requested));
    text.push_str(&format!("Links found: {}\n", report.links_found));
    text.push_str(&format!("Batches: {}\n", report.batches));
    text.push_str(&format!("Books scraped: {}\n", report.records_scraped));
    text.push_str(&format!("Failed: {}\n", report.failed));
    text.push_str(&format!(
        "Success Rate: {:.1}% ({} / {} books)\n",
        report.success_rate(),
        report.records_scraped,
        report.links_found
    ));

    match &report.dataset {
        Some(WriteOutcome::Written { rows, path }) => {
            text.push_str(&format!("Dataset: {} rows written to {}\n", rows, path.display()));
        }
        Some(WriteOutcome::NothingToSave) => {
            text.push_str("Dataset: no data to save\n");
        }
        None => {}
    }

    text
}

/// Prints a report to stdout
pub fn print_report(report: &CrawlReport) {
    print!("{}", format_report(report));
}
