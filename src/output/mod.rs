//! Output module for persisting crawl results
//!
//! This module handles:
//! - Writing scraped books to the CSV dataset (and reading it back)
//! - Summarizing a crawl run in a report

mod dataset;
mod report;

pub use dataset::{read_dataset, write_dataset, WriteOutcome};
pub use report::{format_report, print_report, CrawlReport};
