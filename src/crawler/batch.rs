//! Batched, gated fetching of detail pages
//!
//! The link list is cut into contiguous batches. All fetches of a batch are
//! polled together on the current task; the shared gate decides how many are
//! really in flight. A batch finishes completely, then the orchestrator
//! pauses, then the next batch starts.

use crate::crawler::fetcher::Fetcher;
use crate::record::BookRecord;
use futures::stream::{self, StreamExt};
use std::time::Duration;

/// Default number of links per batch
pub const DEFAULT_BATCH_SIZE: usize = 50;

/// Records gathered by a batch run
#[derive(Debug, Clone, Default)]
pub struct BatchOutcome {
    /// Successfully scraped books, in completion order within each batch
    pub records: Vec<BookRecord>,

    /// Links whose fetch or parse failed
    pub failed: usize,

    /// Number of batches processed
    pub batches: usize,
}

/// Runs detail fetches batch by batch
pub struct BatchOrchestrator {
    fetcher: Fetcher,
    batch_size: usize,
    batch_delay: Duration,
}

impl BatchOrchestrator {
    /// Creates an orchestrator; a zero `batch_size` is treated as 1
    pub fn new(fetcher: Fetcher, batch_size: usize, batch_delay: Duration) -> Self {
        Self {
            fetcher,
            batch_size: batch_size.max(1),
            batch_delay,
        }
    }

    /// Number of batches `link_count` links split into
    pub fn batch_count(&self, link_count: usize) -> usize {
        link_count.div_ceil(self.batch_size)
    }

    /// Fetches every link and returns the books that could be scraped
    pub async fn run(&self, links: &[String]) -> BatchOutcome {
        let total_batches = self.batch_count(links.len());
        tracing::info!(
            "Scraping {} books in {} batches of up to {}",
            links.len(),
            total_batches,
            self.batch_size
        );

        let mut outcome = BatchOutcome::default();

        for (index, batch) in links.chunks(self.batch_size).enumerate() {
            let batch_number = index + 1;
            tracing::info!(
                "Processing batch {}/{} ({} books)...",
                batch_number,
                total_batches,
                batch.len()
            );

            // Every fetch of the batch is scheduled; the gate limits how many run
            let mut in_flight = stream::iter(batch)
                .map(|url| self.fetcher.fetch_book(url))
                .buffer_unordered(batch.len());

            while let Some(result) = in_flight.next().await {
                match result {
                    Some(record) => outcome.records.push(record),
                    None => outcome.failed += 1,
                }
            }
            outcome.batches += 1;

            tracing::info!(
                "Batch {} complete. Total scraped: {}",
                batch_number,
                outcome.records.len()
            );

            if batch_number < total_batches {
                tokio::time::sleep(self.batch_delay).await;
            }
        }

        outcome
    }
}
