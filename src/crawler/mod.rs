//! Crawler module for fetching and scraping a collection
//!
//! This module contains the crawl pipeline:
//! - A concurrency gate shared by every request
//! - HTTP fetching with per-item failure isolation
//! - Sequential pagination over collection pages
//! - Batched, gated scraping of detail pages
//! - Overall crawl coordination

mod batch;
mod coordinator;
mod fetcher;
mod gate;
mod pagination;

pub use batch::{BatchOrchestrator, BatchOutcome, DEFAULT_BATCH_SIZE};
pub use coordinator::{run_crawl, Coordinator};
pub use fetcher::{build_http_client, Fetcher};
pub use gate::{ConcurrencyGate, GatePermit, DEFAULT_MAX_CONCURRENT};
pub use pagination::{page_url, PaginationWalker, WalkOutcome};
