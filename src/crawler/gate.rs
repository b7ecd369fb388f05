//! Global admission control for network requests
//!
//! Every request the crawler makes, listing or detail page, first takes a
//! permit from the same gate. Batches control how many fetches are scheduled
//! together; the gate controls how many are actually in flight.

use crate::{Result, ScraperError};
use std::sync::Arc;
use tokio::sync::{OwnedSemaphorePermit, Semaphore};

/// Default number of concurrent requests
pub const DEFAULT_MAX_CONCURRENT: usize = 5;

/// A counting gate capping simultaneous in-flight requests
///
/// Cloning the gate shares the same permit pool.
#[derive(Debug, Clone)]
pub struct ConcurrencyGate {
    semaphore: Arc<Semaphore>,
    capacity: usize,
}

/// A held slot; the slot is released when the permit is dropped
pub type GatePermit = OwnedSemaphorePermit;

impl ConcurrencyGate {
    /// Creates a gate admitting at most `capacity` holders (minimum 1)
    pub fn new(capacity: usize) -> Self {
        let capacity = capacity.max(1);
        Self {
            semaphore: Arc::new(Semaphore::new(capacity)),
            capacity,
        }
    }

    /// Waits for a free slot
    ///
    /// Only the calling task is suspended while the gate is at capacity.
    pub async fn acquire(&self) -> Result<GatePermit> {
        self.semaphore
            .clone()
            .acquire_owned()
            .await
            .map_err(|_| ScraperError::GateClosed)
    }

    /// Number of slots currently free
    pub fn available(&self) -> usize {
        self.semaphore.available_permits()
    }

    /// Maximum number of concurrent holders
    pub fn capacity(&self) -> usize {
        self.capacity
    }
}

impl Default for ConcurrencyGate {
    fn default() -> Self {
        Self::new(DEFAULT_MAX_CONCURRENT)
    }
}
