//! Admission control for sitemap fetches
//!
//! Every fetch in a crawl, at any depth of the index tree, goes through one
//! shared [`FetchGate`]. Permits cover only the HTTP request itself, so an
//! index waiting on its children never holds one.

use crate::config::CrawlerConfig;
use std::sync::Arc;
use tokio::sync::{OwnedSemaphorePermit, Semaphore};

/// Global limit on in-flight fetches
#[derive(Debug, Clone)]
pub struct FetchGate {
    semaphore: Arc<Semaphore>,
}

impl FetchGate {
    /// Creates a gate admitting at most `capacity` concurrent fetches
    ///
    /// A capacity of zero is raised to one so the crawl can always progress.
    pub fn new(capacity: usize) -> Self {
        Self {
            semaphore: Arc::new(Semaphore::new(capacity.max(1))),
        }
    }

    /// Creates a gate sized from the crawler configuration
    pub fn from_config(config: &CrawlerConfig) -> Self {
        Self::new(config.max_concurrent_fetches as usize)
    }

    /// Waits for a fetch slot
    ///
    /// The slot is released when the returned permit is dropped. Returns
    /// `None` only if the gate has been closed.
    pub async fn admit(&self) -> Option<OwnedSemaphorePermit> {
        self.semaphore.clone().acquire_owned().await.ok()
    }

    /// Slots not currently in use
    #[cfg(test)]
    fn available(&self) -> usize {
        self.semaphore.available_permits()
    }
}
