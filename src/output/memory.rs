use crate::output::traits::{Event, Reporter, Severity};
use std::sync::{Mutex, PoisonError};

/// Reporter that keeps every rendered event in memory
#[derive(Debug)]
pub struct MemoryReporter {
    threshold: Severity,
    events: Mutex<Vec<Event>>,
}

impl MemoryReporter {
    /// Creates a reporter that captures every event
    pub fn new() -> Self {
        Self::with_threshold(Severity::Debug)
    }

    /// Creates a reporter that captures events at or above `threshold`
    pub fn with_threshold(threshold: Severity) -> Self {
        Self {
            threshold,
            events: Mutex::new(Vec::new()),
        }
    }

    /// A snapshot of the captured events, in the order they were reported
    pub fn events(&self) -> Vec<Event> {
        self.events
            .lock()
            .unwrap_or_else(PoisonError::into_inner)
            .clone()
    }

    /// `(sitemap_url, matched_url)` for every captured match
    pub fn matches(&self) -> Vec<(String, String)> {
        self.events()
            .into_iter()
            .filter_map(|event| match event {
                Event::FoundMatch {
                    sitemap_url,
                    matched_url,
                } => Some((sitemap_url, matched_url)),
                _ => None,
            })
            .collect()
    }

    /// `(context, cause)` for every captured error
    pub fn errors(&self) -> Vec<(String, String)> {
        self.events()
            .into_iter()
            .filter_map(|event| match event {
                Event::Error { context, cause } => Some((context, cause)),
                _ => None,
            })
            .collect()
    }
}

impl Default for MemoryReporter {
    fn default() -> Self {
        Self::new()
    }
}

impl Reporter for MemoryReporter {
    fn threshold(&self) -> Severity {
        self.threshold
    }

    fn render(&self, event: &Event) {
        self.events
            .lock()
            .unwrap_or_else(PoisonError::into_inner)
            .push(event.clone());
    }
}
