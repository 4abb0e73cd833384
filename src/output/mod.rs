//! Output module for crawl events
//!
//! This module handles:
//! - The [`Reporter`] interface every crawl component reports through
//! - Rendering events as log lines via `tracing`
//! - Capturing events in memory for tests and embedders
//! - Printing the final crawl summary

mod memory;
pub mod stats;
mod tracing_output;
mod traits;

pub use memory::MemoryReporter;
pub use stats::print_summary;
pub use tracing_output::TracingReporter;
pub use traits::{CrawlSummary, Event, ParseSeverityError, Reporter, Severity};
