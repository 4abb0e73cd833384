//! Configuration module for sitemap-search
//!
//! This module handles loading, parsing, and validating the optional TOML
//! configuration file, and holds the validated [`SearchQuery`].
//!
//! # Example
//!
//! ```no_run
//! use sitemap_search::config::load_config;
//! use std::path::Path;
//!
//! let config = load_config(Path::new("sitemap-search.toml")).unwrap();
//! println!("Max concurrent fetches: {}", config.crawler.max_concurrent_fetches);
//! ```

mod parser;
mod query;
mod types;
mod validation;

// Re-export types
pub use query::SearchQuery;
pub use types::{Config, CrawlerConfig, FetcherConfig};

// Re-export parser and validation functions
pub use parser::{load_config, parse_config};
pub use validation::{validate, validate_sitemap_url};
