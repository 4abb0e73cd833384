//! sitemap-search: find page URLs containing a term across a sitemap tree
//!
//! This crate walks a sitemap index (and any nested indexes), fetches every
//! referenced urlset, and reports each page URL that contains the search term.

pub mod config;
pub mod crawler;
pub mod output;

use thiserror::Error;

/// Main error type for startup failures
///
/// Per-sitemap failures ([`FetchError`], [`ParseError`]) never surface here;
/// they are reported and end only the branch that raised them.
#[derive(Debug, Error)]
pub enum SearchError {
    #[error("Configuration error: {0}")]
    Config(#[from] ConfigError),

    #[error("Invalid search query: {0}")]
    Query(#[from] QueryError),

    #[error("HTTP client error: {0}")]
    Client(#[from] reqwest::Error),
}

/// Configuration-specific errors
#[derive(Debug, Error)]
pub enum ConfigError {
    #[error("Failed to read config file: {0}")]
    Io(#[from] std::io::Error),

    #[error("Failed to parse TOML: {0}")]
    Parse(#[from] toml::de::Error),

    #[error("Validation error: {0}")]
    Validation(String),

    #[error("Invalid sitemap URL: {0}")]
    InvalidUrl(String),
}

/// Search term precondition failures
#[derive(Debug, Error, PartialEq, Eq)]
pub enum QueryError {
    #[error("Search term empty")]
    Missing,

    #[error("Search term too short: {length} characters, at least {min} required")]
    TooShort { length: usize, min: usize },
}

/// Why a single fetch failed
#[derive(Debug, Error, Clone, PartialEq, Eq)]
pub enum FetchCause {
    #[error("HTTP status {0}")]
    Status(u16),

    #[error("request timeout")]
    Timeout,

    #[error("connection failed: {0}")]
    Connect(String),

    #[error("failed to read body: {0}")]
    Body(String),

    #[error("{0}")]
    Request(String),
}

/// A sitemap could not be fetched
#[derive(Debug, Error, Clone, PartialEq, Eq)]
#[error("Failed to fetch {url}: {cause}")]
pub struct FetchError {
    pub url: String,
    pub cause: FetchCause,
}

/// A fetched body is not a sitemap document
#[derive(Debug, Error, Clone, PartialEq, Eq)]
pub enum ParseError {
    #[error("Malformed XML at byte {position}: {message}")]
    Xml { position: u64, message: String },

    #[error("Unrecognized root element <{0}>")]
    UnknownRoot(String),

    #[error("Document has no root element")]
    Empty,
}

/// Result type alias for startup operations
pub type Result<T> = std::result::Result<T, SearchError>;

/// Result type alias for configuration operations
pub type ConfigResult<T> = std::result::Result<T, ConfigError>;

// Re-export commonly used types
pub use config::{Config, SearchQuery};
pub use crawler::{search, Crawler, SitemapDocument};
pub use output::{CrawlSummary, Event, MemoryReporter, Reporter, Severity, TracingReporter};
