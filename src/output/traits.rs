//! Reporter trait and event types
//!
//! This module defines the interface every crawl component reports through,
//! the events it carries, and the summary returned when a crawl finishes.

use std::fmt;
use std::str::FromStr;
use thiserror::Error;

/// Longest prefix of a raw body rendered by [`Event::ParsedBody`]
const MAX_RENDERED_BODY: usize = 2048;

/// Severity attached to every [`Event`]
///
/// Ordered from least to most severe, so `a >= b` means "a is at least as
/// severe as b".
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, PartialOrd, Ord, Hash)]
pub enum Severity {
    Debug,
    Verbose,
    #[default]
    Info,
    Warning,
    Error,
}

impl Severity {
    /// The lowercase name accepted on the command line
    pub fn as_str(&self) -> &'static str {
        match self {
            Severity::Debug => "debug",
            Severity::Verbose => "verbose",
            Severity::Info => "info",
            Severity::Warning => "warning",
            Severity::Error => "error",
        }
    }

    /// `tracing` filter directive that lets exactly this severity and above through
    pub fn filter_directive(&self) -> &'static str {
        match self {
            Severity::Debug => "trace",
            Severity::Verbose => "debug",
            Severity::Info => "info",
            Severity::Warning => "warn",
            Severity::Error => "error",
        }
    }
}

impl fmt::Display for Severity {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

/// Unknown severity name
#[derive(Debug, Error, PartialEq, Eq)]
#[error("unknown log level '{0}', expected one of: error, warning, info, verbose, debug")]
pub struct ParseSeverityError(String);

impl FromStr for Severity {
    type Err = ParseSeverityError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.to_ascii_lowercase().as_str() {
            "error" => Ok(Severity::Error),
            "warning" | "warn" => Ok(Severity::Warning),
            "info" => Ok(Severity::Info),
            "verbose" => Ok(Severity::Verbose),
            "debug" => Ok(Severity::Debug),
            _ => Err(ParseSeverityError(s.to_string())),
        }
    }
}

/// Something that happened during a crawl
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Event {
    /// A crawl is starting from the root sitemap
    Started { term: String, root_url: String },

    /// A urlset is being searched
    Searching { url: String, url_count: usize },

    /// A child sitemap of an index is being fetched
    FetchingChild { index: usize, url: String },

    /// A fetched body has been parsed
    ParsedBody { url: String, raw: String },

    /// A page URL contains the search term
    FoundMatch {
        sitemap_url: String,
        matched_url: String,
    },

    /// A urlset contained no matching URL
    NoMatches { sitemap_url: String },

    /// A sitemap already on the current index chain was not fetched again
    CycleSkipped { url: String },

    /// A branch ended on an error
    Error { context: String, cause: String },
}

impl Event {
    /// The fixed severity of this event
    pub fn severity(&self) -> Severity {
        match self {
            Event::Started { .. }
            | Event::Searching { .. }
            | Event::FetchingChild { .. }
            | Event::NoMatches { .. } => Severity::Verbose,
            Event::ParsedBody { .. } => Severity::Debug,
            Event::FoundMatch { .. } => Severity::Info,
            Event::CycleSkipped { .. } => Severity::Warning,
            Event::Error { .. } => Severity::Error,
        }
    }
}

impl fmt::Display for Event {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Event::Started { term, root_url } => {
                write!(f, "Searching for {} from {}", term, root_url)
            }
            Event::Searching { url, url_count } => {
                write!(f, "Searching {} ({} urls)", url, url_count)
            }
            Event::FetchingChild { index, url } => write!(f, "{}: Fetching {}", index, url),
            Event::ParsedBody { url, raw } => {
                if raw.len() > MAX_RENDERED_BODY {
                    let mut end = MAX_RENDERED_BODY;
                    while !raw.is_char_boundary(end) {
                        end -= 1;
                    }
                    write!(f, "{}: {}... ({} bytes)", url, &raw[..end], raw.len())
                } else {
                    write!(f, "{}: {}", url, raw)
                }
            }
            Event::FoundMatch {
                sitemap_url,
                matched_url,
            } => write!(f, "* {} (from {})", matched_url, sitemap_url),
            Event::NoMatches { sitemap_url } => write!(f, "No matches in {}", sitemap_url),
            Event::CycleSkipped { url } => {
                write!(f, "Skipping {}: already visited on this index chain", url)
            }
            Event::Error { context, cause } => write!(f, "{}: {}", context, cause),
        }
    }
}

/// Sink for crawl events
///
/// Reporters are shared by every concurrent branch of a crawl, so
/// implementations must be thread-safe. Reporting never fails and never
/// influences what the crawler does next.
pub trait Reporter: Send + Sync {
    /// Lowest severity this reporter renders
    fn threshold(&self) -> Severity;

    /// Renders an event that has already passed the threshold check
    fn render(&self, event: &Event);

    /// Reports an event, dropping it if it is below the threshold
    fn report(&self, event: Event) {
        if self.enabled(event.severity()) {
            self.render(&event);
        }
    }

    /// Whether events of `severity` would be rendered
    ///
    /// Callers use this to skip building expensive events.
    fn enabled(&self, severity: Severity) -> bool {
        severity >= self.threshold()
    }
}

/// Totals for a finished crawl
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub struct CrawlSummary {
    /// Sitemap documents fetched successfully
    pub sitemaps_fetched: u64,

    /// Index documents among them
    pub indexes: u64,

    /// Page URLs checked against the term
    pub urls_scanned: u64,

    /// Page URLs that matched
    pub matches: u64,

    /// Sitemaps that could not be fetched
    pub fetch_failures: u64,

    /// Sitemaps that could not be parsed
    pub parse_failures: u64,

    /// Child branches that ended abnormally (panicked task)
    pub aborted_branches: u64,

    /// Sitemaps skipped because they were already on the index chain
    pub cycles_skipped: u64,
}

impl CrawlSummary {
    /// Creates a new empty crawl summary
    pub fn new() -> Self {
        Self::default()
    }

    /// Adds a child branch's totals into this one
    pub fn merge(&mut self, other: &CrawlSummary) {
        self.sitemaps_fetched += other.sitemaps_fetched;
        self.indexes += other.indexes;
        self.urls_scanned += other.urls_scanned;
        self.matches += other.matches;
        self.fetch_failures += other.fetch_failures;
        self.parse_failures += other.parse_failures;
        self.aborted_branches += other.aborted_branches;
        self.cycles_skipped += other.cycles_skipped;
    }

    /// Total number of branches that ended on an error
    pub fn total_errors(&self) -> u64 {
        self.fetch_failures + self.parse_failures + self.aborted_branches
    }
}
