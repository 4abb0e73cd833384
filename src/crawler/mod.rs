//! Crawler module for sitemap fetching and searching
//!
//! This module contains the core search logic, including:
//! - HTTP fetching of sitemap documents
//! - Sitemap and sitemap-index parsing
//! - Search-term filtering of page URLs
//! - Concurrency limiting across the whole sitemap tree
//! - Overall crawl coordination

mod coordinator;
mod fetcher;
mod filter;
mod parser;
mod scheduler;

pub use coordinator::Crawler;
pub use fetcher::{build_http_client, fetch_sitemap};
pub use filter::filter_urls;
pub use parser::{parse_sitemap, SitemapDocument};
pub use scheduler::FetchGate;

use crate::config::{validate, validate_sitemap_url, Config, SearchQuery};
use crate::output::{CrawlSummary, Event, Reporter};
use crate::Result;
use std::sync::Arc;

/// Runs a complete search
///
/// This is the main entry point for a search. It will:
/// 1. Validate the search term (nothing else happens if it is invalid)
/// 2. Validate the configuration and root sitemap URL
/// 3. Build the HTTP client
/// 4. Crawl the sitemap tree, streaming events to `reporter`
///
/// # Arguments
///
/// * `config` - The crawler configuration
/// * `term` - The search term, at least [`SearchQuery::MIN_LENGTH`] characters
/// * `root_url` - The root sitemap or sitemap index
/// * `reporter` - Sink for every crawl event
///
/// # Returns
///
/// * `Ok(CrawlSummary)` - The crawl ran; individual sitemaps may still have failed
/// * `Err(SearchError)` - The search could not start
///
/// The root sitemap is fetched and reported under the string given (trimmed),
/// not a normalized form of it.
pub async fn search(
    config: &Config,
    term: &str,
    root_url: &str,
    reporter: Arc<dyn Reporter>,
) -> Result<CrawlSummary> {
    let query = match SearchQuery::new(term) {
        Ok(query) => query,
        Err(e) => {
            reporter.report(Event::Error {
                context: "search term".to_string(),
                cause: e.to_string(),
            });
            return Err(e.into());
        }
    };

    validate(config)?;
    // Validated, but crawled and reported exactly as given
    validate_sitemap_url(root_url)?;

    let client = build_http_client(&config.fetcher)?;
    let crawler = Crawler::new(client, query, reporter, FetchGate::from_config(&config.crawler));

    Ok(crawler.crawl(root_url.trim()).await)
}
