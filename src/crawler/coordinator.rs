//! Crawler coordinator - recursive sitemap search
//!
//! This module walks a sitemap tree:
//! - Fetching and parsing each sitemap
//! - Spawning one task per child of an index and joining them all
//! - Filtering urlsets and streaming matches to the reporter
//! - Containing every failure to the branch that raised it

use crate::config::SearchQuery;
use crate::crawler::filter::filter_urls;
use crate::crawler::parser::{parse_sitemap, SitemapDocument};
use crate::crawler::scheduler::FetchGate;
use crate::crawler::fetch_sitemap;
use crate::output::{CrawlSummary, Event, Reporter, Severity};
use reqwest::Client;
use std::future::Future;
use std::pin::Pin;
use std::sync::Arc;

/// Boxed future for one branch, so branches can spawn branches
type BranchFuture = Pin<Box<dyn Future<Output = CrawlSummary> + Send + 'static>>;

/// Shared, read-only crawl context
struct Context {
    client: Client,
    query: SearchQuery,
    reporter: Arc<dyn Reporter>,
    gate: FetchGate,
}

/// Recursive sitemap crawler
///
/// Cloning is cheap; every clone shares the same client, query, reporter and
/// fetch gate.
#[derive(Clone)]
pub struct Crawler {
    context: Arc<Context>,
}

impl Crawler {
    /// Creates a new crawler
    ///
    /// # Arguments
    ///
    /// * `client` - HTTP client used for every fetch
    /// * `query` - The validated search term
    /// * `reporter` - Sink for every crawl event
    /// * `gate` - Limit on concurrent fetches
    pub fn new(
        client: Client,
        query: SearchQuery,
        reporter: Arc<dyn Reporter>,
        gate: FetchGate,
    ) -> Self {
        Self {
            context: Arc::new(Context {
                client,
                query,
                reporter,
                gate,
            }),
        }
    }

    /// Searches the sitemap tree rooted at `root_url`
    ///
    /// Matches are reported as soon as each urlset is filtered. The returned
    /// future completes once every branch has finished, successfully or not.
    pub async fn crawl(&self, root_url: &str) -> CrawlSummary {
        self.context.reporter.report(Event::Started {
            term: self.context.query.term().to_string(),
            root_url: root_url.to_string(),
        });

        self.clone().branch(root_url.to_string(), Vec::new()).await
    }

    /// Processes one sitemap and everything below it
    ///
    /// `ancestors` holds the index URLs leading to `url`.
    fn branch(self, url: String, ancestors: Vec<String>) -> BranchFuture {
        Box::pin(async move {
            let mut summary = CrawlSummary::new();
            let reporter = &self.context.reporter;

            let body = match self.fetch(&url).await {
                Ok(body) => body,
                Err(e) => {
                    summary.fetch_failures += 1;
                    reporter.report(Event::Error {
                        context: url,
                        cause: format!("fetch failed: {}", e.cause),
                    });
                    return summary;
                }
            };
            summary.sitemaps_fetched += 1;

            if reporter.enabled(Severity::Debug) {
                reporter.report(Event::ParsedBody {
                    url: url.clone(),
                    raw: body.clone(),
                });
            }

            let document = match parse_sitemap(&body) {
                Ok(document) => document,
                Err(e) => {
                    summary.parse_failures += 1;
                    reporter.report(Event::Error {
                        context: url,
                        cause: format!("parse failed: {}", e),
                    });
                    return summary;
                }
            };
            drop(body);

            match document {
                SitemapDocument::Index { children } => {
                    summary.indexes += 1;
                    let mut chain = ancestors;
                    chain.push(url);
                    summary.merge(&self.fan_out(children, chain).await);
                }
                SitemapDocument::UrlSet { urls } => {
                    summary.merge(&self.search_urlset(&url, &urls));
                }
            }

            summary
        })
    }

    /// Crawls every child of an index concurrently and joins them
    async fn fan_out(&self, children: Vec<String>, chain: Vec<String>) -> CrawlSummary {
        let mut summary = CrawlSummary::new();
        let reporter = &self.context.reporter;
        let mut handles = Vec::with_capacity(children.len());

        for (index, child) in children.into_iter().enumerate() {
            if chain.contains(&child) {
                summary.cycles_skipped += 1;
                reporter.report(Event::CycleSkipped { url: child });
                continue;
            }

            reporter.report(Event::FetchingChild {
                index,
                url: child.clone(),
            });

            let task = tokio::spawn(self.clone().branch(child.clone(), chain.clone()));
            handles.push((child, task));
        }

        // Every child is already running; join order does not affect reporting
        for (child, task) in handles {
            match task.await {
                Ok(child_summary) => summary.merge(&child_summary),
                Err(e) => {
                    summary.aborted_branches += 1;
                    reporter.report(Event::Error {
                        context: child,
                        cause: format!("branch aborted: {}", e),
                    });
                }
            }
        }

        summary
    }

    /// Filters a urlset and reports each match
    fn search_urlset(&self, sitemap_url: &str, urls: &[String]) -> CrawlSummary {
        let reporter = &self.context.reporter;

        reporter.report(Event::Searching {
            url: sitemap_url.to_string(),
            url_count: urls.len(),
        });

        let found = filter_urls(urls, self.context.query.term());
        if found.is_empty() {
            reporter.report(Event::NoMatches {
                sitemap_url: sitemap_url.to_string(),
            });
        }

        for matched in &found {
            reporter.report(Event::FoundMatch {
                sitemap_url: sitemap_url.to_string(),
                matched_url: matched.to_string(),
            });
        }

        CrawlSummary {
            urls_scanned: urls.len() as u64,
            matches: found.len() as u64,
            ..CrawlSummary::default()
        }
    }

    /// Fetches a sitemap once a slot is free
    async fn fetch(&self, url: &str) -> Result<String, crate::FetchError> {
        let _permit = self.context.gate.admit().await;
        tracing::trace!(url, "fetching sitemap");
        fetch_sitemap(&self.context.client, url).await
    }
}
