//! sitemap-search main entry point
//!
//! This is the command-line interface for the sitemap searcher.

use anyhow::anyhow;
use clap::Parser;
use sitemap_search::config::{load_config, validate_sitemap_url, Config, SearchQuery};
use sitemap_search::crawler::search;
use sitemap_search::output::{print_summary, Severity, TracingReporter};
use sitemap_search::SearchError;
use std::path::PathBuf;
use std::process::ExitCode;
use std::sync::Arc;
use tracing_subscriber::EnvFilter;

/// sitemap-search: find page URLs containing a term across a sitemap tree
///
/// Fetches the root sitemap, follows every sitemap index it references, and
/// reports each page URL that contains the search term (case-sensitive).
#[derive(Parser, Debug)]
#[command(name = "sitemap-search")]
#[command(version)]
#[command(about = "Search a sitemap tree for URLs containing a term", long_about = None)]
struct Cli {
    /// Term to look for in page URLs (at least 6 characters)
    #[arg(value_name = "SEARCH_TERM")]
    search_term: Option<String>,

    /// Root sitemap or sitemap index URL
    #[arg(value_name = "SITEMAP", env = "BASE_SITEMAP")]
    sitemap: Option<String>,

    /// Minimum severity to log: error, warning, info, verbose, debug
    #[arg(value_name = "LOG_LEVEL", default_value = "info")]
    log_level: Severity,

    /// Path to TOML configuration file
    #[arg(short, long, value_name = "FILE")]
    config: Option<PathBuf>,

    /// Print the summary after the crawl finishes
    #[arg(short, long)]
    summary: bool,

    /// Validate inputs and show what would be searched without fetching anything
    #[arg(long)]
    dry_run: bool,
}

#[tokio::main]
async fn main() -> ExitCode {
    let cli = Cli::parse();

    setup_logging(cli.log_level);

    match run(cli).await {
        Ok(code) => code,
        Err(e) => {
            tracing::error!("{}", render_error(&e));
            ExitCode::FAILURE
        }
    }
}

/// Formats a startup failure as a single log line
///
/// The top-level message already embeds its cause, so the source chain is not
/// appended again.
fn render_error(error: &anyhow::Error) -> String {
    error.to_string()
}

/// Sets up the logging/tracing subscriber for the chosen severity
fn setup_logging(level: Severity) {
    let filter = EnvFilter::new(format!(
        "sitemap_search={},warn",
        level.filter_directive()
    ));

    tracing_subscriber::fmt()
        .with_env_filter(filter)
        .with_target(false)
        .with_thread_ids(false)
        .with_file(false)
        .init();
}

/// Runs the selected mode
///
/// Individual sitemap failures do not affect the exit code; only a search
/// that could not start does.
async fn run(cli: Cli) -> anyhow::Result<ExitCode> {
    let config = match &cli.config {
        Some(path) => load_config(path).map_err(|e| {
            anyhow!("Failed to load configuration from {}: {}", path.display(), e)
        })?,
        None => Config::default(),
    };

    let term = cli.search_term.unwrap_or_default();
    let sitemap = cli.sitemap.unwrap_or_default();

    if cli.dry_run {
        handle_dry_run(&config, &term, &sitemap)?;
        return Ok(ExitCode::SUCCESS);
    }

    let reporter = Arc::new(TracingReporter::new(cli.log_level));
    match search(&config, &term, &sitemap, reporter).await {
        Ok(summary) => {
            tracing::debug!(
                "Crawl finished: {} sitemaps, {} matches, {} errors",
                summary.sitemaps_fetched,
                summary.matches,
                summary.total_errors()
            );
            if cli.summary {
                print_summary(&summary);
            }
            Ok(ExitCode::SUCCESS)
        }
        // Already reported as an error event
        Err(SearchError::Query(_)) => Ok(ExitCode::FAILURE),
        Err(e) => Err(e.into()),
    }
}

/// Handles the --dry-run mode: validates inputs and shows what would be searched
fn handle_dry_run(config: &Config, term: &str, sitemap: &str) -> anyhow::Result<()> {
    let query = SearchQuery::new(term)?;
    let root = validate_sitemap_url(sitemap)?;

    println!("=== sitemap-search Dry Run ===\n");
    println!("Search term: {}", query.term());
    println!("Root sitemap: {}", root);
    println!(
        "Max concurrent fetches: {}",
        config.crawler.max_concurrent_fetches
    );
    println!("User agent: {}", config.fetcher.user_agent);
    println!(
        "Timeouts: {}s request, {}s connect",
        config.fetcher.request_timeout_secs, config.fetcher.connect_timeout_secs
    );
    println!("\n✓ Inputs are valid");

    Ok(())
}
