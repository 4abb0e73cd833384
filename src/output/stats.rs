//! Final crawl summary output

use crate::output::traits::CrawlSummary;

/// Prints the crawl summary to stdout in a formatted manner
///
/// # Arguments
///
/// * `summary` - The totals returned by the crawl
pub fn print_summary(summary: &CrawlSummary) {
    println!("{}", format_summary(summary));
}

/// Formats the crawl summary as a human-readable block
pub fn format_summary(summary: &CrawlSummary) -> String {
    let mut lines = vec![
        "=== Sitemap Search Summary ===".to_string(),
        format!(
            "  Sitemaps fetched: {} ({} indexes)",
            summary.sitemaps_fetched, summary.indexes
        ),
        format!("  URLs scanned: {}", summary.urls_scanned),
        format!("  Matches: {}", summary.matches),
    ];

    if summary.total_errors() > 0 {
        lines.push(format!(
            "  Errors: {} (fetch: {}, parse: {}, aborted: {})",
            summary.total_errors(),
            summary.fetch_failures,
            summary.parse_failures,
            summary.aborted_branches
        ));
    }

    if summary.cycles_skipped > 0 {
        lines.push(format!("  Cycles skipped: {}", summary.cycles_skipped));
    }

    lines.join("\n")
}
