//! Search-term filtering of page URLs

/// Returns the URLs that contain `term`, in their original order
///
/// Matching is a case-sensitive substring test. An empty result simply means
/// nothing matched.
///
/// # Example
///
/// ```
/// use sitemap_search::crawler::filter_urls;
///
/// let urls = vec![
///     "https://example.com/search-products".to_string(),
///     "https://example.com/home".to_string(),
/// ];
/// assert_eq!(filter_urls(&urls, "search"), vec!["https://example.com/search-products"]);
/// ```
pub fn filter_urls<'a, S: AsRef<str>>(urls: &'a [S], term: &str) -> Vec<&'a str> {
    urls.iter()
        .map(AsRef::<str>::as_ref)
        .filter(|url| url.contains(term))
        .collect()
}
