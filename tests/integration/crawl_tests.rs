//! Integration tests for the sitemap search
//!
//! These tests use wiremock to create mock HTTP servers and test
//! the full fetch/parse/filter cycle end-to-end.

use sitemap_search::config::Config;
use sitemap_search::crawler::search;
use sitemap_search::output::{Event, MemoryReporter, Severity};
use sitemap_search::{QueryError, SearchError};
use std::sync::Arc;
use std::time::Duration;
use wiremock::matchers::{method, path};
use wiremock::{Mock, MockServer, ResponseTemplate};

/// Builds a urlset document from page URLs
fn urlset(urls: &[&str]) -> String {
    let entries: String = urls
        .iter()
        .map(|u| format!("<url><loc>{}</loc><changefreq>daily</changefreq></url>", u))
        .collect();
    format!(
        r#"<?xml version="1.0" encoding="UTF-8"?>
<urlset xmlns="http://www.sitemaps.org/schemas/sitemap/0.9">{}</urlset>"#,
        entries
    )
}

/// Builds a sitemap index document from child sitemap URLs
fn sitemapindex(children: &[String]) -> String {
    let entries: String = children
        .iter()
        .map(|u| format!("<sitemap><loc>{}</loc></sitemap>", u))
        .collect();
    format!(
        r#"<?xml version="1.0" encoding="UTF-8"?>
<sitemapindex xmlns="http://www.sitemaps.org/schemas/sitemap/0.9">{}</sitemapindex>"#,
        entries
    )
}

async fn mount(server: &MockServer, route: &str, response: ResponseTemplate) {
    Mock::given(method("GET"))
        .and(path(route))
        .respond_with(response)
        .mount(server)
        .await;
}

fn xml(body: String) -> ResponseTemplate {
    ResponseTemplate::new(200)
        .set_body_string(body)
        .insert_header("content-type", "application/xml")
}

#[tokio::test]
async fn test_urlset_root_reports_single_match() {
    let server = MockServer::start().await;
    let root = format!("{}/sitemap.xml", server.uri());

    mount(
        &server,
        "/sitemap.xml",
        xml(urlset(&[
            "https://example.com/search-products",
            "https://example.com/home",
        ])),
    )
    .await;

    let reporter = Arc::new(MemoryReporter::new());
    let summary = search(&Config::default(), "search", &root, reporter.clone())
        .await
        .expect("search should start");

    assert_eq!(
        reporter.matches(),
        vec![(root, "https://example.com/search-products".to_string())]
    );
    assert!(reporter.errors().is_empty());
    assert_eq!(summary.matches, 1);
}

#[tokio::test]
async fn test_failing_child_does_not_stop_sibling() {
    let server = MockServer::start().await;
    let base = server.uri();
    let good = format!("{}/good.xml", base);
    let broken = format!("{}/broken.xml", base);

    mount(
        &server,
        "/index.xml",
        xml(sitemapindex(&[broken.clone(), good.clone()])),
    )
    .await;
    mount(&server, "/broken.xml", ResponseTemplate::new(500)).await;
    mount(
        &server,
        "/good.xml",
        xml(urlset(&[
            "https://example.com/about",
            "https://example.com/searching-guide",
        ])),
    )
    .await;

    let reporter = Arc::new(MemoryReporter::new());
    let summary = search(
        &Config::default(),
        "searching",
        &format!("{}/index.xml", base),
        reporter.clone(),
    )
    .await
    .expect("search should start");

    assert_eq!(
        reporter.matches(),
        vec![(good, "https://example.com/searching-guide".to_string())]
    );

    let errors = reporter.errors();
    assert_eq!(errors.len(), 1);
    assert_eq!(errors[0].0, broken);
    assert!(errors[0].1.contains("500"), "cause was: {}", errors[0].1);

    assert_eq!(summary.fetch_failures, 1);
    assert_eq!(summary.sitemaps_fetched, 2);
}

#[tokio::test]
async fn test_short_term_performs_no_fetch() {
    let server = MockServer::start().await;
    mount(
        &server,
        "/sitemap.xml",
        xml(urlset(&["https://example.com/short"])),
    )
    .await;

    let reporter = Arc::new(MemoryReporter::new());
    let result = search(
        &Config::default(),
        "short",
        &format!("{}/sitemap.xml", server.uri()),
        reporter.clone(),
    )
    .await;

    assert!(matches!(
        result,
        Err(SearchError::Query(QueryError::TooShort { length: 5, min: 6 }))
    ));

    // Exactly one error-level report and nothing else
    let events = reporter.events();
    assert_eq!(events.len(), 1);
    assert_eq!(events[0].severity(), Severity::Error);

    let requests = server.received_requests().await.unwrap_or_default();
    assert!(requests.is_empty(), "expected no fetches, got {}", requests.len());
}

#[tokio::test]
async fn test_missing_term_performs_no_fetch() {
    let server = MockServer::start().await;

    let reporter = Arc::new(MemoryReporter::new());
    let result = search(&Config::default(), "", &server.uri(), reporter.clone()).await;

    assert!(matches!(result, Err(SearchError::Query(QueryError::Missing))));
    assert_eq!(reporter.errors().len(), 1);
    assert!(server
        .received_requests()
        .await
        .unwrap_or_default()
        .is_empty());
}

#[tokio::test]
async fn test_malformed_child_only_affects_itself() {
    let server = MockServer::start().await;
    let base = server.uri();
    let children = vec![
        format!("{}/first.xml", base),
        format!("{}/malformed.xml", base),
        format!("{}/last.xml", base),
    ];

    mount(&server, "/index.xml", xml(sitemapindex(&children))).await;
    mount(
        &server,
        "/first.xml",
        xml(urlset(&["https://example.com/products/widget"])),
    )
    .await;
    mount(
        &server,
        "/malformed.xml",
        xml("<urlset><url><loc>https://example.com/products/broken</url>".to_string()),
    )
    .await;
    mount(
        &server,
        "/last.xml",
        xml(urlset(&["https://example.com/products/gadget"])),
    )
    .await;

    let reporter = Arc::new(MemoryReporter::new());
    let summary = search(
        &Config::default(),
        "products",
        &format!("{}/index.xml", base),
        reporter.clone(),
    )
    .await
    .expect("search should start");

    let mut matched: Vec<String> = reporter.matches().into_iter().map(|(_, m)| m).collect();
    matched.sort();
    assert_eq!(
        matched,
        vec![
            "https://example.com/products/gadget",
            "https://example.com/products/widget"
        ]
    );

    let errors = reporter.errors();
    assert_eq!(errors.len(), 1);
    assert_eq!(errors[0].0, children[1]);
    assert!(errors[0].1.starts_with("parse failed"));
    assert_eq!(summary.parse_failures, 1);
}

#[tokio::test]
async fn test_html_error_page_is_a_parse_error() {
    let server = MockServer::start().await;
    let root = format!("{}/sitemap.xml", server.uri());

    mount(
        &server,
        "/sitemap.xml",
        ResponseTemplate::new(200).set_body_string("<html><body>Maintenance</body></html>"),
    )
    .await;

    let reporter = Arc::new(MemoryReporter::new());
    let summary = search(&Config::default(), "search", &root, reporter.clone())
        .await
        .expect("search should start");

    assert!(reporter.matches().is_empty());
    assert_eq!(reporter.errors().len(), 1);
    assert_eq!(summary.parse_failures, 1);
}

#[tokio::test]
async fn test_slow_child_times_out_without_blocking_siblings() {
    let server = MockServer::start().await;
    let base = server.uri();
    let slow = format!("{}/slow.xml", base);

    mount(
        &server,
        "/index.xml",
        xml(sitemapindex(&[slow.clone(), format!("{}/fast.xml", base)])),
    )
    .await;
    mount(
        &server,
        "/slow.xml",
        xml(urlset(&["https://example.com/search-slow"])).set_delay(Duration::from_secs(3)),
    )
    .await;
    mount(
        &server,
        "/fast.xml",
        xml(urlset(&["https://example.com/search-fast"])),
    )
    .await;

    let config: Config = sitemap_search::config::parse_config(
        "[fetcher]\nrequest-timeout-secs = 1\n",
    )
    .expect("valid config");

    let reporter = Arc::new(MemoryReporter::new());
    let summary = search(&config, "search", &format!("{}/index.xml", base), reporter.clone())
        .await
        .expect("search should start");

    assert_eq!(
        reporter
            .matches()
            .into_iter()
            .map(|(_, m)| m)
            .collect::<Vec<_>>(),
        vec!["https://example.com/search-fast".to_string()]
    );
    assert_eq!(reporter.errors()[0].0, slow);
    assert_eq!(summary.fetch_failures, 1);
}

#[tokio::test]
async fn test_large_index_with_bounded_concurrency() {
    let server = MockServer::start().await;
    let base = server.uri();

    let children: Vec<String> = (0..20).map(|i| format!("{}/part-{}.xml", base, i)).collect();
    mount(&server, "/index.xml", xml(sitemapindex(&children))).await;
    for i in 0..20 {
        let page = format!("https://example.com/part-{}/searchable", i);
        mount(&server, &format!("/part-{}.xml", i), xml(urlset(&[page.as_str()]))).await;
    }

    let config = sitemap_search::config::parse_config("[crawler]\nmax-concurrent-fetches = 2\n")
        .expect("valid config");

    let reporter = Arc::new(MemoryReporter::with_threshold(Severity::Info));
    let summary = search(&config, "searchable", &format!("{}/index.xml", base), reporter.clone())
        .await
        .expect("search should start");

    assert_eq!(reporter.matches().len(), 20);
    assert_eq!(summary.sitemaps_fetched, 21);
    assert_eq!(summary.total_errors(), 0);
}

#[tokio::test]
async fn test_verbose_trace_when_nothing_matches() {
    let server = MockServer::start().await;
    let root = format!("{}/sitemap.xml", server.uri());
    mount(&server, "/sitemap.xml", xml(urlset(&["https://example.com/home"]))).await;

    let reporter = Arc::new(MemoryReporter::new());
    search(&Config::default(), "search", &root, reporter.clone())
        .await
        .expect("search should start");

    let events = reporter.events();
    assert!(events.contains(&Event::NoMatches {
        sitemap_url: root.clone()
    }));
    assert!(reporter.matches().is_empty());
    assert!(events
        .iter()
        .filter(|e| matches!(e, Event::NoMatches { .. }))
        .all(|e| e.severity() == Severity::Verbose));
}

#[tokio::test]
async fn test_invalid_root_url_is_rejected() {
    let reporter = Arc::new(MemoryReporter::new());
    let result = search(&Config::default(), "search", "not a url", reporter.clone()).await;

    assert!(matches!(result, Err(SearchError::Config(_))));
    assert!(reporter.events().is_empty());
}

#[tokio::test]
async fn test_matches_are_reported_under_the_root_as_given() {
    let server = MockServer::start().await;
    // No trailing slash; a parsed URL would gain one
    let root = server.uri();
    mount(&server, "/", xml(urlset(&["https://example.com/search-home"]))).await;

    let reporter = Arc::new(MemoryReporter::new());
    search(&Config::default(), "search", &root, reporter.clone())
        .await
        .expect("search should start");

    assert_eq!(
        reporter.matches(),
        vec![(root.clone(), "https://example.com/search-home".to_string())]
    );
    assert!(reporter.events().contains(&Event::Started {
        term: "search".to_string(),
        root_url: root,
    }));
}
