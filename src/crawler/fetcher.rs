//! HTTP fetcher implementation
//!
//! This module handles all HTTP requests for the crawler, including:
//! - Building the HTTP client with the configured user agent and timeouts
//! - GET requests for sitemap documents
//! - Error classification
//!
//! There is no retry logic: a failed fetch ends the branch that issued it.

use crate::config::FetcherConfig;
use crate::{FetchCause, FetchError};
use reqwest::Client;
use std::time::Duration;

/// Builds an HTTP client with proper configuration
///
/// # Arguments
///
/// * `config` - The HTTP client configuration
///
/// # Returns
///
/// * `Ok(Client)` - Successfully built HTTP client
/// * `Err(reqwest::Error)` - Failed to build client
///
/// # Example
///
/// ```no_run
/// use sitemap_search::config::FetcherConfig;
/// use sitemap_search::crawler::build_http_client;
///
/// let client = build_http_client(&FetcherConfig::default()).unwrap();
/// ```
pub fn build_http_client(config: &FetcherConfig) -> Result<Client, reqwest::Error> {
    Client::builder()
        .user_agent(config.user_agent.as_str())
        .timeout(Duration::from_secs(config.request_timeout_secs))
        .connect_timeout(Duration::from_secs(config.connect_timeout_secs))
        .gzip(true)
        .brotli(true)
        .build()
}

/// Fetches a sitemap document
///
/// # Error Classification
///
/// | Condition | Cause |
/// |-----------|-------|
/// | Non-2xx status | `Status(code)` |
/// | Request or body timeout | `Timeout` |
/// | Connection refused, DNS, TLS | `Connect` |
/// | Body could not be read or decoded | `Body` |
/// | Anything else | `Request` |
///
/// # Arguments
///
/// * `client` - The HTTP client to use
/// * `url` - The sitemap URL
///
/// # Returns
///
/// * `Ok(String)` - The response body
/// * `Err(FetchError)` - The request failed
pub async fn fetch_sitemap(client: &Client, url: &str) -> Result<String, FetchError> {
    let fail = |cause: FetchCause| FetchError {
        url: url.to_string(),
        cause,
    };

    let response = client
        .get(url)
        .send()
        .await
        .map_err(|e| fail(classify_error(&e)))?;

    let status = response.status();
    if !status.is_success() {
        return Err(fail(FetchCause::Status(status.as_u16())));
    }

    response.text().await.map_err(|e| {
        if e.is_timeout() {
            fail(FetchCause::Timeout)
        } else {
            fail(FetchCause::Body(e.to_string()))
        }
    })
}

/// Maps a transport error onto a [`FetchCause`]
fn classify_error(error: &reqwest::Error) -> FetchCause {
    if error.is_timeout() {
        FetchCause::Timeout
    } else if error.is_connect() {
        FetchCause::Connect(error.to_string())
    } else {
        FetchCause::Request(error.to_string())
    }
}
