//! HTTP fetcher implementation
//!
//! This module handles all HTTP requests for the crawler:
//! - Building one client carrying the fixed identity headers
//! - GET requests for search result pages
//! - Classifying anything other than a 200 response as a failure
//!
//! There is no retry logic. A failure ends the current query's page chain.

use crate::config::SiteConfig;
use crate::HarvestError;
use reqwest::header::{HeaderMap, HeaderValue, ACCEPT_LANGUAGE, REFERER};
use reqwest::{Client, StatusCode};
use std::time::Duration;
use url::Url;

/// Result of a fetch operation
#[derive(Debug)]
pub enum FetchResult {
    /// Page fetched with status 200
    Success {
        /// Final URL after redirects
        final_url: String,
        /// Page body content
        body: String,
    },

    /// Server answered with a status other than 200
    HttpError {
        /// The HTTP status code
        status_code: u16,
    },

    /// Request never produced a usable response (connect, timeout, body read)
    NetworkError {
        /// Error description
        error: String,
    },
}

/// Builds an HTTP client presenting the configured identity
///
/// Every request carries the user agent, `Referer: <base-url>` and the
/// configured Accept-Language, and is bounded by `timeout-secs`. A referer or
/// language that is not a valid header value is an error rather than being
/// left off the requests.
///
/// # Example
///
/// ```no_run
/// use course_harvest::config::SiteConfig;
/// use course_harvest::crawler::build_http_client;
///
/// let client = build_http_client(&SiteConfig::default()).unwrap();
/// ```
pub fn build_http_client(config: &SiteConfig) -> Result<Client, HarvestError> {
    let mut headers = HeaderMap::new();
    headers.insert(REFERER, HeaderValue::from_str(&config.base_url)?);
    headers.insert(
        ACCEPT_LANGUAGE,
        HeaderValue::from_str(&config.accept_language)?,
    );

    let client = Client::builder()
        .user_agent(config.user_agent.as_str())
        .default_headers(headers)
        .timeout(Duration::from_secs(config.timeout_secs))
        .connect_timeout(Duration::from_secs(10))
        .gzip(true)
        .brotli(true)
        .build()?;

    Ok(client)
}

/// Fetches a search page
///
/// # Returns
///
/// | Condition | Result |
/// |-----------|--------|
/// | HTTP 200 | `Success` with the body |
/// | Any other status | `HttpError` |
/// | Timeout / connect / body error | `NetworkError` |
///
/// Failures are logged at warn with the URL.
pub async fn fetch_url(client: &Client, url: &Url) -> FetchResult {
    let response = match client.get(url.as_str()).send().await {
        Ok(response) => response,
        Err(e) => {
            let error = if e.is_timeout() {
                "Request timeout".to_string()
            } else if e.is_connect() {
                "Connection refused".to_string()
            } else {
                e.to_string()
            };
            tracing::warn!("Request to {} failed: {}", url, error);
            return FetchResult::NetworkError { error };
        }
    };

    let status = response.status();
    if status != StatusCode::OK {
        tracing::warn!("HTTP {} on {}", status.as_u16(), url);
        return FetchResult::HttpError {
            status_code: status.as_u16(),
        };
    }

    let final_url = response.url().to_string();
    match response.text().await {
        Ok(body) => FetchResult::Success { final_url, body },
        Err(e) => {
            tracing::warn!("Failed to read body of {}: {}", url, e);
            FetchResult::NetworkError {
                error: e.to_string(),
            }
        }
    }
}
