//! HTTP fetcher implementation
//!
//! This module handles all HTTP requests for the crawler:
//! - Building the HTTP client with the configured user agent and timeout
//! - GET requests returning the raw body bytes
//! - Error classification
//!
//! There is no retry: a timeout, connection failure or non-success status is
//! final for that URL.

use crate::config::HttpConfig;
use crate::crawler::parser::is_binary_content_type;
use reqwest::Client;
use std::time::Duration;
use thiserror::Error;
use url::Url;

/// Connect phase never waits longer than this, even with a longer request timeout
const MAX_CONNECT_TIMEOUT_SECS: u64 = 10;

/// A successfully fetched response
#[derive(Debug, Clone)]
pub struct FetchedPage {
    /// Final URL after redirects
    pub final_url: String,
    /// HTTP status code
    pub status_code: u16,
    /// Content-Type header value, if any
    pub content_type: Option<String>,
    /// Raw body bytes; left empty for binary content types
    pub body: Vec<u8>,
}

/// Why a fetch did not produce a page
#[derive(Debug, Clone, Error, PartialEq, Eq)]
pub enum FetchError {
    #[error("request timed out")]
    Timeout,

    #[error("connection failed: {0}")]
    Connect(String),

    #[error("HTTP {0}")]
    Status(u16),

    #[error("failed to read body: {0}")]
    Body(String),

    #[error("request failed: {0}")]
    Request(String),
}

impl From<reqwest::Error> for FetchError {
    fn from(e: reqwest::Error) -> Self {
        if e.is_timeout() {
            FetchError::Timeout
        } else if e.is_connect() {
            FetchError::Connect(e.to_string())
        } else if e.is_body() || e.is_decode() {
            FetchError::Body(e.to_string())
        } else {
            FetchError::Request(e.to_string())
        }
    }
}

/// Builds an HTTP client with proper configuration
///
/// Every request carries the configured User-Agent and is bounded by the
/// configured timeout. Redirects are followed with reqwest's default policy.
///
/// # Example
///
/// ```no_run
/// use mailhost_harvest::config::HttpConfig;
/// use mailhost_harvest::crawler::build_http_client;
///
/// let client = build_http_client(&HttpConfig::default()).unwrap();
/// ```
pub fn build_http_client(config: &HttpConfig) -> Result<Client, reqwest::Error> {
    let timeout = Duration::from_secs(config.request_timeout_secs);
    let connect_timeout =
        Duration::from_secs(config.request_timeout_secs.min(MAX_CONNECT_TIMEOUT_SECS));

    Client::builder()
        .user_agent(config.user_agent.clone())
        .timeout(timeout)
        .connect_timeout(connect_timeout)
        .gzip(true)
        .brotli(true)
        .build()
}

/// Fetches a page with a single GET request
///
/// | Condition | Result |
/// |-----------|--------|
/// | 2xx | `Ok(FetchedPage)` |
/// | Any other status | `Err(FetchError::Status)` |
/// | Timeout (connect, headers or body) | `Err(FetchError::Timeout)` |
/// | Connection refused, DNS, TLS | `Err(FetchError::Connect)` |
///
/// The body of a response with a binary Content-Type is never read.
pub async fn fetch_page(client: &Client, url: &Url) -> Result<FetchedPage, FetchError> {
    let response = client.get(url.as_str()).send().await?;

    let status = response.status();
    if !status.is_success() {
        return Err(FetchError::Status(status.as_u16()));
    }

    let final_url = response.url().to_string();
    let content_type = response
        .headers()
        .get(reqwest::header::CONTENT_TYPE)
        .and_then(|v| v.to_str().ok())
        .map(|s| s.to_string());

    let body = match content_type.as_deref() {
        Some(ct) if is_binary_content_type(ct) => {
            tracing::debug!("Not reading {} body of {}", ct, url);
            Vec::new()
        }
        _ => response.bytes().await?.to_vec(),
    };

    Ok(FetchedPage {
        final_url,
        status_code: status.as_u16(),
        content_type,
        body,
    })
}
