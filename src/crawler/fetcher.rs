//! HTTP fetcher implementation
//!
//! This module handles all HTTP requests for the crawler:
//! - Building the HTTP client with the configured user agent
//! - GET requests returning the raw page body
//! - Folding every failure (status, DNS, timeout, reset) into one `FetchFailure`
//!
//! There is no retry and no content inspection here; the fetcher hands the
//! body back untouched and leaves all interpretation to the parser.

use crate::config::Config;
use async_trait::async_trait;
use reqwest::Client;
use std::time::Duration;
use thiserror::Error;

/// A page could not be fetched
///
/// Non-success statuses and transport errors are not told
/// apart; `message` carries the only detail.
#[derive(Debug, Clone, PartialEq, Eq, Error)]
#[error("Failed to fetch {url}: {message}")]
pub struct FetchFailure {
    /// The URL that was requested
    pub url: String,
    /// Free-text description of what went wrong
    pub message: String,
}

/// Capability to fetch one page by absolute URL
///
/// The crawl engine depends only on this trait, so it can be pointed at the
/// live site, a mock server, or an in-memory double.
#[async_trait]
pub trait PageFetcher: Send + Sync {
    /// Fetches `url` and returns the response body text
    async fn fetch(&self, url: &str) -> Result<String, FetchFailure>;
}

/// Builds an HTTP client with the configured user agent
///
/// No timeout is set unless `request-timeout-secs` is configured, so by
/// default a hung server stalls the request indefinitely.
///
/// # Example
///
/// ```no_run
/// use quote_scout::config::Config;
/// use quote_scout::crawler::build_http_client;
///
/// let client = build_http_client(&Config::default()).unwrap();
/// ```
pub fn build_http_client(config: &Config) -> Result<Client, reqwest::Error> {
    let mut builder = Client::builder()
        .user_agent(config.user_agent.value.as_str())
        .gzip(true)
        .brotli(true);

    if let Some(secs) = config.crawler.request_timeout_secs {
        builder = builder.timeout(Duration::from_secs(secs));
    }

    builder.build()
}

/// Production fetcher backed by `reqwest`
#[derive(Debug, Clone)]
pub struct HttpFetcher {
    client: Client,
}

impl HttpFetcher {
    /// Creates a fetcher from the configuration
    pub fn new(config: &Config) -> Result<Self, reqwest::Error> {
        Ok(Self {
            client: build_http_client(config)?,
        })
    }

    async fn get_text(&self, url: &str) -> Result<String, reqwest::Error> {
        let response = self.client.get(url).send().await?.error_for_status()?;
        response.text().await
    }
}

#[async_trait]
impl PageFetcher for HttpFetcher {
    async fn fetch(&self, url: &str) -> Result<String, FetchFailure> {
        self.get_text(url).await.map_err(|e| {
            tracing::error!("Failed to fetch {}: {}", url, e);
            FetchFailure {
                url: url.to_string(),
                message: e.to_string(),
            }
        })
    }
}
