//! HTTP fetching for listing and detail pages
//!
//! This module handles:
//! - Building the HTTP client with the browser user agent and request timeout
//! - Gated GET requests: strict for listing pages, lenient for detail pages
//! - Detail page fetch-and-parse with per-item failure isolation

use crate::config::HttpConfig;
use crate::crawler::gate::{ConcurrencyGate, GatePermit};
use crate::extract::parse_book;
use crate::record::BookRecord;
use crate::{Result, ScraperError};
use reqwest::header::CONTENT_TYPE;
use reqwest::{Client, Response};
use std::time::Duration;

/// Builds an HTTP client with proper configuration
///
/// # Arguments
///
/// * `config` - The HTTP configuration (user agent)
/// * `timeout` - Total time allowed for one request, body included
///
/// # Example
///
/// ```no_run
/// use alinino_scraper::config::HttpConfig;
/// use alinino_scraper::crawler::build_http_client;
/// use std::time::Duration;
///
/// let client = build_http_client(&HttpConfig::default(), Duration::from_secs(30)).unwrap();
/// ```
pub fn build_http_client(
    config: &HttpConfig,
    timeout: Duration,
) -> std::result::Result<Client, reqwest::Error> {
    Client::builder()
        .user_agent(config.user_agent.as_str())
        .timeout(timeout)
        .connect_timeout(timeout.min(Duration::from_secs(10)))
        .gzip(true)
        .brotli(true)
        .build()
}

/// Gated page fetcher shared by the pagination walker and the batch orchestrator
#[derive(Debug, Clone)]
pub struct Fetcher {
    client: Client,
    gate: ConcurrencyGate,
}

impl Fetcher {
    pub fn new(client: Client, gate: ConcurrencyGate) -> Self {
        Self { client, gate }
    }

    pub fn gate(&self) -> &ConcurrencyGate {
        &self.gate
    }

    /// Sends a GET for `url` while holding one gate slot
    ///
    /// The permit is returned with the response so the caller keeps the slot
    /// until the body has been read.
    async fn send(&self, url: &str) -> Result<(GatePermit, Response)> {
        let permit = self.gate.acquire().await?;

        let response = self
            .client
            .get(url)
            .send()
            .await
            .map_err(|e| ScraperError::from_request(url, e))?;

        Ok((permit, response))
    }

    /// Fetches a listing page and returns its body as text
    ///
    /// Non-success statuses and non-HTML content types are errors.
    pub async fn fetch_html(&self, url: &str) -> Result<String> {
        let (_permit, response) = self.send(url).await?;

        let status = response.status();
        if !status.is_success() {
            return Err(ScraperError::Status {
                url: url.to_string(),
                status: status.as_u16(),
            });
        }

        if let Some(content_type) = response
            .headers()
            .get(CONTENT_TYPE)
            .and_then(|v| v.to_str().ok())
        {
            if !content_type.contains("html") {
                return Err(ScraperError::ContentMismatch {
                    url: url.to_string(),
                    content_type: content_type.to_string(),
                });
            }
        }

        response
            .text()
            .await
            .map_err(|e| ScraperError::from_request(url, e))
    }

    /// Fetches `url` and returns whatever body came back
    ///
    /// Status and content type are not inspected; only transport errors and
    /// timeouts fail.
    pub async fn fetch_body(&self, url: &str) -> Result<String> {
        let (_permit, response) = self.send(url).await?;

        let status = response.status();
        if !status.is_success() {
            tracing::debug!("HTTP {} for {}, parsing body anyway", status.as_u16(), url);
        }

        response
            .text()
            .await
            .map_err(|e| ScraperError::from_request(url, e))
    }

    /// Fetches and parses one detail page
    ///
    /// Any body that arrives is parsed, whatever its status or content type.
    /// Parsing runs after the gate slot is released. Any failure is logged
    /// with its URL and turned into `None`, so one bad page never fails the
    /// batch it belongs to.
    pub async fn fetch_book(&self, url: &str) -> Option<BookRecord> {
        let parsed = match self.fetch_body(url).await {
            Ok(body) => parse_book(&body, url),
            Err(e) => Err(e),
        };

        match parsed {
            Ok(record) => {
                tracing::debug!("Scraped {}", url);
                Some(record)
            }
            Err(e) => {
                tracing::warn!("Error scraping {}: {}", url, e);
                None
            }
        }
    }
}
