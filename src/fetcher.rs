//! Page fetching: the `PageFetcher` seam and its HTTP implementation.
//!
//! The runner only sees `PageFetcher`. `HttpFetcher` fetches the raw HTML
//! with reqwest and hands it to [`markdown::convert`]. It does not run
//! scripts or render the page.

use std::time::Duration;

use color_eyre::eyre::{Result, WrapErr};
use reqwest::header::{CACHE_CONTROL, PRAGMA};
use reqwest::{Client, Request, StatusCode};

use crate::markdown::{self, MarkdownConfig};
use crate::request::{CrawlRequest, CrawlResult};

/// Whether a fetch may be served from a cache.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum CacheMode {
    #[cfg_attr(not(test), allow(dead_code))]
    Enabled,
    /// Ask every cache along the way for a fresh copy.
    Bypass,
}

/// Default whole-request timeout.
pub const DEFAULT_TIMEOUT: Duration = Duration::from_secs(30);

/// Connection settings for [`HttpFetcher`].
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct FetcherConfig {
    pub timeout: Duration,
    pub user_agent: String,
}

impl Default for FetcherConfig {
    fn default() -> Self {
        Self {
            timeout: DEFAULT_TIMEOUT,
            user_agent: concat!("crawl-md/", env!("CARGO_PKG_VERSION")).to_string(),
        }
    }
}

/// Retrieves a page and converts it to Markdown.
///
/// `Ok(CrawlResult::Failure)` means the fetch completed but the page could
/// not be crawled. `Err` is reserved for faults (transport errors,
/// timeouts, undecodable bodies).
pub trait PageFetcher {
    async fn fetch(
        &self,
        request: &CrawlRequest,
        config: &MarkdownConfig,
        cache: CacheMode,
    ) -> Result<CrawlResult>;
}

/// [`PageFetcher`] backed by a single reqwest client.
pub struct HttpFetcher {
    client: Client,
}

impl HttpFetcher {
    pub fn new(config: &FetcherConfig) -> Result<Self> {
        let client = Client::builder()
            .timeout(config.timeout)
            .user_agent(config.user_agent.as_str())
            .build()
            .wrap_err("failed to build HTTP client")?;
        Ok(Self { client })
    }

    fn build_request(&self, url: &str, cache: CacheMode) -> Result<Request> {
        let mut builder = self.client.get(url);
        if cache == CacheMode::Bypass {
            builder = builder
                .header(CACHE_CONTROL, "no-cache")
                .header(PRAGMA, "no-cache");
        }
        builder
            .build()
            .wrap_err_with(|| format!("invalid request URL {url}"))
    }
}

impl PageFetcher for HttpFetcher {
    async fn fetch(
        &self,
        request: &CrawlRequest,
        config: &MarkdownConfig,
        cache: CacheMode,
    ) -> Result<CrawlResult> {
        let url = request.url();
        let http_request = self.build_request(url, cache)?;

        tracing::debug!(url, ?cache, "sending request");
        let response = self.client.execute(http_request).await?;

        let status = response.status();
        tracing::debug!(%status, final_url = %response.url(), "response received");
        if !status.is_success() {
            return Ok(status_failure(status));
        }

        let html = response.text().await?;
        tracing::debug!(bytes = html.len(), "converting HTML to Markdown");
        let markdown = markdown::convert(&html, config);
        tracing::debug!(chars = markdown.chars().count(), "conversion finished");

        Ok(CrawlResult::Success { markdown })
    }
}

fn status_failure(status: StatusCode) -> CrawlResult {
    CrawlResult::Failure {
        error_message: format!("HTTP status {status}"),
    }
}

#[cfg(test)]
#[path = "fetcher_tests.rs"]
mod tests;
