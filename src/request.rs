//! Request and result types exchanged between the runner and a page fetcher.

use crate::runner::RunError;

/// Schemes a crawl URL may start with, matched literally.
const ALLOWED_SCHEMES: [&str; 2] = ["http://", "https://"];

/// A validated page URL. Built once per process from the CLI argument.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct CrawlRequest {
    url: String,
}

impl CrawlRequest {
    /// Accepts `url` only if it begins with `http://` or `https://`.
    pub fn new(url: &str) -> Result<Self, RunError> {
        if ALLOWED_SCHEMES.iter().any(|scheme| url.starts_with(scheme)) {
            Ok(Self {
                url: url.to_string(),
            })
        } else {
            Err(RunError::InvalidUrl)
        }
    }

    pub fn url(&self) -> &str {
        &self.url
    }
}

/// Outcome of a fetch that completed without faulting.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum CrawlResult {
    Success { markdown: String },
    Failure { error_message: String },
}

impl CrawlResult {
    pub fn is_success(&self) -> bool {
        matches!(self, Self::Success { .. })
    }
}
