//! CLI runner: validate → fetch → print, with one exit code per outcome.
//!
//! All output goes through caller-supplied writers so the whole flow can
//! be driven in tests against a scripted [`PageFetcher`].

use std::ffi::OsString;
use std::io::{self, Write};

use color_eyre::eyre::{self, WrapErr};

use crate::cli::{self, Cli};
use crate::fetcher::{CacheMode, PageFetcher};
use crate::logging;
use crate::markdown::MarkdownConfig;
use crate::request::{CrawlRequest, CrawlResult};

/// Banner separator line.
const SEPARATOR: &str = "================================================================================";

const BIN_NAME: &str = "crawl-md";

/// Every way a run can end other than success. All of them exit with 1.
#[derive(Debug, thiserror::Error)]
pub enum RunError {
    #[error("wrong number of arguments")]
    Usage,
    #[error("URL must start with http:// or https://")]
    InvalidUrl,
    #[error("Failed to crawl {url}")]
    FetchFailed { url: String, message: String },
    #[error("{0:#}")]
    Fault(eyre::Report),
}

impl From<eyre::Report> for RunError {
    fn from(report: eyre::Report) -> Self {
        Self::Fault(report)
    }
}

impl RunError {
    pub fn exit_code(&self) -> u8 {
        1
    }

    /// Writes the user-facing diagnostic for this error.
    pub fn report(&self, err: &mut impl Write) -> io::Result<()> {
        match self {
            Self::Usage => {
                writeln!(err, "Usage: {BIN_NAME} [OPTIONS] <url>")?;
                writeln!(err, "Example: {BIN_NAME} https://example.com")
            }
            Self::InvalidUrl => writeln!(err, "Error: {self}"),
            Self::FetchFailed { message, .. } => {
                writeln!(err, "Error: {self}")?;
                writeln!(err, "Error message: {message}")
            }
            Self::Fault(_) => writeln!(err, "Error: {self}"),
        }
    }
}

/// Runs the program against `args` and returns the process exit code.
///
/// `build_fetcher` is called once, after the arguments are validated; a
/// failure there is reported like any other fault.
pub async fn execute<I, T, F, B>(
    args: I,
    build_fetcher: B,
    out: &mut impl Write,
    err: &mut impl Write,
) -> u8
where
    I: IntoIterator<Item = T>,
    T: Into<OsString> + Clone,
    F: PageFetcher,
    B: FnOnce(&Cli) -> eyre::Result<F>,
{
    match try_execute(args, build_fetcher, out).await {
        Ok(()) => 0,
        Err(error) => {
            tracing::debug!(?error, "run failed");
            // Nothing sensible is left to do if stderr itself is gone.
            let _ = error.report(err);
            error.exit_code()
        }
    }
}

async fn try_execute<I, T, F, B>(
    args: I,
    build_fetcher: B,
    out: &mut impl Write,
) -> Result<(), RunError>
where
    I: IntoIterator<Item = T>,
    T: Into<OsString> + Clone,
    F: PageFetcher,
    B: FnOnce(&Cli) -> eyre::Result<F>,
{
    let args: Vec<OsString> = args.into_iter().map(Into::into).collect();
    // A lone argument is always the URL, even if it looks like a flag.
    if let [_, only] = args.as_slice() {
        CrawlRequest::new(&only.to_string_lossy())?;
    }

    let cli = cli::parse_args(args)?;
    logging::init(cli.verbose);

    let request = CrawlRequest::new(&cli.url)?;
    let fetcher = build_fetcher(&cli)?;
    crawl(&fetcher, &request, &cli.markdown_config(), out).await
}

/// Fetches `request` fresh and prints the Markdown report to `out`.
pub async fn crawl<F: PageFetcher>(
    fetcher: &F,
    request: &CrawlRequest,
    config: &MarkdownConfig,
    out: &mut impl Write,
) -> Result<(), RunError> {
    tracing::info!(url = request.url(), "crawling");
    let result = fetcher.fetch(request, config, CacheMode::Bypass).await?;
    tracing::debug!(success = result.is_success(), "fetch completed");

    match result {
        CrawlResult::Success { markdown } => {
            write_report(out, request.url(), &markdown).wrap_err("failed to write output")?;
            Ok(())
        }
        CrawlResult::Failure { error_message } => Err(RunError::FetchFailed {
            url: request.url().to_string(),
            message: error_message,
        }),
    }
}

fn write_report(out: &mut impl Write, url: &str, markdown: &str) -> io::Result<()> {
    writeln!(out)?;
    writeln!(out, "{SEPARATOR}")?;
    writeln!(out, "Successfully crawled: {url}")?;
    writeln!(out, "{SEPARATOR}")?;
    writeln!(out)?;
    writeln!(out, "{markdown}")?;
    writeln!(out)?;
    writeln!(out, "{SEPARATOR}")?;
    writeln!(out, "Content length: {} characters", markdown.chars().count())?;
    writeln!(out, "{SEPARATOR}")?;
    out.flush()
}

#[cfg(test)]
#[path = "runner_tests.rs"]
mod tests;
