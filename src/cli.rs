//! CLI argument definition for crawl-md.
//!
//! Exactly one positional argument (the page URL) is accepted. Anything
//! clap rejects, apart from `--help` and `--version`, is reported as a
//! usage error so the runner can print its own usage text and exit 1.
//! The runner treats a lone argument as the URL before clap sees it, so
//! flags only take effect alongside a URL.

use std::ffi::OsString;
use std::time::Duration;

use clap::Parser;
use clap::error::ErrorKind;

use crate::fetcher::FetcherConfig;
use crate::markdown::MarkdownConfig;
use crate::runner::RunError;

/// Fetch a web page and print it as Markdown.
#[derive(Parser, Debug)]
#[command(name = "crawl-md", version, about = "Fetch a web page and print it as Markdown")]
pub struct Cli {
    /// Page to fetch; must start with http:// or https://.
    pub url: String,

    /// Log fetch progress to stderr.
    #[arg(short, long)]
    pub verbose: bool,

    /// Whole-request timeout in seconds.
    #[arg(long, value_name = "SECS", default_value_t = 30)]
    pub timeout: u64,

    /// User-Agent header sent with the request.
    #[arg(long, value_name = "UA")]
    pub user_agent: Option<String>,

    /// Replace hyperlinks with their text.
    #[arg(long)]
    pub ignore_links: bool,

    /// Drop images from the output.
    #[arg(long)]
    pub ignore_images: bool,

    /// Turn inline links into numbered citations with a reference list.
    #[arg(long, conflicts_with = "ignore_links")]
    pub citations: bool,
}

impl Cli {
    /// Markdown generation settings. Links are preserved unless a flag says otherwise.
    pub fn markdown_config(&self) -> MarkdownConfig {
        MarkdownConfig {
            ignore_links: self.ignore_links,
            ignore_images: self.ignore_images,
            citations: self.citations,
        }
    }

    pub fn fetcher_config(&self) -> FetcherConfig {
        let mut config = FetcherConfig {
            timeout: Duration::from_secs(self.timeout),
            ..FetcherConfig::default()
        };
        if let Some(ua) = &self.user_agent {
            config.user_agent = ua.clone();
        }
        config
    }
}

/// Parses `args` (including the program name) into a [`Cli`].
///
/// `--help` and `--version` print and exit the way `Cli::parse()` would.
/// Every other parse failure becomes [`RunError::Usage`].
pub fn parse_args<I, T>(args: I) -> Result<Cli, RunError>
where
    I: IntoIterator<Item = T>,
    T: Into<OsString> + Clone,
{
    match Cli::try_parse_from(args) {
        Ok(cli) => Ok(cli),
        Err(err) if matches!(err.kind(), ErrorKind::DisplayHelp | ErrorKind::DisplayVersion) => {
            err.exit()
        }
        Err(_) => Err(RunError::Usage),
    }
}

#[cfg(test)]
#[path = "cli_tests.rs"]
mod tests;
