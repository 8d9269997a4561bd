//! Tracing setup. Diagnostics go to stderr so stdout carries only the report.

use tracing_subscriber::EnvFilter;

/// Installs the global subscriber: debug for this crate when `verbose`,
/// warnings only otherwise. A second call is a no-op.
pub fn init(verbose: bool) {
    let directive = if verbose { "crawl_md=debug" } else { "crawl_md=warn" };
    let _ = tracing_subscriber::fmt()
        .with_env_filter(EnvFilter::new(directive))
        .with_writer(std::io::stderr)
        .with_target(false)
        .without_time()
        .try_init();
}
