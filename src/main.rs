//! Entry point: wires CLI → fetcher → report, and maps the outcome to an exit code.

mod cli;
mod fetcher;
mod logging;
mod markdown;
mod request;
mod runner;

use std::io;
use std::process::ExitCode;

use crate::fetcher::HttpFetcher;

#[tokio::main(flavor = "current_thread")]
async fn main() -> color_eyre::Result<ExitCode> {
    // Install color_eyre error/panic hooks for pretty backtraces.
    color_eyre::install()?;

    let stdout = io::stdout();
    let stderr = io::stderr();

    // The fetcher (and its connection pool) lives only for this call.
    let code = runner::execute(
        std::env::args_os(),
        |cli| HttpFetcher::new(&cli.fetcher_config()),
        &mut stdout.lock(),
        &mut stderr.lock(),
    )
    .await;

    Ok(ExitCode::from(code))
}
