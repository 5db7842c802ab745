//! fds - FDS command-line client
//!
//! A command-line interface for the FDS object storage service. Parses
//! flags and the local config file, then drives the service SDK.

use clap::Parser;
use tracing_subscriber::{fmt, prelude::*, EnvFilter};

use fds_cli::args::Cli;
use fds_cli::commands;
use fds_cli::exit_code::ExitCode;

#[tokio::main]
async fn main() {
    let cli = Cli::parse();

    // Logs go to stderr so listings and downloads on stdout stay clean
    let default_filter = if cli.debug {
        "fds_cli=debug,fds_core=debug,fds_s3=debug"
    } else {
        "warn"
    };
    tracing_subscriber::registry()
        .with(fmt::layer().with_writer(std::io::stderr))
        .with(EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new(default_filter)))
        .init();

    if let Some(shell) = cli.completions {
        commands::completions::execute(shell);
        std::process::exit(ExitCode::Success.as_i32());
    }

    let debug = cli.debug;
    let exit_code = match commands::execute(cli).await {
        Ok(code) => code,
        Err(err) => {
            eprintln!("{err}");
            if debug {
                tracing::debug!(error = ?err, "command failed");
            }
            ExitCode::Failure
        }
    };

    std::process::exit(exit_code.as_i32());
}
