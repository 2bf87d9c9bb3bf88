//! clustergate CLI entry point.

use std::process::ExitCode;

use anyhow::Context;
use clap::Parser;
use clustergate::cli::commands::dispatcher::EXIT_USAGE;
use clustergate::cli::{Cli, CommandDispatcher};
use tracing_subscriber::{fmt, prelude::*, EnvFilter};

/// Initialize the tracing subscriber for logging.
///
/// Log level is controlled by:
/// 1. `--debug` flag sets level to DEBUG
/// 2. `RUST_LOG` environment variable (if set)
/// 3. Default is INFO
///
/// Logs go to stderr so `--json` output on stdout stays parseable.
fn init_tracing(debug: bool) {
    let filter = if debug {
        EnvFilter::new("clustergate=debug")
    } else {
        EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new("clustergate=info"))
    };

    tracing_subscriber::registry()
        .with(fmt::layer().with_target(false).with_writer(std::io::stderr))
        .with(filter)
        .init();
}

/// Run the selected command and return its exit code.
fn run(cli: &Cli) -> anyhow::Result<i32> {
    let dispatcher = CommandDispatcher::new();
    let mut stdout = std::io::stdout();

    let result = dispatcher
        .dispatch(cli, &mut stdout)
        .context("Unable to run the version check")?;
    Ok(result.exit_code)
}

fn main() -> ExitCode {
    let cli = Cli::parse();
    init_tracing(cli.debug);

    tracing::debug!("clustergate starting with args: {:?}", cli);

    match run(&cli) {
        Ok(code) => ExitCode::from(code as u8),
        Err(e) => {
            eprintln!("Error: {:#}", e);
            ExitCode::from(EXIT_USAGE as u8)
        }
    }
}
