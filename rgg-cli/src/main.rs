//! Entry point of the `rgg` binary.
//!
//! Parses the vertex and edge counts, builds a random connected graph, prints
//! it to stdout and writes the JSON document. Logging is initialised first so
//! every later step can emit structured diagnostics on stderr.

use std::io::{self, BufWriter};
use std::process::ExitCode;

use anyhow::{Context, Result};
use clap::Parser;

use rgg_cli::{
    cli::{Cli, CliError, publish_summary, run_cli},
    logging::{self, LoggingError},
};
use tracing::{error, field};

/// Builds and persists the graph, then renders it to stdout.
fn try_main() -> Result<()> {
    let cli = Cli::parse();
    let summary = run_cli(cli).context("failed to generate graph")?;

    let stdout = io::stdout();
    let writer = BufWriter::new(stdout.lock());
    publish_summary(&summary, writer).context("failed to publish graph")?;
    Ok(())
}

fn main() -> ExitCode {
    if let Err(err) = logging::init_logging() {
        report_logging_init_error(&err);
        return ExitCode::FAILURE;
    }

    if let Err(err) = try_main() {
        let core = err.downcast_ref::<CliError>().and_then(|cli_error| match cli_error {
            CliError::Core(core) => Some(core),
            _ => None,
        });
        let code = core.map(|core| field::display(core.code().as_str()));
        let class = core.map(|core| field::display(core.class().as_str()));

        let chain = format!("{err:#}");
        error!(error = %chain, code, class, "command execution failed");
        return ExitCode::FAILURE;
    }

    ExitCode::SUCCESS
}

#[expect(
    clippy::print_stderr,
    reason = "Emit one-off diagnostic before tracing is initialized"
)]
fn report_logging_init_error(err: &LoggingError) {
    eprintln!("failed to initialize logging: {err}");
}
