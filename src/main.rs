//! fxf - Entry Point
//!
//! Copies files into, and removes files from, the station file transfer
//! directory named in the system mount table.

use clap::error::ErrorKind;
use log::info;
use std::io;
use std::process;

use fxf::cli::{BatchSummary, Cli};
use fxf::config::Settings;
use fxf::error::FxfError;
use fxf::error::handlers::{EXIT_FAILURE, exit_code, report_error};
use fxf::mount::resolve_transfer_dir;
use fxf::utils::logging::setup_logging;

fn main() {
    // Initialize the logger (env_logger picks up RUST_LOG environment variable)
    setup_logging();

    let cli = match Cli::parse_from_args(std::env::args_os()) {
        Ok(cli) => cli,
        Err(e) => match e.kind() {
            ErrorKind::DisplayHelp | ErrorKind::DisplayVersion => e.exit(),
            _ => {
                let _ = e.print();
                process::exit(EXIT_FAILURE);
            }
        },
    };

    match run(&cli) {
        Ok(summary) => {
            info!(
                "Done: {} succeeded, {} failed ({} refused by policy)",
                summary.succeeded, summary.failed, summary.refused
            );
        }
        Err(e) => {
            report_error(&mut io::stderr().lock(), &e);
            process::exit(exit_code(&e));
        }
    }
}

fn run(cli: &Cli) -> Result<BatchSummary, FxfError> {
    let settings = Settings::load(cli.config.as_deref(), &cli.overrides())?;
    let dir = resolve_transfer_dir(&settings)?;

    Ok(fxf::cli::run_batch(
        &dir,
        &cli.command,
        &mut io::stdout().lock(),
        &mut io::stderr().lock(),
    ))
}
