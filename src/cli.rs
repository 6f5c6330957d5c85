//! Command-line surface
//!
//! Parses `fxf add FILE...` / `fxf remove FILE...` and runs the per-item loop.

use clap::{Parser, Subcommand};
use log::debug;
use std::ffi::OsString;
use std::io::Write;
use std::path::PathBuf;

use crate::config::Overrides;
use crate::error::FxfError;
use crate::error::handlers::report_error;
use crate::storage::TransferDir;

/// Move files into and out of the station file transfer directory
#[derive(Debug, Parser)]
#[command(name = "fxf", version)]
pub struct Cli {
    /// Mount table to scan instead of /etc/fstab
    #[arg(long, global = true, value_name = "PATH")]
    pub mount_table: Option<PathBuf>,

    /// TOML settings file
    #[arg(long, global = true, value_name = "FILE")]
    pub config: Option<PathBuf>,

    #[command(subcommand)]
    pub command: Command,
}

#[derive(Debug, Clone, PartialEq, Eq, Subcommand)]
pub enum Command {
    /// Copy each FILE into the transfer directory
    Add {
        #[arg(required = true, allow_hyphen_values = true, value_name = "FILE")]
        files: Vec<PathBuf>,
    },
    /// Delete each FILE from the transfer directory
    Remove {
        #[arg(required = true, allow_hyphen_values = true, value_name = "FILE")]
        files: Vec<PathBuf>,
    },
}

impl Command {
    pub fn files(&self) -> &[PathBuf] {
        match self {
            Command::Add { files } | Command::Remove { files } => files,
        }
    }
}

impl Cli {
    pub fn parse_from_args<I, T>(args: I) -> Result<Self, clap::Error>
    where
        I: IntoIterator<Item = T>,
        T: Into<OsString> + Clone,
    {
        Self::try_parse_from(args)
    }

    pub fn overrides(&self) -> Overrides {
        Overrides {
            mount_table: self.mount_table.clone(),
        }
    }
}

/// Outcome counts of one run
#[derive(Debug, Default, Clone, Copy, PartialEq, Eq)]
pub struct BatchSummary {
    pub succeeded: usize,
    pub failed: usize,
    pub refused: usize,
}

/// Process every item of `command` in order.
///
/// A failing item is reported on `err` and does not stop the rest. Each add
/// measures the directory afresh, so earlier items count against later ones.
pub fn run_batch<O: Write, E: Write>(
    dir: &TransferDir,
    command: &Command,
    out: &mut O,
    err: &mut E,
) -> BatchSummary {
    let mut summary = BatchSummary::default();

    for file in command.files() {
        let outcome = match command {
            Command::Add { .. } => dir.add(file).map(|added| {
                let _ = writeln!(
                    out,
                    "{} copied as {}",
                    added.source.display(),
                    added.destination.display()
                );
            }),
            Command::Remove { .. } => dir.remove(file).map(|_| ()),
        };

        match outcome {
            Ok(()) => summary.succeeded += 1,
            Err(e) => {
                if e.is_policy_violation() {
                    summary.refused += 1;
                }
                summary.failed += 1;
                report_error(err, &FxfError::from(e));
            }
        }
    }

    debug!(
        "Processed {} item(s): {} ok, {} failed",
        summary.succeeded + summary.failed,
        summary.succeeded,
        summary.failed
    );
    summary
}
