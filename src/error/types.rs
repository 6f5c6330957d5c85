//! Error types
//!
//! Defines the error taxonomy of fxf: fatal configuration and resolution
//! errors, and per-item transfer errors.

use std::io;
use std::path::PathBuf;
use thiserror::Error;

/// Settings could not be loaded or are invalid
#[derive(Debug, Error)]
pub enum ConfigError {
    #[error("failed to load settings: {0}")]
    Load(#[from] config::ConfigError),

    #[error("invalid settings: {0}")]
    Invalid(String),
}

/// The transfer directory could not be located
#[derive(Debug, Error)]
pub enum ResolveError {
    #[error("cannot read mount table {}: {source}", path.display())]
    MountTableUnreadable { path: PathBuf, source: io::Error },

    #[error("no entry for {tag} in {}", path.display())]
    EntryNotFound { tag: String, path: PathBuf },

    #[error("entry for {tag} on line {line} of {} has no absolute path", path.display())]
    MissingPath {
        tag: String,
        line: usize,
        path: PathBuf,
    },

    #[error("file transfer directory {} is not a directory", .0.display())]
    NotADirectory(PathBuf),

    #[error("cannot open file transfer directory {}: {source}", path.display())]
    Inaccessible { path: PathBuf, source: io::Error },
}

/// A single add or remove failed
#[derive(Debug, Error)]
pub enum TransferError {
    #[error("{}: {source}", path.display())]
    SourceUnreadable { path: PathBuf, source: io::Error },

    #[error("{}: is a directory", .0.display())]
    SourceIsDirectory(PathBuf),

    #[error("{}: not a regular file", .0.display())]
    SourceNotRegular(PathBuf),

    #[error("{}: has no file name", .0.display())]
    InvalidSourceName(PathBuf),

    #[error(
        "File transfer directory exceeds maximum allowed size ({used} used + {requested} requested >= {limit} bytes)"
    )]
    QuotaExceeded { requested: u64, used: u64, limit: u64 },

    #[error("cannot compute size of {}: {source}", path.display())]
    UsageUnavailable { path: PathBuf, source: io::Error },

    #[error("cannot copy {} to {}: {source}", from.display(), to.display())]
    Copy {
        from: PathBuf,
        to: PathBuf,
        source: io::Error,
    },

    #[error("invalid path: {0}")]
    InvalidPath(String),

    #[error("Attempted to access file outside file transfer directory: {}", .0.display())]
    OutsideTransferDir(PathBuf),

    #[error("cannot remove {}: {source}", path.display())]
    Delete { path: PathBuf, source: io::Error },
}

impl TransferError {
    /// True when the failure was refused by policy rather than by the OS
    pub fn is_policy_violation(&self) -> bool {
        matches!(
            self,
            TransferError::QuotaExceeded { .. } | TransferError::OutsideTransferDir(_)
        )
    }
}

/// Any error fxf can report
#[derive(Debug, Error)]
pub enum FxfError {
    #[error(transparent)]
    Config(#[from] ConfigError),

    #[error(transparent)]
    Resolve(#[from] ResolveError),

    #[error(transparent)]
    Transfer(#[from] TransferError),
}

impl FxfError {
    /// Fatal errors end the run before any item is processed
    pub fn is_fatal(&self) -> bool {
        !matches!(self, FxfError::Transfer(_))
    }
}
