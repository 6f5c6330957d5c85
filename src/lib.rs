//! fxf
//!
//! Manages the bounded file transfer directory of a station: resolves it from
//! the mount table, copies files in under a size quota and removes them again
//! without letting a path escape the directory.

pub mod cli;
pub mod config;
pub mod error;
pub mod mount;
pub mod storage;
pub mod utils;

pub use crate::config::Settings;
pub use crate::error::FxfError;
pub use crate::mount::resolve_transfer_dir;
pub use crate::storage::TransferDir;
