//! Mount module
//!
//! Locates the file transfer directory from the system mount table.

pub mod table;

pub use table::{MountEntry, find_entry, resolve_mount_path};

use crate::config::Settings;
use crate::error::ResolveError;
use crate::storage::TransferDir;

/// Resolve and open the transfer directory described by `settings`
pub fn resolve_transfer_dir(settings: &Settings) -> Result<TransferDir, ResolveError> {
    let path = resolve_mount_path(&settings.mount_table, &settings.mount_tag)?;
    TransferDir::open(path, settings.quota_bytes)
}
