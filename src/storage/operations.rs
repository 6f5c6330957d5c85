//! Storage operations
//!
//! Copies files into the transfer directory and removes them again.

use log::{debug, info, warn};
use std::ffi::{OsStr, OsString};
use std::fs::{self, File, OpenOptions};
use std::io::{self, ErrorKind, Read};
use std::path::Path;

use crate::error::TransferError;
use crate::storage::results::{AddResult, RemoveResult};
use crate::storage::transfer_dir::TransferDir;
use crate::storage::validation::resolve_within;

/// Destination name for a collision attempt: `name`, then `name.0`, `name.1`, ...
pub fn candidate_name(name: &OsStr, suffix: Option<u64>) -> OsString {
    let mut candidate = name.to_os_string();
    if let Some(n) = suffix {
        candidate.push(format!(".{n}"));
    }
    candidate
}

/// Copies `source` into the transfer directory.
///
/// The copy is refused when the source size plus the directory's current usage
/// reaches the quota. An existing file is never overwritten: the destination is
/// created exclusively and, on collision, retried with the next numeric suffix.
pub fn add_file(dir: &TransferDir, source: &Path) -> Result<AddResult, TransferError> {
    let unreadable = |source_err| TransferError::SourceUnreadable {
        path: source.to_path_buf(),
        source: source_err,
    };

    let metadata = fs::metadata(source).map_err(unreadable)?;
    if metadata.is_dir() {
        return Err(TransferError::SourceIsDirectory(source.to_path_buf()));
    }
    // Pipes and devices report no meaningful size, so the quota cannot hold.
    if !metadata.is_file() {
        return Err(TransferError::SourceNotRegular(source.to_path_buf()));
    }
    let name = source
        .file_name()
        .ok_or_else(|| TransferError::InvalidSourceName(source.to_path_buf()))?;

    let size = metadata.len();
    let used = dir.usage()?;
    if size.saturating_add(used) >= dir.quota() {
        warn!(
            "Refusing {}: {size} bytes with {used} of {} bytes used",
            source.display(),
            dir.quota()
        );
        return Err(TransferError::QuotaExceeded {
            requested: size,
            used,
            limit: dir.quota(),
        });
    }

    // Never copy more than was accounted for, even if the source grows.
    let mut input = File::open(source).map_err(unreadable)?.take(size);
    let mut suffix: Option<u64> = None;

    loop {
        let destination = dir.root().join(candidate_name(name, suffix));

        let mut output = match OpenOptions::new()
            .write(true)
            .create_new(true)
            .open(&destination)
        {
            Ok(file) => file,
            Err(e) if e.kind() == ErrorKind::AlreadyExists => {
                debug!("{} exists, trying next suffix", destination.display());
                suffix = Some(suffix.map_or(0, |n| n + 1));
                continue;
            }
            Err(e) => {
                return Err(TransferError::Copy {
                    from: source.to_path_buf(),
                    to: destination,
                    source: e,
                });
            }
        };

        return match io::copy(&mut input, &mut output) {
            Ok(bytes) => {
                info!(
                    "Copied {} to {} ({bytes} bytes)",
                    source.display(),
                    destination.display()
                );
                Ok(AddResult {
                    source: source.to_path_buf(),
                    destination,
                    bytes,
                })
            }
            Err(e) => {
                drop(output);
                // Do not leave a truncated file behind counting against the quota.
                if let Err(cleanup) = fs::remove_file(&destination) {
                    warn!(
                        "Failed to remove partial copy {}: {cleanup}",
                        destination.display()
                    );
                }
                Err(TransferError::Copy {
                    from: source.to_path_buf(),
                    to: destination,
                    source: e,
                })
            }
        };
    }
}

/// Deletes `target` from the transfer directory.
///
/// `target` is resolved against the directory root; anything that resolves
/// outside it, lexically or through a symlinked parent, is rejected before the
/// filesystem is touched. Empty directories may be removed too.
pub fn remove_file(dir: &TransferDir, target: &Path) -> Result<RemoveResult, TransferError> {
    let path = resolve_within(dir.root(), target)?;
    let failed = |source| TransferError::Delete {
        path: path.clone(),
        source,
    };

    if let Some(parent) = path.parent() {
        let real_parent = parent.canonicalize().map_err(failed)?;
        if !real_parent.starts_with(dir.root()) {
            return Err(TransferError::OutsideTransferDir(real_parent.join(
                path.file_name().unwrap_or_default(),
            )));
        }
    }

    let metadata = fs::symlink_metadata(&path).map_err(failed)?;
    let was_directory = metadata.is_dir();
    if was_directory {
        fs::remove_dir(&path).map_err(failed)?;
    } else {
        fs::remove_file(&path).map_err(failed)?;
    }

    info!("Removed {}", path.display());
    Ok(RemoveResult {
        path,
        was_directory,
    })
}
