//! Path validation
//!
//! Keeps removals inside the transfer directory.

use std::path::{Component, Path, PathBuf};

use crate::error::TransferError;

/// Resolve `input` against `root` without touching the filesystem.
///
/// An absolute `input` replaces `root`. `.` components are dropped and `..`
/// removes the previous component, never climbing above the filesystem root.
pub fn resolve_lexically(root: &Path, input: &Path) -> PathBuf {
    let mut resolved = PathBuf::new();
    for component in root.join(input).components() {
        match component {
            Component::Prefix(_) | Component::RootDir => resolved.push(component.as_os_str()),
            Component::CurDir => {}
            Component::ParentDir => {
                resolved.pop();
            }
            Component::Normal(name) => resolved.push(name),
        }
    }
    resolved
}

/// True when `path` is strictly below `root`; `root` itself does not count.
pub fn is_contained(root: &Path, path: &Path) -> bool {
    path != root && path.starts_with(root)
}

/// Resolve a user supplied removal target to a path inside `root`
pub fn resolve_within(root: &Path, input: &Path) -> Result<PathBuf, TransferError> {
    if input.as_os_str().is_empty() {
        return Err(TransferError::InvalidPath("empty path".into()));
    }

    let resolved = resolve_lexically(root, input);
    if !is_contained(root, &resolved) {
        return Err(TransferError::OutsideTransferDir(resolved));
    }
    Ok(resolved)
}
