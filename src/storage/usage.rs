//! Disk usage accounting
//!
//! Totals the bytes held in a directory tree for quota checks.

use log::trace;
use std::fs;
use std::path::{Path, PathBuf};

use crate::error::TransferError;

/// Total size in bytes of every entry below `root`.
///
/// Directories are walked with an explicit worklist, so depth is bounded by
/// memory and not by the call stack. Symbolic links are never followed; a link
/// contributes its own size. Any directory or entry that cannot be read aborts
/// the walk with an error rather than undercounting.
pub fn directory_size(root: &Path) -> Result<u64, TransferError> {
    let unavailable = |path: &Path, source| TransferError::UsageUnavailable {
        path: path.to_path_buf(),
        source,
    };

    let mut total: u64 = 0;
    let mut pending: Vec<PathBuf> = vec![root.to_path_buf()];

    while let Some(dir) = pending.pop() {
        let entries = fs::read_dir(&dir).map_err(|e| unavailable(&dir, e))?;

        for entry in entries {
            let entry = entry.map_err(|e| unavailable(&dir, e))?;
            let path = entry.path();
            let file_type = entry.file_type().map_err(|e| unavailable(&path, e))?;

            if file_type.is_dir() {
                pending.push(path);
            } else {
                // DirEntry::metadata does not traverse symlinks.
                let metadata = entry.metadata().map_err(|e| unavailable(&path, e))?;
                total = total.saturating_add(metadata.len());
            }
        }
    }

    trace!("Usage of {}: {total} bytes", root.display());
    Ok(total)
}

#[cfg(test)]
mod tests {
    use super::*;
    use tempfile::tempdir;

    #[test]
    fn empty_directory_is_zero() {
        let dir = tempdir().unwrap();
        assert_eq!(directory_size(dir.path()).unwrap(), 0);
    }

    #[test]
    fn nested_files_are_summed() {
        let dir = tempdir().unwrap();
        fs::write(dir.path().join("a"), [0u8; 10]).unwrap();
        fs::create_dir_all(dir.path().join("sub/deeper")).unwrap();
        fs::write(dir.path().join("sub/b"), [0u8; 20]).unwrap();
        fs::write(dir.path().join("sub/deeper/c"), [0u8; 5]).unwrap();

        assert_eq!(directory_size(dir.path()).unwrap(), 35);
    }

    #[test]
    fn deep_trees_do_not_recurse() {
        let dir = tempdir().unwrap();
        let mut path = dir.path().to_path_buf();
        for _ in 0..64 {
            path.push("d");
        }
        fs::create_dir_all(&path).unwrap();
        fs::write(path.join("leaf"), [0u8; 7]).unwrap();

        assert_eq!(directory_size(dir.path()).unwrap(), 7);
    }

    #[cfg(unix)]
    #[test]
    fn symlinks_are_not_followed() {
        let outside = tempdir().unwrap();
        fs::write(outside.path().join("big"), vec![0u8; 4096]).unwrap();

        let dir = tempdir().unwrap();
        let link = dir.path().join("link");
        std::os::unix::fs::symlink(outside.path(), &link).unwrap();
        // A cycle back into the tree must terminate too.
        std::os::unix::fs::symlink(dir.path(), dir.path().join("loop")).unwrap();

        let link_len = fs::symlink_metadata(&link).unwrap().len();
        let loop_len = fs::symlink_metadata(dir.path().join("loop")).unwrap().len();
        assert_eq!(directory_size(dir.path()).unwrap(), link_len + loop_len);
    }

    #[test]
    fn missing_directory_is_an_error() {
        let dir = tempdir().unwrap();
        let err = directory_size(&dir.path().join("gone")).unwrap_err();
        assert!(matches!(err, TransferError::UsageUnavailable { .. }));
    }
}
