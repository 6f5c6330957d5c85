//! The transfer directory handle
//!
//! Resolved once per run and passed to every operation.

use log::debug;
use std::fs;
use std::path::{Path, PathBuf};

use crate::error::{ResolveError, TransferError};
use crate::storage::operations;
use crate::storage::results::{AddResult, RemoveResult};
use crate::storage::usage;

/// An existing directory that files are copied into and removed from
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct TransferDir {
    root: PathBuf,
    quota: u64,
}

impl TransferDir {
    /// Open `path` as the transfer directory, enforcing `quota` bytes.
    ///
    /// The path must exist and be a directory. It is canonicalized so later
    /// containment checks compare real paths.
    pub fn open(path: impl AsRef<Path>, quota: u64) -> Result<Self, ResolveError> {
        let path = path.as_ref();
        let inaccessible = |source| ResolveError::Inaccessible {
            path: path.to_path_buf(),
            source,
        };

        let metadata = fs::metadata(path).map_err(inaccessible)?;
        if !metadata.is_dir() {
            return Err(ResolveError::NotADirectory(path.to_path_buf()));
        }

        let root = path.canonicalize().map_err(inaccessible)?;
        debug!("Opened file transfer directory {} (quota {quota} bytes)", root.display());
        Ok(Self { root, quota })
    }

    pub fn root(&self) -> &Path {
        &self.root
    }

    pub fn quota(&self) -> u64 {
        self.quota
    }

    /// Bytes currently held, measured now
    pub fn usage(&self) -> Result<u64, TransferError> {
        usage::directory_size(&self.root)
    }

    /// Copy `source` in under a collision-free name
    pub fn add(&self, source: &Path) -> Result<AddResult, TransferError> {
        operations::add_file(self, source)
    }

    /// Delete `target`, interpreted relative to the transfer directory
    pub fn remove(&self, target: &Path) -> Result<RemoveResult, TransferError> {
        operations::remove_file(self, target)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use tempfile::tempdir;

    #[test]
    fn open_canonicalizes_the_root() {
        let dir = tempdir().unwrap();
        fs::create_dir(dir.path().join("fxf")).unwrap();

        let transfer = TransferDir::open(dir.path().join("fxf/../fxf"), 100).unwrap();
        assert_eq!(transfer.root(), dir.path().join("fxf").canonicalize().unwrap());
        assert_eq!(transfer.quota(), 100);
    }

    #[test]
    fn open_rejects_a_regular_file() {
        let dir = tempdir().unwrap();
        let file = dir.path().join("plain");
        fs::write(&file, b"x").unwrap();

        let err = TransferDir::open(&file, 100).unwrap_err();
        assert!(matches!(err, ResolveError::NotADirectory(_)));
    }

    #[test]
    fn open_rejects_a_missing_directory() {
        let dir = tempdir().unwrap();
        let err = TransferDir::open(dir.path().join("missing"), 100).unwrap_err();
        assert!(matches!(err, ResolveError::Inaccessible { .. }));
    }
}
