//! Storage result types
//!
//! Defines result structures returned by storage operations.

use std::path::PathBuf;

/// Result of copying a file into the transfer directory
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct AddResult {
    pub source: PathBuf,
    pub destination: PathBuf,
    pub bytes: u64,
}

/// Result of a removal from the transfer directory
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct RemoveResult {
    pub path: PathBuf,
    pub was_directory: bool,
}
