//! Mount table parsing
//!
//! A mount table is line oriented; each line is a list of fields separated by
//! spaces or tabs. The transfer directory entry is the first line whose first
//! field starts with the configured tag, and its directory is the first later
//! field that is an absolute path.

use log::{debug, info};
use std::fs::File;
use std::io::{self, BufRead, BufReader};
use std::path::{Path, PathBuf};

use crate::error::ResolveError;

/// One line of a mount table
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct MountEntry {
    fields: Vec<String>,
}

impl MountEntry {
    /// Split a raw line into fields. Blank lines yield `None`.
    pub fn parse(line: &str) -> Option<Self> {
        let fields: Vec<String> = line
            .split([' ', '\t'])
            .filter(|field| !field.is_empty())
            .map(str::to_string)
            .collect();

        if fields.is_empty() {
            None
        } else {
            Some(Self { fields })
        }
    }

    pub fn fields(&self) -> &[String] {
        &self.fields
    }

    pub fn matches_tag(&self, tag: &str) -> bool {
        self.fields[0].starts_with(tag)
    }

    /// First field after the tag that looks like an absolute path
    pub fn mount_path(&self) -> Option<&str> {
        self.fields[1..]
            .iter()
            .map(String::as_str)
            .find(|field| field.starts_with('/'))
    }
}

/// Scan `reader` for the first entry tagged `tag`.
///
/// Returns the 1-based line number with the entry. Scanning stops at the first
/// tagged line, so a later duplicate is never consulted.
pub fn find_entry<R: BufRead>(reader: R, tag: &str) -> io::Result<Option<(usize, MountEntry)>> {
    for (index, line) in reader.lines().enumerate() {
        let line = line?;
        if let Some(entry) = MountEntry::parse(line.trim_end_matches('\r')) {
            if entry.matches_tag(tag) {
                return Ok(Some((index + 1, entry)));
            }
        }
    }
    Ok(None)
}

/// Resolve the transfer directory path named by the mount table at `table`
pub fn resolve_mount_path(table: &Path, tag: &str) -> Result<PathBuf, ResolveError> {
    let unreadable = |source| ResolveError::MountTableUnreadable {
        path: table.to_path_buf(),
        source,
    };

    let file = File::open(table).map_err(unreadable)?;
    let found = find_entry(BufReader::new(file), tag).map_err(unreadable)?;

    let (line, entry) = found.ok_or_else(|| ResolveError::EntryNotFound {
        tag: tag.to_string(),
        path: table.to_path_buf(),
    })?;
    debug!("Mount entry for {tag} on line {line}: {:?}", entry.fields());

    let mount_path = entry.mount_path().ok_or_else(|| ResolveError::MissingPath {
        tag: tag.to_string(),
        line,
        path: table.to_path_buf(),
    })?;

    info!("Resolved file transfer directory {mount_path} from {}", table.display());
    Ok(PathBuf::from(mount_path))
}
