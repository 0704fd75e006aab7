//! Directory listing with per-entry metadata.
//!
//! This module reads one directory's immediate children and turns each into
//! a wire-ready [`FileEntry`]: name, directory flag, root-relative path,
//! creation time, and size.

use std::fs;
use std::path::Path;

use chrono::{DateTime, Utc};
use protocol::FileEntry;
use thiserror::Error;
use tracing::warn;

/// Errors that can occur during directory listing.
#[derive(Debug, Error)]
pub enum BrowseError {
    /// The requested path does not exist.
    #[error("path does not exist: {0}")]
    NotFound(String),

    /// The requested path is not a directory.
    #[error("path is not a directory: {0}")]
    NotADirectory(String),

    /// IO error.
    #[error("IO error: {0}")]
    Io(#[from] std::io::Error),
}

/// Directory lister producing wire-ready entries.
pub struct DirectoryLister {
    /// Whether entries whose name starts with `.` are included.
    include_hidden: bool,
}

impl DirectoryLister {
    pub fn new(include_hidden: bool) -> Self {
        Self { include_hidden }
    }

    /// List the immediate children of `absolute_dir`.
    ///
    /// `relative_dir` is the root-relative counterpart of `absolute_dir`;
    /// each entry's `path` is `relative_dir` joined with the entry name.
    ///
    /// Children that disappear or cannot be stat-ed between enumeration and
    /// stat are skipped. Entries come back in filesystem enumeration order;
    /// nothing is sorted.
    pub fn list(
        &self,
        absolute_dir: &Path,
        relative_dir: &str,
    ) -> Result<Vec<FileEntry>, BrowseError> {
        let metadata = fs::metadata(absolute_dir).map_err(|e| {
            if e.kind() == std::io::ErrorKind::NotFound {
                BrowseError::NotFound(absolute_dir.display().to_string())
            } else {
                BrowseError::Io(e)
            }
        })?;
        if !metadata.is_dir() {
            return Err(BrowseError::NotADirectory(
                absolute_dir.display().to_string(),
            ));
        }

        let mut entries = Vec::new();

        for entry_result in fs::read_dir(absolute_dir)? {
            let entry = match entry_result {
                Ok(e) => e,
                Err(error) => {
                    warn!(error = %error, "Skipping unreadable directory entry");
                    continue;
                }
            };

            let name = entry.file_name().to_string_lossy().to_string();

            if !self.include_hidden && name.starts_with('.') {
                continue;
            }

            let metadata = match entry.metadata() {
                Ok(m) => m,
                Err(error) => {
                    warn!(name = %name, error = %error, "Skipping entry that cannot be stat-ed");
                    continue;
                }
            };

            entries.push(entry_from_metadata(
                &name,
                join_relative(relative_dir, &name),
                &metadata,
            ));
        }

        Ok(entries)
    }
}

/// Build a wire entry from a name, root-relative path, and stat result.
///
/// Directories report `size = None`; `created` is omitted on platforms and
/// filesystems that do not record a creation time.
pub fn entry_from_metadata(name: &str, rel_path: String, metadata: &fs::Metadata) -> FileEntry {
    let is_directory = metadata.is_dir();
    FileEntry {
        name: name.to_string(),
        is_directory,
        path: rel_path,
        created: metadata.created().ok().map(DateTime::<Utc>::from),
        size: if is_directory {
            None
        } else {
            Some(metadata.len())
        },
    }
}

/// Join a root-relative directory path and an entry name with `/`.
fn join_relative(relative_dir: &str, name: &str) -> String {
    if relative_dir.is_empty() {
        name.to_string()
    } else {
        format!("{}/{}", relative_dir.trim_end_matches('/'), name)
    }
}
