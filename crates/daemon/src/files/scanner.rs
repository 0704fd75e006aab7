//! Full-tree scanning for search.
//!
//! The scanner walks the entire served root and emits every file it finds,
//! with a root-relative path. Directories are descended but never emitted.
//! Each search request performs a fresh scan; nothing is cached between
//! requests.

use std::path::{Path, PathBuf};

use tracing::warn;
use walkdir::{DirEntry, WalkDir};

use super::to_slash_path;

/// One file discovered by a scan.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ScannedFile {
    /// Base file name.
    pub name: String,
    /// Path relative to the scanned root, `/`-separated.
    pub rel_path: String,
    /// Absolute on-disk path, for stat-ing matches.
    pub abs_path: PathBuf,
}

/// Recursively collect every file under `root`, at unbounded depth.
///
/// Symlinks are not followed, so link cycles cannot recurse. A subtree that
/// cannot be read (permission error, concurrent deletion) is logged at
/// `warn` and skipped; one bad branch never aborts the scan.
pub fn scan_all(root: &Path, include_hidden: bool) -> Vec<ScannedFile> {
    WalkDir::new(root)
        .follow_links(false)
        .into_iter()
        .filter_entry(|entry| include_hidden || entry.depth() == 0 || !is_hidden(entry))
        .filter_map(|entry_result| match entry_result {
            Ok(entry) => Some(entry),
            Err(error) => {
                warn!(error = %error, "Skipping unreadable subtree during scan");
                None
            }
        })
        .filter(|entry| entry.file_type().is_file())
        .filter_map(|entry| {
            let rel = entry.path().strip_prefix(root).ok()?;
            Some(ScannedFile {
                name: entry.file_name().to_string_lossy().to_string(),
                rel_path: to_slash_path(rel),
                abs_path: entry.path().to_path_buf(),
            })
        })
        .collect()
}

fn is_hidden(entry: &DirEntry) -> bool {
    entry
        .file_name()
        .to_str()
        .map(|name| name.starts_with('.'))
        .unwrap_or(false)
}
