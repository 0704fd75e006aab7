//! Filesystem core: path resolution, directory listing, tree scanning, and
//! fuzzy name matching.
//!
//! # Security
//!
//! Every request path is resolved lexically against the served root before
//! any filesystem access; resolutions that would leave the root are
//! rejected. The scanner never follows symlinks.

use std::path::Path;

pub mod browser;
pub mod matcher;
pub mod resolver;
pub mod scanner;

pub use browser::{BrowseError, DirectoryLister};
pub use resolver::ResolveError;
pub use scanner::ScannedFile;

/// Render a relative path with `/` separators regardless of platform.
pub(crate) fn to_slash_path(path: &Path) -> String {
    path.components()
        .map(|c| c.as_os_str().to_string_lossy())
        .collect::<Vec<_>>()
        .join("/")
}
