//! Root-relative path resolution.
//!
//! Every client-supplied path is resolved against the served root before any
//! filesystem access happens. Resolution is purely lexical, so the check
//! cannot be confused by the state of the disk: `.` segments are dropped,
//! `..` segments pop the previously accepted segment, and anything that
//! would climb above the root is rejected.

use std::ffi::OsStr;
use std::path::{Component, Path, PathBuf};

use thiserror::Error;

/// Errors that can occur during path resolution.
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum ResolveError {
    /// The requested path escapes the served root.
    #[error("path is outside the served root: {0}")]
    OutsideRoot(String),
}

/// Resolve a client-supplied relative path against the served root.
///
/// Returns the absolute on-disk path for the request. The result is always a
/// descendant of `root` (or `root` itself, for an empty `user_path`); inputs
/// that normalize above the root, and absolute inputs, fail with
/// [`ResolveError::OutsideRoot`].
///
/// This function performs no I/O. Whether the resolved path exists is the
/// caller's concern.
pub fn resolve(root: &Path, user_path: &str) -> Result<PathBuf, ResolveError> {
    let mut segments: Vec<&OsStr> = Vec::new();

    for component in Path::new(user_path).components() {
        match component {
            Component::Normal(segment) => segments.push(segment),
            Component::CurDir => {}
            Component::ParentDir => {
                if segments.pop().is_none() {
                    return Err(ResolveError::OutsideRoot(user_path.to_string()));
                }
            }
            Component::RootDir | Component::Prefix(_) => {
                return Err(ResolveError::OutsideRoot(user_path.to_string()));
            }
        }
    }

    let mut resolved = root.to_path_buf();
    for segment in segments {
        resolved.push(segment);
    }
    Ok(resolved)
}
