//! Wire body definitions for FileDock.
//!
//! This module defines the request vocabulary and response bodies exchanged
//! between the daemon and clients. All bodies are serialized as JSON with
//! camelCase keys.

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use thiserror::Error;

/// Error returned when an `action` parameter does not name a known action.
#[derive(Debug, Clone, PartialEq, Eq, Error)]
#[error("invalid action: {0}")]
pub struct InvalidAction(pub String);

/// The operation requested on a path.
///
/// The action is decided exactly once at the request boundary; any string
/// outside this closed set is rejected before the daemon performs I/O.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum Action {
    /// List a directory, or search the whole tree when a query is present.
    #[default]
    List,
    /// Return a file's content inline.
    Preview,
    /// Return a file's content as an attachment.
    Download,
}

impl Action {
    /// Parse an `action` query parameter value.
    ///
    /// An empty value selects the default [`Action::List`].
    pub fn parse(raw: &str) -> Result<Self, InvalidAction> {
        match raw {
            "" | "list" => Ok(Action::List),
            "preview" => Ok(Action::Preview),
            "download" => Ok(Action::Download),
            other => Err(InvalidAction(other.to_string())),
        }
    }

    /// The wire name of this action.
    pub fn as_str(&self) -> &'static str {
        match self {
            Action::List => "list",
            Action::Preview => "preview",
            Action::Download => "download",
        }
    }
}

/// A single file or directory entry.
///
/// The same shape is used for directory listings and search results; search
/// results are always files, stat-ed like listing entries.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct FileEntry {
    /// Entry name (not full path).
    pub name: String,
    /// Whether the entry is a directory.
    pub is_directory: bool,
    /// Path relative to the served root, `/`-separated. Never absolute.
    pub path: String,
    /// Creation timestamp, omitted when the platform cannot report one.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub created: Option<DateTime<Utc>>,
    /// Size in bytes; null for directories.
    pub size: Option<u64>,
}

/// Response body for list and search requests.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct ListResponse {
    /// Human-readable note, present only on empty results.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub message: Option<String>,
    /// Entries found.
    pub files: Vec<FileEntry>,
    /// The root-relative path the request targeted.
    pub current_path: String,
}

impl ListResponse {
    /// A successful listing.
    pub fn new(files: Vec<FileEntry>, current_path: impl Into<String>) -> Self {
        Self {
            message: None,
            files,
            current_path: current_path.into(),
        }
    }

    /// An empty result with an explanatory message. Not an error.
    pub fn empty(message: impl Into<String>, current_path: impl Into<String>) -> Self {
        Self {
            message: Some(message.into()),
            files: Vec::new(),
            current_path: current_path.into(),
        }
    }
}

/// Uniform error body for every non-2xx JSON response.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct ErrorResponse {
    /// Description of the failure.
    pub error: String,
}

impl ErrorResponse {
    pub fn new(error: impl Into<String>) -> Self {
        Self {
            error: error.into(),
        }
    }
}
