//! Request dispatch for the files endpoint.
//!
//! One GET endpoint serves four request shapes: directory listing, full-tree
//! search, inline preview, and attachment download. The handler validates
//! the requested path, decides the action once at the boundary, and maps
//! every outcome onto the response contract:
//!
//! - 200 with `{ files, currentPath }` (listings and searches, including
//!   empty results, which additionally carry a `message`)
//! - 403 when the path escapes the served root
//! - 404 when the target is absent and no search will run
//! - 400 for an unknown action
//! - 500 for read failures on the primary target and scan timeouts

use std::path::{Path, PathBuf};
use std::sync::Arc;
use std::time::Duration;

use axum::extract::{Query, State};
use axum::http::{header, StatusCode};
use axum::response::{IntoResponse, Response};
use axum::routing::get;
use axum::{Json, Router};
use serde::Deserialize;
use tower_http::cors::{Any, CorsLayer};
use tracing::{debug, warn};

use protocol::{Action, ErrorResponse, FileEntry, ListResponse};

use crate::config::Config;
use crate::files::browser::entry_from_metadata;
use crate::files::{matcher, resolver, scanner, to_slash_path, DirectoryLister};

/// Message returned whenever a list or search produces nothing.
const NO_RESULTS_MESSAGE: &str = "no results found";

/// Content type for inline previews (the supported document kind).
const PREVIEW_CONTENT_TYPE: &str = "application/pdf";

/// Immutable per-process state shared by every request.
///
/// The filesystem itself is the source of truth; nothing here changes after
/// startup, so requests share it without synchronization.
pub struct AppState {
    /// The served root. No resolution may escape it.
    pub root: PathBuf,
    /// Whether dotfiles appear in listings and scans.
    pub include_hidden: bool,
    /// Upper bound on one full-tree search scan.
    pub scan_timeout: Duration,
}

impl AppState {
    pub fn from_config(config: &Config) -> Self {
        Self {
            root: config.files.root_dir.clone(),
            include_hidden: config.files.include_hidden,
            scan_timeout: Duration::from_secs(config.files.scan_timeout_secs),
        }
    }
}

/// Error response carrying the HTTP status for the uniform `{ error }` body.
#[derive(Debug)]
pub struct ApiError {
    status: StatusCode,
    message: String,
}

impl ApiError {
    fn new(status: StatusCode, message: impl Into<String>) -> Self {
        Self {
            status,
            message: message.into(),
        }
    }

    fn forbidden(message: impl Into<String>) -> Self {
        Self::new(StatusCode::FORBIDDEN, message)
    }

    fn not_found(message: impl Into<String>) -> Self {
        Self::new(StatusCode::NOT_FOUND, message)
    }

    fn bad_request(message: impl Into<String>) -> Self {
        Self::new(StatusCode::BAD_REQUEST, message)
    }

    fn internal(message: impl Into<String>) -> Self {
        Self::new(StatusCode::INTERNAL_SERVER_ERROR, message)
    }
}

impl IntoResponse for ApiError {
    fn into_response(self) -> Response {
        (self.status, Json(ErrorResponse::new(self.message))).into_response()
    }
}

/// Build the daemon's router.
pub fn build_router(state: Arc<AppState>) -> Router {
    let cors = CorsLayer::new()
        .allow_origin(Any)
        .allow_methods(Any)
        .allow_headers(Any);

    Router::new()
        .route("/health", get(health))
        .route("/api/files", get(files_handler))
        .with_state(state)
        .layer(cors)
}

async fn health() -> &'static str {
    "ok"
}

/// Query parameters accepted by the files endpoint. All optional.
#[derive(Debug, Default, Deserialize)]
pub struct FilesQuery {
    /// Root-relative directory or file path.
    #[serde(default)]
    pub path: String,
    /// Fuzzy query string; empty means no search.
    #[serde(default)]
    pub search: String,
    /// Requested action; empty means `list`.
    #[serde(default)]
    pub action: String,
}

/// GET /api/files
async fn files_handler(
    State(state): State<Arc<AppState>>,
    Query(params): Query<FilesQuery>,
) -> Result<Response, ApiError> {
    // The action vocabulary is closed; reject anything else before I/O.
    let action = Action::parse(&params.action).map_err(|e| ApiError::bad_request(e.to_string()))?;

    debug!(
        path = %params.path,
        search = %params.search,
        action = action.as_str(),
        "Dispatching files request"
    );

    let resolved =
        resolver::resolve(&state.root, &params.path).map_err(|e| ApiError::forbidden(e.to_string()))?;

    // A missing target is terminal only when no search will run; a search
    // always scans the root and ignores the target's existence.
    if !resolved.exists() && params.search.is_empty() {
        return Err(ApiError::not_found(format!(
            "no such file or directory: {}",
            params.path
        )));
    }

    match action {
        Action::List if params.search.is_empty() => handle_list(&state, &resolved, &params.path),
        Action::List => handle_search(&state, &params.search, &params.path).await,
        Action::Preview => handle_preview(&resolved).await,
        Action::Download => handle_download(&resolved).await,
    }
}

/// Directory-listing mode.
///
/// A target that is not a directory is an empty result, not an error.
fn handle_list(
    state: &AppState,
    resolved: &Path,
    current_path: &str,
) -> Result<Response, ApiError> {
    let relative_dir = resolved
        .strip_prefix(&state.root)
        .map(to_slash_path)
        .unwrap_or_default();

    let lister = DirectoryLister::new(state.include_hidden);
    let entries = match lister.list(resolved, &relative_dir) {
        Ok(entries) => entries,
        Err(crate::files::BrowseError::NotFound(_))
        | Err(crate::files::BrowseError::NotADirectory(_)) => {
            return Ok(list_response(Vec::new(), current_path));
        }
        Err(error) => return Err(ApiError::internal(error.to_string())),
    };

    Ok(list_response(entries, current_path))
}

/// Search mode: scan the whole root, filter by the fuzzy matcher, stat each
/// match so search entries look exactly like listing entries.
async fn handle_search(
    state: &AppState,
    search: &str,
    current_path: &str,
) -> Result<Response, ApiError> {
    let root = state.root.clone();
    let include_hidden = state.include_hidden;
    let query = search.to_string();

    // The walk is synchronous disk I/O; keep it off the async workers.
    let scan = tokio::task::spawn_blocking(move || {
        let mut entries = Vec::new();
        for file in scanner::scan_all(&root, include_hidden) {
            if !matcher::matches(&file.name, &query) {
                continue;
            }
            match std::fs::metadata(&file.abs_path) {
                Ok(metadata) => {
                    entries.push(entry_from_metadata(&file.name, file.rel_path, &metadata));
                }
                Err(error) => {
                    warn!(
                        path = %file.abs_path.display(),
                        error = %error,
                        "Skipping match that cannot be stat-ed"
                    );
                }
            }
        }
        entries
    });

    let entries = match tokio::time::timeout(state.scan_timeout, scan).await {
        Ok(Ok(entries)) => entries,
        Ok(Err(join_error)) => {
            return Err(ApiError::internal(format!("scan task failed: {join_error}")));
        }
        Err(_) => {
            return Err(ApiError::internal(format!(
                "search scan timed out after {}s",
                state.scan_timeout.as_secs()
            )));
        }
    };

    Ok(list_response(entries, current_path))
}

/// Inline preview: the full byte content with the preview content type.
async fn handle_preview(resolved: &Path) -> Result<Response, ApiError> {
    let content = tokio::fs::read(resolved)
        .await
        .map_err(|e| ApiError::internal(e.to_string()))?;

    Ok(([(header::CONTENT_TYPE, PREVIEW_CONTENT_TYPE)], content).into_response())
}

/// Attachment download: the full byte content, named after the target.
async fn handle_download(resolved: &Path) -> Result<Response, ApiError> {
    let content = tokio::fs::read(resolved)
        .await
        .map_err(|e| ApiError::internal(e.to_string()))?;

    let file_name = resolved
        .file_name()
        .map(|n| n.to_string_lossy().to_string())
        .unwrap_or_else(|| "download".to_string());

    Ok((
        [
            (header::CONTENT_TYPE, "application/octet-stream".to_string()),
            (
                header::CONTENT_DISPOSITION,
                format!("attachment; filename=\"{file_name}\""),
            ),
        ],
        content,
    )
        .into_response())
}

fn list_response(files: Vec<FileEntry>, current_path: &str) -> Response {
    let body = if files.is_empty() {
        ListResponse::empty(NO_RESULTS_MESSAGE, current_path)
    } else {
        ListResponse::new(files, current_path)
    };
    Json(body).into_response()
}
