//! End-to-end integration tests for FileDock.
//!
//! These tests exercise complete flows over real HTTP:
//! - Directory listing and the response contract
//! - Full-tree fuzzy search
//! - Preview and download byte access
//! - Path-escape and error handling

use std::fs;
use std::path::Path;
use std::sync::Arc;
use std::time::Duration;

use daemon::router::AppState;
use daemon::server::Server;
use tempfile::TempDir;

/// Start a daemon on a free port over a populated temporary root.
async fn start_test_server() -> (Server, TempDir, String) {
    let temp_dir = TempDir::new().unwrap();
    create_tree(temp_dir.path());

    let state = Arc::new(AppState {
        root: temp_dir.path().to_path_buf(),
        include_hidden: true,
        scan_timeout: Duration::from_secs(30),
    });

    let server = Server::start("127.0.0.1:0".parse().unwrap(), state)
        .await
        .unwrap();
    let base_url = format!("http://{}", server.addr());

    (server, temp_dir, base_url)
}

fn create_tree(root: &Path) {
    fs::create_dir_all(root.join("docs/img")).unwrap();
    fs::write(root.join("docs/report.pdf"), vec![0u8; 10240]).unwrap();
    fs::write(root.join("docs/img/photo.png"), "png-bytes").unwrap();
    fs::write(root.join("readme.md"), "hello").unwrap();
}

async fn get_files(
    base_url: &str,
    params: &[(&str, &str)],
) -> reqwest::Response {
    reqwest::Client::new()
        .get(format!("{base_url}/api/files"))
        .query(params)
        .send()
        .await
        .unwrap()
}

// =============================================================================
// Liveness
// =============================================================================

#[tokio::test]
async fn test_health_endpoint() {
    let (mut server, _root, base_url) = start_test_server().await;

    let response = reqwest::get(format!("{base_url}/health")).await.unwrap();
    assert_eq!(response.status(), 200);
    assert_eq!(response.text().await.unwrap(), "ok");

    server.shutdown();
}

// =============================================================================
// Listing
// =============================================================================

#[tokio::test]
async fn test_list_directory_over_http() {
    let (mut server, _root, base_url) = start_test_server().await;

    let response = get_files(&base_url, &[("path", "docs")]).await;
    assert_eq!(response.status(), 200);

    let json: serde_json::Value = response.json().await.unwrap();
    assert_eq!(json["currentPath"], "docs");

    let files = json["files"].as_array().unwrap();
    assert_eq!(files.len(), 2);

    let report = files
        .iter()
        .find(|f| f["name"] == "report.pdf")
        .expect("report.pdf listed");
    assert_eq!(report["isDirectory"], false);
    assert_eq!(report["size"], 10240);

    let img = files.iter().find(|f| f["name"] == "img").expect("img listed");
    assert_eq!(img["isDirectory"], true);
    assert!(img["size"].is_null());

    server.shutdown();
}

#[tokio::test]
async fn test_list_defaults_to_root() {
    let (mut server, _root, base_url) = start_test_server().await;

    // No parameters at all: list the root.
    let response = get_files(&base_url, &[]).await;
    assert_eq!(response.status(), 200);

    let json: serde_json::Value = response.json().await.unwrap();
    assert_eq!(json["currentPath"], "");
    let names: Vec<&str> = json["files"]
        .as_array()
        .unwrap()
        .iter()
        .map(|f| f["name"].as_str().unwrap())
        .collect();
    assert!(names.contains(&"docs"));
    assert!(names.contains(&"readme.md"));

    server.shutdown();
}

// =============================================================================
// Search
// =============================================================================

#[tokio::test]
async fn test_search_over_http() {
    let (mut server, _root, base_url) = start_test_server().await;

    let response = get_files(&base_url, &[("search", "photo")]).await;
    assert_eq!(response.status(), 200);

    let json: serde_json::Value = response.json().await.unwrap();
    let files = json["files"].as_array().unwrap();
    assert_eq!(files.len(), 1);
    assert_eq!(files[0]["path"], "docs/img/photo.png");
    assert_eq!(files[0]["isDirectory"], false);

    server.shutdown();
}

#[tokio::test]
async fn test_search_typo_over_http() {
    let (mut server, _root, base_url) = start_test_server().await;

    let response = get_files(&base_url, &[("search", "repot")]).await;
    assert_eq!(response.status(), 200);

    let json: serde_json::Value = response.json().await.unwrap();
    assert_eq!(json["files"][0]["path"], "docs/report.pdf");

    server.shutdown();
}

#[tokio::test]
async fn test_search_without_matches_is_ok() {
    let (mut server, _root, base_url) = start_test_server().await;

    let response = get_files(&base_url, &[("search", "zzzzzzzzzz")]).await;
    assert_eq!(response.status(), 200);

    let json: serde_json::Value = response.json().await.unwrap();
    assert_eq!(json["files"].as_array().unwrap().len(), 0);
    assert!(json["message"].is_string());

    server.shutdown();
}

// =============================================================================
// Preview and download
// =============================================================================

#[tokio::test]
async fn test_preview_over_http() {
    let (mut server, _root, base_url) = start_test_server().await;

    let response = get_files(
        &base_url,
        &[("path", "docs/report.pdf"), ("action", "preview")],
    )
    .await;
    assert_eq!(response.status(), 200);
    assert_eq!(
        response.headers().get("content-type").unwrap(),
        "application/pdf"
    );
    assert_eq!(response.bytes().await.unwrap().len(), 10240);

    server.shutdown();
}

#[tokio::test]
async fn test_download_over_http() {
    let (mut server, _root, base_url) = start_test_server().await;

    let response = get_files(
        &base_url,
        &[("path", "docs/img/photo.png"), ("action", "download")],
    )
    .await;
    assert_eq!(response.status(), 200);
    assert_eq!(
        response.headers().get("content-type").unwrap(),
        "application/octet-stream"
    );
    assert_eq!(
        response.headers().get("content-disposition").unwrap(),
        "attachment; filename=\"photo.png\""
    );
    assert_eq!(response.bytes().await.unwrap().as_ref(), b"png-bytes");

    server.shutdown();
}

// =============================================================================
// Errors
// =============================================================================

#[tokio::test]
async fn test_traversal_is_forbidden_over_http() {
    let (mut server, _root, base_url) = start_test_server().await;

    let response = get_files(&base_url, &[("path", "../../etc/passwd")]).await;
    assert_eq!(response.status(), 403);

    let json: serde_json::Value = response.json().await.unwrap();
    assert!(json["error"].is_string());

    server.shutdown();
}

#[tokio::test]
async fn test_missing_path_is_not_found_over_http() {
    let (mut server, _root, base_url) = start_test_server().await;

    let response = get_files(&base_url, &[("path", "no/such/dir")]).await;
    assert_eq!(response.status(), 404);

    let json: serde_json::Value = response.json().await.unwrap();
    assert!(json["error"].is_string());

    server.shutdown();
}

#[tokio::test]
async fn test_unknown_action_is_bad_request_over_http() {
    let (mut server, _root, base_url) = start_test_server().await;

    let response = get_files(&base_url, &[("action", "bogus")]).await;
    assert_eq!(response.status(), 400);

    let json: serde_json::Value = response.json().await.unwrap();
    assert!(json["error"].as_str().unwrap().contains("invalid action"));

    server.shutdown();
}

#[tokio::test]
async fn test_every_request_gets_one_structured_response() {
    let (mut server, _root, base_url) = start_test_server().await;

    // A sweep of odd requests; each must produce exactly one JSON body with
    // a known status, never a connection error.
    let cases: &[&[(&str, &str)]] = &[
        &[("path", "..")],
        &[("path", "docs"), ("action", "download")],
        &[("path", "readme.md")],
        &[("search", "md"), ("path", "does/not/exist")],
    ];

    for params in cases {
        let response = get_files(&base_url, params).await;
        assert!(
            [200, 400, 403, 404, 500].contains(&response.status().as_u16()),
            "unexpected status for {params:?}"
        );
        let _: serde_json::Value = response.json().await.unwrap();
    }

    server.shutdown();
}
