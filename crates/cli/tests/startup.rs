use std::io::Write;
use std::net::TcpListener;
use std::process::ExitStatus;
use std::time::Duration;

use axum::routing::get;
use axum::{Json, Router};
use serde_json::Value;
use tempfile::NamedTempFile;
use tokio::time::timeout;

/// Find a port nobody listens on
fn get_unused_port() -> u16 {
    TcpListener::bind("127.0.0.1:0")
        .unwrap()
        .local_addr()
        .unwrap()
        .port()
}

fn config_for(base_url: &str, service_key: &str) -> String {
    format!(
        r#"
[catalog]
base_url = "{}"
service_key = "{}"
timeout_secs = 5

[enrichment]
company_id = "company-1"

[sync]
delay_ms = 0
"#,
        base_url, service_key
    )
}

fn write_config(content: &str) -> NamedTempFile {
    let mut temp_file = NamedTempFile::new().unwrap();
    temp_file.write_all(content.as_bytes()).unwrap();
    temp_file.flush().unwrap();
    temp_file
}

/// Run the binary to completion and return its exit status
async fn run_sync(config_path: &std::path::Path) -> ExitStatus {
    let mut child = tokio::process::Command::new(env!("CARGO_BIN_EXE_catalog-sync"))
        .env("CATALOG_SYNC_CONFIG", config_path)
        .env("RUST_LOG", "error") // Quiet logs during tests
        .kill_on_drop(true)
        .spawn()
        .expect("Failed to spawn catalog-sync");

    timeout(Duration::from_secs(30), child.wait())
        .await
        .expect("catalog-sync did not exit in time")
        .expect("Failed to wait for catalog-sync")
}

#[tokio::test]
async fn test_missing_config_exits_non_zero() {
    let dir = tempfile::tempdir().unwrap();
    let status = run_sync(&dir.path().join("nope.toml")).await;
    assert!(!status.success());
}

#[tokio::test]
async fn test_invalid_config_exits_non_zero() {
    let temp_file = write_config(&config_for("https://store.example.com", ""));
    let status = run_sync(temp_file.path()).await;
    assert!(!status.success());
}

#[tokio::test]
async fn test_unreachable_store_exits_non_zero() {
    let base_url = format!("http://127.0.0.1:{}", get_unused_port());
    let temp_file = write_config(&config_for(&base_url, "secret"));
    let status = run_sync(temp_file.path()).await;
    assert!(!status.success());
}

#[tokio::test]
async fn test_empty_catalog_exits_cleanly() {
    let app = Router::new().route(
        "/rest/v1/products",
        get(|| async { Json(Vec::<Value>::new()) }),
    );
    let listener = tokio::net::TcpListener::bind("127.0.0.1:0").await.unwrap();
    let addr = listener.local_addr().unwrap();
    tokio::spawn(async move {
        axum::serve(listener, app).await.unwrap();
    });

    let temp_file = write_config(&config_for(&format!("http://{}", addr), "secret"));
    let status = run_sync(temp_file.path()).await;
    assert!(status.success());
}

#[tokio::test]
async fn test_validation_error_is_reported_once() {
    let temp_file = write_config(&config_for("https://store.example.com", ""));
    let output = tokio::process::Command::new(env!("CARGO_BIN_EXE_catalog-sync"))
        .env("CATALOG_SYNC_CONFIG", temp_file.path())
        .env("RUST_LOG", "error")
        .output()
        .await
        .expect("Failed to run catalog-sync");

    assert!(!output.status.success());
    let mut logs = String::from_utf8_lossy(&output.stdout).into_owned();
    logs.push_str(&String::from_utf8_lossy(&output.stderr));
    assert_eq!(logs.matches("Configuration validation failed").count(), 1, "{}", logs);
    assert!(logs.contains("catalog.service_key cannot be empty"));
}
