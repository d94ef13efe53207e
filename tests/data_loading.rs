use std::fs;
use std::path::Path;

use axum::{http::StatusCode, routing::get, Json, Router};
use serde_json::json;
use stableladder::{
    fetch_payload, load_snapshot, DataRoot, FetchError, LoaderConfig, SourceKey, SupplyPayload,
    TaxPayload,
};
use tempfile::TempDir;

fn write(dir: &Path, location: &str, body: &str) {
    let path = dir.join(location);
    fs::create_dir_all(path.parent().expect("location has a parent")).expect("create dirs");
    fs::write(path, body).expect("write fixture");
}

fn directory_config(dir: &TempDir) -> LoaderConfig {
    LoaderConfig {
        root: DataRoot::Directory(dir.path().to_path_buf()),
    }
}

#[tokio::test]
async fn failing_sources_become_none_without_affecting_siblings() {
    let dir = TempDir::new().expect("tempdir");
    write(
        dir.path(),
        SourceKey::Supply.location(),
        r#"{"metadata": {"last_updated": "2025-05-01"}, "monthly": [{"date": "2025-05", "usdc": 61.0}]}"#,
    );
    write(dir.path(), SourceKey::Tax.location(), "{ not json");
    write(dir.path(), SourceKey::Depegs.location(), "[1, 2, 3]");
    write(dir.path(), SourceKey::Wallets.location(), "{}");

    let snapshot = load_snapshot(&directory_config(&dir)).await;

    assert_eq!(snapshot.loaded_count(), 2);
    assert!(snapshot.is_loaded(SourceKey::Supply));
    assert!(snapshot.is_loaded(SourceKey::Wallets));
    assert!(!snapshot.is_loaded(SourceKey::Tax));
    assert!(!snapshot.is_loaded(SourceKey::Depegs));
    assert!(!snapshot.is_loaded(SourceKey::Layers));
    assert_eq!(snapshot.last_updated(SourceKey::Supply), Some("2025-05-01"));
}

#[tokio::test]
async fn mistyped_fields_default_instead_of_failing_the_source() {
    let dir = TempDir::new().expect("tempdir");
    write(
        dir.path(),
        SourceKey::Supply.location(),
        r#"{"monthly": [{"date": "2025-05", "usdc": "lots", "usdt": 140.5}, 7, null], "milestones": "none"}"#,
    );

    let payload: SupplyPayload = fetch_payload(
        &reqwest::Client::new(),
        &DataRoot::Directory(dir.path().to_path_buf()),
        SourceKey::Supply.location(),
    )
    .await
    .expect("object payload parses");

    assert_eq!(payload.monthly.len(), 1);
    assert_eq!(payload.monthly[0].usdc, None);
    assert_eq!(payload.monthly[0].usdt, Some(140.5));
    assert!(payload.milestones.is_empty());
}

#[tokio::test]
async fn error_kinds_distinguish_io_and_parse_failures() {
    let dir = TempDir::new().expect("tempdir");
    write(dir.path(), SourceKey::Tax.location(), "\"just a string\"");
    let root = DataRoot::Directory(dir.path().to_path_buf());
    let client = reqwest::Client::new();

    let missing = fetch_payload::<TaxPayload>(&client, &root, SourceKey::Layers.location())
        .await
        .expect_err("missing file fails");
    assert!(matches!(missing, FetchError::Io { .. }));

    let scalar = fetch_payload::<TaxPayload>(&client, &root, SourceKey::Tax.location())
        .await
        .expect_err("top-level scalar fails");
    assert!(matches!(scalar, FetchError::Parse { .. }));
}

#[tokio::test]
async fn http_root_loads_served_payloads_and_tolerates_404() {
    let app = Router::new()
        .route(
            "/data/tax/status.json",
            get(|| async {
                Json(json!({
                    "metadata": {"last_updated": "2025-06-02"},
                    "current_friction": "medium",
                    "signals": [{"signal": "Broker reporting", "status": "done"}]
                }))
            }),
        )
        .route(
            "/data/composite/signal.json",
            get(|| async { (StatusCode::INTERNAL_SERVER_ERROR, "boom") }),
        );
    let listener = tokio::net::TcpListener::bind("127.0.0.1:0")
        .await
        .expect("bind test listener");
    let addr = listener.local_addr().expect("local addr");
    let server = tokio::spawn(async move {
        axum::serve(listener, app).await.expect("test server runs");
    });

    let root = DataRoot::parse(&format!("http://{addr}/data/"));
    let snapshot = load_snapshot(&LoaderConfig { root: root.clone() }).await;

    assert_eq!(snapshot.loaded_count(), 1);
    let tax = snapshot.tax.as_ref().expect("tax loaded over http");
    assert_eq!(tax.current_friction.as_deref(), Some("medium"));
    assert_eq!(snapshot.last_updated(SourceKey::Tax), Some("2025-06-02"));

    let err = fetch_payload::<TaxPayload>(
        &reqwest::Client::new(),
        &root,
        SourceKey::Composite.location(),
    )
    .await
    .expect_err("server error fails");
    assert!(matches!(err, FetchError::Status { status: 500, .. }));

    let err = fetch_payload::<TaxPayload>(&reqwest::Client::new(), &root, "missing.json")
        .await
        .expect_err("404 fails");
    assert!(matches!(err, FetchError::Status { status: 404, .. }));

    server.abort();
}
