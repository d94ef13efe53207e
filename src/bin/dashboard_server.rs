use std::{net::SocketAddr, sync::Arc};

use stableladder::{
    dashboard_router, init_logging, loader_config_from_env, log_app_bind, log_app_start,
    log_source_selected, logging_config_from_env, parse_bool, DataRootSnapshotSource,
    InMemorySnapshotSource, SnapshotSource,
};

#[tokio::main]
async fn main() -> Result<(), Box<dyn std::error::Error>> {
    let logging_cfg = logging_config_from_env();
    init_logging(&logging_cfg)?;
    log_app_start("dashboard_server", &logging_cfg);

    let addr: SocketAddr = std::env::var("STABLELADDER_ADDR")
        .unwrap_or_else(|_| "127.0.0.1:8080".to_string())
        .parse()?;

    let source = source_from_env();
    let app = dashboard_router(source);
    let listener = tokio::net::TcpListener::bind(addr).await?;
    let bound_addr = listener.local_addr()?;

    log_app_bind(bound_addr);
    axum::serve(listener, app).await?;

    Ok(())
}

fn source_from_env() -> Arc<dyn SnapshotSource> {
    let use_demo = std::env::var("STABLELADDER_USE_DEMO")
        .ok()
        .as_deref()
        .and_then(parse_bool)
        .unwrap_or(false);

    if use_demo {
        log_source_selected("demo", Some("STABLELADDER_USE_DEMO"));
        return Arc::new(InMemorySnapshotSource::demo());
    }

    let loader_cfg = loader_config_from_env();
    let root = loader_cfg.root.resolve("");
    log_source_selected(loader_cfg.root.kind(), Some(&root));
    Arc::new(DataRootSnapshotSource::new(loader_cfg))
}
