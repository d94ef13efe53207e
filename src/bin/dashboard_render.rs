//! Loads the data root once and writes the rendered dashboard to a file or stdout.

use std::io::Write;

use stableladder::{
    init_logging, load_snapshot, loader_config_from_env, log_app_start, log_source_selected,
    logging_config_from_env, DashboardView,
};
use tracing::info;

#[tokio::main]
async fn main() -> Result<(), Box<dyn std::error::Error>> {
    let logging_cfg = logging_config_from_env();
    init_logging(&logging_cfg)?;
    log_app_start("dashboard_render", &logging_cfg);

    let loader_cfg = loader_config_from_env();
    let root = loader_cfg.root.resolve("");
    log_source_selected(loader_cfg.root.kind(), Some(&root));

    let snapshot = load_snapshot(&loader_cfg).await;
    let mut view = DashboardView::new();
    view.render(&snapshot);
    let html = view.to_html();

    match std::env::args().nth(1) {
        Some(path) => {
            tokio::fs::write(&path, html.as_bytes()).await?;
            info!(
                component = "dashboard_render",
                event = "render.written",
                path = %path,
                bytes = html.len(),
                live_charts = view.charts().live_count()
            );
        }
        None => {
            let mut stdout = std::io::stdout().lock();
            stdout.write_all(html.as_bytes())?;
            stdout.flush()?;
        }
    }

    Ok(())
}
