//! Render orchestration and HTTP routes.

use std::future::Future;
use std::pin::Pin;
use std::sync::{Arc, Mutex, RwLock};

use axum::{
    extract::State,
    response::{Html, IntoResponse, Redirect},
    routing::get,
    Json, Router,
};
use chrono::Utc;
use tracing::info;

use crate::charts::ChartRegistry;
use crate::demo::demo_snapshot;
use crate::page::Page;
use crate::sections::{
    acceptance, commercial, depegs, footer, key_metrics, ladder, remittance, supply, tax,
    treasury, wallets, yields,
};
use crate::sources::{load_snapshot, LoaderConfig, Snapshot};

/// Runs every section renderer once, in page order.
pub fn render_snapshot(snapshot: &Snapshot, page: &mut Page, charts: &mut ChartRegistry) {
    ladder::render(page, snapshot.layers.as_ref());
    supply::render(page, charts, snapshot.supply.as_ref());
    commercial::render(page, charts, snapshot.volume.as_ref());
    remittance::render(page, charts, snapshot.remittance.as_ref());
    acceptance::render(
        page,
        snapshot.genius.as_ref(),
        snapshot.layers.as_ref(),
        snapshot.composite.as_ref(),
    );
    wallets::render(page, charts, snapshot.wallets.as_ref());
    treasury::render(page, charts, snapshot.reserves.as_ref());
    tax::render(page, snapshot.tax.as_ref());
    yields::render(page, snapshot.yield_rates.as_ref());
    depegs::render(page, snapshot.depegs.as_ref());
    key_metrics::render(page, snapshot.composite.as_ref());
    footer::render(page, snapshot);
}

/// A page and its chart registry, kept alive across renders so charts are
/// re-mounted rather than leaked.
#[derive(Debug)]
pub struct DashboardView {
    page: Page,
    charts: ChartRegistry,
}

impl Default for DashboardView {
    fn default() -> Self {
        Self::new()
    }
}

impl DashboardView {
    pub fn new() -> Self {
        Self {
            page: Page::dashboard(),
            charts: ChartRegistry::new(),
        }
    }

    pub fn render(&mut self, snapshot: &Snapshot) {
        render_snapshot(snapshot, &mut self.page, &mut self.charts);
    }

    pub fn to_html(&self) -> String {
        let generated_at = Utc::now().format("%Y-%m-%d %H:%M:%S UTC").to_string();
        self.page.to_html(&self.charts, &generated_at)
    }

    pub fn page(&self) -> &Page {
        &self.page
    }

    pub fn charts(&self) -> &ChartRegistry {
        &self.charts
    }
}

pub fn render_dashboard_html(snapshot: &Snapshot) -> String {
    let mut view = DashboardView::new();
    view.render(snapshot);
    view.to_html()
}

pub type SnapshotFuture<'a> = Pin<Box<dyn Future<Output = Snapshot> + Send + 'a>>;

pub trait SnapshotSource: Send + Sync + 'static {
    fn snapshot(&self) -> SnapshotFuture<'_>;
}

/// Loads a fresh snapshot from the data root on every request.
#[derive(Debug, Clone)]
pub struct DataRootSnapshotSource {
    config: LoaderConfig,
}

impl DataRootSnapshotSource {
    pub fn new(config: LoaderConfig) -> Self {
        Self { config }
    }

    pub fn config(&self) -> &LoaderConfig {
        &self.config
    }
}

impl SnapshotSource for DataRootSnapshotSource {
    fn snapshot(&self) -> SnapshotFuture<'_> {
        Box::pin(load_snapshot(&self.config))
    }
}

#[derive(Clone)]
pub struct InMemorySnapshotSource {
    inner: Arc<RwLock<Snapshot>>,
}

impl InMemorySnapshotSource {
    pub fn new(snapshot: Snapshot) -> Self {
        Self {
            inner: Arc::new(RwLock::new(snapshot)),
        }
    }

    pub fn demo() -> Self {
        Self::new(demo_snapshot())
    }

    pub fn replace_snapshot(&self, snapshot: Snapshot) {
        let mut guard = self
            .inner
            .write()
            .expect("in-memory snapshot lock should not be poisoned");
        *guard = snapshot;
    }
}

impl SnapshotSource for InMemorySnapshotSource {
    fn snapshot(&self) -> SnapshotFuture<'_> {
        let snapshot = self
            .inner
            .read()
            .expect("in-memory snapshot lock should not be poisoned")
            .clone();
        Box::pin(async move { snapshot })
    }
}

pub fn dashboard_router(source: Arc<dyn SnapshotSource>) -> Router {
    Router::new()
        .route("/", get(|| async { Redirect::to("/dashboard") }))
        .route("/dashboard", get(get_dashboard_html))
        .route("/dashboard/snapshot", get(get_dashboard_snapshot))
        .with_state(DashboardAppState {
            source,
            view: Arc::new(Mutex::new(DashboardView::new())),
        })
}

#[derive(Clone)]
struct DashboardAppState {
    source: Arc<dyn SnapshotSource>,
    view: Arc<Mutex<DashboardView>>,
}

async fn get_dashboard_html(State(state): State<DashboardAppState>) -> impl IntoResponse {
    let snapshot = state.source.snapshot().await;

    let mut view = state
        .view
        .lock()
        .expect("dashboard view lock should not be poisoned");
    view.render(&snapshot);
    info!(
        component = "http",
        event = "http.dashboard.request",
        loaded = snapshot.loaded_count(),
        live_charts = view.charts().live_count()
    );
    Html(view.to_html())
}

async fn get_dashboard_snapshot(State(state): State<DashboardAppState>) -> impl IntoResponse {
    let snapshot = state.source.snapshot().await;
    info!(
        component = "http",
        event = "http.snapshot.request",
        loaded = snapshot.loaded_count()
    );
    Json(snapshot)
}
