//! Stablecoin interchangeability ladder dashboard.
//!
//! Loads every data source concurrently into a [`Snapshot`], then renders each
//! dashboard section into a server-side [`Page`] whose chart surfaces are owned
//! by a [`ChartRegistry`].

mod charts;
mod dashboard;
mod demo;
mod dom;
mod format;
mod observability;
mod page;
mod payloads;
pub mod sections;
mod sources;

pub use charts::{
    Axis, ChartConfig, ChartData, ChartInstance, ChartKind, ChartLifecycleEvent, ChartOptions,
    ChartRegistry, Dataset,
};
pub use dashboard::{
    dashboard_router, render_dashboard_html, render_snapshot, DashboardView,
    DataRootSnapshotSource, InMemorySnapshotSource, SnapshotFuture, SnapshotSource,
};
pub use demo::demo_snapshot;
pub use dom::{el, escape_html, Attrs, Child, Node};
pub use format::{
    display_status, format_currency_abbrev, format_percent, format_scaled, format_usd,
    severity_class, status_color, text_or_dash, CanaryState, FrictionLevel, MilestoneState,
    SignalState, Trend, MISSING,
};
pub use observability::{
    init_logging, log_app_bind, log_app_start, log_source_selected, logging_config_from_env,
    parse_bool, LogFormat, LoggingConfig, LoggingInitError,
};
pub use page::{Block, Page, Section, CHART_JS_CDN, PLACEHOLDER_CLASS};
pub use payloads::{
    sort_newest_first, AdoptionEvent, Canary, CompositePayload, Corridor, DepegEvent,
    DepegPayload, GeniusPayload, HasMetadata, KeyMetrics, Layer, LayersPayload, Metadata,
    Milestone, RemittancePayload, RemittanceQuarter, ReserveMonth, ReservesPayload,
    RulemakingEntry, SecondaryCanary, SupplyMonth, SupplyPayload, TaxPayload, TaxSignal,
    VolumeMonth, VolumePayload, WalletMonth, WalletsPayload, YieldPayload, YieldRate,
};
pub use sources::{
    fetch_payload, load_snapshot, loader_config_from_env, DataRoot, FetchError, LoaderConfig,
    Snapshot, SourceKey,
};
