//! One renderer per dashboard section.
//!
//! Every renderer takes already-parsed payloads, writes only to its own containers
//! and chart surfaces, and falls back to a single placeholder when its primary
//! collection is missing.

pub mod acceptance;
pub mod commercial;
pub mod depegs;
pub mod footer;
pub mod key_metrics;
pub mod ladder;
pub mod milestones;
pub mod remittance;
pub mod supply;
pub mod tax;
pub mod treasury;
pub mod wallets;
pub mod yields;

use tracing::debug;

use crate::charts::ChartRegistry;
use crate::dom::{class, el, Attrs, Child, Node};
use crate::page::Page;

pub const SERIES_COLORS: [&str; 6] = [
    "#2775ca", "#26a17b", "#8b5cf6", "#f97316", "#0ea5e9", "#e11d48",
];

/// Placeholder in `container`, charts on `surfaces` disposed.
pub(crate) fn show_unavailable(
    page: &mut Page,
    charts: &mut ChartRegistry,
    section: &'static str,
    container: &str,
    surfaces: &[&str],
    reason: &str,
) {
    page.show_placeholder(container, reason);
    for surface in surfaces {
        charts.unmount(surface);
    }
    log_outcome(section, "placeholder");
}

pub(crate) fn log_outcome(section: &'static str, outcome: &'static str) {
    debug!(
        component = "sections",
        event = "render.section",
        section,
        outcome
    );
}

/// Plotted series: missing numbers become zero.
pub(crate) fn series<T>(records: &[T], field: impl Fn(&T) -> Option<f64>) -> Vec<f64> {
    records
        .iter()
        .map(|record| field(record).filter(|v| v.is_finite()).unwrap_or(0.0))
        .collect()
}

pub(crate) fn labels<T>(records: &[T], label: impl Fn(&T) -> Option<&str>) -> Vec<String> {
    records
        .iter()
        .map(|record| label(record).unwrap_or("").to_string())
        .collect()
}

pub(crate) fn stats(items: &[(&str, String)]) -> Node {
    el(
        "div",
        class("stats"),
        items
            .iter()
            .map(|(label, value)| {
                el(
                    "div",
                    class("stat"),
                    vec![
                        el("span", class("stat-label").text(*label), vec![]).into(),
                        el("span", class("stat-value").text(value.clone()), vec![]).into(),
                    ],
                )
                .into()
            })
            .collect(),
    )
}

pub(crate) fn table(headers: &[&str], rows: Vec<Vec<String>>) -> Node {
    let head = el(
        "thead",
        Attrs::new(),
        vec![el(
            "tr",
            Attrs::new(),
            headers
                .iter()
                .map(|h| el("th", Attrs::new().text(*h), vec![]).into())
                .collect(),
        )
        .into()],
    );

    let body = el(
        "tbody",
        Attrs::new(),
        rows.into_iter()
            .map(|cells| {
                el(
                    "tr",
                    Attrs::new(),
                    cells
                        .into_iter()
                        .map(|cell| el("td", Attrs::new().text(cell), vec![]).into())
                        .collect(),
                )
                .into()
            })
            .collect(),
    );

    el("table", Attrs::new(), vec![head.into(), body.into()])
}

pub(crate) fn muted(text: impl Into<String>) -> Child {
    el("span", class("muted").text(text), vec![]).into()
}
