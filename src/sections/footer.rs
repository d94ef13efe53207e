//! Source status indicators and overall data freshness.

use crate::dom::{class, el, Child};
use crate::format::MISSING;
use crate::page::Page;
use crate::sources::{Snapshot, SourceKey};

use super::log_outcome;

pub const SOURCES: &str = "footer-sources";
pub const UPDATED: &str = "footer-updated";

/// Sources with a status indicator, in display order.
pub const TRACKED_SOURCES: [(SourceKey, &str); 6] = [
    (SourceKey::Supply, "Supply"),
    (SourceKey::Volume, "Volume"),
    (SourceKey::Wallets, "Wallets"),
    (SourceKey::Remittance, "Remittance"),
    (SourceKey::Genius, "GENIUS Act"),
    (SourceKey::Reserves, "Reserves"),
];

pub fn render(page: &mut Page, snapshot: &Snapshot) {
    let indicators: Vec<Child> = TRACKED_SOURCES
        .iter()
        .map(|(key, label)| {
            let (css, state) = if snapshot.is_loaded(*key) {
                ("source-status loaded", "loaded")
            } else {
                ("source-status pending", "pending")
            };
            el("span", class(css).text(format!("{label}: {state}")), vec![]).into()
        })
        .collect();
    page.replace(SOURCES, vec![el("div", class("source-statuses"), indicators)]);

    let updated = latest_update(snapshot).unwrap_or(MISSING);
    page.replace(
        UPDATED,
        vec![el(
            "p",
            class("muted"),
            vec![format!("Last updated: {updated}").into()],
        )],
    );

    log_outcome("footer", "rendered");
}

/// Plain string maximum of `metadata.last_updated` across loaded payloads.
pub fn latest_update(snapshot: &Snapshot) -> Option<&str> {
    SourceKey::ALL
        .iter()
        .filter_map(|key| snapshot.last_updated(*key))
        .max()
}
