//! Stablecoin issuer T-bill holdings.

use crate::charts::{Axis, ChartConfig, ChartKind, ChartRegistry, Dataset};
use crate::format::{format_currency_abbrev, format_percent};
use crate::page::Page;
use crate::payloads::ReservesPayload;

use super::{labels, log_outcome, milestones, series, show_unavailable, stats, SERIES_COLORS};

pub const PANEL: &str = "treasury-panel";
pub const CHART: &str = "chart-treasury";
pub const MILESTONES: &str = "treasury-milestones";

pub fn render(page: &mut Page, charts: &mut ChartRegistry, payload: Option<&ReservesPayload>) {
    let Some(data) = payload.filter(|p| !p.monthly.is_empty()) else {
        show_unavailable(
            page,
            charts,
            "treasury",
            PANEL,
            &[CHART],
            "Treasury holdings unavailable",
        );
        page.clear(MILESTONES);
        return;
    };

    if let Some(latest) = data.monthly.last() {
        page.replace(
            PANEL,
            vec![stats(&[
                (
                    "T-bill holdings",
                    format_currency_abbrev(latest.total_stablecoin_tbill_bn),
                ),
                ("Share of market", format_percent(latest.pct_of_market)),
            ])],
        );
    }

    charts.mount(page, CHART, treasury_chart(data));
    milestones::render(page, MILESTONES, &data.milestones);
    log_outcome("treasury", "rendered");
}

pub fn treasury_chart(data: &ReservesPayload) -> ChartConfig {
    let months = &data.monthly;

    ChartConfig::new(ChartKind::Line, labels(months, |m| m.date.as_deref()))
        .dataset(
            Dataset::line(
                "T-bill holdings",
                series(months, |m| m.total_stablecoin_tbill_bn),
                SERIES_COLORS[0],
            )
            .tooltips(format_currency_abbrev),
        )
        .dataset(
            Dataset::line(
                "% of T-bill market",
                series(months, |m| m.pct_of_market),
                SERIES_COLORS[3],
            )
            .dashed()
            .on_axis("y1")
            .tooltips(format_percent),
        )
        .axis("y", Axis::left().from_zero().titled("USD billions"))
        .axis("y1", Axis::right().from_zero().titled("% of market"))
}
