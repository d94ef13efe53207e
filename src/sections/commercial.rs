//! Commercial on-chain volume against ACH.

use crate::charts::{Axis, ChartConfig, ChartKind, ChartRegistry, Dataset};
use crate::format::{format_currency_abbrev, format_percent, format_usd};
use crate::page::Page;
use crate::payloads::VolumePayload;

use super::{labels, log_outcome, milestones, series, show_unavailable, stats, SERIES_COLORS};

pub const PANEL: &str = "volume-panel";
pub const VOLUME_CHART: &str = "chart-volume";
pub const SHARE_CHART: &str = "chart-commercial-pct";
pub const TRANSFER_SIZE_CHART: &str = "chart-transfer-size";
pub const MILESTONES: &str = "volume-milestones";

pub fn render(page: &mut Page, charts: &mut ChartRegistry, payload: Option<&VolumePayload>) {
    let Some(data) = payload.filter(|p| !p.monthly.is_empty()) else {
        show_unavailable(
            page,
            charts,
            "commercial",
            PANEL,
            &[VOLUME_CHART, SHARE_CHART, TRANSFER_SIZE_CHART],
            "Commercial volume data unavailable",
        );
        page.clear(MILESTONES);
        return;
    };

    if let Some(latest) = data.monthly.last() {
        page.replace(
            PANEL,
            vec![stats(&[
                (
                    "Commercial volume",
                    format_currency_abbrev(latest.estimated_commercial_bn),
                ),
                ("Share of ACH", format_percent(latest.commercial_pct_of_ach)),
                ("Avg transfer", format_usd(latest.avg_transfer_size)),
            ])],
        );
    }

    let (volume, share, size) = volume_charts(data);
    charts.mount(page, VOLUME_CHART, volume);
    charts.mount(page, SHARE_CHART, share);
    charts.mount(page, TRANSFER_SIZE_CHART, size);

    milestones::render(page, MILESTONES, &data.milestones);
    log_outcome("commercial", "rendered");
}

pub fn volume_charts(data: &VolumePayload) -> (ChartConfig, ChartConfig, ChartConfig) {
    let months = &data.monthly;
    let dates = labels(months, |m| m.date.as_deref());

    let volume = ChartConfig::new(ChartKind::Bar, dates.clone())
        .dataset(
            Dataset::bar(
                "Est. commercial volume",
                series(months, |m| m.estimated_commercial_bn),
                SERIES_COLORS[0],
            )
            .layer(1)
            .tooltips(format_currency_abbrev),
        )
        .dataset(
            Dataset::line(
                "ACH volume",
                series(months, |m| m.ach_volume_bn),
                SERIES_COLORS[3],
            )
            .dashed()
            .layer(0)
            .tooltips(format_currency_abbrev),
        )
        .axis("y", Axis::left().from_zero().titled("USD billions"));

    let share = ChartConfig::new(ChartKind::Line, dates.clone())
        .dataset(
            Dataset::line(
                "Commercial % of ACH",
                series(months, |m| m.commercial_pct_of_ach),
                SERIES_COLORS[1],
            )
            .tooltips(format_percent),
        )
        .axis("y", Axis::left().from_zero());

    let size = ChartConfig::new(ChartKind::Bar, dates)
        .dataset(
            Dataset::bar(
                "Avg transfer size",
                series(months, |m| m.avg_transfer_size),
                SERIES_COLORS[4],
            )
            .tooltips(format_usd),
        )
        .axis("y", Axis::left().from_zero().titled("USD"));

    (volume, share, size)
}
