use crate::charts::{Axis, ChartConfig, ChartKind, ChartRegistry, Dataset};
use crate::format::{format_currency_abbrev, format_percent};
use crate::page::Page;
use crate::payloads::SupplyPayload;

use super::{labels, log_outcome, milestones, series, show_unavailable, stats, SERIES_COLORS};

pub const PANEL: &str = "supply-panel";
pub const CHART: &str = "chart-supply";
pub const MILESTONES: &str = "supply-milestones";

pub fn render(page: &mut Page, charts: &mut ChartRegistry, payload: Option<&SupplyPayload>) {
    let Some(data) = payload.filter(|p| !p.monthly.is_empty()) else {
        show_unavailable(page, charts, "supply", PANEL, &[CHART], "Supply data unavailable");
        page.clear(MILESTONES);
        return;
    };

    if let Some(latest) = data.monthly.last() {
        page.replace(
            PANEL,
            vec![stats(&[
                ("Total supply", format_currency_abbrev(latest.total)),
                ("Share of M1", format_percent(latest.pct_of_m1)),
                (
                    "M1",
                    format_currency_abbrev(latest.m1_trillion.map(|tn| tn * 1000.0)),
                ),
            ])],
        );
    }

    charts.mount(page, CHART, supply_chart(data));
    milestones::render(page, MILESTONES, &data.milestones);
    log_outcome("supply", "rendered");
}

pub fn supply_chart(data: &SupplyPayload) -> ChartConfig {
    let months = &data.monthly;

    ChartConfig::new(ChartKind::Line, labels(months, |m| m.date.as_deref()))
        .dataset(
            Dataset::area("USDC", series(months, |m| m.usdc), SERIES_COLORS[0])
                .stacked("supply")
                .tooltips(format_currency_abbrev),
        )
        .dataset(
            Dataset::area("USDT", series(months, |m| m.usdt), SERIES_COLORS[1])
                .stacked("supply")
                .tooltips(format_currency_abbrev),
        )
        .dataset(
            Dataset::area("Others", series(months, |m| m.others), SERIES_COLORS[2])
                .stacked("supply")
                .tooltips(format_currency_abbrev),
        )
        .dataset(
            Dataset::line("% of M1", series(months, |m| m.pct_of_m1), SERIES_COLORS[3])
                .dashed()
                .on_axis("y1")
                .tooltips(format_percent),
        )
        .axis("y", Axis::left().stacked().from_zero().titled("USD billions"))
        .axis("y1", Axis::right().from_zero().titled("% of M1"))
}

#[cfg(test)]
mod tests {
    use super::*;
    use serde_json::json;

    #[test]
    fn chart_stacks_three_coins_and_puts_m1_share_on_right_axis() {
        let data: SupplyPayload = serde_json::from_value(json!({
            "monthly": [
                {"date": "2025-03", "usdc": 60.1, "usdt": 143.0, "others": 20.0, "pct_of_m1": 1.2},
                {"date": "2025-04", "usdc": 61.0, "others": 21.5, "pct_of_m1": 1.25}
            ]
        }))
        .expect("parses");

        let cfg = supply_chart(&data);
        assert_eq!(cfg.data.labels, vec!["2025-03", "2025-04"]);
        assert_eq!(cfg.data.datasets.len(), 4);
        assert_eq!(cfg.data.datasets[1].data, vec![143.0, 0.0]);
        assert!(cfg.data.datasets[..3].iter().all(|d| d.fill && d.y_axis_id == "y"));
        assert_eq!(cfg.data.datasets[3].y_axis_id, "y1");
        assert!(cfg.data.datasets[3].border_dash.is_some());
        assert_eq!(cfg.data.datasets[3].formatted[1], "1.25%");
        assert_eq!(cfg.data.datasets[0].formatted[0], "$60.1B");
        assert!(cfg.scale("y").is_some_and(|a| a.begin_at_zero && a.stacked));
        assert!(cfg.scale("y1").is_some_and(|a| a.begin_at_zero));
    }

    #[test]
    fn headline_stats_show_dashes_for_missing_scalars() {
        let data: SupplyPayload = serde_json::from_value(json!({
            "monthly": [{"date": "2025-04", "usdc": 61.0}]
        }))
        .expect("parses");
        let mut page = Page::dashboard();
        let mut charts = ChartRegistry::new();
        render(&mut page, &mut charts, Some(&data));

        let text = page.container_text(PANEL);
        assert!(text.contains("Total supply--"));
        assert!(text.contains("Share of M1--"));
        assert_eq!(charts.live_count(), 1);
    }
}
