use crate::charts::{Axis, ChartConfig, ChartKind, ChartRegistry, Dataset};
use crate::format::format_scaled;
use crate::page::Page;
use crate::payloads::WalletsPayload;

use super::{labels, log_outcome, series, show_unavailable, stats, SERIES_COLORS};

pub const PANEL: &str = "wallets-panel";
pub const CHART: &str = "chart-wallets";

pub fn render(page: &mut Page, charts: &mut ChartRegistry, payload: Option<&WalletsPayload>) {
    let Some(data) = payload.filter(|p| !p.monthly.is_empty()) else {
        show_unavailable(page, charts, "wallets", PANEL, &[CHART], "Wallet data unavailable");
        return;
    };

    if let Some(latest) = data.monthly.last() {
        page.replace(
            PANEL,
            vec![stats(&[
                (
                    "Monthly active",
                    format_scaled(latest.monthly_active_m, 1, "M"),
                ),
                ("New wallets", format_scaled(latest.new_wallets_k, 0, "K")),
            ])],
        );
    }

    charts.mount(page, CHART, wallets_chart(data));
    log_outcome("wallets", "rendered");
}

pub fn wallets_chart(data: &WalletsPayload) -> ChartConfig {
    let months = &data.monthly;

    ChartConfig::new(ChartKind::Bar, labels(months, |m| m.date.as_deref()))
        .dataset(
            Dataset::bar(
                "Monthly active (M)",
                series(months, |m| m.monthly_active_m),
                SERIES_COLORS[0],
            )
            .layer(1)
            .tooltips(|v| format_scaled(v, 1, "M")),
        )
        .dataset(
            Dataset::line(
                "New wallets (K)",
                series(months, |m| m.new_wallets_k),
                SERIES_COLORS[1],
            )
            .on_axis("y1")
            .layer(0)
            .tooltips(|v| format_scaled(v, 0, "K")),
        )
        .axis("y", Axis::left().from_zero().titled("Millions"))
        .axis("y1", Axis::right().from_zero().titled("Thousands"))
}

#[cfg(test)]
mod tests {
    use super::*;
    use serde_json::json;

    #[test]
    fn active_bars_and_new_wallet_line_use_separate_axes() {
        let data: WalletsPayload = serde_json::from_value(json!({
            "monthly": [
                {"date": "2025-05", "monthly_active_m": 31.4, "new_wallets_k": 842.0},
                {"date": "2025-06", "monthly_active_m": "n/a", "new_wallets_k": 901.0}
            ]
        }))
        .expect("parses");

        let cfg = wallets_chart(&data);
        assert_eq!(cfg.data.datasets[0].kind, Some(ChartKind::Bar));
        assert_eq!(cfg.data.datasets[0].y_axis_id, "y");
        assert_eq!(cfg.data.datasets[1].kind, Some(ChartKind::Line));
        assert_eq!(cfg.data.datasets[1].y_axis_id, "y1");
        assert_eq!(cfg.data.datasets[0].data, vec![31.4, 0.0]);
        assert_eq!(cfg.data.datasets[0].formatted, vec!["31.4M", "0.0M"]);
        assert_eq!(cfg.data.datasets[1].formatted[1], "901K");
    }

    #[test]
    fn empty_monthly_list_is_a_placeholder() {
        let mut page = Page::dashboard();
        let mut charts = ChartRegistry::new();
        render(&mut page, &mut charts, Some(&WalletsPayload::default()));

        assert_eq!(page.placeholder_count(PANEL), 1);
        assert_eq!(charts.live_count(), 0);
    }
}
