//! Remittance provider volumes, cost comparison and top corridors.

use crate::charts::{Axis, ChartConfig, ChartKind, ChartRegistry, Dataset};
use crate::dom::{class, el, Attrs, Node};
use crate::format::{format_currency_abbrev, format_percent, text_or_dash, Trend};
use crate::page::Page;
use crate::payloads::{Corridor, RemittancePayload, RemittanceQuarter};

use super::{labels, log_outcome, series, show_unavailable, stats, SERIES_COLORS};

pub const PANEL: &str = "remittance-panel";
pub const VOLUME_CHART: &str = "chart-remittance";
pub const COST_CHART: &str = "chart-remittance-cost";
pub const CORRIDORS: &str = "corridor-list";

pub const MAX_CORRIDORS: usize = 5;

pub fn render(page: &mut Page, charts: &mut ChartRegistry, payload: Option<&RemittancePayload>) {
    let Some(data) = payload.filter(|p| !p.quarterly.is_empty()) else {
        show_unavailable(
            page,
            charts,
            "remittance",
            PANEL,
            &[VOLUME_CHART, COST_CHART],
            "Remittance data unavailable",
        );
        page.clear(CORRIDORS);
        return;
    };

    if let Some(latest) = data.quarterly.last() {
        page.replace(PANEL, vec![headline_stats(latest)]);
    }

    let (volume, cost) = remittance_charts(data);
    charts.mount(page, VOLUME_CHART, volume);
    charts.mount(page, COST_CHART, cost);

    if data.corridors.is_empty() {
        page.show_placeholder(CORRIDORS, "No corridor data");
    } else {
        let cards = data
            .corridors
            .iter()
            .take(MAX_CORRIDORS)
            .map(corridor_card)
            .collect();
        page.replace(CORRIDORS, cards);
    }

    log_outcome("remittance", "rendered");
}

pub fn remittance_charts(data: &RemittancePayload) -> (ChartConfig, ChartConfig) {
    let quarters = &data.quarterly;
    let quarter_labels = labels(quarters, |q| q.quarter.as_deref());

    let providers: [(&str, Vec<f64>); 4] = [
        ("Stablecoins", series(quarters, |q| q.stablecoin_bn)),
        ("Western Union", series(quarters, |q| q.western_union_bn)),
        ("MoneyGram", series(quarters, |q| q.moneygram_bn)),
        ("Wise", series(quarters, |q| q.wise_bn)),
    ];

    let mut volume = ChartConfig::new(ChartKind::Bar, quarter_labels.clone())
        .axis("x", Axis::bottom().stacked())
        .axis("y", Axis::left().stacked().from_zero().titled("USD billions"));
    for (idx, (label, values)) in providers.into_iter().enumerate() {
        volume = volume.dataset(
            Dataset::bar(label, values, SERIES_COLORS[idx])
                .stacked("providers")
                .tooltips(format_currency_abbrev),
        );
    }

    let cost = ChartConfig::new(ChartKind::Line, quarter_labels)
        .dataset(
            Dataset::line(
                "Stablecoin avg cost",
                series(quarters, |q| q.avg_cost_stablecoin_pct),
                SERIES_COLORS[0],
            )
            .tooltips(format_percent),
        )
        .dataset(
            Dataset::line(
                "Traditional avg cost",
                series(quarters, |q| q.avg_cost_traditional_pct),
                SERIES_COLORS[5],
            )
            .tooltips(format_percent),
        )
        .axis("y", Axis::left().from_zero().titled("% of amount sent"));

    (volume, cost)
}

/// Latest-quarter stablecoin volume against the two average cost lines.
fn headline_stats(latest: &RemittanceQuarter) -> Node {
    let label = text_or_dash(latest.quarter.as_deref());
    stats(&[
        ("Quarter", label),
        (
            "Stablecoin volume",
            format_currency_abbrev(latest.stablecoin_bn),
        ),
        (
            "Stablecoin cost",
            format_percent(latest.avg_cost_stablecoin_pct),
        ),
        (
            "Traditional cost",
            format_percent(latest.avg_cost_traditional_pct),
        ),
    ])
}

fn corridor_card(corridor: &Corridor) -> Node {
    let trend = Trend::from_raw(corridor.trend.as_deref());

    el(
        "div",
        class("corridor"),
        vec![
            el(
                "div",
                class("corridor-head"),
                vec![
                    el(
                        "strong",
                        Attrs::new().text(text_or_dash(corridor.name.as_deref())),
                        vec![],
                    )
                    .into(),
                    " ".into(),
                    el("span", class(trend.css_class()).text(trend.arrow()), vec![]).into(),
                ],
            )
            .into(),
            el(
                "div",
                class("corridor-stats muted"),
                vec![format!(
                    "Volume {} \u{b7} Stablecoin share {}",
                    format_currency_abbrev(corridor.annual_volume_bn),
                    format_percent(corridor.stablecoin_share_pct)
                )
                .into()],
            )
            .into(),
            corridor
                .note
                .as_deref()
                .filter(|n| !n.is_empty())
                .map(|n| el("p", class("muted").text(n), vec![]))
                .into(),
        ],
    )
}

#[cfg(test)]
mod tests {
    use super::*;
    use serde_json::json;

    #[test]
    fn corridor_cards_are_capped_and_trend_classified() {
        let corridors: Vec<_> = (0..10)
            .map(|i| {
                let trend = ["growing", "declining", "flat"][i % 3];
                let volume = 10.0 + i as f64;
                json!({
                    "name": format!("Corridor {i}"),
                    "annual_volume_bn": volume,
                    "stablecoin_share_pct": 2.5,
                    "trend": trend
                })
            })
            .collect();
        let data: RemittancePayload = serde_json::from_value(json!({
            "quarterly": [{"quarter": "2025-Q1", "stablecoin_bn": 12.0}],
            "corridors": corridors
        }))
        .expect("parses");

        let mut page = Page::dashboard();
        let mut charts = ChartRegistry::new();
        render(&mut page, &mut charts, Some(&data));

        let cards = page.container(CORRIDORS).expect("container exists");
        assert_eq!(cards.len(), MAX_CORRIDORS);

        let mut arrows = Vec::new();
        cards[0].find_all(&|n| n.has_class("trend-up"), &mut arrows);
        assert_eq!(arrows.len(), 1);
        let mut arrows = Vec::new();
        cards[1].find_all(&|n| n.has_class("trend-down"), &mut arrows);
        assert_eq!(arrows.len(), 1);
        let mut arrows = Vec::new();
        cards[2].find_all(&|n| n.has_class("trend-stable"), &mut arrows);
        assert_eq!(arrows.len(), 1);
        assert_eq!(charts.live_count(), 2);
    }

    #[test]
    fn provider_chart_stacks_four_series() {
        let data: RemittancePayload = serde_json::from_value(json!({
            "quarterly": [
                {"quarter": "2024-Q4", "stablecoin_bn": 9.5, "western_union_bn": 26.0,
                 "moneygram_bn": 11.0, "wise_bn": 30.0,
                 "avg_cost_stablecoin_pct": 0.9, "avg_cost_traditional_pct": 6.2}
            ]
        }))
        .expect("parses");

        let (volume, cost) = remittance_charts(&data);
        let names: Vec<_> = volume.data.datasets.iter().map(|d| d.label.as_str()).collect();
        assert_eq!(names, vec!["Stablecoins", "Western Union", "MoneyGram", "Wise"]);
        assert!(volume.scale("y").is_some_and(|a| a.stacked));
        assert!(volume.scale("x").is_some_and(|a| a.stacked));
        assert_eq!(cost.data.datasets.len(), 2);
        assert_eq!(cost.data.datasets[1].formatted[0], "6.20%");
    }

    #[test]
    fn panel_shows_latest_quarter_headline() {
        let data: RemittancePayload = serde_json::from_value(json!({
            "quarterly": [
                {"quarter": "2024-Q4", "stablecoin_bn": 9.5},
                {"quarter": "2025-Q1", "stablecoin_bn": 12.0, "avg_cost_stablecoin_pct": 0.85}
            ]
        }))
        .expect("parses");
        let mut page = Page::dashboard();
        let mut charts = ChartRegistry::new();
        render(&mut page, &mut charts, None);
        assert_eq!(page.placeholder_count(PANEL), 1);

        render(&mut page, &mut charts, Some(&data));
        assert_eq!(page.placeholder_count(PANEL), 0);
        let text = page.container_text(PANEL);
        assert!(text.contains("2025-Q1"), "{text}");
        assert!(text.contains("$12.0B"), "{text}");
        assert!(text.contains("0.85%"), "{text}");
        assert!(text.contains("Traditional cost--"), "{text}");
    }
}
