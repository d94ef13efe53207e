use crate::format::{format_percent, format_scaled, text_or_dash};
use crate::page::Page;
use crate::payloads::{CompositePayload, KeyMetrics};

use super::{log_outcome, stats};

pub const STRIP: &str = "key-metrics-strip";

pub fn render(page: &mut Page, payload: Option<&CompositePayload>) {
    let Some(metrics) = payload
        .and_then(|p| p.key_metrics.as_ref())
        .filter(|m| !m.is_empty())
    else {
        page.show_placeholder(STRIP, "Composite signal unavailable");
        log_outcome("key_metrics", "placeholder");
        return;
    };

    page.replace(STRIP, vec![stats(&metric_cards(metrics))]);
    log_outcome("key_metrics", "rendered");
}

pub fn metric_cards(metrics: &KeyMetrics) -> Vec<(&'static str, String)> {
    vec![
        ("Supply % of M1", format_percent(metrics.supply_pct_of_m1)),
        ("Commercial % of ACH", format_percent(metrics.commercial_pct_of_ach)),
        (
            "Remittance % of outbound",
            format_percent(metrics.remittance_pct_of_outbound),
        ),
        (
            "Treasury % of T-bills",
            format_percent(metrics.treasury_pct_of_tbills),
        ),
        ("Tax friction", text_or_dash(metrics.tax_friction.as_deref())),
        (
            "Active wallets",
            format_scaled(metrics.active_wallets_m, 1, "M"),
        ),
        (
            "GENIUS Act countdown",
            metrics
                .genius_act_days_until_effective
                .map_or_else(|| text_or_dash(None), |d| format!("{d} days")),
        ),
    ]
}

#[cfg(test)]
mod tests {
    use super::*;
    use serde_json::json;

    #[test]
    fn strip_lists_every_metric_with_dashes_for_gaps() {
        let data: CompositePayload = serde_json::from_value(json!({
            "key_metrics": {"supply_pct_of_m1": 1.25, "tax_friction": "high", "genius_act_days_until_effective": 90}
        }))
        .expect("parses");
        let mut page = Page::dashboard();
        render(&mut page, Some(&data));

        let text = page.container_text(STRIP);
        assert!(text.contains("Supply % of M11.25%"));
        assert!(text.contains("Commercial % of ACH--"));
        assert!(text.contains("Tax frictionhigh"));
        assert!(text.contains("GENIUS Act countdown90 days"));
    }

    #[test]
    fn missing_or_empty_metrics_are_a_placeholder() {
        let mut page = Page::dashboard();
        render(&mut page, None);
        assert_eq!(page.placeholder_count(STRIP), 1);

        let empty: CompositePayload =
            serde_json::from_value(json!({"key_metrics": {}})).expect("parses");
        render(&mut page, Some(&empty));
        assert_eq!(page.placeholder_count(STRIP), 1);
    }
}
