//! Depeg incident history, newest first.

use crate::dom::{class, el, Attrs, Node};
use crate::format::{severity_class, text_or_dash, MISSING};
use crate::page::Page;
use crate::payloads::{sort_newest_first, DepegEvent, DepegPayload};

use super::log_outcome;

pub const LIST: &str = "depeg-list";

pub fn render(page: &mut Page, payload: Option<&DepegPayload>) {
    let Some(data) = payload.filter(|p| !p.events.is_empty()) else {
        page.show_placeholder(LIST, "No depeg events recorded");
        log_outcome("depegs", "placeholder");
        return;
    };

    let mut events: Vec<&DepegEvent> = data.events.iter().collect();
    sort_newest_first(&mut events, |e| e.date.as_deref());

    page.replace(LIST, events.into_iter().map(depeg_entry).collect());
    log_outcome("depegs", "rendered");
}

fn depeg_entry(event: &DepegEvent) -> Node {
    let low = event
        .low_price
        .filter(|p| p.is_finite())
        .map_or_else(|| MISSING.to_string(), |p| format!("${p:.3}"));
    let duration = event
        .duration_days
        .filter(|d| d.is_finite())
        .map_or_else(|| "?".to_string(), |d| d.to_string());

    el(
        "div",
        class("depeg"),
        vec![
            el(
                "div",
                class("depeg-head"),
                vec![
                    el(
                        "strong",
                        class(severity_class(event.severity.as_deref()))
                            .text(text_or_dash(event.asset.as_deref())),
                        vec![],
                    )
                    .into(),
                    " ".into(),
                    el(
                        "span",
                        class("depeg-date muted").text(text_or_dash(event.date.as_deref())),
                        vec![],
                    )
                    .into(),
                ],
            )
            .into(),
            el(
                "div",
                Attrs::new(),
                vec![format!("Low: {low} \u{b7} Duration: {duration} days").into()],
            )
            .into(),
            event
                .cause
                .as_deref()
                .filter(|c| !c.is_empty())
                .map(|c| el("p", class("muted depeg-cause").text(c), vec![]))
                .into(),
        ],
    )
}
