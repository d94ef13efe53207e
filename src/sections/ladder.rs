//! Adoption ladder (layers 5 down to 1) and canary watch.

use crate::dom::{class, el, Attrs, Child, Node};
use crate::format::{display_status, status_color, text_or_dash, CanaryState};
use crate::page::Page;
use crate::payloads::{Canary, Layer, LayersPayload, SecondaryCanary};

use super::log_outcome;

pub const LAYERS: &str = "ladder-layers";
pub const CANARY: &str = "canary-primary";
pub const SECONDARY_CANARIES: &str = "canary-secondary";

pub fn render(page: &mut Page, payload: Option<&LayersPayload>) {
    let Some(data) = payload.filter(|p| !p.layers.is_empty()) else {
        page.show_placeholder(LAYERS, "Adoption ladder data unavailable");
        page.clear(CANARY);
        page.clear(SECONDARY_CANARIES);
        log_outcome("ladder", "placeholder");
        return;
    };

    let mut layers: Vec<&Layer> = data.layers.iter().collect();
    layers.sort_by(|a, b| b.number.cmp(&a.number));
    page.replace(LAYERS, layers.into_iter().map(layer_row).collect());

    let canary = data.canary.as_ref().map(canary_card).into_iter().collect();
    page.replace(CANARY, canary);

    let secondary = if data.secondary_canaries.is_empty() {
        Vec::new()
    } else {
        vec![el(
            "ul",
            class("secondary-canaries"),
            data.secondary_canaries
                .iter()
                .map(|c| secondary_item(c).into())
                .collect(),
        )]
    };
    page.replace(SECONDARY_CANARIES, secondary);

    log_outcome("ladder", "rendered");
}

fn layer_row(layer: &Layer) -> Node {
    let status = layer.status.as_deref().unwrap_or("not_started");
    let number = layer
        .number
        .map_or_else(|| "?".to_string(), |n| n.to_string());

    el(
        "div",
        class("layer").attr("data-layer", number.clone()),
        vec![
            el("span", class("layer-number").text(number), vec![]).into(),
            el(
                "span",
                class("layer-name").text(text_or_dash(layer.name.as_deref())),
                vec![],
            )
            .into(),
            el(
                "span",
                class("layer-status")
                    .text(display_status(status))
                    .attr("style", format!("background:{}", status_color(status))),
                vec![],
            )
            .into(),
            layer
                .key_signal
                .as_deref()
                .filter(|s| !s.is_empty())
                .map(|s| el("span", class("layer-signal").text(s), vec![]))
                .into(),
        ],
    )
}

fn canary_badge(status: Option<&str>) -> Node {
    let state = CanaryState::from_status(status);
    el(
        "span",
        class(state.css_class()).text(display_status(status.unwrap_or("unknown"))),
        vec![],
    )
}

fn canary_card(canary: &Canary) -> Node {
    el(
        "div",
        class("canary"),
        vec![
            el(
                "strong",
                Attrs::new().text(text_or_dash(canary.name.as_deref())),
                vec![],
            )
            .into(),
            " ".into(),
            canary_badge(canary.status.as_deref()).into(),
            canary
                .description
                .as_deref()
                .filter(|d| !d.is_empty())
                .map(|d| el("p", class("muted").text(d), vec![]))
                .into(),
        ],
    )
}

fn secondary_item(canary: &SecondaryCanary) -> Node {
    let signal: Child = canary
        .signal
        .as_deref()
        .filter(|s| !s.is_empty())
        .map(|s| el("span", class("canary-signal muted").text(format!(" {s}")), vec![]))
        .into();

    el(
        "li",
        Attrs::new(),
        vec![
            el(
                "span",
                class("canary-name").text(text_or_dash(canary.name.as_deref())),
                vec![],
            )
            .into(),
            " ".into(),
            canary_badge(canary.status.as_deref()).into(),
            signal,
        ],
    )
}
