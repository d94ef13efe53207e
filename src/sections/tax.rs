use crate::dom::{class, el, Attrs, Child, Node};
use crate::format::{text_or_dash, FrictionLevel, SignalState, MISSING};
use crate::page::Page;
use crate::payloads::{TaxPayload, TaxSignal};

use super::{log_outcome, muted};

pub const FRICTION: &str = "tax-friction";
pub const SIGNALS: &str = "tax-signals";

pub fn render(page: &mut Page, payload: Option<&TaxPayload>) {
    let Some(data) =
        payload.filter(|p| p.current_friction.is_some() || !p.signals.is_empty())
    else {
        page.show_placeholder(FRICTION, "Tax treatment data unavailable");
        page.clear(SIGNALS);
        log_outcome("tax", "placeholder");
        return;
    };

    page.replace(FRICTION, vec![friction_badge(data.current_friction.as_deref())]);

    let signals = if data.signals.is_empty() {
        vec![el("p", Attrs::new(), vec![muted("No tracked signals")])]
    } else {
        let items: Vec<Child> = data
            .signals
            .iter()
            .map(|signal| signal_item(signal).into())
            .collect();
        vec![el("ul", class("tax-signals"), items)]
    };
    page.replace(SIGNALS, signals);

    log_outcome("tax", "rendered");
}

fn friction_badge(raw: Option<&str>) -> Node {
    let (css, label) = match raw.filter(|r| !r.is_empty()) {
        Some(raw) => {
            let level = FrictionLevel::from_raw(raw);
            (level.css_class(), level.label())
        }
        None => ("friction-badge", MISSING.to_string()),
    };
    el("span", class(css).text(label), vec![])
}

fn signal_item(signal: &TaxSignal) -> Node {
    let state = SignalState::from_status(signal.status.as_deref());
    el(
        "li",
        Attrs::new(),
        vec![
            el(
                "span",
                class(format!("signal-badge {}", state.css_class())).text(state.label()),
                vec![],
            )
            .into(),
            " ".into(),
            text_or_dash(signal.signal.as_deref()).into(),
        ],
    )
}
