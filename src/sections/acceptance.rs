//! Regulatory acceptance: milestone timeline, adoption events, rulemaking tracker.
//!
//! The three fragments are independent. Each one falls back to its own
//! placeholder without affecting the others.

use crate::dom::{class, el, Attrs, Child, Node};
use crate::format::{text_or_dash, MilestoneState};
use crate::page::Page;
use crate::payloads::{
    sort_newest_first, AdoptionEvent, CompositePayload, GeniusPayload, LayersPayload, Milestone,
};

use super::{log_outcome, muted, table};

pub const COUNTDOWN: &str = "genius-countdown";
pub const TIMELINE: &str = "genius-timeline";
pub const EVENTS: &str = "adoption-events";
pub const RULEMAKING: &str = "rulemaking-table";

pub const RULEMAKING_HEADERS: [&str; 4] = ["Agency", "Stage", "Published", "Next Action"];

pub fn render(
    page: &mut Page,
    genius: Option<&GeniusPayload>,
    layers: Option<&LayersPayload>,
    composite: Option<&CompositePayload>,
) {
    render_timeline(page, genius, composite);
    render_events(page, layers);
    render_rulemaking(page, genius);
    log_outcome("acceptance", "rendered");
}

fn render_timeline(
    page: &mut Page,
    genius: Option<&GeniusPayload>,
    composite: Option<&CompositePayload>,
) {
    let Some(data) = genius.filter(|g| !g.milestones.is_empty()) else {
        page.show_placeholder(TIMELINE, "Regulatory milestones unavailable");
        page.clear(COUNTDOWN);
        return;
    };

    let countdown: Vec<Node> = countdown_days(composite)
        .map(|days| {
            el(
                "div",
                class("countdown"),
                vec![
                    el("span", class("countdown-days").text(days.to_string()), vec![]).into(),
                    " days until effective".into(),
                ],
            )
        })
        .into_iter()
        .collect();
    page.replace(COUNTDOWN, countdown);

    page.replace(
        TIMELINE,
        data.milestones.iter().map(timeline_item).collect(),
    );
}

fn timeline_item(milestone: &Milestone) -> Node {
    let state = MilestoneState::from_status(milestone.status.as_deref());
    let remaining: Child = match (state, milestone.days_remaining) {
        (MilestoneState::Done, _) | (_, None) => Child::Empty,
        (_, Some(days)) => muted(format!(" \u{b7} {days} days remaining")),
    };

    el(
        "div",
        class(format!("timeline-item {}", state.css_class())),
        vec![
            el(
                "span",
                class("timeline-dot").attr("style", format!("background:{}", state.dot_color())),
                vec![],
            )
            .into(),
            el("strong", Attrs::new().text(milestone.label()), vec![]).into(),
            milestone
                .deadline
                .as_deref()
                .or(milestone.date.as_deref())
                .map(|d| format!(" {d}"))
                .into(),
            remaining,
        ],
    )
}

fn render_events(page: &mut Page, layers: Option<&LayersPayload>) {
    let Some(data) = layers.filter(|l| !l.events.is_empty()) else {
        page.show_placeholder(EVENTS, "No adoption events recorded");
        return;
    };

    let mut events: Vec<&AdoptionEvent> = data.events.iter().collect();
    sort_newest_first(&mut events, |e| e.date.as_deref());

    let items: Vec<Child> = events
        .into_iter()
        .map(|event| {
            el(
                "li",
                class("event"),
                vec![
                    el(
                        "span",
                        class("event-date").text(text_or_dash(event.date.as_deref())),
                        vec![],
                    )
                    .into(),
                    " ".into(),
                    el(
                        "span",
                        class("event-text").text(text_or_dash(event.event.as_deref())),
                        vec![],
                    )
                    .into(),
                ],
            )
            .into()
        })
        .collect();

    page.replace(EVENTS, vec![el("ul", class("events"), items)]);
}

fn render_rulemaking(page: &mut Page, genius: Option<&GeniusPayload>) {
    let Some(data) = genius.filter(|g| !g.rulemaking_tracker.is_empty()) else {
        page.show_placeholder(RULEMAKING, "Rulemaking tracker unavailable");
        return;
    };

    let rows = data
        .rulemaking_tracker
        .iter()
        .map(|entry| {
            vec![
                text_or_dash(entry.agency.as_deref()),
                text_or_dash(entry.stage.as_deref()),
                text_or_dash(entry.published.as_deref()),
                text_or_dash(entry.next_action.as_deref()),
            ]
        })
        .collect();

    page.replace(RULEMAKING, vec![table(&RULEMAKING_HEADERS, rows)]);
}

/// Days until the act takes effect, read from the composite key metrics.
pub fn countdown_days(composite: Option<&CompositePayload>) -> Option<i64> {
    composite
        .and_then(|c| c.key_metrics.as_ref())
        .and_then(|m| m.genius_act_days_until_effective)
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::format::{COLOR_EMERGING, COLOR_ESTABLISHED, COLOR_NOT_STARTED};
    use serde_json::json;

    fn genius() -> GeniusPayload {
        serde_json::from_value(json!({
            "milestones": [
                {"milestone": "Signed into law", "status": "done", "deadline": "2025-07-18"},
                {"milestone": "Treasury rules", "status": "in_progress", "deadline": "2026-07", "days_remaining": 270},
                {"milestone": "Effective date", "status": "pending"}
            ],
            "rulemaking_tracker": [
                {"agency": "OCC", "stage": "ANPRM", "published": "2025-09-01"},
                {"agency": "Treasury"}
            ]
        }))
        .expect("parses")
    }

    #[test]
    fn timeline_dots_follow_milestone_state() {
        let composite: CompositePayload = serde_json::from_value(json!({
            "key_metrics": {"genius_act_days_until_effective": 412}
        }))
        .expect("parses");
        let mut page = Page::dashboard();
        render(&mut page, Some(&genius()), None, Some(&composite));

        let items = page.container(TIMELINE).expect("container exists");
        let colors: Vec<String> = items
            .iter()
            .map(|item| {
                let mut dots = Vec::new();
                item.find_all(&|n| n.has_class("timeline-dot"), &mut dots);
                dots[0].attr("style").unwrap_or_default().to_string()
            })
            .collect();
        assert_eq!(
            colors,
            vec![
                format!("background:{COLOR_ESTABLISHED}"),
                format!("background:{COLOR_EMERGING}"),
                format!("background:{COLOR_NOT_STARTED}"),
            ]
        );
        assert!(items[1].text_content().contains("270 days remaining"));
        assert!(!items[0].text_content().contains("remaining"));
        assert_eq!(page.container_text(COUNTDOWN), "412 days until effective");
        assert_eq!(countdown_days(Some(&composite)), Some(412));
    }

    #[test]
    fn rulemaking_table_fills_missing_cells_with_dashes() {
        let mut page = Page::dashboard();
        render(&mut page, Some(&genius()), None, None);

        let nodes = page.container(RULEMAKING).expect("container exists");
        let mut cells = Vec::new();
        nodes[0].find_all(&|n| n.tag() == "td", &mut cells);
        let text: Vec<String> = cells.iter().map(|c| c.text_content()).collect();
        assert_eq!(
            text,
            vec!["OCC", "ANPRM", "2025-09-01", "--", "Treasury", "--", "--", "--"]
        );
        assert_eq!(page.container(COUNTDOWN).map(<[Node]>::len), Some(0));
        assert_eq!(countdown_days(None), None);
    }

    #[test]
    fn fragments_degrade_independently() {
        let layers: LayersPayload = serde_json::from_value(json!({
            "events": [
                {"date": "2024-01-01", "event": "A"},
                {"date": "2025-06-01", "event": "B"},
                {"date": "2023-03-01", "event": "C"}
            ]
        }))
        .expect("parses");
        let mut page = Page::dashboard();
        render(&mut page, None, Some(&layers), None);

        assert_eq!(page.placeholder_count(TIMELINE), 1);
        assert_eq!(page.placeholder_count(RULEMAKING), 1);
        assert_eq!(page.placeholder_count(EVENTS), 0);

        let mut dates = Vec::new();
        for node in page.container(EVENTS).unwrap_or_default() {
            node.find_all(&|n| n.has_class("event-date"), &mut dates);
        }
        let dates: Vec<String> = dates.iter().map(|d| d.text_content()).collect();
        assert_eq!(dates, vec!["2025-06-01", "2024-01-01", "2023-03-01"]);
    }

    #[test]
    fn untitled_entries_show_dashes() {
        let layers: LayersPayload =
            serde_json::from_value(json!({"events": [{"date": "2025-01-01"}]})).expect("parses");
        let genius: GeniusPayload =
            serde_json::from_value(json!({"milestones": [{"status": "pending"}]})).expect("parses");
        let mut page = Page::dashboard();
        render(&mut page, Some(&genius), Some(&layers), None);

        let mut texts = Vec::new();
        for node in page.container(EVENTS).unwrap_or_default() {
            node.find_all(&|n| n.has_class("event-text"), &mut texts);
        }
        assert_eq!(texts.len(), 1);
        assert_eq!(texts[0].text_content(), "--");

        let mut labels = Vec::new();
        for node in page.container(TIMELINE).unwrap_or_default() {
            node.find_all(&|n| n.tag() == "strong", &mut labels);
        }
        assert_eq!(labels[0].text_content(), "--");
    }
}
