//! Milestone list shared by the supply, commercial and treasury sections.

use crate::dom::{class, el, Attrs, Child, Node};
use crate::format::MilestoneState;
use crate::page::Page;
use crate::payloads::Milestone;

use super::muted;

pub fn render(page: &mut Page, container: &str, milestones: &[Milestone]) {
    if milestones.is_empty() {
        page.clear(container);
        return;
    }

    let items: Vec<Child> = milestones.iter().map(|ms| milestone_item(ms).into()).collect();
    page.replace(container, vec![el("ul", class("milestones"), items)]);
}

pub fn label_with_date(milestone: &Milestone) -> String {
    match milestone.date.as_deref().filter(|d| !d.is_empty()) {
        Some(date) => format!("{} ({date})", milestone.label()),
        None => milestone.label(),
    }
}

fn milestone_item(milestone: &Milestone) -> Node {
    let state = MilestoneState::from_status(milestone.status.as_deref());
    el(
        "li",
        class(format!("milestone {}", state.css_class())),
        vec![
            el("span", class(format!("tag {}", state.css_class())), vec![]).into(),
            el("span", Attrs::new().text(label_with_date(milestone)), vec![]).into(),
            milestone
                .note
                .as_deref()
                .map(|note| muted(format!(" \u{b7} {note}")))
                .unwrap_or(Child::Empty),
        ],
    )
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::sections::supply;

    fn milestone(label: &str, status: &str, date: Option<&str>) -> Milestone {
        Milestone {
            threshold: Some(label.to_string()),
            status: Some(status.to_string()),
            date: date.map(str::to_string),
            ..Milestone::default()
        }
    }

    #[test]
    fn items_carry_state_class_and_dated_label() {
        let mut page = Page::dashboard();
        render(
            &mut page,
            supply::MILESTONES,
            &[
                milestone("1% of M1", "passed", Some("2024-11")),
                milestone("2% of M1", "in_progress", None),
                milestone("5% of M1", "pending", None),
            ],
        );

        let nodes = page.container(supply::MILESTONES).expect("container exists");
        let mut items = Vec::new();
        nodes[0].find_all(&|n| n.tag() == "li", &mut items);

        assert_eq!(items.len(), 3);
        assert!(items[0].has_class("done"));
        assert_eq!(items[0].text_content(), "1% of M1 (2024-11)");
        assert!(items[1].has_class("in_progress"));
        assert!(items[2].has_class("pending"));
    }

    #[test]
    fn unlabeled_milestone_shows_dash() {
        let mut page = Page::dashboard();
        let unlabeled = Milestone {
            status: Some("done".to_string()),
            ..Milestone::default()
        };
        render(&mut page, supply::MILESTONES, &[unlabeled]);

        let nodes = page.container(supply::MILESTONES).expect("container exists");
        let mut items = Vec::new();
        nodes[0].find_all(&|n| n.tag() == "li", &mut items);
        assert_eq!(items[0].text_content(), "--");
    }

    #[test]
    fn empty_list_clears_container() {
        let mut page = Page::dashboard();
        render(&mut page, supply::MILESTONES, &[milestone("x", "done", None)]);
        render(&mut page, supply::MILESTONES, &[]);
        assert_eq!(page.container(supply::MILESTONES).map(<[Node]>::len), Some(0));
    }
}
