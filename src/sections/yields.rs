use crate::dom::{class, el, Node};
use crate::format::{format_percent, text_or_dash};
use crate::page::Page;
use crate::payloads::YieldPayload;

use super::{log_outcome, table};

pub const TABLE: &str = "yield-table";

pub const HEADERS: [&str; 4] = ["Platform", "Asset", "APY", "Type"];

pub fn render(page: &mut Page, payload: Option<&YieldPayload>) {
    let Some(data) = payload.filter(|p| !p.current.is_empty()) else {
        page.show_placeholder(TABLE, "Yield data unavailable");
        log_outcome("yield", "placeholder");
        return;
    };

    let rows = data
        .current
        .iter()
        .map(|rate| {
            vec![
                text_or_dash(rate.platform.as_deref()),
                text_or_dash(rate.asset.as_deref()),
                format_percent(rate.apy_pct),
                text_or_dash(rate.kind.as_deref()),
            ]
        })
        .collect();

    let mut nodes: Vec<Node> = data
        .fed_funds_rate
        .filter(|r| r.is_finite())
        .map(|rate| {
            el(
                "p",
                class("fed-funds"),
                vec![format!("Fed funds rate: {}", format_percent(Some(rate))).into()],
            )
        })
        .into_iter()
        .collect();
    nodes.push(table(&HEADERS, rows));

    page.replace(TABLE, nodes);
    log_outcome("yield", "rendered");
}

#[cfg(test)]
mod tests {
    use super::*;
    use serde_json::json;

    #[test]
    fn table_has_four_columns_with_dashes_for_gaps() {
        let data: YieldPayload = serde_json::from_value(json!({
            "fed_funds_rate": 4.33,
            "current": [
                {"platform": "Aave", "asset": "USDC", "apy_pct": 5.1, "type": "lending"},
                {"platform": "Coinbase", "asset": "USDC"}
            ]
        }))
        .expect("parses");
        let mut page = Page::dashboard();
        render(&mut page, Some(&data));

        let nodes = page.container(TABLE).expect("container exists");
        assert_eq!(nodes[0].text_content(), "Fed funds rate: 4.33%");

        let mut headers = Vec::new();
        nodes[1].find_all(&|n| n.tag() == "th", &mut headers);
        assert_eq!(headers.len(), 4);

        let mut cells = Vec::new();
        nodes[1].find_all(&|n| n.tag() == "td", &mut cells);
        let text: Vec<String> = cells.iter().map(|c| c.text_content()).collect();
        assert_eq!(
            text,
            vec!["Aave", "USDC", "5.10%", "lending", "Coinbase", "USDC", "--", "--"]
        );
    }

    #[test]
    fn fed_funds_line_is_optional() {
        let data: YieldPayload = serde_json::from_value(json!({
            "current": [{"platform": "Ondo", "asset": "USDY", "apy_pct": 4.25, "type": "tbill"}]
        }))
        .expect("parses");
        let mut page = Page::dashboard();
        render(&mut page, Some(&data));

        let nodes = page.container(TABLE).expect("container exists");
        assert_eq!(nodes.len(), 1);
        assert_eq!(nodes[0].tag(), "table");
    }
}
