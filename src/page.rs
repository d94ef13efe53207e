//! Host document: named containers and chart surfaces, grouped into sections.

use std::collections::{BTreeMap, BTreeSet};

use crate::charts::{ChartInstance, ChartRegistry};
use crate::dom::{class, el, escape_html, Node};
use crate::sections::{
    acceptance, commercial, depegs, footer, key_metrics, ladder, remittance, supply, tax,
    treasury, wallets, yields,
};

pub const PLACEHOLDER_CLASS: &str = "unavailable";
pub const CHART_JS_CDN: &str = "https://cdn.jsdelivr.net/npm/chart.js";

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Block {
    Container(&'static str),
    Surface(&'static str),
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Section {
    pub id: &'static str,
    pub title: &'static str,
    pub blocks: Vec<Block>,
}

impl Section {
    pub fn new(id: &'static str, title: &'static str, blocks: Vec<Block>) -> Self {
        Self { id, title, blocks }
    }
}

#[derive(Debug, Clone)]
pub struct Page {
    title: String,
    sections: Vec<Section>,
    containers: BTreeMap<String, Vec<Node>>,
    surfaces: BTreeSet<String>,
}

impl Page {
    pub fn new(title: impl Into<String>, sections: Vec<Section>) -> Self {
        let mut containers = BTreeMap::new();
        let mut surfaces = BTreeSet::new();
        for block in sections.iter().flat_map(|s| s.blocks.iter()) {
            match block {
                Block::Container(id) => {
                    containers.insert((*id).to_string(), Vec::new());
                }
                Block::Surface(id) => {
                    surfaces.insert((*id).to_string());
                }
            }
        }

        Self {
            title: title.into(),
            sections,
            containers,
            surfaces,
        }
    }

    /// The standard dashboard layout.
    pub fn dashboard() -> Self {
        use Block::{Container, Surface};

        Self::new(
            "Stablecoin Interchangeability Ladder",
            vec![
                Section::new(
                    "ladder",
                    "Interchangeability Ladder",
                    vec![
                        Container(ladder::LAYERS),
                        Container(ladder::CANARY),
                        Container(ladder::SECONDARY_CANARIES),
                    ],
                ),
                Section::new(
                    "supply",
                    "Stablecoin Supply vs M1",
                    vec![
                        Container(supply::PANEL),
                        Surface(supply::CHART),
                        Container(supply::MILESTONES),
                    ],
                ),
                Section::new(
                    "commercial",
                    "Commercial Volume",
                    vec![
                        Container(commercial::PANEL),
                        Surface(commercial::VOLUME_CHART),
                        Surface(commercial::SHARE_CHART),
                        Surface(commercial::TRANSFER_SIZE_CHART),
                        Container(commercial::MILESTONES),
                    ],
                ),
                Section::new(
                    "remittance",
                    "Remittance",
                    vec![
                        Container(remittance::PANEL),
                        Surface(remittance::VOLUME_CHART),
                        Surface(remittance::COST_CHART),
                        Container(remittance::CORRIDORS),
                    ],
                ),
                Section::new(
                    "acceptance",
                    "Regulatory Acceptance",
                    vec![
                        Container(acceptance::COUNTDOWN),
                        Container(acceptance::TIMELINE),
                        Container(acceptance::EVENTS),
                        Container(acceptance::RULEMAKING),
                    ],
                ),
                Section::new(
                    "wallets",
                    "Wallets",
                    vec![Container(wallets::PANEL), Surface(wallets::CHART)],
                ),
                Section::new(
                    "treasury",
                    "Treasury Holdings",
                    vec![
                        Container(treasury::PANEL),
                        Surface(treasury::CHART),
                        Container(treasury::MILESTONES),
                    ],
                ),
                Section::new(
                    "tax",
                    "Tax Treatment",
                    vec![Container(tax::FRICTION), Container(tax::SIGNALS)],
                ),
                Section::new("yield", "Yield", vec![Container(yields::TABLE)]),
                Section::new("depegs", "Depeg History", vec![Container(depegs::LIST)]),
                Section::new(
                    "key-metrics",
                    "Key Metrics",
                    vec![Container(key_metrics::STRIP)],
                ),
                Section::new(
                    "footer",
                    "Data Sources",
                    vec![Container(footer::SOURCES), Container(footer::UPDATED)],
                ),
            ],
        )
    }

    pub fn title(&self) -> &str {
        &self.title
    }

    pub fn has_container(&self, id: &str) -> bool {
        self.containers.contains_key(id)
    }

    pub fn has_surface(&self, id: &str) -> bool {
        self.surfaces.contains(id)
    }

    pub fn container(&self, id: &str) -> Option<&[Node]> {
        self.containers.get(id).map(Vec::as_slice)
    }

    /// Replaces the container's content. Returns `false` when the container does not exist.
    pub fn replace(&mut self, id: &str, nodes: Vec<Node>) -> bool {
        match self.containers.get_mut(id) {
            Some(slot) => {
                *slot = nodes;
                true
            }
            None => false,
        }
    }

    pub fn clear(&mut self, id: &str) -> bool {
        self.replace(id, Vec::new())
    }

    pub fn show_placeholder(&mut self, id: &str, reason: &str) -> bool {
        self.replace(id, vec![placeholder(reason)])
    }

    pub fn placeholder_count(&self, id: &str) -> usize {
        self.container(id).map_or(0, |nodes| {
            let mut found = Vec::new();
            for node in nodes {
                node.find_all(&|n| n.has_class(PLACEHOLDER_CLASS), &mut found);
            }
            found.len()
        })
    }

    pub fn container_text(&self, id: &str) -> String {
        self.container(id)
            .unwrap_or_default()
            .iter()
            .map(Node::text_content)
            .collect::<Vec<_>>()
            .join(" ")
    }

    pub fn to_html(&self, charts: &ChartRegistry, generated_at: &str) -> String {
        let mut out = String::new();
        out.push_str("<!DOCTYPE html><html><head><meta charset=\"utf-8\">\n");
        out.push_str("<meta name=\"viewport\" content=\"width=device-width, initial-scale=1\">\n");
        out.push_str(&format!("<title>{}</title>\n", escape_html(&self.title)));
        out.push_str(PAGE_STYLE);
        out.push_str("</head><body><main class=\"shell\">\n");
        out.push_str(&format!(
            "<section class=\"hero\"><h1>{}</h1><div class=\"hero-meta\"><span>Live charts: {}</span><span>Generated: {}</span></div></section>\n",
            escape_html(&self.title),
            charts.live_count(),
            escape_html(generated_at)
        ));

        out.push_str("<div class=\"grid\">\n");
        for section in &self.sections {
            out.push_str(&format!(
                "<section class=\"card\" id=\"section-{}\"><h2>{}</h2>\n",
                escape_html(section.id),
                escape_html(section.title)
            ));
            for block in &section.blocks {
                match block {
                    Block::Container(id) => {
                        out.push_str(&format!("<div id=\"{}\">", escape_html(id)));
                        for node in self.container(id).unwrap_or_default() {
                            node.write_html(&mut out);
                        }
                        out.push_str("</div>\n");
                    }
                    Block::Surface(id) => {
                        let hidden = if charts.get(id).is_some() { "" } else { " hidden" };
                        out.push_str(&format!(
                            "<div class=\"chart-box\"{hidden}><canvas id=\"{}\"></canvas></div>\n",
                            escape_html(id)
                        ));
                    }
                }
            }
            out.push_str("</section>\n");
        }
        out.push_str("</div></main>\n");

        out.push_str(&format!("<script src=\"{CHART_JS_CDN}\"></script>\n"));
        out.push_str("<script>\nconst CHARTS = ");
        out.push_str(&charts_json(charts.live()));
        out.push_str(";\n");
        out.push_str(MOUNT_SCRIPT);
        out.push_str("</script>\n</body></html>\n");
        out
    }
}

fn placeholder(reason: &str) -> Node {
    el("div", class(PLACEHOLDER_CLASS), vec![reason.into()])
}

fn charts_json<'a>(live: impl Iterator<Item = &'a ChartInstance>) -> String {
    let configs: BTreeMap<&str, _> = live.map(|c| (c.surface(), c.config())).collect();
    serde_json::to_string(&configs)
        .unwrap_or_else(|_| "{}".to_string())
        .replace("</", "<\\/")
}

const MOUNT_SCRIPT: &str = r#"function mountCharts() {
  for (const [id, cfg] of Object.entries(CHARTS)) {
    const canvas = document.getElementById(id);
    if (!canvas) continue;
    cfg.options.plugins.tooltip = {
      callbacks: {
        label: (ctx) => {
          const text = ctx.dataset.formatted && ctx.dataset.formatted[ctx.dataIndex];
          return ctx.dataset.label + ': ' + (text !== undefined ? text : ctx.formattedValue);
        }
      }
    };
    new Chart(canvas, cfg);
  }
}
if (document.readyState === 'loading') {
  document.addEventListener('DOMContentLoaded', mountCharts);
} else {
  mountCharts();
}
"#;

const PAGE_STYLE: &str = "<style>:root{--bg:#f4f6f8;--card:#ffffff;--ink:#172026;--muted:#5f6a73;--line:#d7dce1;--head:#12313d;--done:#3b82f6;--progress:#f59e0b;--pending:#94a3b8}*{box-sizing:border-box}body{margin:0;color:var(--ink);font-family:\"Space Grotesk\",\"Avenir Next\",\"Segoe UI\",sans-serif;background:linear-gradient(160deg,#f4f6f8,#e7eef2);min-height:100vh}.shell{max-width:1400px;margin:0 auto;padding:24px 18px 28px}.hero{background:linear-gradient(135deg,#102f3a 0%,#24576b 100%);color:#f7fbfc;border-radius:16px;padding:18px 20px;box-shadow:0 10px 30px rgba(16,47,58,.25)}.hero h1{margin:0 0 8px;font-size:1.6rem}.hero-meta{display:flex;gap:16px;flex-wrap:wrap;font-size:.92rem;color:#dcebf0}.grid{display:grid;grid-template-columns:repeat(auto-fit,minmax(520px,1fr));gap:16px;margin-top:16px}.card{background:var(--card);border:1px solid #cbd4db;border-radius:16px;padding:14px 16px;box-shadow:0 12px 28px rgba(26,35,42,.12)}.card h2{margin:0 0 10px;font-size:1.05rem;color:var(--head)}.chart-box{position:relative;height:280px;margin:10px 0}.unavailable{padding:18px;border:1px dashed var(--line);border-radius:10px;color:var(--muted);text-align:center;font-size:.9rem}.stats{display:flex;gap:12px;flex-wrap:wrap}.stat{flex:1 1 120px;background:#f8fbfc;border:1px solid var(--line);border-radius:10px;padding:8px 10px}.stat-label{display:block;font-size:.72rem;text-transform:uppercase;color:var(--muted)}.stat-value{font-size:1.15rem;font-weight:700}.layer{display:flex;gap:10px;align-items:center;padding:8px 0;border-bottom:1px solid var(--line)}.layer-number{font-weight:700;width:28px}.layer-status{color:#fff;border-radius:999px;padding:2px 10px;font-size:.75rem;text-transform:capitalize}.layer-signal{color:var(--muted);font-size:.82rem}.canary-badge{display:inline-block;border-radius:999px;padding:2px 10px;font-size:.75rem;background:#e2e8f0}.canary-badge.watching{background:#fef3c7;color:#92400e}.canary-badge.triggered{background:#fee2e2;color:#991b1b}.milestones{list-style:none;padding:0;margin:8px 0}.milestones li{padding:4px 0}.tag{display:inline-block;width:10px;height:10px;border-radius:50%;margin-right:8px}.tag.done{background:var(--done)}.tag.in_progress{background:var(--progress)}.tag.pending{background:var(--pending)}.timeline-dot{display:inline-block;width:12px;height:12px;border-radius:50%;margin-right:8px}table{width:100%;border-collapse:collapse}thead th{background:var(--head);color:#f2f7f9;font-size:.75rem;text-transform:uppercase;padding:8px;text-align:left}tbody td{font-size:.84rem;padding:7px 8px;border-bottom:1px solid var(--line)}.corridor{border:1px solid var(--line);border-radius:10px;padding:8px 10px;margin:6px 0}.trend-up{color:#047857}.trend-down{color:#b91c1c}.trend-stable{color:var(--muted)}.friction-badge{display:inline-block;border-radius:999px;padding:4px 12px;font-weight:700;background:#e2e8f0}.friction-high{background:#fee2e2;color:#991b1b}.friction-medium{background:#fef3c7;color:#92400e}.friction-low{background:#dcfce7;color:#166534}.friction-none{background:#dbeafe;color:#1e40af}.signal-done{color:var(--done)}.signal-progress{color:var(--progress)}.signal-none{color:var(--pending)}.severity-severe{color:#991b1b}.severity-moderate{color:#92400e}.severity-minor{color:var(--muted)}.source-status.loaded{color:#047857}.source-status.pending{color:var(--muted)}.muted{color:var(--muted);font-size:.82rem}@media (max-width:760px){.grid{grid-template-columns:1fr}.shell{padding:12px}}</style>\n";
