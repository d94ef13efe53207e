//! Chart.js configuration types and the per-surface chart registry.

use std::collections::{BTreeMap, VecDeque};

use serde::Serialize;
use tracing::debug;

use crate::page::Page;

const JOURNAL_CAPACITY: usize = 512;

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
#[serde(rename_all = "lowercase")]
pub enum ChartKind {
    Line,
    Bar,
}

#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct ChartConfig {
    #[serde(rename = "type")]
    pub kind: ChartKind,
    pub data: ChartData,
    pub options: ChartOptions,
}

#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct ChartData {
    pub labels: Vec<String>,
    pub datasets: Vec<Dataset>,
}

#[derive(Debug, Clone, PartialEq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct Dataset {
    #[serde(rename = "type", skip_serializing_if = "Option::is_none")]
    pub kind: Option<ChartKind>,
    pub label: String,
    pub data: Vec<f64>,
    pub border_color: String,
    pub background_color: String,
    pub fill: bool,
    pub tension: f64,
    pub point_radius: u32,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub border_dash: Option<Vec<u32>>,
    #[serde(rename = "yAxisID")]
    pub y_axis_id: String,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub stack: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub order: Option<i32>,
    /// Tooltip text per data point, read by the page script.
    pub formatted: Vec<String>,
}

impl Dataset {
    fn base(label: &str, data: Vec<f64>, color: &str) -> Self {
        Self {
            kind: None,
            label: label.to_string(),
            data,
            border_color: color.to_string(),
            background_color: color.to_string(),
            fill: false,
            tension: 0.25,
            point_radius: 2,
            border_dash: None,
            y_axis_id: "y".to_string(),
            stack: None,
            order: None,
            formatted: Vec::new(),
        }
    }

    pub fn line(label: &str, data: Vec<f64>, color: &str) -> Self {
        let mut ds = Self::base(label, data, color);
        ds.kind = Some(ChartKind::Line);
        ds
    }

    pub fn bar(label: &str, data: Vec<f64>, color: &str) -> Self {
        let mut ds = Self::base(label, data, color);
        ds.kind = Some(ChartKind::Bar);
        ds.point_radius = 0;
        ds
    }

    pub fn area(label: &str, data: Vec<f64>, color: &str) -> Self {
        let mut ds = Self::line(label, data, color);
        ds.fill = true;
        ds.background_color = with_alpha(color, 0x55);
        ds
    }

    pub fn dashed(mut self) -> Self {
        self.border_dash = Some(vec![6, 4]);
        self
    }

    pub fn on_axis(mut self, axis: &str) -> Self {
        self.y_axis_id = axis.to_string();
        self
    }

    pub fn stacked(mut self, stack: &str) -> Self {
        self.stack = Some(stack.to_string());
        self
    }

    /// Chart.js draws lower orders on top.
    pub fn layer(mut self, order: i32) -> Self {
        self.order = Some(order);
        self
    }

    pub fn tooltips(mut self, format: impl Fn(Option<f64>) -> String) -> Self {
        self.formatted = self.data.iter().map(|v| format(Some(*v))).collect();
        self
    }
}

fn with_alpha(hex: &str, alpha: u8) -> String {
    if hex.len() == 7 && hex.starts_with('#') {
        format!("{hex}{alpha:02x}")
    } else {
        hex.to_string()
    }
}

#[derive(Debug, Clone, PartialEq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct ChartOptions {
    pub responsive: bool,
    pub maintain_aspect_ratio: bool,
    pub interaction: Interaction,
    pub plugins: Plugins,
    pub scales: BTreeMap<String, Axis>,
}

#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct Interaction {
    pub mode: String,
    pub intersect: bool,
}

#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct Plugins {
    pub legend: Legend,
}

#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct Legend {
    pub position: String,
}

#[derive(Debug, Clone, PartialEq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct Axis {
    pub position: String,
    pub stacked: bool,
    pub begin_at_zero: bool,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub title: Option<AxisTitle>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub grid: Option<Grid>,
}

#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct AxisTitle {
    pub display: bool,
    pub text: String,
}

#[derive(Debug, Clone, PartialEq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct Grid {
    pub draw_on_chart_area: bool,
}

impl Axis {
    pub fn left() -> Self {
        Self {
            position: "left".to_string(),
            stacked: false,
            begin_at_zero: false,
            title: None,
            grid: None,
        }
    }

    pub fn right() -> Self {
        Self {
            position: "right".to_string(),
            grid: Some(Grid {
                draw_on_chart_area: false,
            }),
            ..Self::left()
        }
    }

    pub fn bottom() -> Self {
        Self {
            position: "bottom".to_string(),
            ..Self::left()
        }
    }

    pub fn from_zero(mut self) -> Self {
        self.begin_at_zero = true;
        self
    }

    pub fn stacked(mut self) -> Self {
        self.stacked = true;
        self
    }

    pub fn titled(mut self, text: &str) -> Self {
        self.title = Some(AxisTitle {
            display: true,
            text: text.to_string(),
        });
        self
    }
}

impl ChartConfig {
    pub fn new(kind: ChartKind, labels: Vec<String>) -> Self {
        let mut scales = BTreeMap::new();
        scales.insert("x".to_string(), Axis::bottom());
        scales.insert("y".to_string(), Axis::left());

        Self {
            kind,
            data: ChartData {
                labels,
                datasets: Vec::new(),
            },
            options: ChartOptions {
                responsive: true,
                maintain_aspect_ratio: false,
                interaction: Interaction {
                    mode: "index".to_string(),
                    intersect: false,
                },
                plugins: Plugins {
                    legend: Legend {
                        position: "bottom".to_string(),
                    },
                },
                scales,
            },
        }
    }

    pub fn dataset(mut self, dataset: Dataset) -> Self {
        self.data.datasets.push(dataset);
        self
    }

    pub fn axis(mut self, id: &str, axis: Axis) -> Self {
        self.options.scales.insert(id.to_string(), axis);
        self
    }

    pub fn scale(&self, id: &str) -> Option<&Axis> {
        self.options.scales.get(id)
    }
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub enum ChartLifecycleEvent {
    Constructed { surface: String, serial: u64 },
    Disposed { surface: String, serial: u64 },
}

#[derive(Debug, Clone, PartialEq)]
pub struct ChartInstance {
    surface: String,
    serial: u64,
    config: ChartConfig,
}

impl ChartInstance {
    pub fn surface(&self) -> &str {
        &self.surface
    }

    pub fn serial(&self) -> u64 {
        self.serial
    }

    pub fn config(&self) -> &ChartConfig {
        &self.config
    }
}

/// Owns every live chart, at most one per surface id.
#[derive(Debug, Default)]
pub struct ChartRegistry {
    live: BTreeMap<String, ChartInstance>,
    next_serial: u64,
    journal: VecDeque<ChartLifecycleEvent>,
}

impl ChartRegistry {
    pub fn new() -> Self {
        Self::default()
    }

    /// Disposes whatever is mounted at `surface`, then constructs the new chart.
    /// Returns `None` without touching the registry when the page has no such surface.
    pub fn mount(
        &mut self,
        page: &Page,
        surface: &str,
        config: ChartConfig,
    ) -> Option<&ChartInstance> {
        if !page.has_surface(surface) {
            return None;
        }

        self.unmount(surface);

        self.next_serial += 1;
        let serial = self.next_serial;
        debug!(
            component = "charts",
            event = "chart.constructed",
            surface,
            serial
        );
        self.record(ChartLifecycleEvent::Constructed {
            surface: surface.to_string(),
            serial,
        });
        self.live.insert(
            surface.to_string(),
            ChartInstance {
                surface: surface.to_string(),
                serial,
                config,
            },
        );
        self.live.get(surface)
    }

    pub fn unmount(&mut self, surface: &str) -> bool {
        let Some(previous) = self.live.remove(surface) else {
            return false;
        };

        debug!(
            component = "charts",
            event = "chart.disposed",
            surface,
            serial = previous.serial
        );
        self.record(ChartLifecycleEvent::Disposed {
            surface: previous.surface,
            serial: previous.serial,
        });
        true
    }

    pub fn get(&self, surface: &str) -> Option<&ChartInstance> {
        self.live.get(surface)
    }

    pub fn live(&self) -> impl Iterator<Item = &ChartInstance> {
        self.live.values()
    }

    pub fn live_count(&self) -> usize {
        self.live.len()
    }

    /// Most recent lifecycle events, oldest first.
    pub fn journal(&self) -> impl Iterator<Item = &ChartLifecycleEvent> {
        self.journal.iter()
    }

    fn record(&mut self, event: ChartLifecycleEvent) {
        if self.journal.len() == JOURNAL_CAPACITY {
            self.journal.pop_front();
        }
        self.journal.push_back(event);
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::format::format_percent;
    use crate::page::Page;

    fn sample_config(label: &str) -> ChartConfig {
        ChartConfig::new(ChartKind::Line, vec!["2025-01".to_string()])
            .dataset(Dataset::line(label, vec![1.5], "#3b82f6").tooltips(format_percent))
    }

    #[test]
    fn remount_disposes_previous_before_constructing() {
        let page = Page::dashboard();
        let mut registry = ChartRegistry::new();

        let first = registry
            .mount(&page, "chart-supply", sample_config("first"))
            .map(ChartInstance::serial)
            .expect("surface exists");
        let second = registry
            .mount(&page, "chart-supply", sample_config("second"))
            .map(ChartInstance::serial)
            .expect("surface exists");

        assert_eq!(registry.live_count(), 1);
        assert_eq!(
            registry.get("chart-supply").map(|c| c.config().data.datasets[0].label.as_str()),
            Some("second")
        );

        let journal: Vec<_> = registry.journal().cloned().collect();
        assert_eq!(
            journal,
            vec![
                ChartLifecycleEvent::Constructed {
                    surface: "chart-supply".to_string(),
                    serial: first
                },
                ChartLifecycleEvent::Disposed {
                    surface: "chart-supply".to_string(),
                    serial: first
                },
                ChartLifecycleEvent::Constructed {
                    surface: "chart-supply".to_string(),
                    serial: second
                },
            ]
        );
    }

    #[test]
    fn mount_on_missing_surface_is_noop() {
        let page = Page::dashboard();
        let mut registry = ChartRegistry::new();

        assert!(registry
            .mount(&page, "chart-nowhere", sample_config("x"))
            .is_none());
        assert_eq!(registry.live_count(), 0);
        assert_eq!(registry.journal().count(), 0);
    }

    #[test]
    fn config_serializes_to_chartjs_shape() {
        let cfg = ChartConfig::new(ChartKind::Bar, vec!["Q1".to_string()])
            .dataset(Dataset::line("ACH", vec![2.0], "#111111").dashed().on_axis("y1"))
            .axis("y1", Axis::right().from_zero());
        let json = serde_json::to_value(&cfg).expect("config serializes");

        assert_eq!(json["type"], "bar");
        assert_eq!(json["data"]["datasets"][0]["type"], "line");
        assert_eq!(json["data"]["datasets"][0]["yAxisID"], "y1");
        assert_eq!(json["data"]["datasets"][0]["borderDash"][0], 6);
        assert_eq!(json["options"]["scales"]["y1"]["beginAtZero"], true);
        assert_eq!(json["options"]["scales"]["y1"]["grid"]["drawOnChartArea"], false);
        assert_eq!(json["options"]["maintainAspectRatio"], false);
    }
}
