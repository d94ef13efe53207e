//! Display formatting and status classification shared by every section.

pub const MISSING: &str = "--";

pub const COLOR_NOT_STARTED: &str = "#94a3b8";
pub const COLOR_EMERGING: &str = "#f59e0b";
pub const COLOR_ESTABLISHED: &str = "#3b82f6";
pub const COLOR_MAINSTREAM: &str = "#10b981";
pub const COLOR_UNKNOWN: &str = "#6b7280";

/// Formats a value expressed in billions of USD: `$X.YT` from 1000 upward, `$X.YB` below.
pub fn format_currency_abbrev(value: Option<f64>) -> String {
    match finite(value) {
        None => MISSING.to_string(),
        Some(bn) if bn >= 1000.0 => format!("${:.1}T", bn / 1000.0),
        Some(bn) => format!("${bn:.1}B"),
    }
}

pub fn format_percent(value: Option<f64>) -> String {
    match finite(value) {
        None => MISSING.to_string(),
        Some(pct) => format!("{pct:.2}%"),
    }
}

/// Whole-dollar amount with thousands separators, e.g. `$12,480`.
pub fn format_usd(value: Option<f64>) -> String {
    let Some(amount) = finite(value) else {
        return MISSING.to_string();
    };

    let rounded = amount.round();
    let digits = format!("{:.0}", rounded.abs());
    let mut grouped = String::with_capacity(digits.len() + digits.len() / 3);
    for (idx, ch) in digits.chars().enumerate() {
        if idx > 0 && (digits.len() - idx) % 3 == 0 {
            grouped.push(',');
        }
        grouped.push(ch);
    }

    if rounded < 0.0 {
        format!("-${grouped}")
    } else {
        format!("${grouped}")
    }
}

/// Scaled count such as `12.4M` or `310K`.
pub fn format_scaled(value: Option<f64>, decimals: usize, suffix: &str) -> String {
    match finite(value) {
        None => MISSING.to_string(),
        Some(v) => format!("{v:.decimals$}{suffix}"),
    }
}

pub fn status_color(status: &str) -> &'static str {
    match status {
        "not_started" => COLOR_NOT_STARTED,
        "emerging" => COLOR_EMERGING,
        "established" => COLOR_ESTABLISHED,
        "mainstream" => COLOR_MAINSTREAM,
        _ => COLOR_UNKNOWN,
    }
}

pub fn display_status(status: &str) -> String {
    status.replace('_', " ")
}

pub fn text_or_dash(value: Option<&str>) -> String {
    match value {
        Some(text) if !text.is_empty() => text.to_string(),
        _ => MISSING.to_string(),
    }
}

fn finite(value: Option<f64>) -> Option<f64> {
    value.filter(|v| v.is_finite())
}

/// Three display states shared by milestone lists and the regulatory timeline.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum MilestoneState {
    Done,
    InProgress,
    Pending,
}

impl MilestoneState {
    pub fn from_status(status: Option<&str>) -> Self {
        match status {
            Some("passed") | Some("done") => Self::Done,
            Some("in_progress") => Self::InProgress,
            _ => Self::Pending,
        }
    }

    pub fn css_class(self) -> &'static str {
        match self {
            Self::Done => "done",
            Self::InProgress => "in_progress",
            Self::Pending => "pending",
        }
    }

    pub fn dot_color(self) -> &'static str {
        match self {
            Self::Done => COLOR_ESTABLISHED,
            Self::InProgress => COLOR_EMERGING,
            Self::Pending => COLOR_NOT_STARTED,
        }
    }
}

/// Tax signal states; accepts a wider set of raw strings than milestones do.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum SignalState {
    Resolved,
    InProgress,
    NotStarted,
}

impl SignalState {
    pub fn from_status(status: Option<&str>) -> Self {
        match status {
            Some("passed") | Some("done") | Some("resolved") => Self::Resolved,
            Some("in_progress") | Some("pending") => Self::InProgress,
            _ => Self::NotStarted,
        }
    }

    pub fn css_class(self) -> &'static str {
        match self {
            Self::Resolved => "signal-done",
            Self::InProgress => "signal-progress",
            Self::NotStarted => "signal-none",
        }
    }

    pub fn label(self) -> &'static str {
        match self {
            Self::Resolved => "resolved",
            Self::InProgress => "in progress",
            Self::NotStarted => "not started",
        }
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum CanaryState {
    Quiet,
    Watching,
    Triggered,
}

impl CanaryState {
    pub fn from_status(status: Option<&str>) -> Self {
        match status {
            Some("watching") => Self::Watching,
            Some("triggered") => Self::Triggered,
            _ => Self::Quiet,
        }
    }

    pub fn css_class(self) -> &'static str {
        match self {
            Self::Quiet => "canary-badge",
            Self::Watching => "canary-badge watching",
            Self::Triggered => "canary-badge triggered",
        }
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Trend {
    Up,
    Down,
    Stable,
}

impl Trend {
    pub fn from_raw(raw: Option<&str>) -> Self {
        match raw {
            Some("increasing") | Some("growing") => Self::Up,
            Some("decreasing") | Some("declining") => Self::Down,
            _ => Self::Stable,
        }
    }

    pub fn arrow(self) -> &'static str {
        match self {
            Self::Up => "\u{2191}",
            Self::Down => "\u{2193}",
            Self::Stable => "\u{2192}",
        }
    }

    pub fn css_class(self) -> &'static str {
        match self {
            Self::Up => "trend-up",
            Self::Down => "trend-down",
            Self::Stable => "trend-stable",
        }
    }
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub enum FrictionLevel {
    High,
    Medium,
    Low,
    None,
    Other(String),
}

impl FrictionLevel {
    pub fn from_raw(raw: &str) -> Self {
        match raw {
            "high" => Self::High,
            "medium" => Self::Medium,
            "low" => Self::Low,
            "none" => Self::None,
            other => Self::Other(other.to_string()),
        }
    }

    pub fn label(&self) -> String {
        match self {
            Self::High => "High".to_string(),
            Self::Medium => "Medium".to_string(),
            Self::Low => "Low".to_string(),
            Self::None => "None".to_string(),
            Self::Other(raw) => raw.clone(),
        }
    }

    pub fn css_class(&self) -> &'static str {
        match self {
            Self::High => "friction-badge friction-high",
            Self::Medium => "friction-badge friction-medium",
            Self::Low => "friction-badge friction-low",
            Self::None => "friction-badge friction-none",
            Self::Other(_) => "friction-badge",
        }
    }
}

pub fn severity_class(severity: Option<&str>) -> String {
    let level = severity
        .map(str::trim)
        .filter(|s| !s.is_empty())
        .map(str::to_lowercase)
        .unwrap_or_else(|| "moderate".to_string());
    format!("severity-{level}")
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn currency_switches_to_trillions_at_one_thousand() {
        assert_eq!(format_currency_abbrev(Some(999.94)), "$999.9B");
        assert_eq!(format_currency_abbrev(Some(1000.0)), "$1.0T");
        assert_eq!(format_currency_abbrev(Some(18_620.0)), "$18.6T");
        assert_eq!(format_currency_abbrev(Some(0.0)), "$0.0B");
        assert_eq!(format_currency_abbrev(None), "--");
    }

    #[test]
    fn currency_suffix_follows_threshold() {
        for n in [1000.0, 1234.5, 50_000.0] {
            assert!(format_currency_abbrev(Some(n)).ends_with('T'), "{n}");
        }
        for n in [0.0, 1.5, 255.0, 999.0] {
            assert!(format_currency_abbrev(Some(n)).ends_with('B'), "{n}");
        }
    }

    #[test]
    fn percent_has_two_decimals() {
        assert_eq!(format_percent(Some(3.5)), "3.50%");
        assert_eq!(format_percent(Some(0.0137)), "0.01%");
        assert_eq!(format_percent(Some(12.0)), "12.00%");
        assert_eq!(format_percent(None), "--");
        assert_eq!(format_percent(Some(f64::NAN)), "--");
    }

    #[test]
    fn usd_groups_thousands() {
        assert_eq!(format_usd(Some(12_480.4)), "$12,480");
        assert_eq!(format_usd(Some(999.0)), "$999");
        assert_eq!(format_usd(Some(1_000_000.0)), "$1,000,000");
        assert_eq!(format_usd(None), "--");
    }

    #[test]
    fn status_colors_cover_ladder_statuses() {
        assert_eq!(status_color("mainstream"), COLOR_MAINSTREAM);
        assert_eq!(status_color("established"), COLOR_ESTABLISHED);
        assert_eq!(status_color("emerging"), COLOR_EMERGING);
        assert_eq!(status_color("not_started"), COLOR_NOT_STARTED);
        assert_eq!(status_color("sideways"), COLOR_UNKNOWN);
        assert_eq!(display_status("not_started"), "not started");
    }

    #[test]
    fn tax_signal_mapping_groups_raw_statuses() {
        let done: Vec<_> = ["passed", "done", "resolved"]
            .iter()
            .map(|s| SignalState::from_status(Some(s)))
            .collect();
        assert!(done.iter().all(|s| *s == SignalState::Resolved));

        assert_eq!(
            SignalState::from_status(Some("in_progress")),
            SignalState::from_status(Some("pending"))
        );
        assert_ne!(SignalState::from_status(Some("pending")), SignalState::Resolved);
        assert_eq!(SignalState::from_status(Some("proposed")), SignalState::NotStarted);
        assert_eq!(SignalState::from_status(None), SignalState::NotStarted);
    }

    #[test]
    fn milestone_mapping_treats_passed_as_done() {
        assert_eq!(MilestoneState::from_status(Some("passed")), MilestoneState::Done);
        assert_eq!(MilestoneState::from_status(Some("done")), MilestoneState::Done);
        assert_eq!(
            MilestoneState::from_status(Some("in_progress")),
            MilestoneState::InProgress
        );
        assert_eq!(MilestoneState::from_status(Some("pending")), MilestoneState::Pending);
        assert_eq!(MilestoneState::from_status(None), MilestoneState::Pending);
    }

    #[test]
    fn trend_and_severity_classification() {
        assert_eq!(Trend::from_raw(Some("growing")), Trend::Up);
        assert_eq!(Trend::from_raw(Some("declining")), Trend::Down);
        assert_eq!(Trend::from_raw(Some("flat")), Trend::Stable);
        assert_eq!(severity_class(Some("Severe")), "severity-severe");
        assert_eq!(severity_class(None), "severity-moderate");
        assert_eq!(FrictionLevel::from_raw("medium-high").label(), "medium-high");
    }
}
