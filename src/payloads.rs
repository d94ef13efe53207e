//! Typed view models for the JSON documents the dashboard consumes.
//!
//! Every field is optional. A field holding the wrong JSON type is treated as
//! absent and non-object entries in record arrays are dropped, so a renderer never
//! sees a partially-typed structure.

use serde::de::DeserializeOwned;
use serde::{Deserialize, Deserializer, Serialize};
use serde_json::Value;

use crate::format::text_or_dash;

fn lenient<'de, D, T>(deserializer: D) -> Result<Option<T>, D::Error>
where
    D: Deserializer<'de>,
    T: DeserializeOwned,
{
    let value = Value::deserialize(deserializer)?;
    Ok(serde_json::from_value(value).ok())
}

fn lenient_list<'de, D, T>(deserializer: D) -> Result<Vec<T>, D::Error>
where
    D: Deserializer<'de>,
    T: DeserializeOwned,
{
    let value = Value::deserialize(deserializer)?;
    let Value::Array(items) = value else {
        return Ok(Vec::new());
    };

    Ok(items
        .into_iter()
        .filter(Value::is_object)
        .filter_map(|item| serde_json::from_value(item).ok())
        .collect())
}

/// Accepts `"2024-01-01"` as well as bare numbers and booleans, rendered as text.
fn lenient_text<'de, D>(deserializer: D) -> Result<Option<String>, D::Error>
where
    D: Deserializer<'de>,
{
    let value = Value::deserialize(deserializer)?;
    Ok(match value {
        Value::String(s) => Some(s),
        Value::Number(n) => Some(n.to_string()),
        Value::Bool(b) => Some(b.to_string()),
        _ => None,
    })
}

#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct Metadata {
    #[serde(deserialize_with = "lenient_text")]
    pub last_updated: Option<String>,
    #[serde(deserialize_with = "lenient_text")]
    pub source: Option<String>,
}

/// Implemented by every payload so the footer can read freshness uniformly.
pub trait HasMetadata {
    fn metadata(&self) -> Option<&Metadata>;

    fn last_updated(&self) -> Option<&str> {
        self.metadata()
            .and_then(|m| m.last_updated.as_deref())
            .filter(|s| !s.is_empty())
    }
}

macro_rules! impl_has_metadata {
    ($($ty:ty),+ $(,)?) => {
        $(impl HasMetadata for $ty {
            fn metadata(&self) -> Option<&Metadata> {
                self.metadata.as_ref()
            }
        })+
    };
}

#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct Milestone {
    #[serde(deserialize_with = "lenient_text")]
    pub threshold: Option<String>,
    #[serde(deserialize_with = "lenient_text")]
    pub milestone: Option<String>,
    #[serde(deserialize_with = "lenient_text")]
    pub status: Option<String>,
    #[serde(deserialize_with = "lenient_text")]
    pub date: Option<String>,
    #[serde(deserialize_with = "lenient_text")]
    pub deadline: Option<String>,
    #[serde(deserialize_with = "lenient_text")]
    pub note: Option<String>,
    #[serde(deserialize_with = "lenient")]
    pub target_bn: Option<f64>,
    #[serde(deserialize_with = "lenient")]
    pub days_remaining: Option<i64>,
}

impl Milestone {
    /// Threshold or milestone name, `--` when neither is present.
    pub fn label(&self) -> String {
        text_or_dash(
            self.threshold
                .as_deref()
                .filter(|t| !t.is_empty())
                .or(self.milestone.as_deref()),
        )
    }
}

// adoption/layers.json

#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct LayersPayload {
    #[serde(deserialize_with = "lenient")]
    pub metadata: Option<Metadata>,
    #[serde(deserialize_with = "lenient_list")]
    pub layers: Vec<Layer>,
    #[serde(deserialize_with = "lenient")]
    pub canary: Option<Canary>,
    #[serde(deserialize_with = "lenient_list")]
    pub secondary_canaries: Vec<SecondaryCanary>,
    #[serde(deserialize_with = "lenient_list")]
    pub events: Vec<AdoptionEvent>,
}

#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct Layer {
    #[serde(deserialize_with = "lenient")]
    pub number: Option<i64>,
    #[serde(deserialize_with = "lenient_text")]
    pub name: Option<String>,
    #[serde(deserialize_with = "lenient_text")]
    pub status: Option<String>,
    #[serde(deserialize_with = "lenient_text")]
    pub key_signal: Option<String>,
}

#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct Canary {
    #[serde(deserialize_with = "lenient_text")]
    pub name: Option<String>,
    #[serde(deserialize_with = "lenient_text")]
    pub status: Option<String>,
    #[serde(deserialize_with = "lenient_text")]
    pub description: Option<String>,
}

#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct SecondaryCanary {
    #[serde(deserialize_with = "lenient_text")]
    pub name: Option<String>,
    #[serde(deserialize_with = "lenient_text")]
    pub status: Option<String>,
    #[serde(deserialize_with = "lenient_text")]
    pub signal: Option<String>,
}

#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct AdoptionEvent {
    #[serde(deserialize_with = "lenient_text")]
    pub date: Option<String>,
    #[serde(alias = "description", deserialize_with = "lenient_text")]
    pub event: Option<String>,
    #[serde(deserialize_with = "lenient")]
    pub layer: Option<i64>,
}

// onchain/supply.json

#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct SupplyPayload {
    #[serde(deserialize_with = "lenient")]
    pub metadata: Option<Metadata>,
    #[serde(deserialize_with = "lenient_list")]
    pub monthly: Vec<SupplyMonth>,
    #[serde(deserialize_with = "lenient_list")]
    pub milestones: Vec<Milestone>,
}

#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct SupplyMonth {
    #[serde(deserialize_with = "lenient_text")]
    pub date: Option<String>,
    #[serde(deserialize_with = "lenient")]
    pub usdc: Option<f64>,
    #[serde(deserialize_with = "lenient")]
    pub usdt: Option<f64>,
    #[serde(deserialize_with = "lenient")]
    pub others: Option<f64>,
    #[serde(deserialize_with = "lenient")]
    pub total: Option<f64>,
    #[serde(deserialize_with = "lenient")]
    pub m1_trillion: Option<f64>,
    #[serde(deserialize_with = "lenient")]
    pub pct_of_m1: Option<f64>,
}

// onchain/volume.json

#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct VolumePayload {
    #[serde(deserialize_with = "lenient")]
    pub metadata: Option<Metadata>,
    #[serde(deserialize_with = "lenient_list")]
    pub monthly: Vec<VolumeMonth>,
    #[serde(deserialize_with = "lenient_list")]
    pub milestones: Vec<Milestone>,
}

#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct VolumeMonth {
    #[serde(deserialize_with = "lenient_text")]
    pub date: Option<String>,
    #[serde(deserialize_with = "lenient")]
    pub estimated_commercial_bn: Option<f64>,
    #[serde(deserialize_with = "lenient")]
    pub ach_volume_bn: Option<f64>,
    #[serde(deserialize_with = "lenient")]
    pub commercial_pct_of_ach: Option<f64>,
    #[serde(deserialize_with = "lenient")]
    pub avg_transfer_size: Option<f64>,
}

// remittance/comparison.json

#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct RemittancePayload {
    #[serde(deserialize_with = "lenient")]
    pub metadata: Option<Metadata>,
    #[serde(deserialize_with = "lenient_list")]
    pub quarterly: Vec<RemittanceQuarter>,
    #[serde(deserialize_with = "lenient_list")]
    pub corridors: Vec<Corridor>,
}

#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct RemittanceQuarter {
    #[serde(deserialize_with = "lenient_text")]
    pub quarter: Option<String>,
    #[serde(deserialize_with = "lenient")]
    pub stablecoin_bn: Option<f64>,
    #[serde(deserialize_with = "lenient")]
    pub western_union_bn: Option<f64>,
    #[serde(deserialize_with = "lenient")]
    pub moneygram_bn: Option<f64>,
    #[serde(deserialize_with = "lenient")]
    pub wise_bn: Option<f64>,
    #[serde(deserialize_with = "lenient")]
    pub avg_cost_stablecoin_pct: Option<f64>,
    #[serde(deserialize_with = "lenient")]
    pub avg_cost_traditional_pct: Option<f64>,
}

#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct Corridor {
    #[serde(deserialize_with = "lenient_text")]
    pub name: Option<String>,
    #[serde(alias = "annual_volume", deserialize_with = "lenient")]
    pub annual_volume_bn: Option<f64>,
    #[serde(deserialize_with = "lenient")]
    pub stablecoin_share_pct: Option<f64>,
    #[serde(deserialize_with = "lenient_text")]
    pub trend: Option<String>,
    #[serde(deserialize_with = "lenient_text")]
    pub note: Option<String>,
}

// regulatory/genius_act.json

#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct GeniusPayload {
    #[serde(deserialize_with = "lenient")]
    pub metadata: Option<Metadata>,
    #[serde(deserialize_with = "lenient_text")]
    pub act_name: Option<String>,
    #[serde(deserialize_with = "lenient_text")]
    pub effective_date_estimate: Option<String>,
    #[serde(deserialize_with = "lenient")]
    pub days_until_effective: Option<i64>,
    #[serde(deserialize_with = "lenient_list")]
    pub milestones: Vec<Milestone>,
    #[serde(deserialize_with = "lenient_list")]
    pub rulemaking_tracker: Vec<RulemakingEntry>,
}

#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct RulemakingEntry {
    #[serde(deserialize_with = "lenient_text")]
    pub agency: Option<String>,
    #[serde(deserialize_with = "lenient_text")]
    pub stage: Option<String>,
    #[serde(deserialize_with = "lenient_text")]
    pub published: Option<String>,
    #[serde(deserialize_with = "lenient_text")]
    pub next_action: Option<String>,
}

// onchain/wallets.json

#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct WalletsPayload {
    #[serde(deserialize_with = "lenient")]
    pub metadata: Option<Metadata>,
    #[serde(deserialize_with = "lenient_list")]
    pub monthly: Vec<WalletMonth>,
}

#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct WalletMonth {
    #[serde(deserialize_with = "lenient_text")]
    pub date: Option<String>,
    #[serde(deserialize_with = "lenient")]
    pub monthly_active_m: Option<f64>,
    #[serde(deserialize_with = "lenient")]
    pub new_wallets_k: Option<f64>,
}

// treasury/reserves.json

#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct ReservesPayload {
    #[serde(deserialize_with = "lenient")]
    pub metadata: Option<Metadata>,
    #[serde(deserialize_with = "lenient_list")]
    pub monthly: Vec<ReserveMonth>,
    #[serde(deserialize_with = "lenient_list")]
    pub milestones: Vec<Milestone>,
}

#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct ReserveMonth {
    #[serde(deserialize_with = "lenient_text")]
    pub date: Option<String>,
    #[serde(deserialize_with = "lenient")]
    pub total_stablecoin_tbill_bn: Option<f64>,
    #[serde(deserialize_with = "lenient")]
    pub pct_of_market: Option<f64>,
}

// tax/status.json

#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct TaxPayload {
    #[serde(deserialize_with = "lenient")]
    pub metadata: Option<Metadata>,
    #[serde(deserialize_with = "lenient_text")]
    pub current_friction: Option<String>,
    #[serde(deserialize_with = "lenient_list")]
    pub signals: Vec<TaxSignal>,
}

#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct TaxSignal {
    #[serde(deserialize_with = "lenient_text")]
    pub signal: Option<String>,
    #[serde(deserialize_with = "lenient_text")]
    pub status: Option<String>,
}

// yield/rates.json

#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct YieldPayload {
    #[serde(deserialize_with = "lenient")]
    pub metadata: Option<Metadata>,
    #[serde(deserialize_with = "lenient")]
    pub fed_funds_rate: Option<f64>,
    #[serde(deserialize_with = "lenient_list")]
    pub current: Vec<YieldRate>,
}

#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct YieldRate {
    #[serde(deserialize_with = "lenient_text")]
    pub platform: Option<String>,
    #[serde(deserialize_with = "lenient_text")]
    pub asset: Option<String>,
    #[serde(deserialize_with = "lenient")]
    pub apy_pct: Option<f64>,
    #[serde(rename = "type", deserialize_with = "lenient_text")]
    pub kind: Option<String>,
}

// onchain/depegs.json

#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct DepegPayload {
    #[serde(deserialize_with = "lenient")]
    pub metadata: Option<Metadata>,
    #[serde(deserialize_with = "lenient_list")]
    pub events: Vec<DepegEvent>,
}

#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct DepegEvent {
    #[serde(deserialize_with = "lenient_text")]
    pub date: Option<String>,
    #[serde(deserialize_with = "lenient_text")]
    pub asset: Option<String>,
    #[serde(deserialize_with = "lenient_text")]
    pub severity: Option<String>,
    #[serde(deserialize_with = "lenient")]
    pub low_price: Option<f64>,
    #[serde(deserialize_with = "lenient")]
    pub duration_days: Option<f64>,
    #[serde(deserialize_with = "lenient_text")]
    pub cause: Option<String>,
}

// composite/signal.json

#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct CompositePayload {
    #[serde(deserialize_with = "lenient")]
    pub metadata: Option<Metadata>,
    #[serde(deserialize_with = "lenient")]
    pub key_metrics: Option<KeyMetrics>,
}

#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct KeyMetrics {
    #[serde(deserialize_with = "lenient")]
    pub supply_pct_of_m1: Option<f64>,
    #[serde(deserialize_with = "lenient")]
    pub commercial_pct_of_ach: Option<f64>,
    #[serde(deserialize_with = "lenient")]
    pub remittance_pct_of_outbound: Option<f64>,
    #[serde(deserialize_with = "lenient")]
    pub treasury_pct_of_tbills: Option<f64>,
    #[serde(deserialize_with = "lenient_text")]
    pub tax_friction: Option<String>,
    #[serde(deserialize_with = "lenient")]
    pub active_wallets_m: Option<f64>,
    #[serde(deserialize_with = "lenient")]
    pub genius_act_days_until_effective: Option<i64>,
}

impl KeyMetrics {
    pub fn is_empty(&self) -> bool {
        *self == Self::default()
    }
}

impl_has_metadata!(
    LayersPayload,
    SupplyPayload,
    VolumePayload,
    RemittancePayload,
    GeniusPayload,
    WalletsPayload,
    ReservesPayload,
    TaxPayload,
    YieldPayload,
    DepegPayload,
    CompositePayload,
);

/// Sorts newest first by date string. Entries without a date sink to the end.
pub fn sort_newest_first<T>(items: &mut [T], date: impl Fn(&T) -> Option<&str>) {
    items.sort_by(|a, b| date(b).cmp(&date(a)));
}

#[cfg(test)]
mod tests {
    use super::*;
    use serde_json::json;

    #[test]
    fn wrong_types_become_absent_instead_of_failing() {
        let payload: SupplyPayload = serde_json::from_value(json!({
            "metadata": {"last_updated": "2025-05-01"},
            "monthly": [
                {"date": "2025-04", "usdc": "lots", "usdt": 140.2, "pct_of_m1": null},
                "not-a-record",
                {"date": 202505, "usdc": 61.0}
            ],
            "milestones": {"unexpected": "object"}
        }))
        .expect("lenient payload parses");

        assert_eq!(payload.monthly.len(), 2);
        assert_eq!(payload.monthly[0].usdc, None);
        assert_eq!(payload.monthly[0].usdt, Some(140.2));
        assert_eq!(payload.monthly[1].date.as_deref(), Some("202505"));
        assert!(payload.milestones.is_empty());
        assert_eq!(payload.last_updated(), Some("2025-05-01"));
    }

    #[test]
    fn empty_object_parses_to_defaults() {
        let payload: LayersPayload = serde_json::from_value(json!({})).expect("parses");
        assert!(payload.layers.is_empty());
        assert!(payload.canary.is_none());
        assert_eq!(payload.last_updated(), None);
    }

    #[test]
    fn milestone_label_prefers_threshold() {
        let ms: Milestone = serde_json::from_value(json!({
            "threshold": "1% of M1",
            "milestone": "ignored",
            "status": "passed"
        }))
        .expect("parses");
        assert_eq!(ms.label(), "1% of M1");

        let ms: Milestone =
            serde_json::from_value(json!({"milestone": "Signed into law"})).expect("parses");
        assert_eq!(ms.label(), "Signed into law");

        let ms: Milestone = serde_json::from_value(json!({"status": "done"})).expect("parses");
        assert_eq!(ms.label(), "--");
    }

    #[test]
    fn yield_type_field_is_renamed() {
        let payload: YieldPayload = serde_json::from_value(json!({
            "fed_funds_rate": 4.33,
            "current": [{"platform": "Aave", "asset": "USDC", "apy_pct": 5.1, "type": "lending"}]
        }))
        .expect("parses");
        assert_eq!(payload.current[0].kind.as_deref(), Some("lending"));
    }

    #[test]
    fn newest_first_sort_orders_dates_descending() {
        let mut dates = vec![
            Some("2024-01-01"),
            None,
            Some("2025-06-01"),
            Some("2023-03-01"),
        ];
        sort_newest_first(&mut dates, |d| *d);
        assert_eq!(
            dates,
            vec![Some("2025-06-01"), Some("2024-01-01"), Some("2023-03-01"), None]
        );
    }
}
