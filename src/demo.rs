//! Built-in sample snapshot for running the dashboard without a data root.

use serde::de::DeserializeOwned;
use serde_json::{json, Value};

use crate::sources::Snapshot;

const MONTHS: [&str; 6] = [
    "2025-01", "2025-02", "2025-03", "2025-04", "2025-05", "2025-06",
];
const QUARTERS: [&str; 4] = ["2024-Q3", "2024-Q4", "2025-Q1", "2025-Q2"];
const LAST_UPDATED: &str = "2025-06-30";

pub fn demo_snapshot() -> Snapshot {
    Snapshot {
        layers: payload(layers()),
        supply: payload(supply()),
        volume: payload(volume()),
        remittance: payload(remittance()),
        genius: payload(genius()),
        wallets: payload(wallets()),
        reserves: payload(reserves()),
        tax: payload(tax()),
        yield_rates: payload(yield_rates()),
        depegs: payload(depegs()),
        composite: payload(composite()),
    }
}

fn payload<T: DeserializeOwned>(value: Value) -> Option<T> {
    serde_json::from_value(value).ok()
}

fn metadata() -> Value {
    json!({"last_updated": LAST_UPDATED, "source": "demo"})
}

fn monthly(row: impl Fn(usize, &str) -> Value) -> Value {
    Value::Array(MONTHS.iter().enumerate().map(|(i, m)| row(i, *m)).collect())
}

fn layers() -> Value {
    json!({
        "metadata": metadata(),
        "layers": [
            {"number": 1, "name": "Crypto-native trading", "status": "mainstream", "key_signal": "Exchange settlement"},
            {"number": 2, "name": "Cross-border remittance", "status": "established", "key_signal": "Corridor share above 5%"},
            {"number": 3, "name": "Commercial payments", "status": "emerging", "key_signal": "B2B invoices settled on-chain"},
            {"number": 4, "name": "Payroll", "status": "not_started", "key_signal": "Employers paying in stablecoins"},
            {"number": 5, "name": "Interchangeable money", "status": "not_started", "key_signal": "Indistinguishable from deposits"}
        ],
        "canary": {
            "name": "Payroll adoption",
            "status": "watching",
            "description": "First large employer offering stablecoin salaries"
        },
        "secondary_canaries": [
            {"name": "Tax equivalence", "status": "not_triggered", "signal": "De minimis exemption pending"},
            {"name": "Bank-issued coins", "status": "watching", "signal": "Two pilots announced"}
        ],
        "events": [
            {"date": "2025-07-18", "event": "GENIUS Act signed into law", "layer": 5},
            {"date": "2024-10-01", "event": "Card network settles merchant payouts in USDC", "layer": 3},
            {"date": "2025-03-12", "event": "Payroll provider adds stablecoin option", "layer": 4}
        ]
    })
}

fn supply() -> Value {
    let rows = monthly(|i, date| {
        let step = i as f64;
        let usdc = 52.0 + 2.1 * step;
        let usdt = 138.0 + 3.4 * step;
        let others = 18.0 + 0.6 * step;
        let total = usdc + usdt + others;
        json!({
            "date": date,
            "usdc": usdc,
            "usdt": usdt,
            "others": others,
            "total": total,
            "m1_trillion": 18.4,
            "pct_of_m1": total / 184.0
        })
    });

    json!({
        "metadata": metadata(),
        "monthly": rows,
        "milestones": [
            {"threshold": "1% of M1", "status": "passed", "date": "2024-12"},
            {"threshold": "2% of M1", "status": "in_progress"},
            {"threshold": "5% of M1", "status": "pending", "note": "Layer 5 territory"}
        ]
    })
}

fn volume() -> Value {
    let rows = monthly(|i, date| {
        let step = i as f64;
        let commercial = 38.0 + 2.5 * step;
        let ach = 7050.0 + 40.0 * step;
        json!({
            "date": date,
            "estimated_commercial_bn": commercial,
            "ach_volume_bn": ach,
            "commercial_pct_of_ach": commercial / ach * 100.0,
            "avg_transfer_size": 17800.0 + 220.0 * step
        })
    });

    json!({
        "metadata": metadata(),
        "monthly": rows,
        "milestones": [
            {"threshold": "0.5% of ACH", "status": "passed", "date": "2025-02"},
            {"threshold": "1% of ACH", "status": "pending"}
        ]
    })
}

fn remittance() -> Value {
    let quarterly: Vec<Value> = QUARTERS
        .iter()
        .enumerate()
        .map(|(i, quarter)| {
            let step = i as f64;
            json!({
                "quarter": quarter,
                "stablecoin_bn": 8.2 + 1.1 * step,
                "western_union_bn": 25.5 - 0.2 * step,
                "moneygram_bn": 11.0 - 0.1 * step,
                "wise_bn": 28.0 + 0.8 * step,
                "avg_cost_stablecoin_pct": 1.1 - 0.05 * step,
                "avg_cost_traditional_pct": 6.3
            })
        })
        .collect();

    json!({
        "metadata": metadata(),
        "quarterly": quarterly,
        "corridors": [
            {"name": "US \u{2192} Mexico", "annual_volume_bn": 64.7, "stablecoin_share_pct": 4.2, "trend": "growing"},
            {"name": "US \u{2192} Philippines", "annual_volume_bn": 40.1, "stablecoin_share_pct": 6.8, "trend": "growing", "note": "Exchange cash-out network"},
            {"name": "US \u{2192} India", "annual_volume_bn": 125.0, "stablecoin_share_pct": 0.9, "trend": "stable"},
            {"name": "EU \u{2192} Nigeria", "annual_volume_bn": 20.9, "stablecoin_share_pct": 11.5, "trend": "increasing"},
            {"name": "US \u{2192} Guatemala", "annual_volume_bn": 19.8, "stablecoin_share_pct": 1.4, "trend": "declining"},
            {"name": "UK \u{2192} Kenya", "annual_volume_bn": 4.4, "stablecoin_share_pct": 3.0, "trend": "stable"}
        ]
    })
}

fn genius() -> Value {
    json!({
        "metadata": metadata(),
        "act_name": "GENIUS Act",
        "effective_date_estimate": "2027-01-18",
        "days_until_effective": 567,
        "milestones": [
            {"milestone": "Signed into law", "status": "done", "deadline": "2025-07-18"},
            {"milestone": "Treasury implementing rules", "status": "in_progress", "deadline": "2026-07-18", "days_remaining": 383},
            {"milestone": "Effective date", "status": "pending", "deadline": "2027-01-18", "days_remaining": 567}
        ],
        "rulemaking_tracker": [
            {"agency": "Treasury", "stage": "ANPRM", "published": "2025-09-18", "next_action": "Proposed rule"},
            {"agency": "OCC", "stage": "Comment review"},
            {"agency": "FDIC", "stage": "Not started"}
        ]
    })
}

fn wallets() -> Value {
    let rows = monthly(|i, date| {
        let step = i as f64;
        json!({
            "date": date,
            "monthly_active_m": 28.5 + 0.9 * step,
            "new_wallets_k": 780.0 + 25.0 * step
        })
    });

    json!({
        "metadata": metadata(),
        "monthly": rows
    })
}

fn reserves() -> Value {
    let rows = monthly(|i, date| {
        let step = i as f64;
        json!({
            "date": date,
            "total_stablecoin_tbill_bn": 140.0 + 4.5 * step,
            "pct_of_market": 2.3 + 0.06 * step
        })
    });

    json!({
        "metadata": metadata(),
        "monthly": rows,
        "milestones": [
            {"threshold": "$150B", "status": "passed", "date": "2025-03"},
            {"threshold": "$250B", "status": "pending"}
        ]
    })
}

fn tax() -> Value {
    json!({
        "metadata": metadata(),
        "current_friction": "high",
        "signals": [
            {"signal": "Broker reporting rules finalized", "status": "done"},
            {"signal": "De minimis exemption for payments", "status": "pending"},
            {"signal": "Stablecoins treated as cash equivalents", "status": "not_started"}
        ]
    })
}

fn yield_rates() -> Value {
    json!({
        "metadata": metadata(),
        "fed_funds_rate": 4.33,
        "current": [
            {"platform": "Aave", "asset": "USDC", "apy_pct": 4.8, "type": "lending"},
            {"platform": "Coinbase", "asset": "USDC", "apy_pct": 4.1, "type": "rewards"},
            {"platform": "Ondo", "asset": "USDY", "apy_pct": 4.25, "type": "tbill"},
            {"platform": "Sky", "asset": "sUSDS", "apy_pct": 4.5, "type": "savings"}
        ]
    })
}

fn depegs() -> Value {
    json!({
        "metadata": metadata(),
        "events": [
            {"date": "2022-05-09", "asset": "UST", "severity": "severe", "low_price": 0.006, "duration_days": 30, "cause": "Algorithmic reserve collapse"},
            {"date": "2023-03-11", "asset": "USDC", "severity": "severe", "low_price": 0.877, "duration_days": 3, "cause": "Reserves held at a failed bank"},
            {"date": "2024-06-14", "asset": "USDe", "severity": "minor", "low_price": 0.995, "duration_days": 1}
        ]
    })
}

fn composite() -> Value {
    json!({
        "metadata": metadata(),
        "key_metrics": {
            "supply_pct_of_m1": 1.22,
            "commercial_pct_of_ach": 0.68,
            "remittance_pct_of_outbound": 2.9,
            "treasury_pct_of_tbills": 2.6,
            "tax_friction": "high",
            "active_wallets_m": 33.0,
            "genius_act_days_until_effective": 567
        }
    })
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::sources::SourceKey;

    #[test]
    fn every_source_is_present() {
        let snapshot = demo_snapshot();
        assert_eq!(snapshot.loaded_count(), SourceKey::ALL.len());
        for key in SourceKey::ALL {
            assert_eq!(snapshot.last_updated(key), Some(LAST_UPDATED), "{}", key.name());
        }
    }

    #[test]
    fn series_cover_every_month() {
        let snapshot = demo_snapshot();
        let supply = snapshot.supply.expect("supply present");
        assert_eq!(supply.monthly.len(), MONTHS.len());
        assert!(supply.monthly.iter().all(|m| m.total.is_some()));
        let remittance = snapshot.remittance.expect("remittance present");
        assert_eq!(remittance.quarterly.len(), QUARTERS.len());
        assert_eq!(remittance.corridors.len(), 6);
    }
}
