//! Source freshness tiers.
//!
//! # Invariants
//! - Decay `fast` doubles the effective age; `slow` halves it.
//! - A missing or unparseable date is always `Stale` with `UNKNOWN_AGE_DAYS`.

use chrono::{DateTime, NaiveDate};
use serde::Serialize;

/// Age reported when a source has no usable date.
pub const UNKNOWN_AGE_DAYS: i64 = 999;

const FRESH_MAX_DAYS: f64 = 7.0;
const RECENT_MAX_DAYS: f64 = 30.0;
const AGING_MAX_DAYS: f64 = 90.0;

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
#[serde(rename_all = "snake_case")]
pub enum FreshnessTier {
    Fresh,
    Recent,
    Aging,
    Stale,
}

impl FreshnessTier {
    pub fn label(self) -> &'static str {
        match self {
            Self::Fresh => "Fresh",
            Self::Recent => "Recent",
            Self::Aging => "Aging",
            Self::Stale => "Stale",
        }
    }

    /// Colored marker used by listing output.
    pub fn marker(self) -> &'static str {
        match self {
            Self::Fresh => "🟢",
            Self::Recent => "🟡",
            Self::Aging => "🟠",
            Self::Stale => "🔴",
        }
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
pub struct Freshness {
    pub tier: FreshnessTier,
    /// Calendar days since the source date, before decay adjustment.
    pub days: i64,
}

/// Parses `YYYY-MM-DD` or an RFC 3339 timestamp into a calendar date.
pub fn parse_source_date(value: &str) -> Option<NaiveDate> {
    let value = value.trim();
    if value.is_empty() {
        return None;
    }
    NaiveDate::parse_from_str(value, "%Y-%m-%d")
        .ok()
        .or_else(|| {
            DateTime::parse_from_rfc3339(value)
                .ok()
                .map(|parsed| parsed.date_naive())
        })
}

/// Computes the freshness tier of a source dated `date` as seen on `today`.
pub fn calculate_freshness(date: &str, decay: &str, today: NaiveDate) -> Freshness {
    let Some(date) = parse_source_date(date) else {
        return Freshness {
            tier: FreshnessTier::Stale,
            days: UNKNOWN_AGE_DAYS,
        };
    };

    let days = (today - date).num_days();
    let factor = match decay.trim() {
        "fast" => 2.0,
        "slow" => 0.5,
        _ => 1.0,
    };
    let adjusted = days as f64 * factor;

    let tier = if adjusted <= FRESH_MAX_DAYS {
        FreshnessTier::Fresh
    } else if adjusted <= RECENT_MAX_DAYS {
        FreshnessTier::Recent
    } else if adjusted <= AGING_MAX_DAYS {
        FreshnessTier::Aging
    } else {
        FreshnessTier::Stale
    };

    Freshness { tier, days }
}
