//! Sale dates and their recency ranking.

use chrono::{DateTime, NaiveDate, NaiveDateTime};
use serde::{Deserialize, Deserializer, Serialize, Serializer};
use std::fmt;

const PERMANENT: &str = "상시";
const SEMI_PERMANENT: &str = "준상시";

/// When a package is (or was) on sale.
#[derive(Debug, Clone, PartialEq, Eq, Hash)]
pub enum SaleDate {
    /// Always purchasable. Ranks above everything else.
    Permanent,
    /// Routinely re-run. Ranks directly below [`SaleDate::Permanent`].
    SemiPermanent,
    /// Free-form date text, normally `YYYY-MM-DD`.
    Date(String),
}

/// Sort key for [`SaleDate`]; greater means more relevant.
///
/// Variant order matters: unparseable dates sort below every dated entry,
/// which sort below both always-available tiers.
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash)]
pub enum SaleRank {
    Unknown,
    /// Milliseconds since the Unix epoch.
    Dated(i64),
    SemiPermanent,
    Permanent,
}

impl SaleDate {
    pub fn from_date(date: NaiveDate) -> Self {
        SaleDate::Date(date.format("%Y-%m-%d").to_string())
    }

    pub fn rank(&self) -> SaleRank {
        match self {
            SaleDate::Permanent => SaleRank::Permanent,
            SaleDate::SemiPermanent => SaleRank::SemiPermanent,
            SaleDate::Date(text) => parse_instant(text)
                .map(SaleRank::Dated)
                .unwrap_or(SaleRank::Unknown),
        }
    }

    pub fn as_str(&self) -> &str {
        match self {
            SaleDate::Permanent => PERMANENT,
            SaleDate::SemiPermanent => SEMI_PERMANENT,
            SaleDate::Date(text) => text,
        }
    }
}

impl Default for SaleDate {
    fn default() -> Self {
        SaleDate::Date(String::new())
    }
}

impl From<&str> for SaleDate {
    fn from(value: &str) -> Self {
        match value.trim() {
            PERMANENT => SaleDate::Permanent,
            SEMI_PERMANENT => SaleDate::SemiPermanent,
            _ => SaleDate::Date(value.to_string()),
        }
    }
}

impl fmt::Display for SaleDate {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

impl Serialize for SaleDate {
    fn serialize<S: Serializer>(&self, serializer: S) -> Result<S::Ok, S::Error> {
        serializer.serialize_str(self.as_str())
    }
}

impl<'de> Deserialize<'de> for SaleDate {
    fn deserialize<D: Deserializer<'de>>(deserializer: D) -> Result<Self, D::Error> {
        let opt: Option<String> = Option::deserialize(deserializer)?;
        Ok(opt.as_deref().map(SaleDate::from).unwrap_or_default())
    }
}

/// Interprets date text the way a browser would for the formats users actually enter.
/// Date-only values are taken as midnight UTC.
fn parse_instant(text: &str) -> Option<i64> {
    let text = text.trim();
    if text.is_empty() {
        return None;
    }

    if let Ok(dt) = DateTime::parse_from_rfc3339(text) {
        return Some(dt.timestamp_millis());
    }

    for format in ["%Y-%m-%dT%H:%M:%S", "%Y-%m-%dT%H:%M", "%Y-%m-%d %H:%M:%S"] {
        if let Ok(dt) = NaiveDateTime::parse_from_str(text, format) {
            return Some(dt.and_utc().timestamp_millis());
        }
    }

    for format in ["%Y-%m-%d", "%Y/%m/%d", "%Y.%m.%d"] {
        if let Ok(date) = NaiveDate::parse_from_str(text, format) {
            return date
                .and_hms_opt(0, 0, 0)
                .map(|dt| dt.and_utc().timestamp_millis());
        }
    }

    None
}
