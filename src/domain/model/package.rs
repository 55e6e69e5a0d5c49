use serde::{Deserialize, Deserializer, Serialize};
use std::collections::BTreeSet;

use super::currency::{CurrencyKind, PackageItem, Price, PriceCurrency};
use super::sale_date::{SaleDate, SaleRank};

/// Deserialize a string that may be null as empty string
fn deserialize_nullable_string<'de, D>(deserializer: D) -> Result<String, D::Error>
where
    D: Deserializer<'de>,
{
    let opt: Option<String> = Option::deserialize(deserializer)?;
    Ok(opt.unwrap_or_default())
}

/// A recorded purchase offer.
///
/// `total_juhwa_value` and `efficiency` are cached results of the valuation
/// engine. They are written when the package is saved and rewritten whenever
/// the rate table changes; nothing recomputes them on read.
#[derive(Serialize, Deserialize, Debug, Clone, PartialEq, Default)]
#[serde(rename_all = "camelCase")]
pub struct Package {
    pub id: String,
    #[serde(default, deserialize_with = "deserialize_nullable_string")]
    pub name: String,
    #[serde(default)]
    pub price_amount: f64,
    #[serde(default)]
    pub price_currency: PriceCurrency,
    #[serde(default)]
    pub sale_date: SaleDate,
    #[serde(default)]
    pub items: Vec<PackageItem>,
    /// Free-text description of contents that have no rate, e.g. selection tickets.
    #[serde(default, deserialize_with = "deserialize_nullable_string")]
    pub non_quantifiable_items: String,
    #[serde(default)]
    pub total_juhwa_value: f64,
    #[serde(default, with = "efficiency_format")]
    pub efficiency: f64,
    /// Opaque thumbnail reference (usually a data URL). Never interpreted here.
    #[serde(default)]
    pub image: Option<String>,
}

impl Package {
    /// Generates a fresh package id.
    pub fn new_id() -> String {
        uuid::Uuid::new_v4().simple().to_string()
    }

    pub fn price(&self) -> Price {
        Price::new(self.price_amount, self.price_currency)
    }

    /// The distinct currency kinds listed in the contents.
    pub fn kinds(&self) -> BTreeSet<CurrencyKind> {
        self.items.iter().map(|item| item.kind).collect()
    }

    pub fn sale_rank(&self) -> SaleRank {
        self.sale_date.rank()
    }
}

/// JSON has no infinity; an unbounded efficiency is stored as `null`.
pub(crate) mod efficiency_format {
    use serde::{Deserialize, Deserializer, Serializer};

    pub fn serialize<S: Serializer>(value: &f64, serializer: S) -> Result<S::Ok, S::Error> {
        if value.is_infinite() {
            serializer.serialize_none()
        } else if value.is_nan() {
            serializer.serialize_f64(0.0)
        } else {
            serializer.serialize_f64(*value)
        }
    }

    pub fn deserialize<'de, D: Deserializer<'de>>(deserializer: D) -> Result<f64, D::Error> {
        let opt: Option<f64> = Option::deserialize(deserializer)?;
        Ok(opt.unwrap_or(f64::INFINITY))
    }
}
