//! Evaluation of a candidate package before it is saved.

use super::efficiency::{Score, score};
use super::valuation::{total_value_of, value_of_price};
use crate::domain::model::{Package, PackageItem, Price, PriceCurrency, RateTable, SaleDate};
use crate::error::{Error, Result};

/// User input for a package that has not been saved yet.
#[derive(Debug, Clone, Default, PartialEq)]
pub struct Draft {
    pub name: String,
    pub price_amount: f64,
    pub price_currency: PriceCurrency,
    pub items: Vec<PackageItem>,
    pub non_quantifiable_items: String,
    pub sale_date: SaleDate,
    pub image: Option<String>,
}

/// Valuation of a [`Draft`] against a rate table.
#[derive(Debug, Clone, PartialEq)]
pub struct Quote {
    /// Entries that took part in the valuation, in input order.
    pub items: Vec<PackageItem>,
    pub price_value: f64,
    pub contents_value: f64,
    pub score: Score,
}

impl Quote {
    pub fn efficiency(&self) -> f64 {
        self.score.efficiency
    }

    /// Builds the record to store, with a freshly generated id.
    pub fn into_package(self, draft: Draft) -> Package {
        Package {
            id: Package::new_id(),
            name: draft.name.trim().to_string(),
            price_amount: draft.price_amount,
            price_currency: draft.price_currency,
            sale_date: draft.sale_date,
            items: self.items,
            non_quantifiable_items: draft.non_quantifiable_items.trim().to_string(),
            total_juhwa_value: self.contents_value,
            efficiency: self.score.efficiency,
            image: draft.image,
        }
    }
}

/// Values a draft.
///
/// Entries without a finite positive quantity are dropped. A draft must keep
/// at least one entry or describe non-quantifiable contents, and its price
/// must be a finite non-negative number.
pub fn evaluate(draft: &Draft, rates: &RateTable) -> Result<Quote> {
    let items: Vec<PackageItem> = draft
        .items
        .iter()
        .filter(|item| item.is_quantified())
        .copied()
        .collect();

    if items.is_empty() && draft.non_quantifiable_items.trim().is_empty() {
        return Err(Error::validation(
            "enter at least one item with a positive quantity",
        ));
    }

    if !draft.price_amount.is_finite() || draft.price_amount < 0.0 {
        return Err(Error::validation("price must be 0 or greater"));
    }

    let price_value = value_of_price(&Price::new(draft.price_amount, draft.price_currency), rates);
    let contents_value = total_value_of(&items, rates);

    Ok(Quote {
        items,
        price_value,
        contents_value,
        score: score(price_value, contents_value),
    })
}

/// Recomputes the cached valuation of a stored package.
pub fn revalue_package(package: &mut Package, rates: &RateTable) {
    let price_value = value_of_price(&package.price(), rates);
    let contents_value = total_value_of(&package.items, rates);
    package.total_juhwa_value = contents_value;
    package.efficiency = score(price_value, contents_value).efficiency;
}
