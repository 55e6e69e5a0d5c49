//! Conversion of currency amounts into the canonical unit (juhwa).
//!
//! Prices and package contents go through separate functions even where the
//! arithmetic coincides: a price is always one of the three priceable
//! currencies, contents can be any of the nine kinds.
//!
//! Division by a zero reference rate yields `0.0` instead of an error or an
//! infinity. A valuation never fails part-way; an invalid rate table is
//! rejected when it is saved, not when it is used.

use crate::domain::model::{CurrencyKind, PackageItem, Price, PriceCurrency, RateTable};

/// Canonical value of a purchase price.
pub fn value_of_price(price: &Price, rates: &RateTable) -> f64 {
    match price.currency {
        PriceCurrency::Krw => guarded_div(price.amount, rates.krw_per_juhwa),
        PriceCurrency::Juhwa => price.amount,
        PriceCurrency::Quartz => guarded_div(price.amount, rates.quartz_per_juhwa),
    }
}

/// Canonical value of one content entry, whatever its quantity.
pub fn value_of_item(item: &PackageItem, rates: &RateTable) -> f64 {
    match item.kind {
        CurrencyKind::Juhwa => item.quantity,
        CurrencyKind::Quartz => guarded_div(item.quantity, rates.quartz_per_juhwa),
        CurrencyKind::RelicBinary => item.quantity * rates.relic_binary_in_juhwa,
        CurrencyKind::SetBinary => item.quantity * rates.set_binary_in_juhwa,
        CurrencyKind::TuningBinary => item.quantity * rates.tuning_binary_in_juhwa,
        CurrencyKind::SimTicket => item.quantity * rates.sim_ticket_in_juhwa,
        CurrencyKind::RecruitCoupon => item.quantity * rates.recruit_coupon_in_juhwa,
        CurrencyKind::SpecialCore => item.quantity * rates.special_core_in_juhwa,
        CurrencyKind::FusionCore => item.quantity * rates.fusion_core_in_juhwa,
    }
}

/// Sum of the canonical values of all entries with a finite, positive quantity.
pub fn total_value_of<'a, I>(items: I, rates: &RateTable) -> f64
where
    I: IntoIterator<Item = &'a PackageItem>,
{
    items
        .into_iter()
        .filter(|item| item.is_quantified())
        .map(|item| value_of_item(item, rates))
        .sum()
}

fn guarded_div(amount: f64, rate: f64) -> f64 {
    if rate > 0.0 { amount / rate } else { 0.0 }
}
