//! Domain models - Core data structures.
//!
//! This module contains the domain entities shared by the valuation engine,
//! the repository and the CLI layer.

mod currency;
mod package;
mod rates;
mod sale_date;

pub use currency::{CurrencyKind, PackageItem, Price, PriceCurrency};
pub use package::Package;
pub use rates::{RateKey, RateOverride, RateTable};
pub use sale_date::{SaleDate, SaleRank};

/// Layout version of the stored documents. Bump when a wire name or field changes.
pub const DATA_VERSION: u32 = 2;
