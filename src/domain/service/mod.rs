//! Domain services - valuation, scoring, querying and reconciliation.
//!
//! Everything here is a pure function over domain models; persistence lives
//! in [`crate::store`].

mod calculator;
mod efficiency;
mod query;
mod reconcile;
mod valuation;

pub use calculator::{Draft, Quote, evaluate, revalue_package};
pub use efficiency::{EfficiencyTier, Score, cmp_efficiency_desc, score};
pub use query::{
    Comparison, Filter, SortBy, compare_efficiency, filter_and_sort, sort_by_sale_date,
};
pub use reconcile::{
    ImportMode, MergeOutcome, decode_import, merge, parse_import, replace, validate_import,
};
pub use valuation::{total_value_of, value_of_item, value_of_price};
