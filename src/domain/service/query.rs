//! Composition filters and orderings over a package list.

use std::cmp::{Ordering, Reverse};
use std::collections::BTreeSet;
use std::fmt;
use std::str::FromStr;

use super::efficiency::cmp_efficiency_desc;
use crate::domain::model::{CurrencyKind, Package, PackageItem};

/// Selects packages by the set of currency kinds they contain.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct Filter {
    pub kinds: BTreeSet<CurrencyKind>,
    /// Superset matching instead of exact-set matching.
    pub comprehensive: bool,
}

impl Filter {
    pub fn new(kinds: impl IntoIterator<Item = CurrencyKind>, comprehensive: bool) -> Self {
        Self {
            kinds: kinds.into_iter().collect(),
            comprehensive,
        }
    }

    /// Exact-match filter pre-selected with the kinds of a candidate's contents.
    pub fn for_items<'a>(items: impl IntoIterator<Item = &'a PackageItem>) -> Self {
        Self::new(items.into_iter().map(|item| item.kind), false)
    }

    pub fn matches(&self, package: &Package) -> bool {
        if self.kinds.is_empty() {
            return true;
        }

        let kinds = package.kinds();
        if self.comprehensive {
            kinds.is_superset(&self.kinds)
        } else {
            kinds == self.kinds
        }
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum SortBy {
    Efficiency,
    /// Most relevant sale date first.
    #[default]
    Date,
}

impl fmt::Display for SortBy {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            SortBy::Efficiency => f.write_str("efficiency"),
            SortBy::Date => f.write_str("date"),
        }
    }
}

impl FromStr for SortBy {
    type Err = String;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.trim().to_ascii_lowercase().as_str() {
            "efficiency" => Ok(SortBy::Efficiency),
            "date" | "recent" => Ok(SortBy::Date),
            other => Err(format!(
                "unknown sort order '{}' (expected 'efficiency' or 'date')",
                other
            )),
        }
    }
}

/// Sorts packages by sale date, most relevant first. Ties keep their order.
pub fn sort_by_sale_date(packages: &mut [Package]) {
    packages.sort_by_key(|pkg| Reverse(pkg.sale_rank()));
}

/// Returns the packages that pass `filter`, ordered by `sort_by`.
///
/// The input is left untouched. Both orderings are stable.
pub fn filter_and_sort(packages: &[Package], filter: &Filter, sort_by: SortBy) -> Vec<Package> {
    let mut selected: Vec<Package> = packages
        .iter()
        .filter(|pkg| filter.matches(pkg))
        .cloned()
        .collect();

    match sort_by {
        SortBy::Efficiency => {
            selected.sort_by(|a, b| cmp_efficiency_desc(a.efficiency, b.efficiency))
        }
        SortBy::Date => sort_by_sale_date(&mut selected),
    }

    selected
}

/// How a stored package's efficiency compares with a candidate's.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Comparison {
    Higher,
    Lower,
    Same,
}

pub fn compare_efficiency(candidate: f64, other: f64) -> Comparison {
    match other.partial_cmp(&candidate) {
        Some(Ordering::Greater) => Comparison::Higher,
        Some(Ordering::Less) => Comparison::Lower,
        _ => Comparison::Same,
    }
}
