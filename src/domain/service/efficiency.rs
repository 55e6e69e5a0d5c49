//! Purchase efficiency scoring.

use std::cmp::Ordering;

/// Outcome of comparing what a package costs with what it contains.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct Score {
    /// Contents value as a percentage of the price value. `f64::INFINITY` for a
    /// free package that contains anything.
    pub efficiency: f64,
    /// Part of the price not covered by quantifiable contents. Never negative.
    pub leftover_value: f64,
}

impl Score {
    pub fn tier(&self) -> EfficiencyTier {
        EfficiencyTier::of(self.efficiency)
    }
}

pub fn score(price_value: f64, contents_value: f64) -> Score {
    let efficiency = if price_value > 0.0 {
        contents_value / price_value * 100.0
    } else if contents_value > 0.0 {
        f64::INFINITY
    } else {
        0.0
    };

    Score {
        efficiency,
        leftover_value: (price_value - contents_value).max(0.0),
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum EfficiencyTier {
    /// Unbounded: the package is free.
    Max,
    /// At least break-even.
    Good,
    Bad,
}

impl EfficiencyTier {
    pub fn of(efficiency: f64) -> Self {
        if efficiency == f64::INFINITY {
            EfficiencyTier::Max
        } else if efficiency >= 100.0 {
            EfficiencyTier::Good
        } else {
            EfficiencyTier::Bad
        }
    }
}

/// Descending order for efficiencies: infinity first, NaN last.
pub fn cmp_efficiency_desc(a: f64, b: f64) -> Ordering {
    match (a.is_nan(), b.is_nan()) {
        (true, true) => Ordering::Equal,
        (true, false) => Ordering::Greater,
        (false, true) => Ordering::Less,
        (false, false) => b.partial_cmp(&a).unwrap_or(Ordering::Equal),
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_regular_score() {
        let price = 1000.0 / 15.0;
        let s = score(price, 264.0);
        assert!((s.efficiency - 396.0).abs() < 1e-9);
        assert_eq!(s.leftover_value, 0.0);
        assert_eq!(s.tier(), EfficiencyTier::Good);
    }

    #[test]
    fn test_free_package() {
        let s = score(0.0, 10.0);
        assert_eq!(s.efficiency, f64::INFINITY);
        assert_eq!(s.leftover_value, 0.0);
        assert_eq!(s.tier(), EfficiencyTier::Max);

        let s = score(0.0, 0.0);
        assert_eq!(s.efficiency, 0.0);
        assert_eq!(s.leftover_value, 0.0);
    }

    #[test]
    fn test_nothing_quantifiable() {
        let s = score(50.0, 0.0);
        assert_eq!(s.efficiency, 0.0);
        assert_eq!(s.leftover_value, 50.0);
        assert_eq!(s.tier(), EfficiencyTier::Bad);
    }

    #[test]
    fn test_leftover_is_price_minus_contents() {
        let s = score(100.0, 60.0);
        assert!((s.efficiency - 60.0).abs() < 1e-12);
        assert!((s.leftover_value - 40.0).abs() < 1e-12);
    }

    #[test]
    fn test_tier_boundaries() {
        assert_eq!(EfficiencyTier::of(100.0), EfficiencyTier::Good);
        assert_eq!(EfficiencyTier::of(99.99), EfficiencyTier::Bad);
        assert_eq!(EfficiencyTier::of(1e300), EfficiencyTier::Good);
    }

    #[test]
    fn test_cmp_efficiency_desc() {
        let mut values = vec![50.0, f64::INFINITY, f64::NAN, 120.0, 0.0];
        values.sort_by(|a, b| cmp_efficiency_desc(*a, *b));
        assert_eq!(values[0], f64::INFINITY);
        assert_eq!(values[1], 120.0);
        assert_eq!(values[2], 50.0);
        assert_eq!(values[3], 0.0);
        assert!(values[4].is_nan());
    }
}
