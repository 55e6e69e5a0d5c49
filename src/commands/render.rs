//! Text rendering for command output.

use crate::domain::model::{Package, PackageItem};
use crate::domain::service::{Comparison, EfficiencyTier, Quote};

/// Formats a number with thousands separators and at most two decimals,
/// e.g. `1234.5` -> `1,234.5`.
pub fn format_number(value: f64) -> String {
    if !value.is_finite() {
        return value.to_string();
    }

    let fixed = format!("{:.2}", value.abs());
    let (int_part, frac_part) = fixed.split_once('.').unwrap_or((fixed.as_str(), ""));

    let mut grouped = String::with_capacity(int_part.len() + int_part.len() / 3);
    for (i, digit) in int_part.chars().enumerate() {
        if i > 0 && (int_part.len() - i) % 3 == 0 {
            grouped.push(',');
        }
        grouped.push(digit);
    }

    let frac_part = frac_part.trim_end_matches('0');
    let sign = if value < 0.0 && fixed.chars().any(|c| c != '0' && c != '.') {
        "-"
    } else {
        ""
    };

    if frac_part.is_empty() {
        format!("{}{}", sign, grouped)
    } else {
        format!("{}{}.{}", sign, grouped, frac_part)
    }
}

/// `MAX` for a free package, otherwise a percentage with two decimals.
pub fn format_efficiency(efficiency: f64) -> String {
    match EfficiencyTier::of(efficiency) {
        EfficiencyTier::Max => "MAX".to_string(),
        _ => format!("{:.2}%", efficiency),
    }
}

pub fn tier_label(efficiency: f64) -> &'static str {
    match EfficiencyTier::of(efficiency) {
        EfficiencyTier::Max => "free",
        EfficiencyTier::Good => "good",
        EfficiencyTier::Bad => "bad",
    }
}

pub fn describe_items(items: &[PackageItem]) -> String {
    items
        .iter()
        .map(|item| format!("{} x{}", item.kind.label(), format_number(item.quantity)))
        .collect::<Vec<_>>()
        .join(", ")
}

/// Contents line: quantified items, then the free-text part in brackets.
pub fn describe_contents(items: &[PackageItem], non_quantifiable: &str) -> String {
    let extra = non_quantifiable.trim();
    match (items.is_empty(), extra.is_empty()) {
        (true, true) => "-".to_string(),
        (false, true) => describe_items(items),
        (true, false) => format!("[{}]", extra),
        (false, false) => format!("{} + [{}]", describe_items(items), extra),
    }
}

pub fn describe_package(package: &Package) -> String {
    let name = if package.name.is_empty() {
        "(unnamed)"
    } else {
        package.name.as_str()
    };
    let sale_date = if package.sale_date.as_str().is_empty() {
        "-"
    } else {
        package.sale_date.as_str()
    };

    format!(
        "{}  {}\n    sale: {}  price: {} {}  value: {} juhwa  efficiency: {} ({})\n    contents: {}",
        package.id,
        name,
        sale_date,
        format_number(package.price_amount),
        package.price_currency.label(),
        format_number(package.total_juhwa_value),
        format_efficiency(package.efficiency),
        tier_label(package.efficiency),
        describe_contents(&package.items, &package.non_quantifiable_items),
    )
}

pub fn describe_quote(quote: &Quote, non_quantifiable: &str) -> String {
    let mut out = format!(
        "Price value:    {} juhwa\nContents value: {} juhwa\nEfficiency:     {} ({})",
        format_number(quote.price_value),
        format_number(quote.contents_value),
        format_efficiency(quote.efficiency()),
        tier_label(quote.efficiency()),
    );
    if quote.score.leftover_value > 0.0 {
        out.push_str(&format!(
            "\nLeftover:       {} juhwa not covered by quantifiable contents",
            format_number(quote.score.leftover_value)
        ));
    }
    out.push_str(&format!(
        "\nContents:       {}",
        describe_contents(&quote.items, non_quantifiable)
    ));
    out
}

/// Marker for a saved package's efficiency relative to the candidate.
pub fn comparison_marker(comparison: Comparison) -> &'static str {
    match comparison {
        Comparison::Higher => "[higher]",
        Comparison::Lower => "[lower] ",
        Comparison::Same => "[same]  ",
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::domain::model::{CurrencyKind, PriceCurrency, SaleDate};

    #[test]
    fn test_format_number() {
        assert_eq!(format_number(0.0), "0");
        assert_eq!(format_number(66.666_666), "66.67");
        assert_eq!(format_number(1000.0), "1,000");
        assert_eq!(format_number(1_234_567.5), "1,234,567.5");
        assert_eq!(format_number(264.0), "264");
        assert_eq!(format_number(-1500.25), "-1,500.25");
        assert_eq!(format_number(-0.001), "0");
        assert_eq!(format_number(999.999), "1,000");
    }

    #[test]
    fn test_format_efficiency() {
        assert_eq!(format_efficiency(f64::INFINITY), "MAX");
        assert_eq!(format_efficiency(396.039_6), "396.04%");
        assert_eq!(format_efficiency(0.0), "0.00%");
        assert_eq!(tier_label(100.0), "good");
        assert_eq!(tier_label(99.9), "bad");
        assert_eq!(tier_label(f64::INFINITY), "free");
    }

    #[test]
    fn test_describe_contents() {
        let items = vec![
            PackageItem::new(CurrencyKind::Juhwa, 1000.0),
            PackageItem::new(CurrencyKind::Quartz, 2.5),
        ];
        assert_eq!(describe_contents(&[], ""), "-");
        assert_eq!(describe_contents(&[], " 선택권 "), "[선택권]");
        assert_eq!(
            describe_contents(&items, ""),
            format!(
                "{} x1,000, {} x2.5",
                CurrencyKind::Juhwa.label(),
                CurrencyKind::Quartz.label()
            )
        );
        assert!(describe_contents(&items, "선택권").ends_with(" + [선택권]"));
    }

    #[test]
    fn test_describe_package() {
        let package = Package {
            id: "abc".into(),
            name: String::new(),
            price_amount: 1000.0,
            price_currency: PriceCurrency::Krw,
            sale_date: SaleDate::Permanent,
            items: vec![PackageItem::new(CurrencyKind::RelicBinary, 10.0)],
            total_juhwa_value: 264.0,
            efficiency: 396.0,
            ..Default::default()
        };
        let text = describe_package(&package);
        assert!(text.starts_with("abc  (unnamed)"));
        assert!(text.contains("sale: 상시"));
        assert!(text.contains("price: 1,000 현금 (KRW)"));
        assert!(text.contains("value: 264 juhwa"));
        assert!(text.contains("efficiency: 396.00% (good)"));
    }
}
