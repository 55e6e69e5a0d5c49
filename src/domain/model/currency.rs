//! Currency kinds.
//!
//! Both enumerations are part of the persisted data format: the serde names
//! and the declaration order must not change without bumping
//! [`DATA_VERSION`](super::DATA_VERSION).

use serde::{Deserialize, Serialize};
use std::fmt;
use std::str::FromStr;

/// A currency a package can contain.
#[derive(Serialize, Deserialize, Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash)]
#[serde(rename_all = "camelCase")]
pub enum CurrencyKind {
    /// The canonical valuation unit.
    Juhwa,
    /// The secondary reference currency.
    Quartz,
    RelicBinary,
    SetBinary,
    TuningBinary,
    SimTicket,
    RecruitCoupon,
    SpecialCore,
    FusionCore,
}

impl CurrencyKind {
    pub const ALL: [CurrencyKind; 9] = [
        CurrencyKind::Juhwa,
        CurrencyKind::Quartz,
        CurrencyKind::RelicBinary,
        CurrencyKind::SetBinary,
        CurrencyKind::TuningBinary,
        CurrencyKind::SimTicket,
        CurrencyKind::RecruitCoupon,
        CurrencyKind::SpecialCore,
        CurrencyKind::FusionCore,
    ];

    /// Name used in stored data and on the command line.
    pub fn wire_name(&self) -> &'static str {
        match self {
            CurrencyKind::Juhwa => "juhwa",
            CurrencyKind::Quartz => "quartz",
            CurrencyKind::RelicBinary => "relicBinary",
            CurrencyKind::SetBinary => "setBinary",
            CurrencyKind::TuningBinary => "tuningBinary",
            CurrencyKind::SimTicket => "simTicket",
            CurrencyKind::RecruitCoupon => "recruitCoupon",
            CurrencyKind::SpecialCore => "specialCore",
            CurrencyKind::FusionCore => "fusionCore",
        }
    }

    /// Display label as shown in the game.
    pub fn label(&self) -> &'static str {
        match self {
            CurrencyKind::Juhwa => "주화",
            CurrencyKind::Quartz => "쿼츠",
            CurrencyKind::RelicBinary => "렐릭 바이너리 (렐바)",
            CurrencyKind::SetBinary => "세트 바이너리 (셋바)",
            CurrencyKind::TuningBinary => "튜닝 바이너리 (튜바)",
            CurrencyKind::SimTicket => "기채권",
            CurrencyKind::RecruitCoupon => "채용권",
            CurrencyKind::SpecialCore => "특수융합핵 (특융핵)",
            CurrencyKind::FusionCore => "융합핵",
        }
    }
}

impl fmt::Display for CurrencyKind {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.wire_name())
    }
}

impl FromStr for CurrencyKind {
    type Err = String;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        CurrencyKind::ALL
            .into_iter()
            .find(|kind| kind.wire_name().eq_ignore_ascii_case(s.trim()))
            .ok_or_else(|| {
                format!(
                    "unknown currency kind '{}' (expected one of: {})",
                    s,
                    CurrencyKind::ALL.map(|k| k.wire_name()).join(", ")
                )
            })
    }
}

/// A currency a package can be bought with.
#[derive(Serialize, Deserialize, Debug, Clone, Copy, PartialEq, Eq, Hash, Default)]
pub enum PriceCurrency {
    /// Real money.
    #[serde(rename = "KRW")]
    Krw,
    #[default]
    #[serde(rename = "juhwa")]
    Juhwa,
    #[serde(rename = "quartz")]
    Quartz,
}

impl PriceCurrency {
    pub const ALL: [PriceCurrency; 3] = [PriceCurrency::Krw, PriceCurrency::Juhwa, PriceCurrency::Quartz];

    pub fn wire_name(&self) -> &'static str {
        match self {
            PriceCurrency::Krw => "KRW",
            PriceCurrency::Juhwa => "juhwa",
            PriceCurrency::Quartz => "quartz",
        }
    }

    pub fn label(&self) -> &'static str {
        match self {
            PriceCurrency::Krw => "현금 (KRW)",
            PriceCurrency::Juhwa => "주화",
            PriceCurrency::Quartz => "쿼츠",
        }
    }
}

impl fmt::Display for PriceCurrency {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.wire_name())
    }
}

impl FromStr for PriceCurrency {
    type Err = String;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        PriceCurrency::ALL
            .into_iter()
            .find(|c| c.wire_name().eq_ignore_ascii_case(s.trim()))
            .ok_or_else(|| format!("unknown price currency '{}' (expected KRW, juhwa or quartz)", s))
    }
}

/// A quantity of one content currency.
#[derive(Serialize, Deserialize, Debug, Clone, Copy, PartialEq)]
pub struct PackageItem {
    #[serde(rename = "type")]
    pub kind: CurrencyKind,
    pub quantity: f64,
}

impl PackageItem {
    pub fn new(kind: CurrencyKind, quantity: f64) -> Self {
        Self { kind, quantity }
    }

    /// Whether the entry counts toward a valuation.
    pub fn is_quantified(&self) -> bool {
        self.quantity.is_finite() && self.quantity > 0.0
    }
}

/// Parses `kind=quantity`, e.g. `relicBinary=10`.
impl FromStr for PackageItem {
    type Err = String;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        let (kind, quantity) = s
            .split_once('=')
            .ok_or_else(|| format!("expected KIND=QUANTITY, got '{}'", s))?;
        let kind = kind.parse::<CurrencyKind>()?;
        let quantity = quantity
            .trim()
            .parse::<f64>()
            .map_err(|e| format!("invalid quantity '{}': {}", quantity, e))?;
        Ok(PackageItem { kind, quantity })
    }
}

/// An amount of a priceable currency.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct Price {
    pub amount: f64,
    pub currency: PriceCurrency,
}

impl Price {
    pub fn new(amount: f64, currency: PriceCurrency) -> Self {
        Self { amount, currency }
    }
}
