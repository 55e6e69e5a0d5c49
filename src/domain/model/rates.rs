//! Exchange-rate table used for every valuation.

use serde::{Deserialize, Serialize};
use std::fmt;
use std::str::FromStr;

use super::currency::CurrencyKind;
use crate::error::{Error, Result};

/// Conversion constants, expressed against the canonical unit (juhwa).
///
/// Stored as a flat JSON object keyed by [`RateKey::wire_name`]. A table is
/// replaced as a whole; there is no API for patching a single rate in place.
/// Keys missing from a stored table take their default value.
#[derive(Serialize, Deserialize, Debug, Clone, Copy, PartialEq)]
#[serde(default, rename_all = "camelCase")]
pub struct RateTable {
    /// KRW paid for one juhwa.
    pub krw_per_juhwa: f64,
    /// Quartz obtained for one juhwa.
    pub quartz_per_juhwa: f64,
    pub relic_binary_in_juhwa: f64,
    pub set_binary_in_juhwa: f64,
    pub tuning_binary_in_juhwa: f64,
    pub sim_ticket_in_juhwa: f64,
    pub recruit_coupon_in_juhwa: f64,
    pub special_core_in_juhwa: f64,
    pub fusion_core_in_juhwa: f64,
}

impl Default for RateTable {
    fn default() -> Self {
        Self {
            krw_per_juhwa: 15.0,
            quartz_per_juhwa: 2.0,
            relic_binary_in_juhwa: 26.4,
            set_binary_in_juhwa: 15.0,
            tuning_binary_in_juhwa: 3.1,
            sim_ticket_in_juhwa: 10.0,
            // 150 quartz
            recruit_coupon_in_juhwa: 75.0,
            special_core_in_juhwa: 300.0,
            fusion_core_in_juhwa: 59.0,
        }
    }
}

impl RateTable {
    pub fn get(&self, key: RateKey) -> f64 {
        match key {
            RateKey::KrwPerJuhwa => self.krw_per_juhwa,
            RateKey::QuartzPerJuhwa => self.quartz_per_juhwa,
            RateKey::RelicBinaryInJuhwa => self.relic_binary_in_juhwa,
            RateKey::SetBinaryInJuhwa => self.set_binary_in_juhwa,
            RateKey::TuningBinaryInJuhwa => self.tuning_binary_in_juhwa,
            RateKey::SimTicketInJuhwa => self.sim_ticket_in_juhwa,
            RateKey::RecruitCouponInJuhwa => self.recruit_coupon_in_juhwa,
            RateKey::SpecialCoreInJuhwa => self.special_core_in_juhwa,
            RateKey::FusionCoreInJuhwa => self.fusion_core_in_juhwa,
        }
    }

    /// Returns a copy with one rate changed. The copy is not validated.
    pub fn with(mut self, key: RateKey, value: f64) -> Self {
        let slot = match key {
            RateKey::KrwPerJuhwa => &mut self.krw_per_juhwa,
            RateKey::QuartzPerJuhwa => &mut self.quartz_per_juhwa,
            RateKey::RelicBinaryInJuhwa => &mut self.relic_binary_in_juhwa,
            RateKey::SetBinaryInJuhwa => &mut self.set_binary_in_juhwa,
            RateKey::TuningBinaryInJuhwa => &mut self.tuning_binary_in_juhwa,
            RateKey::SimTicketInJuhwa => &mut self.sim_ticket_in_juhwa,
            RateKey::RecruitCouponInJuhwa => &mut self.recruit_coupon_in_juhwa,
            RateKey::SpecialCoreInJuhwa => &mut self.special_core_in_juhwa,
            RateKey::FusionCoreInJuhwa => &mut self.fusion_core_in_juhwa,
        };
        *slot = value;
        self
    }

    /// Checks that the reference rates are positive and every rate is a finite non-negative number.
    pub fn validate(&self) -> Result<()> {
        for key in RateKey::ALL {
            let value = self.get(key);
            if !value.is_finite() {
                return Err(Error::validation(format!("{} must be a finite number", key)));
            }
            if key.is_reference() {
                if value <= 0.0 {
                    return Err(Error::validation(format!(
                        "{} must be greater than 0 (got {})",
                        key, value
                    )));
                }
            } else if value < 0.0 {
                return Err(Error::validation(format!(
                    "{} must not be negative (got {})",
                    key, value
                )));
            }
        }
        Ok(())
    }

    /// Per-unit canonical value of a content kind priced by a fixed rate.
    ///
    /// Returns `None` for juhwa and quartz, which convert through the
    /// reference rates instead.
    pub fn unit_value(&self, kind: CurrencyKind) -> Option<f64> {
        RateKey::for_kind(kind).map(|key| self.get(key))
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum RateKey {
    KrwPerJuhwa,
    QuartzPerJuhwa,
    RelicBinaryInJuhwa,
    SetBinaryInJuhwa,
    TuningBinaryInJuhwa,
    SimTicketInJuhwa,
    RecruitCouponInJuhwa,
    SpecialCoreInJuhwa,
    FusionCoreInJuhwa,
}

impl RateKey {
    pub const ALL: [RateKey; 9] = [
        RateKey::KrwPerJuhwa,
        RateKey::QuartzPerJuhwa,
        RateKey::RelicBinaryInJuhwa,
        RateKey::SetBinaryInJuhwa,
        RateKey::TuningBinaryInJuhwa,
        RateKey::SimTicketInJuhwa,
        RateKey::RecruitCouponInJuhwa,
        RateKey::SpecialCoreInJuhwa,
        RateKey::FusionCoreInJuhwa,
    ];

    pub fn wire_name(&self) -> &'static str {
        match self {
            RateKey::KrwPerJuhwa => "krwPerJuhwa",
            RateKey::QuartzPerJuhwa => "quartzPerJuhwa",
            RateKey::RelicBinaryInJuhwa => "relicBinaryInJuhwa",
            RateKey::SetBinaryInJuhwa => "setBinaryInJuhwa",
            RateKey::TuningBinaryInJuhwa => "tuningBinaryInJuhwa",
            RateKey::SimTicketInJuhwa => "simTicketInJuhwa",
            RateKey::RecruitCouponInJuhwa => "recruitCouponInJuhwa",
            RateKey::SpecialCoreInJuhwa => "specialCoreInJuhwa",
            RateKey::FusionCoreInJuhwa => "fusionCoreInJuhwa",
        }
    }

    /// The two divisors every price conversion depends on.
    pub fn is_reference(&self) -> bool {
        matches!(self, RateKey::KrwPerJuhwa | RateKey::QuartzPerJuhwa)
    }

    pub fn for_kind(kind: CurrencyKind) -> Option<RateKey> {
        match kind {
            CurrencyKind::Juhwa | CurrencyKind::Quartz => None,
            CurrencyKind::RelicBinary => Some(RateKey::RelicBinaryInJuhwa),
            CurrencyKind::SetBinary => Some(RateKey::SetBinaryInJuhwa),
            CurrencyKind::TuningBinary => Some(RateKey::TuningBinaryInJuhwa),
            CurrencyKind::SimTicket => Some(RateKey::SimTicketInJuhwa),
            CurrencyKind::RecruitCoupon => Some(RateKey::RecruitCouponInJuhwa),
            CurrencyKind::SpecialCore => Some(RateKey::SpecialCoreInJuhwa),
            CurrencyKind::FusionCore => Some(RateKey::FusionCoreInJuhwa),
        }
    }

    pub fn label(&self) -> String {
        match self {
            RateKey::KrwPerJuhwa => "1 주화의 현금(KRW) 가치".to_string(),
            RateKey::QuartzPerJuhwa => "1 주화 당 쿼츠 개수".to_string(),
            _ => {
                let kind = CurrencyKind::ALL
                    .into_iter()
                    .find(|k| RateKey::for_kind(*k) == Some(*self))
                    .map(|k| k.label())
                    .unwrap_or_default();
                format!("1 {} 의 주화 가치", kind)
            }
        }
    }
}

impl fmt::Display for RateKey {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.wire_name())
    }
}

impl FromStr for RateKey {
    type Err = String;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        RateKey::ALL
            .into_iter()
            .find(|k| k.wire_name().eq_ignore_ascii_case(s.trim()))
            .ok_or_else(|| {
                format!(
                    "unknown rate '{}' (expected one of: {})",
                    s,
                    RateKey::ALL.map(|k| k.wire_name()).join(", ")
                )
            })
    }
}

/// A single `key=value` override, as typed on the command line.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct RateOverride {
    pub key: RateKey,
    pub value: f64,
}

impl FromStr for RateOverride {
    type Err = String;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        let (key, value) = s
            .split_once('=')
            .ok_or_else(|| format!("expected KEY=VALUE, got '{}'", s))?;
        let key = key.parse::<RateKey>()?;
        let value = value
            .trim()
            .parse::<f64>()
            .map_err(|e| format!("invalid value for {}: {}", key, e))?;
        Ok(RateOverride { key, value })
    }
}
