//! Growth tier classification.
//!
//! RULE: Territory membership lists live here and nowhere else.
//! Every field looks up its tier through `GrowthTier::classify`
//! with the metric family it belongs to, then indexes its own
//! `TierTable` with the result.

use crate::config::Territory;
use serde::{Deserialize, Serialize};

#[derive(Clone, Copy, Debug, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum GrowthTier {
    VeryHigh,
    High,
    Moderate,
}

/// Which membership lists a field's tier is drawn from.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum MetricFamily {
    /// Demographic and financial volumes.
    Regional,
    /// Administrative overhead, where the smallest territories lead.
    Administrative,
}

impl MetricFamily {
    pub fn very_high_members(&self) -> &'static [Territory] {
        match self {
            Self::Regional => &[Territory::Mayotte, Territory::Guyane],
            Self::Administrative => &[Territory::SaintPierreEtMiquelon, Territory::WallisEtFutuna],
        }
    }

    pub fn high_members(&self) -> &'static [Territory] {
        match self {
            Self::Regional => &[Territory::Reunion, Territory::FrenchPolynesia],
            Self::Administrative => &[Territory::Mayotte, Territory::Guyane],
        }
    }
}

impl GrowthTier {
    /// Unlisted territories, and the default bundle, are moderate.
    pub fn classify(territory: Option<Territory>, family: MetricFamily) -> Self {
        match territory {
            Some(t) if family.very_high_members().contains(&t) => Self::VeryHigh,
            Some(t) if family.high_members().contains(&t) => Self::High,
            _ => Self::Moderate,
        }
    }
}

/// One constant per tier.
#[derive(Clone, Copy, Debug, PartialEq, Serialize, Deserialize)]
pub struct TierTable {
    pub very_high: f64,
    pub high:      f64,
    pub moderate:  f64,
}

impl TierTable {
    pub const fn new(very_high: f64, high: f64, moderate: f64) -> Self {
        Self { very_high, high, moderate }
    }

    /// Same constant whatever the tier.
    pub const fn flat(value: f64) -> Self {
        Self::new(value, value, value)
    }

    pub fn get(&self, tier: GrowthTier) -> f64 {
        match tier {
            GrowthTier::VeryHigh => self.very_high,
            GrowthTier::High     => self.high,
            GrowthTier::Moderate => self.moderate,
        }
    }
}
