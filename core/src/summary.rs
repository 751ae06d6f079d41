//! Summary statistics over a frozen series.
//!
//! Everything here is a pure, read-only reduction. Nothing draws
//! randomness and nothing mutates the series.

use crate::{
    config::{Tag, TerritoryProfile},
    error::SeriesResult,
    field::Field,
    series::YearlySeries,
    types::Year,
};
use serde::Serialize;
use std::collections::BTreeMap;

/// Arithmetic mean; None for an empty slice.
pub fn mean(values: &[f64]) -> Option<f64> {
    if values.is_empty() {
        return None;
    }
    Some(values.iter().sum::<f64>() / values.len() as f64)
}

/// Percentage change from the first to the last value.
/// None when there is no value or the first one is zero.
pub fn growth_pct(values: &[f64]) -> Option<f64> {
    let (first, last) = (*values.first()?, *values.last()?);
    if first == 0.0 {
        return None;
    }
    Some((last - first) * 100.0 / first)
}

/// `part / whole × 100`; None when `whole` is zero.
pub fn share_pct(part: f64, whole: f64) -> Option<f64> {
    if whole == 0.0 {
        return None;
    }
    Some(part / whole * 100.0)
}

/// Tag-specific advice first, then the advice given to everyone.
pub fn recommendations(profile: &TerritoryProfile) -> Vec<&'static str> {
    const BY_TAG: [(Tag, [&str; 2]); 4] = [
        (Tag::Precarity, [
            "Strengthen programmes against precarity",
            "Expand back-to-work support",
        ]),
        (Tag::LargeFamilies, [
            "Adapt benefits to the needs of large families",
            "Develop parenting support services",
        ]),
        (Tag::Youth, [
            "Reinforce education and training aid",
            "Develop job-integration programmes for young people",
        ]),
        (Tag::Isolation, [
            "Develop remote and paperless services",
            "Build local partnerships to improve access to entitlements",
        ]),
    ];
    const GENERAL: [&str; 3] = [
        "Improve the digitalisation of services",
        "Strengthen prevention of unpaid debts and recovery",
        "Optimise fund management to keep the accounts balanced",
    ];

    BY_TAG
        .iter()
        .filter(|(tag, _)| profile.has_tag(*tag))
        .flat_map(|(_, advice)| advice.iter().copied())
        .chain(GENERAL)
        .collect()
}

#[derive(Debug, Clone, Serialize)]
pub struct SeriesSummary {
    pub territory:  String,
    pub tags:       Vec<Tag>,
    pub start_year: Option<Year>,
    pub end_year:   Option<Year>,
    pub means:      BTreeMap<Field, f64>,
    // Growth over the whole window
    pub revenue_growth_pct:     Option<f64>,
    pub allocataire_growth_pct: Option<f64>,
    // Financial structure
    pub social_contribution_share_pct: Option<f64>,
    pub state_contribution_share_pct:  Option<f64>,
    pub benefits_share_pct:            Option<f64>,
    // Performance
    pub coverage_rate_pct:    Option<f64>,
    pub management_ratio_pct: Option<f64>,
    pub final_balance:        Option<f64>,
    pub recommendations: Vec<String>,
}

impl SeriesSummary {
    pub fn compute(profile: &TerritoryProfile, series: &YearlySeries) -> Self {
        let means: BTreeMap<Field, f64> = Field::ALL
            .into_iter()
            .filter_map(|f| mean(&series.column(f)).map(|m| (f, m)))
            .collect();
        let avg = |f: Field| means.get(&f).copied();
        let share = |part: Field, whole: Field| share_pct(avg(part)?, avg(whole)?);

        Self {
            territory:  profile.display_name().to_string(),
            tags:       profile.tags.iter().copied().collect(),
            start_year: series.start_year(),
            end_year:   series.end_year(),
            revenue_growth_pct:     growth_pct(&series.column(Field::TotalRevenue)),
            allocataire_growth_pct: growth_pct(&series.column(Field::AllocataireCount)),
            social_contribution_share_pct: share(Field::SocialContributions, Field::TotalRevenue),
            state_contribution_share_pct:  share(Field::StateContributions, Field::TotalRevenue),
            benefits_share_pct:            share(Field::BenefitsPaid, Field::TotalExpenses),
            coverage_rate_pct:    avg(Field::CoverageRate).map(|m| m * 100.0),
            management_ratio_pct: avg(Field::ManagementRatio).map(|m| m * 100.0),
            final_balance:        series.column(Field::AccountBalance).last().copied(),
            recommendations: recommendations(profile).into_iter().map(String::from).collect(),
            means,
        }
    }

    pub fn mean_of(&self, field: Field) -> Option<f64> {
        self.means.get(&field).copied()
    }

    pub fn to_json(&self) -> SeriesResult<String> {
        Ok(serde_json::to_string_pretty(self)?)
    }
}
