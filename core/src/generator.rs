//! Time-series generator: turns a territory profile into raw series.
//!
//! Every field is described by one `FieldSpec` row in `FIELD_SPECS`.
//! For each year the value is
//!
//!   base × growth_factor × tag_multiplier × noise
//!
//! where growth is either linear in the year index (counted from the
//! first generated year) or gated on an absolute year: flat before the
//! gate, linear in (year − gate) afterwards.
//!
//! RULES:
//!   - All noise comes from the field's own stream in the RngBank.
//!   - Values are never clamped; noise may push a value below zero.
//!   - Era adjustments are NOT applied here; see era.rs.

use crate::{
    config::{Tag, TerritoryProfile},
    era::EraSchedule,
    error::{SeriesError, SeriesResult},
    field::Field,
    rng::RngBank,
    series::{RawSeries, YearlySeries},
    tier::{GrowthTier, MetricFamily, TierTable},
    types::{Year, GATE_YEAR, MAX_SPAN_YEARS},
};

#[derive(Debug, Clone, Copy, PartialEq)]
pub enum Base {
    /// The profile's baseline population.
    Population,
    /// A fixed share of the profile's baseline budget.
    BudgetShare(f64),
    /// A per-tier constant, independent of the profile baselines.
    Tiered(TierTable),
}

#[derive(Debug, Clone, Copy, PartialEq)]
pub enum Growth {
    /// 1 + rate × (year − start_year)
    Linear(TierTable),
    /// 1 before `gate`, then 1 + rate × (year − gate)
    Gated { gate: Year, rates: TierTable },
}

#[derive(Debug, Clone, Copy, PartialEq)]
pub struct TagBoost {
    pub tag:        Tag,
    pub multiplier: f64,
}

#[derive(Debug, Clone, Copy, PartialEq)]
pub struct FieldSpec {
    pub field:    Field,
    pub family:   MetricFamily,
    pub base:     Base,
    pub growth:   Growth,
    pub boost:    Option<TagBoost>,
    /// Standard deviation of the N(1, σ) noise; None = no noise.
    pub noise_sd: Option<f64>,
}

const fn linear(field: Field, base: Base, rates: TierTable, noise_sd: f64) -> FieldSpec {
    FieldSpec {
        field,
        family: MetricFamily::Regional,
        base,
        growth: Growth::Linear(rates),
        boost: None,
        noise_sd: Some(noise_sd),
    }
}

const fn gated(field: Field, base: Base, rates: TierTable, noise_sd: f64) -> FieldSpec {
    FieldSpec {
        field,
        family: MetricFamily::Regional,
        base,
        growth: Growth::Gated { gate: GATE_YEAR, rates },
        boost: None,
        noise_sd: Some(noise_sd),
    }
}

const fn boosted(spec: FieldSpec, tag: Tag, multiplier: f64) -> FieldSpec {
    FieldSpec { boost: Some(TagBoost { tag, multiplier }), ..spec }
}

/// One row per field, in `Field::ALL` order.
pub static FIELD_SPECS: [FieldSpec; Field::COUNT] = [
    FieldSpec {
        field:    Field::AllocataireCount,
        family:   MetricFamily::Regional,
        base:     Base::Population,
        growth:   Growth::Linear(TierTable::new(0.025, 0.018, 0.012)),
        boost:    None,
        noise_sd: None,
    },
    linear(Field::BenefitsPaid, Base::BudgetShare(0.85), TierTable::new(0.028, 0.022, 0.018), 0.07),
    linear(Field::TotalRevenue, Base::BudgetShare(1.0), TierTable::new(0.042, 0.035, 0.028), 0.08),
    linear(Field::SocialContributions, Base::BudgetShare(0.65), TierTable::new(0.035, 0.028, 0.022), 0.06),
    gated(Field::StateContributions, Base::BudgetShare(0.30), TierTable::new(0.022, 0.018, 0.015), 0.05),
    linear(Field::OtherRevenue, Base::BudgetShare(0.05), TierTable::flat(0.025), 0.10),
    linear(Field::TotalExpenses, Base::BudgetShare(0.95), TierTable::new(0.038, 0.032, 0.026), 0.07),
    boosted(
        linear(Field::FamilyBenefits, Base::BudgetShare(0.45), TierTable::new(0.032, 0.028, 0.022), 0.06),
        Tag::LargeFamilies,
        1.4,
    ),
    linear(Field::HousingBenefits, Base::BudgetShare(0.25), TierTable::new(0.035, 0.030, 0.024), 0.08),
    boosted(
        linear(Field::SolidarityBenefits, Base::BudgetShare(0.20), TierTable::new(0.040, 0.035, 0.028), 0.09),
        Tag::Precarity,
        1.5,
    ),
    linear(Field::ManagementCost, Base::BudgetShare(0.05), TierTable::flat(0.02), 0.04),
    gated(Field::CoverageRate, Base::Tiered(TierTable::new(0.85, 0.88, 0.92)), TierTable::flat(0.005), 0.03),
    FieldSpec {
        family: MetricFamily::Administrative,
        ..gated(
            Field::ManagementRatio,
            Base::Tiered(TierTable::new(0.075, 0.065, 0.055)),
            TierTable::flat(-0.003),
            0.02,
        )
    },
    gated(Field::AccountBalance, Base::BudgetShare(0.03), TierTable::flat(0.01), 0.15),
    boosted(
        linear(Field::FamilyAllowance, Base::BudgetShare(0.25), TierTable::new(0.030, 0.025, 0.020), 0.06),
        Tag::LargeFamilies,
        1.4,
    ),
    boosted(
        linear(Field::BackToSchoolGrant, Base::BudgetShare(0.08), TierTable::new(0.032, 0.028, 0.022), 0.07),
        Tag::Youth,
        1.3,
    ),
    linear(Field::HousingAid, Base::BudgetShare(0.20), TierTable::new(0.036, 0.032, 0.026), 0.08),
    boosted(
        linear(Field::SolidarityIncome, Base::BudgetShare(0.15), TierTable::new(0.042, 0.038, 0.030), 0.09),
        Tag::Precarity,
        1.6,
    ),
    boosted(
        linear(Field::BirthGrant, Base::BudgetShare(0.04), TierTable::new(0.026, 0.022, 0.018), 0.10),
        Tag::Youth,
        1.5,
    ),
];

pub fn spec_for(field: Field) -> &'static FieldSpec {
    &FIELD_SPECS[field.index()]
}

impl FieldSpec {
    pub fn tier(&self, profile: &TerritoryProfile) -> GrowthTier {
        GrowthTier::classify(profile.territory, self.family)
    }

    pub fn base_value(&self, profile: &TerritoryProfile, tier: GrowthTier) -> f64 {
        match self.base {
            Base::Population => profile.baseline_population,
            Base::BudgetShare(share) => profile.baseline_budget * share,
            Base::Tiered(table) => table.get(tier),
        }
    }

    pub fn growth_factor(&self, tier: GrowthTier, year: Year, start_year: Year) -> f64 {
        match self.growth {
            Growth::Linear(rates) => 1.0 + rates.get(tier) * f64::from(year - start_year),
            Growth::Gated { gate, rates } if year >= gate => {
                1.0 + rates.get(tier) * f64::from(year - gate)
            }
            Growth::Gated { .. } => 1.0,
        }
    }

    pub fn tag_multiplier(&self, profile: &TerritoryProfile) -> f64 {
        match self.boost {
            Some(boost) if profile.has_tag(boost.tag) => boost.multiplier,
            _ => 1.0,
        }
    }
}

fn check_range(start_year: Year, end_year: Year) -> SeriesResult<()> {
    let span = i64::from(end_year) - i64::from(start_year) + 1;
    if span < 1 || span > MAX_SPAN_YEARS {
        return Err(SeriesError::InvalidRange { start: start_year, end: end_year });
    }
    Ok(())
}

/// Build every field for every year in `start_year..=end_year`,
/// without era adjustments.
pub fn generate_unadjusted(
    profile: &TerritoryProfile,
    start_year: Year,
    end_year: Year,
    rng_bank: &RngBank,
) -> SeriesResult<RawSeries> {
    profile.validate()?;
    check_range(start_year, end_year)?;

    let mut raw = RawSeries::blank(start_year, end_year);

    for spec in &FIELD_SPECS {
        let tier = spec.tier(profile);
        let base = spec.base_value(profile, tier);
        let boost = spec.tag_multiplier(profile);
        let mut rng = rng_bank.for_field(spec.field);

        for record in raw.records_mut() {
            let growth = spec.growth_factor(tier, record.year, start_year);
            let noise = spec.noise_sd.map_or(1.0, |sd| rng.noise(sd));
            record.set(spec.field, base * growth * boost * noise);
        }

        log::debug!(
            "field {}: tier={tier:?} base={base:.4} boost={boost:.2}",
            spec.field.column()
        );
    }

    Ok(raw)
}

/// Generate the final series: raw fields, then the standard era
/// schedule applied exactly once.
pub fn generate(
    profile: &TerritoryProfile,
    start_year: Year,
    end_year: Year,
    rng_bank: &RngBank,
) -> SeriesResult<YearlySeries> {
    log::info!(
        "generating {} {start_year}..={end_year} seed={:?}",
        profile.display_name(),
        rng_bank.seed()
    );
    let raw = generate_unadjusted(profile, start_year, end_year, rng_bank)?;
    Ok(EraSchedule::standard().apply(raw))
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn specs_are_in_field_order() {
        for (spec, field) in FIELD_SPECS.iter().zip(Field::ALL) {
            assert_eq!(spec.field, field);
        }
    }

    #[test]
    fn only_management_ratio_uses_administrative_lists() {
        for spec in &FIELD_SPECS {
            let expected = if spec.field == Field::ManagementRatio {
                MetricFamily::Administrative
            } else {
                MetricFamily::Regional
            };
            assert_eq!(spec.family, expected, "{}", spec.field.column());
        }
    }

    #[test]
    fn gated_growth_kinks_at_gate_year() {
        let spec = spec_for(Field::StateContributions);
        let tier = GrowthTier::Moderate;
        assert_eq!(spec.growth_factor(tier, 2005, 2002), 1.0);
        assert_eq!(spec.growth_factor(tier, 2010, 2002), 1.0);
        assert!((spec.growth_factor(tier, 2012, 2002) - 1.03).abs() < 1e-12);
    }

    #[test]
    fn linear_growth_counts_from_start_year() {
        let spec = spec_for(Field::TotalRevenue);
        assert_eq!(spec.growth_factor(GrowthTier::High, 2002, 2002), 1.0);
        assert!((spec.growth_factor(GrowthTier::High, 2004, 2002) - 1.07).abs() < 1e-12);
    }
}
