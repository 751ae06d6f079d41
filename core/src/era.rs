//! Era adjustments: historical corrections layered on raw series.
//!
//! An era is a labelled year span with a list of (field, multiplier)
//! corrections. The schedule is folded over a `RawSeries` in declaration
//! order; overlapping eras compose multiplicatively.
//!
//! RULE: `EraSchedule::apply` consumes the raw table and returns the
//! frozen `YearlySeries`. There is no path back, so a schedule can
//! only ever be applied once to a given table.

use crate::{
    field::Field,
    series::{RawSeries, YearlySeries},
    types::Year,
};
use serde::Serialize;
use std::fmt;

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
#[serde(tag = "kind", rename_all = "snake_case")]
pub enum YearSpan {
    /// Inclusive on both ends.
    Range { from: Year, to: Year },
    Exact { year: Year },
    Since { year: Year },
}

impl YearSpan {
    pub fn contains(&self, year: Year) -> bool {
        match *self {
            Self::Range { from, to } => (from..=to).contains(&year),
            Self::Exact { year: y } => year == y,
            Self::Since { year: y } => year >= y,
        }
    }
}

impl fmt::Display for YearSpan {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::Range { from, to } => write!(f, "{from}-{to}"),
            Self::Exact { year } => write!(f, "{year}"),
            Self::Since { year } => write!(f, "{year} onward"),
        }
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Serialize)]
pub struct Adjustment {
    pub field:      Field,
    pub multiplier: f64,
}

#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct Era {
    pub label:       &'static str,
    /// Years shown in the report timeline.
    pub period:      YearSpan,
    /// Years the adjustments actually hit; may be narrower than `period`.
    pub applies:     YearSpan,
    pub adjustments: Vec<Adjustment>,
}

impl Era {
    fn new(label: &'static str, span: YearSpan, adjustments: &[(Field, f64)]) -> Self {
        Self {
            label,
            period: span,
            applies: span,
            adjustments: adjustments
                .iter()
                .map(|&(field, multiplier)| Adjustment { field, multiplier })
                .collect(),
        }
    }

    fn only_in(mut self, applies: YearSpan) -> Self {
        self.applies = applies;
        self
    }

    /// Combined multiplier this era puts on `field` in `year`.
    pub fn multiplier(&self, year: Year, field: Field) -> f64 {
        if !self.applies.contains(year) {
            return 1.0;
        }
        self.adjustments
            .iter()
            .filter(|a| a.field == field)
            .map(|a| a.multiplier)
            .product()
    }
}

#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct EraSchedule {
    eras: Vec<Era>,
}

impl EraSchedule {
    pub fn new(eras: Vec<Era>) -> Self {
        Self { eras }
    }

    /// The historical schedule used for every generated series.
    pub fn standard() -> Self {
        use Field::*;
        use YearSpan::*;
        Self::new(vec![
            Era::new(
                "Initial build-out of agency services",
                Range { from: 2002, to: 2005 },
                &[(StateContributions, 1.10), (FamilyBenefits, 1.15)],
            ),
            Era::new(
                "Benefit reform and roll-out of the solidarity income",
                Range { from: 2006, to: 2010 },
                &[(SolidarityIncome, 1.25), (SolidarityBenefits, 1.30)],
            ),
            Era::new(
                "Financial crisis hits contributions",
                Range { from: 2008, to: 2009 },
                &[(SocialContributions, 0.92), (SolidarityIncome, 1.15)],
            ),
            Era::new(
                "Reinforcement of social policies",
                Range { from: 2011, to: 2015 },
                &[(StateContributions, 1.12), (FamilyAllowance, 1.08)],
            ),
            Era::new(
                "Social movements and strengthened aid",
                Exact { year: 2017 },
                &[(StateContributions, 1.18), (SolidarityIncome, 1.10)],
            ),
            Era::new(
                "COVID-19 crisis and emergency support",
                Range { from: 2020, to: 2021 },
                &[
                    (SocialContributions, 0.85),
                    (StateContributions, 1.25),
                    (SolidarityIncome, 1.35),
                ],
            )
            .only_in(Exact { year: 2020 }),
            Era::new(
                "Post-COVID recovery plan",
                Since { year: 2022 },
                &[(StateContributions, 1.08), (HousingBenefits, 1.12), (BackToSchoolGrant, 1.10)],
            ),
        ])
    }

    pub fn eras(&self) -> &[Era] {
        &self.eras
    }

    /// Product of every era's multiplier for one cell.
    pub fn multiplier(&self, year: Year, field: Field) -> f64 {
        self.eras.iter().map(|e| e.multiplier(year, field)).product()
    }

    /// Fold every era over the raw table and freeze the result.
    pub fn apply(&self, raw: RawSeries) -> YearlySeries {
        let mut records = raw.into_records();
        for era in &self.eras {
            let mut touched = 0usize;
            for record in records.iter_mut().filter(|r| era.applies.contains(r.year)) {
                for adj in &era.adjustments {
                    record.set(adj.field, record.get(adj.field) * adj.multiplier);
                }
                touched += 1;
            }
            log::debug!("era {:?}: adjusted {touched} year(s)", era.label);
        }
        YearlySeries::from_adjusted(records)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn spans_are_inclusive() {
        let span = YearSpan::Range { from: 2008, to: 2009 };
        assert!(!span.contains(2007));
        assert!(span.contains(2008));
        assert!(span.contains(2009));
        assert!(!span.contains(2010));
        assert!(YearSpan::Since { year: 2022 }.contains(2030));
        assert!(!YearSpan::Exact { year: 2017 }.contains(2018));
    }

    #[test]
    fn overlapping_eras_compose() {
        let schedule = EraSchedule::standard();
        // Reform (×1.25) and crisis (×1.15) both hit 2008.
        let m = schedule.multiplier(2008, Field::SolidarityIncome);
        assert!((m - 1.25 * 1.15).abs() < 1e-12);
        assert_eq!(schedule.multiplier(2007, Field::SocialContributions), 1.0);
    }

    #[test]
    fn covid_era_only_adjusts_2020() {
        let schedule = EraSchedule::standard();
        assert!((schedule.multiplier(2020, Field::StateContributions) - 1.25).abs() < 1e-12);
        assert_eq!(schedule.multiplier(2021, Field::StateContributions), 1.0);
    }

    #[test]
    fn reinforcement_and_reform_never_share_a_year() {
        let schedule = EraSchedule::standard();
        for year in 2002..=2025 {
            let reinforcement = schedule.eras()[3].applies.contains(year);
            let early = schedule.eras()[..3].iter().any(|e| e.applies.contains(year));
            assert!(!(reinforcement && early), "{year} hit by both branches");
        }
    }
}
