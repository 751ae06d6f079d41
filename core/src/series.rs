//! Year-keyed series tables.
//!
//! Two table types exist on purpose:
//!   - `RawSeries` is what the generator builds. It is never exported.
//!   - `YearlySeries` is the frozen, era-adjusted table handed to
//!     reporting and export. It has no mutating methods.
//!
//! The only way from one to the other is `EraSchedule::apply`, which
//! consumes the raw table, so era rules cannot run twice.

use crate::{
    error::{SeriesError, SeriesResult},
    field::Field,
    types::Year,
};
use serde::{Deserialize, Serialize};

/// One row: a year and one value per field, in `Field::ALL` order.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct YearRecord {
    pub year: Year,
    values:   [f64; Field::COUNT],
}

impl YearRecord {
    pub fn new(year: Year) -> Self {
        Self { year, values: [0.0; Field::COUNT] }
    }

    pub fn with(mut self, field: Field, value: f64) -> Self {
        self.values[field.index()] = value;
        self
    }

    pub fn get(&self, field: Field) -> f64 {
        self.values[field.index()]
    }

    pub(crate) fn set(&mut self, field: Field, value: f64) {
        self.values[field.index()] = value;
    }

    pub fn values(&self) -> &[f64] {
        &self.values
    }
}

fn check_contiguous(records: &[YearRecord]) -> SeriesResult<()> {
    for pair in records.windows(2) {
        let actual = pair[1].year;
        match pair[0].year.checked_add(1) {
            Some(expected) if expected == actual => {}
            Some(expected) => return Err(SeriesError::NonContiguousYears { expected, actual }),
            None => {
                return Err(SeriesError::NonContiguousYears { expected: pair[0].year, actual })
            }
        }
    }
    Ok(())
}

fn find(records: &[YearRecord], year: Year) -> Option<&YearRecord> {
    let first = records.first()?.year;
    let idx = usize::try_from(year.checked_sub(first)?).ok()?;
    records.get(idx)
}

// ── Unadjusted ─────────────────────────────────────────────────────

/// Generator output before era adjustments.
#[derive(Debug, Clone, PartialEq)]
pub struct RawSeries {
    records: Vec<YearRecord>,
}

impl RawSeries {
    /// Zero-filled rows for every year in `start..=end`.
    pub(crate) fn blank(start: Year, end: Year) -> Self {
        Self { records: (start..=end).map(YearRecord::new).collect() }
    }

    pub(crate) fn records_mut(&mut self) -> &mut [YearRecord] {
        &mut self.records
    }

    pub(crate) fn into_records(self) -> Vec<YearRecord> {
        self.records
    }

    pub fn records(&self) -> &[YearRecord] {
        &self.records
    }

    pub fn get(&self, year: Year, field: Field) -> Option<f64> {
        find(&self.records, year).map(|r| r.get(field))
    }
}

// ── Frozen ─────────────────────────────────────────────────────────

/// The final table: contiguous years, one value per field per year.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct YearlySeries {
    records: Vec<YearRecord>,
}

impl YearlySeries {
    /// Wrap externally produced rows, e.g. figures read back from an
    /// export. Rows must be sorted and contiguous by year.
    pub fn from_records(records: Vec<YearRecord>) -> SeriesResult<Self> {
        check_contiguous(&records)?;
        Ok(Self { records })
    }

    pub(crate) fn from_adjusted(records: Vec<YearRecord>) -> Self {
        Self { records }
    }

    pub fn records(&self) -> &[YearRecord] {
        &self.records
    }

    pub fn len(&self) -> usize {
        self.records.len()
    }

    pub fn is_empty(&self) -> bool {
        self.records.is_empty()
    }

    pub fn start_year(&self) -> Option<Year> {
        self.records.first().map(|r| r.year)
    }

    pub fn end_year(&self) -> Option<Year> {
        self.records.last().map(|r| r.year)
    }

    pub fn years(&self) -> impl Iterator<Item = Year> + '_ {
        self.records.iter().map(|r| r.year)
    }

    pub fn record(&self, year: Year) -> Option<&YearRecord> {
        find(&self.records, year)
    }

    pub fn get(&self, year: Year, field: Field) -> Option<f64> {
        self.record(year).map(|r| r.get(field))
    }

    /// All values of one field, in year order.
    pub fn column(&self, field: Field) -> Vec<f64> {
        self.records.iter().map(|r| r.get(field)).collect()
    }
}
