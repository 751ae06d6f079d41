//! Delimited-text export of a frozen series.
//!
//! Layout: a `year` column followed by every field's column name in
//! `Field::ALL` order, one row per year. Values use Rust's shortest
//! round-trip float formatting, so reading an export back yields
//! bit-identical values.

use crate::{
    error::SeriesResult,
    field::Field,
    series::{YearRecord, YearlySeries},
    types::Year,
};
use anyhow::{anyhow, Context};
use std::fs::File;
use std::io::{Read, Write};
use std::path::Path;

pub const YEAR_COLUMN: &str = "year";

pub fn header() -> Vec<&'static str> {
    std::iter::once(YEAR_COLUMN)
        .chain(Field::ALL.iter().map(|f| f.column()))
        .collect()
}

pub fn write_csv<W: Write>(series: &YearlySeries, writer: W) -> SeriesResult<()> {
    let mut out = csv::Writer::from_writer(writer);
    out.write_record(header())?;
    for record in series.records() {
        let row = std::iter::once(record.year.to_string())
            .chain(record.values().iter().map(|v| v.to_string()));
        out.write_record(row)?;
    }
    out.flush()?;
    Ok(())
}

pub fn write_csv_file(series: &YearlySeries, path: &Path) -> SeriesResult<()> {
    let file = File::create(path)?;
    write_csv(series, file)?;
    log::info!("wrote {} rows to {}", series.len(), path.display());
    Ok(())
}

/// Read an export back. Columns may appear in any order; every field
/// column must be present.
pub fn read_csv<R: Read>(reader: R) -> SeriesResult<YearlySeries> {
    let mut input = csv::Reader::from_reader(reader);
    let headers = input.headers()?.clone();

    let position = |name: &str| {
        headers
            .iter()
            .position(|h| h == name)
            .ok_or_else(|| anyhow!("missing column {name:?}"))
    };
    let year_at = position(YEAR_COLUMN)?;
    let field_at: Vec<(Field, usize)> = Field::ALL
        .into_iter()
        .map(|f| position(f.column()).map(|i| (f, i)))
        .collect::<Result<_, _>>()?;

    let mut records = Vec::new();
    for (line, row) in input.records().enumerate() {
        let row = row?;
        let cell = |i: usize| row.get(i).unwrap_or_default();
        let year: Year = cell(year_at)
            .parse()
            .with_context(|| format!("row {}: bad year", line + 1))?;

        let mut record = YearRecord::new(year);
        for &(field, i) in &field_at {
            let value: f64 = cell(i)
                .parse()
                .with_context(|| format!("row {}: bad {}", line + 1, field.column()))?;
            record = record.with(field, value);
        }
        records.push(record);
    }

    YearlySeries::from_records(records)
}

pub fn read_csv_file(path: &Path) -> SeriesResult<YearlySeries> {
    let file = File::open(path)?;
    read_csv(file)
}
