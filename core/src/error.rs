use crate::types::Year;
use thiserror::Error;

#[derive(Error, Debug)]
pub enum SeriesError {
    #[error("Invalid year range: {start}..={end} (must be ordered and at most 1000 years)")]
    InvalidRange { start: Year, end: Year },

    #[error("Invalid territory profile: {reason}")]
    InvalidProfile { reason: String },

    #[error("Series years are not contiguous: expected {expected}, got {actual}")]
    NonContiguousYears { expected: Year, actual: Year },

    #[error("CSV error: {0}")]
    Csv(#[from] csv::Error),

    #[error("I/O error: {0}")]
    Io(#[from] std::io::Error),

    #[error("Serialization error: {0}")]
    Serialization(#[from] serde_json::Error),

    #[error(transparent)]
    Other(#[from] anyhow::Error),
}

pub type SeriesResult<T> = Result<T, SeriesError>;
