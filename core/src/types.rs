//! Shared primitive types used across the entire generator.

/// A calendar year.
pub type Year = i32;

/// First year of the default simulation window.
pub const DEFAULT_START_YEAR: Year = 2002;

/// Last year of the default simulation window (inclusive).
pub const DEFAULT_END_YEAR: Year = 2025;

/// Longest window a single run may generate, in years.
pub const MAX_SPAN_YEARS: i64 = 1_000;

/// Threshold-gated fields stay flat before this year.
pub const GATE_YEAR: Year = 2010;
