//! Synthetic financial and demographic series for a regional
//! social-benefits agency.
//!
//! Pipeline: `config::resolve` → `generator::generate` (raw fields,
//! then `era::EraSchedule` exactly once) → `summary` / `export`.

pub mod config;
pub mod era;
pub mod error;
pub mod export;
pub mod field;
pub mod generator;
pub mod rng;
pub mod series;
pub mod summary;
pub mod tier;
pub mod types;
