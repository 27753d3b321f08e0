//! Individual validation checks.
//!
//! - [`columns`]: header-level checks (required, optional, unrecognized)
//! - [`rows`]: per-row checks for blank required fields and financial data

pub mod columns;
pub mod rows;
