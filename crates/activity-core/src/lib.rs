//! Conversion pipeline for activity sheets.
//!
//! Ties the validator, the record normalizer and the assembler together and
//! tracks which stage a run is in. Also computes the figures shown in the
//! post-run summary.

mod assemble;
pub mod dedupe;
mod error;
pub mod pipeline;
pub mod stats;

pub use assemble::assemble;
pub use dedupe::{DuplicateId, find_duplicate_ids};
pub use error::{ConvertError, Result};
pub use pipeline::{Conversion, ConversionOutput, Stage};
pub use stats::DocumentStats;
