//! Row-to-record normalization for activity sheets.
//!
//! - **frequency**: free-text recurrence → annual [`Frequency`](activity_model::Frequency)
//! - **fields**: typed accessors over raw rows (expected type, default, failure mapping)
//! - **styles**: injected category → icon/color tables
//! - **record**: the [`RecordNormalizer`] that turns one row into one record
//!
//! # Example
//!
//! ```ignore
//! use activity_model::{Diagnostics, RawRow};
//! use activity_transform::RecordNormalizer;
//!
//! let row = RawRow::new().with("name", "Netflix").with("category", "subscriptions");
//! let mut diagnostics = Diagnostics::new();
//! let record = RecordNormalizer::default().build_record(&row, None, &mut diagnostics)?;
//! ```

mod error;

pub mod fields;
pub mod frequency;
pub mod record;
pub mod styles;

pub use error::RowError;
pub use fields::{RowFields, TRUTHY_VALUES};
pub use frequency::{DEFAULT_FREQUENCY, normalize_frequency, parse_frequency};
pub use record::{
    DEFAULT_CURRENCY, DEFAULT_UNIT, QUOTE_FREQUENCY, RecordNormalizer, RowOutcome, SkippedRow,
};
pub use styles::{CategoryStyles, FALLBACK_CATEGORY};
