//! Data model for converting activity sheets into the app's JSON document.
//!
//! - [`row`]: loosely typed input rows with explicit absent cells
//! - [`activity`]: the normalized [`ActivityRecord`] and its parts
//! - [`document`]: the [`OutputDocument`] envelope
//! - [`diagnostics`]: warnings and errors reported per row or per batch

pub mod activity;
pub mod diagnostics;
pub mod document;
pub mod row;

pub use activity::{
    ActivityRecord, ActivityType, AgeRange, DisplayFormat, DisplayInfo, FinancialPayload,
    Frequency, IMPORT_SOURCE, Period, QuotePayload, RecordMetadata, UnknownActivityType,
    generate_id,
};
pub use diagnostics::{Diagnostic, Diagnostics, Severity};
pub use document::{DOCUMENT_VERSION, DocumentMetadata, GENERATED_BY, OutputDocument};
pub use row::{
    CellValue, HEADER_ROW_OFFSET, OPTIONAL_COLUMNS, REQUIRED_COLUMNS, RawDataset, RawRow,
    columns, format_numeric, is_missing_value, parse_f64, row_number,
};
