//! Validation results.

use serde::Serialize;

use activity_model::Diagnostics;

/// How the dataset's header lines up with the known columns.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize)]
pub struct ColumnReport {
    /// Every column in the header, in source order.
    pub available: Vec<String>,
    /// Required columns the header lacks.
    pub missing_required: Vec<String>,
    /// Optional columns present in the header.
    pub available_optional: Vec<String>,
    /// Optional columns that will fall back to defaults.
    pub missing_optional: Vec<String>,
    /// Columns nothing reads.
    pub unrecognized: Vec<String>,
}

/// Outcome of validating one dataset.
#[derive(Debug, Clone, Default, PartialEq, Serialize)]
pub struct ValidationReport {
    /// True when no errors were found.
    pub ok: bool,
    pub diagnostics: Diagnostics,
    pub columns: ColumnReport,
    /// Rows that were inspected; zero when the header was rejected.
    pub rows_checked: usize,
}

impl ValidationReport {
    pub fn error_count(&self) -> usize {
        self.diagnostics.error_count()
    }

    pub fn warning_count(&self) -> usize {
        self.diagnostics.warning_count()
    }
}
