//! Dataset validation for activity sheets.
//!
//! Runs before normalization and looks at the whole batch. Every problem is
//! collected first; the batch fails when at least one error was found.
//!
//! # Example
//!
//! ```ignore
//! use activity_validate::validate;
//!
//! let report = validate(&dataset);
//! if !report.ok {
//!     for diagnostic in &report.diagnostics {
//!         eprintln!("{diagnostic}");
//!     }
//! }
//! ```

pub mod checks;
mod report;

use tracing::{debug, info};

use activity_model::{Diagnostics, RawDataset};

pub use report::{ColumnReport, ValidationReport};

/// Validates a raw dataset.
///
/// Missing required columns fail the batch before any row is read. Otherwise
/// each row is checked and all findings are aggregated.
pub fn validate(dataset: &RawDataset) -> ValidationReport {
    let columns = checks::columns::check(dataset);
    let mut diagnostics = Diagnostics::new();

    info!(columns = ?columns.available, rows = dataset.len(), "validating dataset");
    if !columns.missing_required.is_empty() {
        diagnostics.error(
            None,
            format!(
                "missing required columns: {}",
                columns.missing_required.join(", ")
            ),
        );
        return ValidationReport {
            ok: false,
            diagnostics,
            columns,
            rows_checked: 0,
        };
    }

    if !columns.available_optional.is_empty() {
        info!(columns = ?columns.available_optional, "optional columns available");
    }
    if !columns.missing_optional.is_empty() {
        info!(columns = ?columns.missing_optional, "optional columns missing, defaults apply");
    }
    if !columns.unrecognized.is_empty() {
        debug!(columns = ?columns.unrecognized, "ignoring unrecognized columns");
    }

    for (row_number, row) in dataset.numbered_rows() {
        checks::rows::check(row, row_number, &mut diagnostics);
    }

    let ok = !diagnostics.has_errors();
    if ok {
        info!(warnings = diagnostics.warning_count(), "validation passed");
    } else {
        info!(
            errors = diagnostics.error_count(),
            warnings = diagnostics.warning_count(),
            "validation failed"
        );
    }
    ValidationReport {
        ok,
        diagnostics,
        columns,
        rows_checked: dataset.len(),
    }
}
