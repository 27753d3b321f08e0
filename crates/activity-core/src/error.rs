//! Error types for the conversion pipeline.

use thiserror::Error;

use activity_validate::ValidationReport;

use crate::pipeline::Stage;

/// Errors that stop a conversion.
#[derive(Debug, Error)]
pub enum ConvertError {
    /// The dataset failed validation; no rows were normalized.
    #[error("validation failed with {} error(s)", .report.error_count())]
    ValidationFailed { report: Box<ValidationReport> },

    /// A conversion runs once; this one is already past `Idle`.
    #[error("conversion already ran (stage: {stage})")]
    AlreadyRun { stage: Stage },
}

/// Result type for conversion operations.
pub type Result<T> = std::result::Result<T, ConvertError>;

impl ConvertError {
    /// Validation report, when validation is what failed.
    pub fn report(&self) -> Option<&ValidationReport> {
        match self {
            Self::ValidationFailed { report } => Some(report),
            Self::AlreadyRun { .. } => None,
        }
    }
}
