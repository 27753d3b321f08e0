//! Errors that stop a single row from becoming a record.

use thiserror::Error;

/// A row that cannot be normalized. The batch carries on without it.
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum RowError {
    /// A required field is blank.
    #[error("required field '{column}' is empty")]
    MissingField { column: String },

    /// A numeric field holds something that is not a number.
    #[error("'{value}' in '{column}' is not a number")]
    NotANumber { column: String, value: String },
}
