//! Conversion pipeline with explicit stages.
//!
//! A conversion moves through these stages in order:
//! 1. **Validating**: batch checks over the raw dataset
//! 2. **Normalizing**: one [`RowOutcome`] per row
//! 3. **Assembling**: records wrapped into the [`OutputDocument`]
//!
//! Validation failure ends the run in [`Stage::Failed`]; otherwise it ends in
//! [`Stage::Done`].
//!
//! # Example
//!
//! ```ignore
//! use activity_core::Conversion;
//!
//! let mut conversion = Conversion::default();
//! let output = conversion.run(&dataset, chrono::Local::now().naive_local())?;
//! println!("{} activities", output.document.metadata.total_activities);
//! ```

use std::fmt;

use chrono::NaiveDateTime;
use tracing::{debug, info, info_span};

use activity_model::{Diagnostics, OutputDocument, RawDataset, row_number};
use activity_transform::{RecordNormalizer, RowOutcome, SkippedRow};
use activity_validate::{ValidationReport, validate};

use crate::assemble::assemble;
use crate::dedupe::{DuplicateId, find_duplicate_ids};
use crate::error::{ConvertError, Result};

/// Where a conversion is.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub enum Stage {
    #[default]
    Idle,
    Validating,
    Failed,
    Normalizing,
    Assembling,
    Done,
}

impl Stage {
    pub const fn label(self) -> &'static str {
        match self {
            Self::Idle => "idle",
            Self::Validating => "validating",
            Self::Failed => "failed",
            Self::Normalizing => "normalizing",
            Self::Assembling => "assembling",
            Self::Done => "done",
        }
    }

    /// Whether the pipeline may move from `self` to `next`.
    pub const fn can_advance_to(self, next: Stage) -> bool {
        matches!(
            (self, next),
            (Self::Idle, Self::Validating)
                | (Self::Validating, Self::Failed | Self::Normalizing)
                | (Self::Normalizing, Self::Assembling)
                | (Self::Assembling, Self::Done)
        )
    }

    /// True for `Failed` and `Done`.
    pub const fn is_terminal(self) -> bool {
        matches!(self, Self::Failed | Self::Done)
    }
}

impl fmt::Display for Stage {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.label())
    }
}

/// Everything a successful conversion produced.
#[derive(Debug, Clone)]
pub struct ConversionOutput {
    pub document: OutputDocument,
    pub validation: ValidationReport,
    /// Rows left out of the document.
    pub skipped: Vec<SkippedRow>,
    /// Ids shared by more than one record.
    pub duplicate_ids: Vec<DuplicateId>,
    /// Warnings raised while normalizing (validation findings live in
    /// `validation`).
    pub diagnostics: Diagnostics,
}

impl ConversionOutput {
    /// Validation and normalization diagnostics, in the order they were raised.
    pub fn all_diagnostics(&self) -> Diagnostics {
        let mut all = self.validation.diagnostics.clone();
        all.extend(self.diagnostics.clone());
        all
    }
}

/// One run of the pipeline over one dataset.
#[derive(Debug, Clone, Default)]
pub struct Conversion {
    normalizer: RecordNormalizer,
    stage: Stage,
}

impl Conversion {
    pub fn new(normalizer: RecordNormalizer) -> Self {
        Self {
            normalizer,
            stage: Stage::Idle,
        }
    }

    pub fn stage(&self) -> Stage {
        self.stage
    }

    /// Runs validation, normalization and assembly.
    ///
    /// `now` is the run timestamp: every record's `created_at` and the
    /// document's timestamps use it.
    pub fn run(&mut self, dataset: &RawDataset, now: NaiveDateTime) -> Result<ConversionOutput> {
        if self.stage != Stage::Idle {
            return Err(ConvertError::AlreadyRun { stage: self.stage });
        }
        let span = info_span!("convert", rows = dataset.len());
        let _guard = span.enter();

        self.advance(Stage::Validating);
        let validation = validate(dataset);
        if !validation.ok {
            self.advance(Stage::Failed);
            return Err(ConvertError::ValidationFailed {
                report: Box::new(validation),
            });
        }

        self.advance(Stage::Normalizing);
        let normalizer = self.normalizer.clone().with_timestamp(now);
        let mut diagnostics = Diagnostics::new();
        let mut records = Vec::with_capacity(dataset.len());
        let mut record_rows = Vec::with_capacity(dataset.len());
        let mut skipped = Vec::new();
        for (index, row) in dataset.rows.iter().enumerate() {
            match normalizer.normalize(index, row, &mut diagnostics) {
                RowOutcome::Normalized(record) => {
                    record_rows.push(row_number(index));
                    records.push(record);
                }
                RowOutcome::Skipped(skipped_row) => skipped.push(skipped_row),
            }
        }

        let duplicate_ids = find_duplicate_ids(
            records
                .iter()
                .map(|record| record.id.as_str())
                .zip(record_rows.iter().copied()),
        );
        for duplicate in &duplicate_ids {
            let rows: Vec<String> = duplicate.rows.iter().map(ToString::to_string).collect();
            diagnostics.warn(
                None,
                format!("duplicate id '{}' on rows {}", duplicate.id, rows.join(", ")),
            );
        }
        info!(
            normalized = records.len(),
            skipped = skipped.len(),
            duplicate_ids = duplicate_ids.len(),
            "normalized rows"
        );

        self.advance(Stage::Assembling);
        let document = assemble(records, now);

        self.advance(Stage::Done);
        Ok(ConversionOutput {
            document,
            validation,
            skipped,
            duplicate_ids,
            diagnostics,
        })
    }

    fn advance(&mut self, next: Stage) {
        debug_assert!(
            self.stage.can_advance_to(next),
            "illegal stage transition {} -> {next}",
            self.stage
        );
        debug!(from = %self.stage, to = %next, "stage transition");
        self.stage = next;
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn transitions_follow_the_pipeline() {
        assert!(Stage::Idle.can_advance_to(Stage::Validating));
        assert!(Stage::Validating.can_advance_to(Stage::Failed));
        assert!(Stage::Validating.can_advance_to(Stage::Normalizing));
        assert!(Stage::Assembling.can_advance_to(Stage::Done));
        assert!(!Stage::Idle.can_advance_to(Stage::Normalizing));
        assert!(!Stage::Failed.can_advance_to(Stage::Normalizing));
        assert!(!Stage::Done.can_advance_to(Stage::Idle));
    }

    #[test]
    fn terminal_stages() {
        assert!(Stage::Failed.is_terminal());
        assert!(Stage::Done.is_terminal());
        assert!(!Stage::Normalizing.is_terminal());
    }
}
