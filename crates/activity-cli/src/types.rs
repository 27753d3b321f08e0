use std::path::PathBuf;

use activity_core::DocumentStats;
use activity_model::Diagnostics;
use activity_transform::SkippedRow;

use crate::output::WrittenOutput;

/// What `convert` did, for the summary and the exit code.
#[derive(Debug)]
pub struct ConvertResult {
    /// CSV path or sheet id the rows came from.
    pub source: String,
    pub rows_read: usize,
    pub diagnostics: Diagnostics,
    pub skipped: Vec<SkippedRow>,
    /// Absent when validation failed.
    pub stats: Option<DocumentStats>,
    pub output: Option<OutputTarget>,
    pub has_errors: bool,
}

#[derive(Debug)]
pub enum OutputTarget {
    Written(WrittenOutput),
    DryRun { path: PathBuf },
}

impl ConvertResult {
    /// Result of a run stopped by validation.
    pub fn failed(source: String, rows_read: usize, diagnostics: Diagnostics) -> Self {
        Self {
            source,
            rows_read,
            diagnostics,
            skipped: Vec::new(),
            stats: None,
            output: None,
            has_errors: true,
        }
    }
}
