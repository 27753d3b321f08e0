//! The output document handed to the writer.

use chrono::NaiveDateTime;
use serde::{Deserialize, Serialize};

use crate::activity::ActivityRecord;

/// Schema version of the output document.
pub const DOCUMENT_VERSION: &str = "2.0";

/// Provenance tag for `metadata.generated_by`.
pub const GENERATED_BY: &str = "activity-sheets";

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct DocumentMetadata {
    pub version: String,
    pub created_at: NaiveDateTime,
    pub last_updated: NaiveDateTime,
    pub total_activities: usize,
    pub source: String,
    pub generated_by: String,
}

/// Every activity of one run, wrapped with provenance metadata.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct OutputDocument {
    pub activities: Vec<ActivityRecord>,
    pub metadata: DocumentMetadata,
}
