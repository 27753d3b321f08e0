//! Warnings and errors collected while validating and normalizing rows.

use std::fmt;

use serde::{Deserialize, Serialize};

#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum Severity {
    Warning,
    Error,
}

impl fmt::Display for Severity {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::Warning => f.write_str("warning"),
            Self::Error => f.write_str("error"),
        }
    }
}

/// A single diagnostic message.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Diagnostic {
    pub severity: Severity,
    pub message: String,
    /// Spreadsheet row number (header is row 1), when the message is about one row.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub row: Option<usize>,
}

impl fmt::Display for Diagnostic {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self.row {
            Some(row) => write!(f, "{} (row {row}): {}", self.severity, self.message),
            None => write!(f, "{}: {}", self.severity, self.message),
        }
    }
}

/// Ordered diagnostics stream.
///
/// Each push is mirrored to `tracing` so a run logs what it reports.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(transparent)]
pub struct Diagnostics {
    entries: Vec<Diagnostic>,
}

impl Diagnostics {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn warn(&mut self, row: Option<usize>, message: impl Into<String>) {
        let message = message.into();
        tracing::warn!(row = row, "{message}");
        self.entries.push(Diagnostic {
            severity: Severity::Warning,
            message,
            row,
        });
    }

    pub fn error(&mut self, row: Option<usize>, message: impl Into<String>) {
        let message = message.into();
        tracing::error!(row = row, "{message}");
        self.entries.push(Diagnostic {
            severity: Severity::Error,
            message,
            row,
        });
    }

    pub fn extend(&mut self, other: Diagnostics) {
        self.entries.extend(other.entries);
    }

    pub fn iter(&self) -> std::slice::Iter<'_, Diagnostic> {
        self.entries.iter()
    }

    pub fn len(&self) -> usize {
        self.entries.len()
    }

    pub fn is_empty(&self) -> bool {
        self.entries.is_empty()
    }

    pub fn error_count(&self) -> usize {
        self.count(Severity::Error)
    }

    pub fn warning_count(&self) -> usize {
        self.count(Severity::Warning)
    }

    pub fn has_errors(&self) -> bool {
        self.error_count() > 0
    }

    fn count(&self, severity: Severity) -> usize {
        self.entries
            .iter()
            .filter(|entry| entry.severity == severity)
            .count()
    }
}

impl<'a> IntoIterator for &'a Diagnostics {
    type Item = &'a Diagnostic;
    type IntoIter = std::slice::Iter<'a, Diagnostic>;

    fn into_iter(self) -> Self::IntoIter {
        self.entries.iter()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn counts_by_severity() {
        let mut diagnostics = Diagnostics::new();
        diagnostics.warn(Some(2), "odd currency");
        diagnostics.error(Some(3), "empty name");
        diagnostics.warn(None, "unused column");
        assert_eq!(diagnostics.len(), 3);
        assert_eq!(diagnostics.warning_count(), 2);
        assert_eq!(diagnostics.error_count(), 1);
        assert!(diagnostics.has_errors());
    }

    #[test]
    fn display_includes_row_when_known() {
        let mut diagnostics = Diagnostics::new();
        diagnostics.error(Some(7), "empty category");
        diagnostics.warn(None, "no rows");
        let rendered: Vec<String> = diagnostics.iter().map(ToString::to_string).collect();
        assert_eq!(rendered, vec!["error (row 7): empty category", "warning: no rows"]);
    }
}
