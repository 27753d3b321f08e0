//! Header checks.
//!
//! A missing required column is fatal: rows are not inspected at all.

use activity_model::{OPTIONAL_COLUMNS, REQUIRED_COLUMNS, RawDataset};

use crate::report::ColumnReport;

/// Sorts the dataset's header against the known columns.
pub fn check(dataset: &RawDataset) -> ColumnReport {
    let partition = |known: &[&str]| -> (Vec<String>, Vec<String>) {
        known
            .iter()
            .map(|column| (*column).to_string())
            .partition(|column| dataset.has_column(column))
    };
    let (_, missing_required) = partition(REQUIRED_COLUMNS);
    let (available_optional, missing_optional) = partition(OPTIONAL_COLUMNS);
    let unrecognized = dataset
        .columns
        .iter()
        .filter(|column| !is_known(column))
        .cloned()
        .collect();

    ColumnReport {
        available: dataset.columns.clone(),
        missing_required,
        available_optional,
        missing_optional,
        unrecognized,
    }
}

fn is_known(column: &str) -> bool {
    REQUIRED_COLUMNS.contains(&column) || OPTIONAL_COLUMNS.contains(&column)
}

#[cfg(test)]
mod tests {
    use super::*;

    fn dataset(columns: &[&str]) -> RawDataset {
        RawDataset::new(columns.iter().map(|c| (*c).to_string()).collect())
    }

    #[test]
    fn reports_missing_required_in_declared_order() {
        let report = check(&dataset(&["type", "amount"]));
        assert_eq!(report.missing_required, vec!["name", "category"]);
        assert_eq!(report.available_optional, vec!["type", "amount"]);
    }

    #[test]
    fn flags_unrecognized_columns() {
        let report = check(&dataset(&["name", "category", "notes", "Owner"]));
        assert!(report.missing_required.is_empty());
        assert_eq!(report.unrecognized, vec!["notes", "Owner"]);
        assert_eq!(report.missing_optional.len(), OPTIONAL_COLUMNS.len());
    }
}
