use activity_model::{RawDataset, RawRow, Severity};
use activity_validate::validate;

fn columns(names: &[&str]) -> Vec<String> {
    names.iter().map(|name| (*name).to_string()).collect()
}

#[test]
fn missing_required_column_fails_without_row_checks() {
    let dataset = RawDataset::with_rows(
        columns(&["name", "type"]),
        vec![RawRow::new().with("type", "financial").with("amount", "x")],
    );
    let report = validate(&dataset);
    assert!(!report.ok);
    assert_eq!(report.rows_checked, 0);
    assert_eq!(report.error_count(), 1);
    assert_eq!(report.columns.missing_required, vec!["category"]);
    let only = report.diagnostics.iter().next().unwrap();
    assert_eq!(only.row, None);
    assert!(only.message.contains("category"));
}

#[test]
fn all_row_errors_are_aggregated() {
    let dataset = RawDataset::with_rows(
        columns(&["name", "category", "type", "amount"]),
        vec![
            RawRow::new().with("name", "Coffee").with("category", "routine"),
            RawRow::new().with("category", "routine"),
            RawRow::new().with("name", "Walk"),
            RawRow::new()
                .with("name", "Rent")
                .with("category", "housing")
                .with("type", "financial")
                .with("amount", "twelve"),
        ],
    );
    let report = validate(&dataset);
    assert!(!report.ok);
    assert_eq!(report.rows_checked, 4);

    let errors: Vec<_> = report
        .diagnostics
        .iter()
        .filter(|d| d.severity == Severity::Error)
        .map(|d| d.row)
        .collect();
    assert_eq!(errors, vec![Some(3), Some(4), Some(5)]);
}

#[test]
fn warnings_alone_do_not_fail_the_batch() {
    let dataset = RawDataset::with_rows(
        columns(&["name", "category", "type", "currency", "notes"]),
        vec![
            RawRow::new()
                .with("name", "Insurance")
                .with("category", "insurance")
                .with("type", "financial")
                .with("currency", "us"),
        ],
    );
    let report = validate(&dataset);
    assert!(report.ok);
    // Missing amount plus the short currency code.
    assert_eq!(report.warning_count(), 2);
    assert_eq!(report.columns.unrecognized, vec!["notes"]);
}

#[test]
fn empty_dataset_with_valid_header_passes() {
    let report = validate(&RawDataset::new(columns(&["name", "category"])));
    assert!(report.ok);
    assert!(report.diagnostics.is_empty());
}

#[test]
fn report_serializes_for_machine_output() {
    let dataset = RawDataset::with_rows(
        columns(&["name", "category"]),
        vec![RawRow::new().with("name", "Nap")],
    );
    let value = serde_json::to_value(validate(&dataset)).unwrap();
    assert_eq!(value["ok"], false);
    assert_eq!(value["diagnostics"][0]["severity"], "error");
    assert_eq!(value["diagnostics"][0]["row"], 2);
}
