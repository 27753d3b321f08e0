use std::path::Path;

use activity_cli::config::ConfigFile;
use activity_cli::summary::{breakdown_table, config_table, diagnostics_table, quality_table};
use activity_core::DocumentStats;
use activity_core::stats::Share;
use activity_model::Diagnostics;

fn stats() -> DocumentStats {
    DocumentStats {
        total: 4,
        by_type: vec![
            Share {
                label: "experiential".into(),
                count: 3,
                percent: 75.0,
            },
            Share {
                label: "financial".into(),
                count: 1,
                percent: 25.0,
            },
        ],
        category_count: 2,
        active: 4,
        ..DocumentStats::default()
    }
}

#[test]
fn breakdown_lists_types_and_total() {
    let rendered = breakdown_table(&stats()).to_string();
    assert!(rendered.contains("Experiential"));
    assert!(rendered.contains("75.0%"));
    assert!(rendered.contains("TOTAL"));
    assert!(rendered.contains("2 categories, 2 types"));
}

#[test]
fn quality_reports_ratios() {
    let rendered = quality_table(&stats()).to_string();
    assert!(rendered.contains("4/4"));
    assert!(rendered.contains("100.0%"));
    assert!(rendered.contains("0/4"));
}

#[test]
fn diagnostics_show_row_numbers() {
    let mut diagnostics = Diagnostics::new();
    diagnostics.warn(Some(7), "unparseable frequency 'sometimes'");
    diagnostics.error(None, "missing required columns: category");
    let rendered = diagnostics_table(&diagnostics).unwrap().to_string();
    assert!(rendered.contains("WARN"));
    assert!(rendered.contains("ERROR"));
    assert!(rendered.contains("7"));
    assert!(rendered.contains("missing required columns: category"));
}

#[test]
fn config_table_marks_unset_values() {
    let rendered =
        config_table(&ConfigFile::default(), Path::new("config.json"), false).to_string();
    assert!(rendered.contains("Not set"));
    assert!(rendered.contains("config.json (not found)"));
    assert!(rendered.contains("imported-activities.json"));
}
