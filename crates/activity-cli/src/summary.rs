//! Console tables shown after a conversion.

use std::path::Path;

use comfy_table::modifiers::{UTF8_ROUND_CORNERS, UTF8_SOLID_INNER_BORDERS};
use comfy_table::presets::{UTF8_FULL, UTF8_FULL_CONDENSED};
use comfy_table::{Attribute, Cell, CellAlignment, Color, ContentArrangement, Table};

use activity_core::DocumentStats;
use activity_core::stats::{FINANCIAL_SAMPLES, QUOTE_SAMPLES, Share, percent};
use activity_model::{Diagnostics, Severity};
use activity_transform::SkippedRow;

use crate::config::ConfigFile;
use crate::types::{ConvertResult, OutputTarget};

const TABLE_WIDTH: u16 = 100;

pub fn print_summary(result: &ConvertResult) {
    println!("Source: {}", result.source);
    println!("Rows read: {}", result.rows_read);
    if let Some(table) = diagnostics_table(&result.diagnostics) {
        println!("{table}");
    }
    if let Some(table) = skipped_table(&result.skipped) {
        println!("Skipped rows:");
        println!("{table}");
    }
    if let Some(stats) = &result.stats {
        println!("{}", breakdown_table(stats));
        if let Some(table) = financial_table(stats) {
            println!("{table}");
        }
        if let Some(table) = quote_table(stats) {
            println!("{table}");
        }
        println!("{}", quality_table(stats));
    }
    match &result.output {
        Some(OutputTarget::Written(written)) => {
            println!("Output: {} ({} bytes)", written.path.display(), written.bytes);
            if let Some(backup) = &written.backup {
                println!("Backup: {}", backup.display());
            }
        }
        Some(OutputTarget::DryRun { path }) => {
            println!("Dry run: nothing written (would write {})", path.display());
        }
        None => {}
    }
    if result.has_errors {
        println!(
            "Validation failed with {} error(s); no file written.",
            result.diagnostics.error_count()
        );
    }
}

/// Counts by type and top categories.
pub fn breakdown_table(stats: &DocumentStats) -> Table {
    let mut table = Table::new();
    table.set_header(vec![
        header_cell("Group"),
        header_cell("Value"),
        header_cell("Activities"),
        header_cell("Share"),
    ]);
    apply_summary_table_style(&mut table);
    align_column(&mut table, 2, CellAlignment::Right);
    align_column(&mut table, 3, CellAlignment::Right);

    for share in &stats.by_type {
        table.add_row(share_row("Type", share));
    }
    for share in &stats.top_categories {
        table.add_row(share_row("Category", share));
    }
    table.add_row(vec![
        Cell::new("TOTAL")
            .fg(Color::Cyan)
            .add_attribute(Attribute::Bold),
        dim_cell(format!(
            "{} categories, {} types",
            stats.category_count,
            stats.type_count()
        )),
        Cell::new(stats.total).add_attribute(Attribute::Bold),
        dim_cell("-"),
    ]);
    table
}

/// Financial totals per currency and the first few financial records.
pub fn financial_table(stats: &DocumentStats) -> Option<Table> {
    if stats.financial_count == 0 {
        return None;
    }
    let mut table = Table::new();
    table.set_header(vec![
        header_cell("Financial"),
        header_cell("Amount"),
        header_cell("Per"),
    ]);
    apply_table_style(&mut table);
    align_column(&mut table, 1, CellAlignment::Right);

    for (currency, total) in &stats.financial_totals {
        table.add_row(vec![
            Cell::new(format!("Total {currency}")).add_attribute(Attribute::Bold),
            Cell::new(format!("{total:.2}")).add_attribute(Attribute::Bold),
            dim_cell("-"),
        ]);
    }
    for sample in &stats.financial_samples {
        table.add_row(vec![
            Cell::new(&sample.name),
            Cell::new(format!("{} {}", sample.currency, sample.amount)),
            Cell::new(&sample.unit),
        ]);
    }
    if stats.financial_count > FINANCIAL_SAMPLES {
        table.add_row(vec![
            dim_cell(format!(
                "... and {} more",
                stats.financial_count - FINANCIAL_SAMPLES
            )),
            dim_cell(""),
            dim_cell(""),
        ]);
    }
    Some(table)
}

/// The first few quotes.
pub fn quote_table(stats: &DocumentStats) -> Option<Table> {
    if stats.quote_count == 0 {
        return None;
    }
    let mut table = Table::new();
    table.set_header(vec![header_cell("Quote"), header_cell("Author")]);
    apply_table_style(&mut table);
    for sample in &stats.quote_samples {
        table.add_row(vec![
            Cell::new(format!("\"{}\"", sample.text)),
            Cell::new(sample.author.as_deref().unwrap_or("Unknown")),
        ]);
    }
    if stats.quote_count > QUOTE_SAMPLES {
        table.add_row(vec![
            dim_cell(format!("... and {} more", stats.quote_count - QUOTE_SAMPLES)),
            dim_cell(""),
        ]);
    }
    Some(table)
}

/// Overall and data quality ratios.
pub fn quality_table(stats: &DocumentStats) -> Table {
    let mut table = Table::new();
    table.set_header(vec![
        header_cell("Statistic"),
        header_cell("Count"),
        header_cell("Share"),
    ]);
    apply_table_style(&mut table);
    align_column(&mut table, 1, CellAlignment::Right);
    align_column(&mut table, 2, CellAlignment::Right);

    let total = stats.total;
    for (label, count) in [
        ("Active", stats.active),
        ("User created", stats.user_created),
        ("Fixed age end", stats.with_age_end),
        ("With description", stats.with_description),
        ("Custom icon", stats.with_custom_icon),
    ] {
        table.add_row(vec![
            Cell::new(label),
            Cell::new(format!("{count}/{total}")),
            Cell::new(format!("{:.1}%", percent(count, total))),
        ]);
    }
    table
}

/// Rows left out of the document.
pub fn skipped_table(skipped: &[SkippedRow]) -> Option<Table> {
    if skipped.is_empty() {
        return None;
    }
    let mut table = Table::new();
    table.set_header(vec![
        header_cell("Row"),
        header_cell("Reason"),
        header_cell("Data"),
    ]);
    apply_table_style(&mut table);
    align_column(&mut table, 0, CellAlignment::Right);
    for row in skipped {
        table.add_row(vec![
            Cell::new(row.row),
            Cell::new(row.reason.to_string()).fg(Color::Red),
            dim_cell(&row.data),
        ]);
    }
    Some(table)
}

/// Warnings and errors, in the order they were raised.
pub fn diagnostics_table(diagnostics: &Diagnostics) -> Option<Table> {
    if diagnostics.is_empty() {
        return None;
    }
    let mut table = Table::new();
    table.set_header(vec![
        header_cell("Severity"),
        header_cell("Row"),
        header_cell("Message"),
    ]);
    apply_table_style(&mut table);
    align_column(&mut table, 0, CellAlignment::Center);
    align_column(&mut table, 1, CellAlignment::Right);
    for diagnostic in diagnostics {
        table.add_row(vec![
            severity_cell(diagnostic.severity),
            diagnostic.row.map_or_else(|| dim_cell("-"), Cell::new),
            Cell::new(&diagnostic.message),
        ]);
    }
    Some(table)
}

/// Effective settings, as `config show` prints them.
pub fn config_table(config: &ConfigFile, path: &Path, exists: bool) -> Table {
    let activities = &config.activities;
    let unset = || dim_cell("Not set");
    let value = |text: &str| {
        if text.trim().is_empty() {
            unset()
        } else {
            Cell::new(text)
        }
    };

    let mut table = Table::new();
    table.set_header(vec![header_cell("Setting"), header_cell("Value")]);
    apply_table_style(&mut table);
    let status = if exists { "exists" } else { "not found" };
    let rows = vec![
        ("Sheet URL", value(&activities.sheet_url)),
        ("Experiences tab", value(&activities.tabs.experiences)),
        ("Financial tab", value(&activities.tabs.financial)),
        ("Quotes tab", value(&activities.tabs.quotes)),
        ("Output filename", value(&activities.default_output.filename)),
        ("Output directory", value(&activities.default_output.directory)),
        ("Create backups", flag_cell(activities.preferences.create_backups)),
        ("Default replace", flag_cell(activities.preferences.default_replace)),
        ("Skip financial tab", flag_cell(activities.preferences.skip_financial)),
        ("Skip quotes tab", flag_cell(activities.preferences.skip_quotes)),
        (
            "Configuration file",
            Cell::new(format!("{} ({status})", path.display())),
        ),
    ];
    for (label, cell) in rows {
        table.add_row(vec![Cell::new(label).add_attribute(Attribute::Bold), cell]);
    }
    table
}

fn share_row(group: &str, share: &Share) -> Vec<Cell> {
    vec![
        dim_cell(group),
        Cell::new(capitalize(&share.label)),
        Cell::new(share.count),
        Cell::new(format!("{:.1}%", share.percent)),
    ]
}

fn capitalize(text: &str) -> String {
    let mut chars = text.chars();
    match chars.next() {
        Some(first) => first.to_uppercase().chain(chars).collect(),
        None => String::new(),
    }
}

pub fn apply_table_style(table: &mut Table) {
    table
        .load_preset(UTF8_FULL_CONDENSED)
        .apply_modifier(UTF8_ROUND_CORNERS)
        .set_content_arrangement(ContentArrangement::Dynamic)
        .set_width(TABLE_WIDTH);
}

fn apply_summary_table_style(table: &mut Table) {
    table
        .load_preset(UTF8_FULL)
        .apply_modifier(UTF8_ROUND_CORNERS)
        .apply_modifier(UTF8_SOLID_INNER_BORDERS)
        .set_content_arrangement(ContentArrangement::Dynamic)
        .set_width(TABLE_WIDTH);
}

fn align_column(table: &mut Table, index: usize, alignment: CellAlignment) {
    if let Some(column) = table.column_mut(index) {
        column.set_cell_alignment(alignment);
    }
}

fn severity_cell(severity: Severity) -> Cell {
    match severity {
        Severity::Error => Cell::new("ERROR")
            .fg(Color::Red)
            .add_attribute(Attribute::Bold),
        Severity::Warning => Cell::new("WARN").fg(Color::Yellow),
    }
}

fn flag_cell(value: bool) -> Cell {
    if value {
        Cell::new("yes").fg(Color::Green)
    } else {
        dim_cell("no")
    }
}

fn header_cell(label: &str) -> Cell {
    Cell::new(label)
        .fg(Color::Cyan)
        .add_attribute(Attribute::Bold)
}

fn dim_cell<T: ToString>(value: T) -> Cell {
    Cell::new(value).fg(Color::DarkGrey)
}
