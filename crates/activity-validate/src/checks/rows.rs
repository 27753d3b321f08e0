//! Per-row checks.

use activity_model::{ActivityType, Diagnostics, RawRow, columns};

const CURRENCY_CODE_LEN: usize = 3;

/// Checks one row, recording problems against its spreadsheet row number.
///
/// A blank name or category ends the row's checks. Only financial rows get
/// the amount and currency checks.
pub fn check(row: &RawRow, row_number: usize, diagnostics: &mut Diagnostics) {
    let Some(name) = row.text(columns::NAME) else {
        diagnostics.error(Some(row_number), "empty name");
        return;
    };
    if row.text(columns::CATEGORY).is_none() {
        diagnostics.error(Some(row_number), format!("empty category for '{name}'"));
        return;
    }

    let is_financial = row
        .text(columns::TYPE)
        .and_then(|raw| raw.parse::<ActivityType>().ok())
        == Some(ActivityType::Financial);
    if is_financial {
        check_financial(row, row_number, &name, diagnostics);
    }
}

fn check_financial(row: &RawRow, row_number: usize, name: &str, diagnostics: &mut Diagnostics) {
    match row.get(columns::AMOUNT) {
        None => diagnostics.warn(
            Some(row_number),
            format!("financial activity '{name}' missing amount"),
        ),
        Some(amount) if amount.as_f64().is_none() => {
            diagnostics.error(
                Some(row_number),
                format!("invalid amount '{amount}' for '{name}'"),
            );
            return;
        }
        Some(_) => {}
    }

    if let Some(currency) = row.text(columns::CURRENCY).map(|c| c.to_uppercase())
        && currency.chars().count() != CURRENCY_CODE_LEN
    {
        diagnostics.warn(
            Some(row_number),
            format!("currency '{currency}' for '{name}' should be a 3-letter code (e.g. USD, EUR)"),
        );
    }
}
