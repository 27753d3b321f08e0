//! Typed field access over a raw row.
//!
//! Each accessor states the type it expects, the value used when the cell is
//! absent, and what happens when the cell cannot be read as that type: either
//! a warning (the default stands) or a [`RowError`].

use activity_model::{ActivityType, Diagnostics, RawRow, parse_f64};

use crate::error::RowError;

/// Values accepted as `true` by boolean columns (compared case-insensitively).
pub const TRUTHY_VALUES: &[&str] = &["true", "yes", "1"];

/// Read-only view of one row plus where it came from.
#[derive(Debug, Clone, Copy)]
pub struct RowFields<'r> {
    row: &'r RawRow,
    row_number: Option<usize>,
}

impl<'r> RowFields<'r> {
    pub fn new(row: &'r RawRow, row_number: Option<usize>) -> Self {
        Self { row, row_number }
    }

    pub fn row_number(&self) -> Option<usize> {
        self.row_number
    }

    /// Trimmed text; absent when blank.
    pub fn text(&self, column: &str) -> Option<String> {
        self.row.text(column)
    }

    /// Trimmed text, or `default` when absent.
    pub fn text_or(&self, column: &str, default: &str) -> String {
        self.text(column).unwrap_or_else(|| default.to_string())
    }

    /// Trimmed, lowercased text.
    pub fn lowercase(&self, column: &str) -> Option<String> {
        self.text(column).map(|value| value.to_lowercase())
    }

    /// Trimmed, uppercased text, or `default` when absent.
    pub fn uppercase_or(&self, column: &str, default: &str) -> String {
        self.text(column)
            .map_or_else(|| default.to_string(), |value| value.to_uppercase())
    }

    /// Boolean column: one of [`TRUTHY_VALUES`] is true, anything else false.
    /// Absent leaves `default`.
    pub fn flag(&self, column: &str, default: bool) -> bool {
        match self.lowercase(column) {
            Some(value) => TRUTHY_VALUES.contains(&value.as_str()),
            None => default,
        }
    }

    /// Whole number. Invalid values warn and read as absent.
    pub fn integer(
        &self,
        column: &str,
        subject: &str,
        diagnostics: &mut Diagnostics,
    ) -> Option<i64> {
        let raw = self.text(column)?;
        match parse_whole_number(&raw) {
            Some(value) => Some(value),
            None => {
                diagnostics.warn(
                    self.row_number,
                    format!("invalid {column} '{raw}' for '{subject}'"),
                );
                None
            }
        }
    }

    /// Whole number that must not be negative. Invalid values warn and read as absent.
    pub fn non_negative_integer(
        &self,
        column: &str,
        subject: &str,
        diagnostics: &mut Diagnostics,
    ) -> Option<u32> {
        let raw = self.text(column)?;
        match parse_whole_number(&raw).and_then(|value| u32::try_from(value).ok()) {
            Some(value) => Some(value),
            None => {
                diagnostics.warn(
                    self.row_number,
                    format!("invalid {column} '{raw}' for '{subject}'"),
                );
                None
            }
        }
    }

    /// Finite decimal. A present value that is not a number is a row error.
    pub fn decimal(&self, column: &str) -> Result<Option<f64>, RowError> {
        let Some(cell) = self.row.get(column) else {
            return Ok(None);
        };
        match cell.as_f64() {
            Some(value) => Ok(Some(value)),
            None => Err(RowError::NotANumber {
                column: column.to_string(),
                value: cell.to_text(),
            }),
        }
    }

    /// Activity kind. Absent means experiential; unknown labels warn and fall
    /// back to experiential.
    pub fn activity_type(
        &self,
        column: &str,
        subject: &str,
        diagnostics: &mut Diagnostics,
    ) -> ActivityType {
        let Some(raw) = self.text(column) else {
            return ActivityType::default();
        };
        match raw.parse::<ActivityType>() {
            Ok(kind) => kind,
            Err(unknown) => {
                let fallback = ActivityType::default();
                diagnostics.warn(
                    self.row_number,
                    format!("{unknown} for '{subject}', defaulting to '{fallback}'"),
                );
                fallback
            }
        }
    }
}

/// Integers, plus floats with no fractional part (`"18.0"`).
fn parse_whole_number(raw: &str) -> Option<i64> {
    let trimmed = raw.trim();
    if let Ok(value) = trimmed.parse::<i64>() {
        return Some(value);
    }
    let value = parse_f64(trimmed)?;
    if value.fract() == 0.0 && value >= i64::MIN as f64 && value <= i64::MAX as f64 {
        Some(value as i64)
    } else {
        None
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn row() -> RawRow {
        RawRow::new()
            .with("age_start", "18.0")
            .with("age_end", "sixty")
            .with("negative", "-4")
            .with("is_active", "Yes")
            .with("user_created", "no")
            .with("amount", "12.50")
            .with("bad_amount", "twelve")
            .with("currency", " eur ")
            .with("type", "podcast")
    }

    #[test]
    fn integers_accept_whole_floats() {
        let row = row();
        let fields = RowFields::new(&row, Some(2));
        let mut diagnostics = Diagnostics::new();
        assert_eq!(fields.integer("age_start", "x", &mut diagnostics), Some(18));
        assert!(diagnostics.is_empty());
    }

    #[test]
    fn invalid_integers_warn_once() {
        let row = row();
        let fields = RowFields::new(&row, Some(5));
        let mut diagnostics = Diagnostics::new();
        assert_eq!(fields.integer("age_end", "Hike", &mut diagnostics), None);
        assert_eq!(
            fields.non_negative_integer("negative", "Hike", &mut diagnostics),
            None
        );
        assert_eq!(diagnostics.warning_count(), 2);
        let first = diagnostics.iter().next().unwrap();
        assert_eq!(first.row, Some(5));
        assert_eq!(first.message, "invalid age_end 'sixty' for 'Hike'");
    }

    #[test]
    fn absent_integers_are_silent() {
        let row = RawRow::new();
        let fields = RowFields::new(&row, None);
        let mut diagnostics = Diagnostics::new();
        assert_eq!(fields.integer("age_end", "x", &mut diagnostics), None);
        assert!(diagnostics.is_empty());
    }

    #[test]
    fn flags_use_truthy_set() {
        let row = row();
        let fields = RowFields::new(&row, None);
        assert!(fields.flag("is_active", false));
        assert!(!fields.flag("user_created", true));
        assert!(fields.flag("missing", true));
    }

    #[test]
    fn numeric_cells_feed_flags_and_integers() {
        let row = RawRow::new().with("is_active", 1.0).with("age_start", 21_i64);
        let fields = RowFields::new(&row, None);
        let mut diagnostics = Diagnostics::new();
        assert!(fields.flag("is_active", false));
        assert_eq!(fields.integer("age_start", "x", &mut diagnostics), Some(21));
    }

    #[test]
    fn decimals_distinguish_absent_from_invalid() {
        let row = row();
        let fields = RowFields::new(&row, None);
        assert_eq!(fields.decimal("amount"), Ok(Some(12.5)));
        assert_eq!(fields.decimal("missing"), Ok(None));
        assert_eq!(
            fields.decimal("bad_amount"),
            Err(RowError::NotANumber {
                column: "bad_amount".to_string(),
                value: "twelve".to_string(),
            })
        );
    }

    #[test]
    fn uppercase_trims_and_defaults() {
        let row = row();
        let fields = RowFields::new(&row, None);
        assert_eq!(fields.uppercase_or("currency", "USD"), "EUR");
        assert_eq!(fields.uppercase_or("missing", "USD"), "USD");
    }

    #[test]
    fn unknown_type_warns_and_falls_back() {
        let row = row();
        let fields = RowFields::new(&row, Some(9));
        let mut diagnostics = Diagnostics::new();
        assert_eq!(
            fields.activity_type("type", "Podcast", &mut diagnostics),
            ActivityType::Experiential
        );
        assert_eq!(diagnostics.warning_count(), 1);
        assert_eq!(
            fields.activity_type("absent", "Podcast", &mut diagnostics),
            ActivityType::Experiential
        );
        assert_eq!(diagnostics.warning_count(), 1);
    }
}
