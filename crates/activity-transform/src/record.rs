//! Row-to-record normalization.

use chrono::{Local, NaiveDateTime};
use tracing::debug;

use activity_model::{
    ActivityRecord, ActivityType, AgeRange, Diagnostics, DisplayInfo, FinancialPayload, Frequency,
    IMPORT_SOURCE, QuotePayload, RawRow, RecordMetadata, columns, generate_id, row_number,
};

use crate::error::RowError;
use crate::fields::RowFields;
use crate::frequency::{DEFAULT_FREQUENCY, normalize_frequency};
use crate::styles::CategoryStyles;

/// Unit used when a financial row does not name one.
pub const DEFAULT_UNIT: &str = "occurrence";

/// Currency used when a financial row does not name one.
pub const DEFAULT_CURRENCY: &str = "USD";

/// Recurrence given to quotes without a frequency: an annual reminder.
pub const QUOTE_FREQUENCY: Frequency = Frequency::per_year(1);

/// What became of one input row.
#[derive(Debug, Clone, PartialEq)]
pub enum RowOutcome {
    Normalized(ActivityRecord),
    Skipped(SkippedRow),
}

/// A row left out of the output, with enough context to find and fix it.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct SkippedRow {
    /// Spreadsheet row number.
    pub row: usize,
    pub reason: RowError,
    /// The row's cells, rendered for the report.
    pub data: String,
}

/// Builds [`ActivityRecord`]s from raw rows.
///
/// Category styles are injected; the normalizer never mutates them.
#[derive(Debug, Clone)]
pub struct RecordNormalizer {
    styles: CategoryStyles,
    source: String,
    timestamp: Option<NaiveDateTime>,
}

impl Default for RecordNormalizer {
    fn default() -> Self {
        Self::new(CategoryStyles::default())
    }
}

impl RecordNormalizer {
    pub fn new(styles: CategoryStyles) -> Self {
        Self {
            styles,
            source: IMPORT_SOURCE.to_string(),
            timestamp: None,
        }
    }

    /// Tag written to each record's `metadata.source`.
    #[must_use]
    pub fn with_source(mut self, source: impl Into<String>) -> Self {
        self.source = source.into();
        self
    }

    /// Pins `metadata.created_at` instead of reading the clock per record.
    #[must_use]
    pub fn with_timestamp(mut self, timestamp: NaiveDateTime) -> Self {
        self.timestamp = Some(timestamp);
        self
    }

    pub fn styles(&self) -> &CategoryStyles {
        &self.styles
    }

    /// Normalizes the row at `index` (zero-based data row) into an outcome.
    pub fn normalize(
        &self,
        index: usize,
        row: &RawRow,
        diagnostics: &mut Diagnostics,
    ) -> RowOutcome {
        let number = row_number(index);
        match self.build_record(row, Some(number), diagnostics) {
            Ok(record) => RowOutcome::Normalized(record),
            Err(reason) => {
                diagnostics.warn(Some(number), format!("skipped row: {reason}"));
                RowOutcome::Skipped(SkippedRow {
                    row: number,
                    reason,
                    data: row.to_string(),
                })
            }
        }
    }

    /// Converts one row into a record.
    ///
    /// Missing optional columns are fine and malformed optional values fall
    /// back to defaults with a warning. Errors are limited to a blank name or
    /// category and a financial amount that is not a number.
    pub fn build_record(
        &self,
        row: &RawRow,
        row_number: Option<usize>,
        diagnostics: &mut Diagnostics,
    ) -> Result<ActivityRecord, RowError> {
        let fields = RowFields::new(row, row_number);
        let name = fields.text(columns::NAME).ok_or_else(|| missing(columns::NAME))?;
        let category = fields
            .lowercase(columns::CATEGORY)
            .ok_or_else(|| missing(columns::CATEGORY))?;
        let activity_type = fields.activity_type(columns::TYPE, &name, diagnostics);

        let frequency = match (activity_type, fields.text(columns::FREQUENCY)) {
            (ActivityType::Quote, None) => QUOTE_FREQUENCY,
            (_, raw) => normalize_frequency(
                raw.as_deref().unwrap_or(DEFAULT_FREQUENCY),
                row_number,
                diagnostics,
            ),
        };

        let mut record = ActivityRecord {
            id: generate_id(&name),
            activity_type,
            frequency,
            age_range: AgeRange::default(),
            display: DisplayInfo {
                icon: self.styles.icon(&category).to_string(),
                color: self.styles.color(&category).to_string(),
                format: activity_type.display_format(),
            },
            metadata: RecordMetadata {
                user_created: true,
                is_active: true,
                created_at: self.timestamp.unwrap_or_else(|| Local::now().naive_local()),
                source: self.source.clone(),
            },
            description: None,
            financial: None,
            quote: None,
            name,
            category,
        };

        match activity_type {
            ActivityType::Financial => {
                record.financial = financial_payload(&fields, &record.name, diagnostics)?;
            }
            ActivityType::Quote => {
                if let Some(description) = fields.text(columns::DESCRIPTION) {
                    record.quote = Some(QuotePayload::from_description(&description));
                    record.description = Some(description);
                }
            }
            ActivityType::Experiential => {}
        }

        if activity_type != ActivityType::Quote {
            record.description = fields.text(columns::DESCRIPTION);
        }
        if let Some(icon) = fields.text(columns::ICON) {
            record.display.icon = icon;
        }
        if let Some(start) =
            fields.non_negative_integer(columns::AGE_START, &record.name, diagnostics)
        {
            record.age_range.start = start;
        }
        if let Some(end) = fields.integer(columns::AGE_END, &record.name, diagnostics) {
            record.age_range.set_end(end);
        }
        if let Some(color) = fields.text(columns::COLOR) {
            record.display.color = color;
        }
        record.metadata.is_active = fields.flag(columns::IS_ACTIVE, true);
        record.metadata.user_created = fields.flag(columns::USER_CREATED, true);

        debug!(
            id = %record.id,
            activity_type = %record.activity_type,
            category = %record.category,
            "normalized row"
        );
        Ok(record)
    }
}

fn missing(column: &str) -> RowError {
    RowError::MissingField {
        column: column.to_string(),
    }
}

/// Amount, unit and currency for a financial row; absent amount warns and
/// yields no payload.
fn financial_payload(
    fields: &RowFields<'_>,
    name: &str,
    diagnostics: &mut Diagnostics,
) -> Result<Option<FinancialPayload>, RowError> {
    let Some(amount) = fields.decimal(columns::AMOUNT)? else {
        diagnostics.warn(
            fields.row_number(),
            format!("financial activity '{name}' missing amount data"),
        );
        return Ok(None);
    };
    Ok(Some(FinancialPayload {
        amount,
        unit: fields.text_or(columns::UNIT, DEFAULT_UNIT),
        currency: fields.uppercase_or(columns::CURRENCY, DEFAULT_CURRENCY),
    }))
}

#[cfg(test)]
mod tests {
    use super::*;

    use activity_model::DisplayFormat;
    use chrono::NaiveDate;

    fn normalizer() -> RecordNormalizer {
        let timestamp = NaiveDate::from_ymd_opt(2024, 1, 1)
            .and_then(|date| date.and_hms_opt(0, 0, 0))
            .unwrap();
        RecordNormalizer::default().with_timestamp(timestamp)
    }

    fn build(row: &RawRow) -> (ActivityRecord, Diagnostics) {
        let mut diagnostics = Diagnostics::new();
        let record = normalizer()
            .build_record(row, Some(2), &mut diagnostics)
            .unwrap();
        (record, diagnostics)
    }

    #[test]
    fn untyped_row_is_experiential() {
        let row = RawRow::new()
            .with("name", "Morning Coffee ☕")
            .with("category", "Routine");
        let (record, diagnostics) = build(&row);
        assert_eq!(record.id, "morning_coffee");
        assert_eq!(record.name, "Morning Coffee ☕");
        assert_eq!(record.category, "routine");
        assert_eq!(record.activity_type, ActivityType::Experiential);
        assert_eq!(record.display.format, DisplayFormat::Occurrences);
        assert_eq!(record.display.icon, "☕");
        assert_eq!(record.display.color, "#4A90E2");
        assert_eq!(record.frequency, Frequency::per_year(1));
        assert_eq!(
            record.age_range,
            AgeRange {
                start: 0,
                end: None,
                flexible_end: true
            }
        );
        assert!(record.metadata.is_active);
        assert!(record.metadata.user_created);
        assert_eq!(record.metadata.source, "csv_import");
        assert!(diagnostics.is_empty());
    }

    #[test]
    fn financial_row_gets_payload() {
        let row = RawRow::new()
            .with("name", "Netflix")
            .with("category", "subscriptions")
            .with("type", "financial")
            .with("amount", "15.99")
            .with("currency", "usd");
        let (record, _) = build(&row);
        assert_eq!(
            record.financial,
            Some(FinancialPayload {
                amount: 15.99,
                unit: "occurrence".to_string(),
                currency: "USD".to_string(),
            })
        );
        assert_eq!(record.display.format, DisplayFormat::Currency);
    }

    #[test]
    fn financial_row_without_amount_warns() {
        let row = RawRow::new()
            .with("name", "Rent")
            .with("category", "housing")
            .with("type", "financial");
        let (record, diagnostics) = build(&row);
        assert_eq!(record.financial, None);
        assert_eq!(diagnostics.warning_count(), 1);
    }

    #[test]
    fn financial_row_with_bad_amount_is_an_error() {
        let row = RawRow::new()
            .with("name", "Rent")
            .with("category", "housing")
            .with("type", "financial")
            .with("amount", "lots");
        let mut diagnostics = Diagnostics::new();
        let result = normalizer().build_record(&row, Some(4), &mut diagnostics);
        assert!(matches!(result, Err(RowError::NotANumber { .. })));
    }

    #[test]
    fn quote_row_splits_author() {
        let row = RawRow::new()
            .with("name", "Inspiration")
            .with("category", "reflection")
            .with("type", "quote")
            .with("description", "Stay hungry - Steve Jobs");
        let (record, _) = build(&row);
        assert_eq!(
            record.quote,
            Some(QuotePayload {
                text: "Stay hungry".to_string(),
                author: Some("Steve Jobs".to_string()),
            })
        );
        assert_eq!(record.description.as_deref(), Some("Stay hungry - Steve Jobs"));
        assert_eq!(record.frequency, QUOTE_FREQUENCY);
        assert_eq!(record.display.format, DisplayFormat::Text);
    }

    #[test]
    fn quote_row_honours_explicit_frequency() {
        let row = RawRow::new()
            .with("name", "Mantra")
            .with("category", "reflection")
            .with("type", "quote")
            .with("frequency", "monthly");
        let (record, _) = build(&row);
        assert_eq!(record.frequency, Frequency::per_year(12));
        assert_eq!(record.quote, None);
    }

    #[test]
    fn age_end_alone_fixes_the_range() {
        let row = RawRow::new()
            .with("name", "Little League")
            .with("category", "exercise")
            .with("age_end", "12");
        let (record, _) = build(&row);
        assert_eq!(
            record.age_range,
            AgeRange {
                start: 0,
                end: Some(12),
                flexible_end: false
            }
        );
    }

    #[test]
    fn invalid_ages_keep_defaults() {
        let row = RawRow::new()
            .with("name", "Travel")
            .with("category", "travel")
            .with("age_start", "teen")
            .with("age_end", "old");
        let (record, diagnostics) = build(&row);
        assert_eq!(record.age_range, AgeRange::default());
        assert_eq!(diagnostics.warning_count(), 2);
    }

    #[test]
    fn overrides_replace_derived_display() {
        let row = RawRow::new()
            .with("name", "Tea")
            .with("category", "routine")
            .with("icon", "🍵")
            .with("color", "#00FF00")
            .with("is_active", "no")
            .with("user_created", "FALSE")
            .with("description", "  Green tea  ");
        let (record, _) = build(&row);
        assert_eq!(record.display.icon, "🍵");
        assert_eq!(record.display.color, "#00FF00");
        assert!(!record.metadata.is_active);
        assert!(!record.metadata.user_created);
        assert_eq!(record.description.as_deref(), Some("Green tea"));
    }

    #[test]
    fn unknown_type_and_frequency_degrade() {
        let row = RawRow::new()
            .with("name", "Podcast")
            .with("category", "learning")
            .with("type", "audio")
            .with("frequency", "now and then");
        let (record, diagnostics) = build(&row);
        assert_eq!(record.activity_type, ActivityType::Experiential);
        assert_eq!(record.frequency, Frequency::per_year(1));
        assert_eq!(diagnostics.warning_count(), 2);
    }

    #[test]
    fn normalize_reports_skipped_rows() {
        let row = RawRow::new().with("category", "food");
        let mut diagnostics = Diagnostics::new();
        let outcome = normalizer().normalize(3, &row, &mut diagnostics);
        let RowOutcome::Skipped(skipped) = outcome else {
            panic!("expected skipped row");
        };
        assert_eq!(skipped.row, 5);
        assert_eq!(
            skipped.reason,
            RowError::MissingField {
                column: "name".to_string()
            }
        );
        assert_eq!(skipped.data, "{category: \"food\"}");
    }
}
