//! Raw tabular input as read from a sheet export or a local CSV file.
//!
//! Cells are loosely typed: a value may be text, a number or a boolean, and
//! anything blank or NaN-like is absent. Absence is explicit (`None`), there
//! is no sentinel value standing in for a missing cell.

use std::collections::BTreeMap;
use std::fmt;

/// Known column names.
pub mod columns {
    pub const NAME: &str = "name";
    pub const CATEGORY: &str = "category";
    pub const TYPE: &str = "type";
    pub const FREQUENCY: &str = "frequency";
    pub const AMOUNT: &str = "amount";
    pub const UNIT: &str = "unit";
    pub const CURRENCY: &str = "currency";
    pub const DESCRIPTION: &str = "description";
    pub const ICON: &str = "icon";
    pub const AGE_START: &str = "age_start";
    pub const AGE_END: &str = "age_end";
    pub const COLOR: &str = "color";
    pub const IS_ACTIVE: &str = "is_active";
    pub const USER_CREATED: &str = "user_created";
}

/// Columns every dataset must carry.
pub const REQUIRED_COLUMNS: &[&str] = &[columns::NAME, columns::CATEGORY];

/// Columns that are understood but may be absent.
pub const OPTIONAL_COLUMNS: &[&str] = &[
    columns::DESCRIPTION,
    columns::ICON,
    columns::AGE_START,
    columns::AGE_END,
    columns::COLOR,
    columns::IS_ACTIVE,
    columns::USER_CREATED,
    columns::TYPE,
    columns::FREQUENCY,
    columns::AMOUNT,
    columns::UNIT,
    columns::CURRENCY,
];

/// Offset between a zero-based row index and the spreadsheet row number
/// (one for the header, one for 1-based numbering).
pub const HEADER_ROW_OFFSET: usize = 2;

/// Cell contents treated as missing, matching common spreadsheet exports.
const MISSING_MARKERS: &[&str] = &[
    "", "#N/A", "#N/A N/A", "#NA", "-1.#IND", "-1.#QNAN", "-NaN", "-nan", "1.#IND", "1.#QNAN",
    "<NA>", "N/A", "NA", "NULL", "NaN", "None", "n/a", "nan", "null",
];

/// Returns true when a raw cell should be read as absent.
pub fn is_missing_value(raw: &str) -> bool {
    MISSING_MARKERS.contains(&raw.trim())
}

/// Formats a floating-point number without trailing zeros.
pub fn format_numeric(v: f64) -> String {
    let s = format!("{v}");
    if s.contains('.') {
        s.trim_end_matches('0').trim_end_matches('.').to_string()
    } else {
        s
    }
}

/// Parses a finite f64, returning None for blank, invalid or non-finite input.
pub fn parse_f64(value: &str) -> Option<f64> {
    let trimmed = value.trim();
    if trimmed.is_empty() {
        return None;
    }
    trimmed.parse::<f64>().ok().filter(|v| v.is_finite())
}

/// A single present cell value.
#[derive(Debug, Clone, PartialEq)]
pub enum CellValue {
    Text(String),
    Number(f64),
    Boolean(bool),
}

impl CellValue {
    /// Builds a cell from raw text, or None when the text is a missing marker.
    pub fn from_raw(raw: &str) -> Option<Self> {
        if is_missing_value(raw) {
            None
        } else {
            Some(Self::Text(raw.trim().to_string()))
        }
    }

    /// String form of the value, the way a spreadsheet would display it.
    pub fn to_text(&self) -> String {
        match self {
            Self::Text(text) => text.clone(),
            Self::Number(v) => format_numeric(*v),
            Self::Boolean(b) => if *b { "true" } else { "false" }.to_string(),
        }
    }

    /// Numeric view of the value. Booleans are not numbers.
    pub fn as_f64(&self) -> Option<f64> {
        match self {
            Self::Text(text) => parse_f64(text),
            Self::Number(v) => Some(*v).filter(|v| v.is_finite()),
            Self::Boolean(_) => None,
        }
    }

    fn is_present(&self) -> bool {
        match self {
            Self::Text(text) => !is_missing_value(text),
            Self::Number(v) => !v.is_nan(),
            Self::Boolean(_) => true,
        }
    }
}

impl fmt::Display for CellValue {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&self.to_text())
    }
}

impl From<&str> for CellValue {
    fn from(value: &str) -> Self {
        Self::Text(value.to_string())
    }
}

impl From<String> for CellValue {
    fn from(value: String) -> Self {
        Self::Text(value)
    }
}

impl From<f64> for CellValue {
    fn from(value: f64) -> Self {
        Self::Number(value)
    }
}

impl From<i64> for CellValue {
    fn from(value: i64) -> Self {
        Self::Number(value as f64)
    }
}

impl From<bool> for CellValue {
    fn from(value: bool) -> Self {
        Self::Boolean(value)
    }
}

/// One input row: column name to present cell value.
///
/// Columns that are missing from the source and cells that are blank look the
/// same from the outside: both read as `None`.
#[derive(Debug, Clone, Default, PartialEq)]
pub struct RawRow {
    cells: BTreeMap<String, CellValue>,
}

impl RawRow {
    pub fn new() -> Self {
        Self::default()
    }

    /// Builder-style setter used by tests and programmatic callers.
    #[must_use]
    pub fn with(mut self, column: &str, value: impl Into<CellValue>) -> Self {
        self.set(column, Some(value.into()));
        self
    }

    /// Stores a cell. Absent and NaN-like values clear the column.
    pub fn set(&mut self, column: &str, value: Option<CellValue>) {
        match value.filter(CellValue::is_present) {
            Some(value) => {
                self.cells.insert(column.to_string(), value);
            }
            None => {
                self.cells.remove(column);
            }
        }
    }

    pub fn get(&self, column: &str) -> Option<&CellValue> {
        self.cells.get(column)
    }

    /// Trimmed text of a present, non-blank cell.
    pub fn text(&self, column: &str) -> Option<String> {
        let text = self.cells.get(column)?.to_text();
        let trimmed = text.trim();
        if trimmed.is_empty() {
            None
        } else {
            Some(trimmed.to_string())
        }
    }

    pub fn is_present(&self, column: &str) -> bool {
        self.text(column).is_some()
    }

    pub fn iter(&self) -> impl Iterator<Item = (&str, &CellValue)> {
        self.cells.iter().map(|(k, v)| (k.as_str(), v))
    }
}

impl fmt::Display for RawRow {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str("{")?;
        for (idx, (column, value)) in self.cells.iter().enumerate() {
            if idx > 0 {
                f.write_str(", ")?;
            }
            write!(f, "{column}: {:?}", value.to_text())?;
        }
        f.write_str("}")
    }
}

/// A full input table: ordered column names plus rows in source order.
#[derive(Debug, Clone, Default, PartialEq)]
pub struct RawDataset {
    pub columns: Vec<String>,
    pub rows: Vec<RawRow>,
}

impl RawDataset {
    pub fn new(columns: Vec<String>) -> Self {
        Self {
            columns,
            rows: Vec::new(),
        }
    }

    pub fn with_rows(columns: Vec<String>, rows: Vec<RawRow>) -> Self {
        Self { columns, rows }
    }

    pub fn push_row(&mut self, row: RawRow) {
        self.rows.push(row);
    }

    pub fn has_column(&self, column: &str) -> bool {
        self.columns.iter().any(|c| c == column)
    }

    pub fn len(&self) -> usize {
        self.rows.len()
    }

    pub fn is_empty(&self) -> bool {
        self.rows.is_empty()
    }

    /// Rows paired with their spreadsheet row number.
    pub fn numbered_rows(&self) -> impl Iterator<Item = (usize, &RawRow)> {
        self.rows
            .iter()
            .enumerate()
            .map(|(idx, row)| (row_number(idx), row))
    }

    /// Forces a constant value into one column for every row.
    pub fn set_column(&mut self, column: &str, value: &str) {
        if !self.has_column(column) {
            self.columns.push(column.to_string());
        }
        for row in &mut self.rows {
            row.set(column, CellValue::from_raw(value));
        }
    }

    /// Appends another dataset, keeping the ordered union of columns.
    pub fn append(&mut self, other: RawDataset) {
        for column in other.columns {
            if !self.has_column(&column) {
                self.columns.push(column);
            }
        }
        self.rows.extend(other.rows);
    }
}

/// Spreadsheet row number for a zero-based data row index.
pub fn row_number(index: usize) -> usize {
    index + HEADER_ROW_OFFSET
}
