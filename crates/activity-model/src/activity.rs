//! Normalized activity records.

use std::fmt;
use std::str::FromStr;

use chrono::NaiveDateTime;
use serde::{Deserialize, Serialize};

/// Tag written to `metadata.source` for records and documents built from sheets.
pub const IMPORT_SOURCE: &str = "csv_import";

/// Kind of activity. Unknown values fall back to [`ActivityType::Experiential`].
#[derive(
    Debug, Clone, Copy, Default, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize, Deserialize,
)]
#[serde(rename_all = "lowercase")]
pub enum ActivityType {
    #[default]
    Experiential,
    Financial,
    Quote,
}

impl ActivityType {
    pub const ALL: [ActivityType; 3] = [Self::Experiential, Self::Financial, Self::Quote];

    pub fn as_str(self) -> &'static str {
        match self {
            Self::Experiential => "experiential",
            Self::Financial => "financial",
            Self::Quote => "quote",
        }
    }

    /// How the downstream app renders this kind of activity.
    pub fn display_format(self) -> DisplayFormat {
        match self {
            Self::Experiential => DisplayFormat::Occurrences,
            Self::Financial => DisplayFormat::Currency,
            Self::Quote => DisplayFormat::Text,
        }
    }
}

impl fmt::Display for ActivityType {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

/// Error returned when a type label is not one of the known kinds.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct UnknownActivityType(pub String);

impl fmt::Display for UnknownActivityType {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "unknown activity type '{}'", self.0)
    }
}

impl std::error::Error for UnknownActivityType {}

impl FromStr for ActivityType {
    type Err = UnknownActivityType;

    /// Case-insensitive, surrounding whitespace ignored.
    fn from_str(s: &str) -> Result<Self, Self::Err> {
        let normalized = s.trim().to_lowercase();
        Self::ALL
            .into_iter()
            .find(|kind| kind.as_str() == normalized)
            .ok_or(UnknownActivityType(normalized))
    }
}

#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum Period {
    #[default]
    Year,
}

/// Recurrence, always expressed as a count per year.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub struct Frequency {
    pub times: u32,
    pub period: Period,
}

impl Frequency {
    pub const fn per_year(times: u32) -> Self {
        Self {
            times,
            period: Period::Year,
        }
    }
}

impl Default for Frequency {
    fn default() -> Self {
        Self::per_year(1)
    }
}

impl fmt::Display for Frequency {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self.period {
            Period::Year => write!(f, "{}/year", self.times),
        }
    }
}

/// Ages during which an activity applies.
///
/// `flexible_end` is true exactly when `end` is absent; use [`AgeRange::set_end`]
/// to keep the two in step.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub struct AgeRange {
    pub start: u32,
    pub end: Option<i64>,
    pub flexible_end: bool,
}

impl AgeRange {
    pub fn set_end(&mut self, end: i64) {
        self.end = Some(end);
        self.flexible_end = false;
    }
}

impl Default for AgeRange {
    fn default() -> Self {
        Self {
            start: 0,
            end: None,
            flexible_end: true,
        }
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum DisplayFormat {
    Occurrences,
    Currency,
    Text,
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct DisplayInfo {
    pub icon: String,
    /// Hex color, e.g. `#4A90E2`.
    pub color: String,
    pub format: DisplayFormat,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct FinancialPayload {
    pub amount: f64,
    pub unit: String,
    /// Three-letter code, uppercased.
    pub currency: String,
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct QuotePayload {
    pub text: String,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub author: Option<String>,
}

impl QuotePayload {
    /// Splits `"text - author"` once from the right. Without the separator the
    /// whole string is the text.
    pub fn from_description(description: &str) -> Self {
        match description.rsplit_once(" - ") {
            Some((text, author)) => Self {
                text: text.to_string(),
                author: Some(author.to_string()),
            },
            None => Self {
                text: description.to_string(),
                author: None,
            },
        }
    }
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct RecordMetadata {
    pub user_created: bool,
    pub is_active: bool,
    pub created_at: NaiveDateTime,
    pub source: String,
}

/// One normalized activity, built once per input row.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct ActivityRecord {
    pub id: String,
    pub name: String,
    #[serde(rename = "type")]
    pub activity_type: ActivityType,
    pub category: String,
    pub frequency: Frequency,
    pub age_range: AgeRange,
    pub display: DisplayInfo,
    pub metadata: RecordMetadata,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub description: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub financial: Option<FinancialPayload>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub quote: Option<QuotePayload>,
}

/// Derives a record id from a display name.
///
/// Lowercases, keeps word characters, whitespace and hyphens, then joins the
/// remaining words with underscores: `"Morning Coffee ☕"` becomes
/// `"morning_coffee"`.
pub fn generate_id(name: &str) -> String {
    let lowered = name.trim().to_lowercase();
    let kept: String = lowered
        .chars()
        .filter(|ch| ch.is_alphanumeric() || *ch == '_' || *ch == '-' || ch.is_whitespace())
        .collect();
    let mut id = String::with_capacity(kept.len());
    let mut in_separator = false;
    for ch in kept.trim_matches(|c: char| c == '-' || c.is_whitespace()).chars() {
        if ch == '-' || ch.is_whitespace() {
            if !in_separator {
                id.push('_');
                in_separator = true;
            }
        } else {
            id.push(ch);
            in_separator = false;
        }
    }
    id
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn ids_join_words_with_underscores() {
        assert_eq!(generate_id("Morning Coffee ☕"), "morning_coffee");
        assert_eq!(generate_id("  Read - a  Book "), "read_a_book");
        assert_eq!(generate_id("Car-Insurance (annual)"), "car_insurance_annual");
        assert_eq!(generate_id("snake_case_name"), "snake_case_name");
        assert_eq!(generate_id("Café au lait"), "café_au_lait");
    }

    #[test]
    fn activity_type_parses_case_insensitively() {
        assert_eq!(" Financial ".parse::<ActivityType>(), Ok(ActivityType::Financial));
        assert_eq!("QUOTE".parse::<ActivityType>(), Ok(ActivityType::Quote));
        assert_eq!(
            "hobby".parse::<ActivityType>(),
            Err(UnknownActivityType("hobby".to_string()))
        );
    }

    #[test]
    fn quote_splits_on_last_separator() {
        let quote = QuotePayload::from_description("Less - is - more - Mies");
        assert_eq!(quote.text, "Less - is - more");
        assert_eq!(quote.author.as_deref(), Some("Mies"));

        let bare = QuotePayload::from_description("Carpe diem");
        assert_eq!(bare.text, "Carpe diem");
        assert_eq!(bare.author, None);
    }

    #[test]
    fn age_range_end_clears_flexible_flag() {
        let mut range = AgeRange::default();
        assert!(range.flexible_end);
        range.set_end(65);
        assert_eq!(range.end, Some(65));
        assert!(!range.flexible_end);
    }

    #[test]
    fn frequency_displays_as_annual_rate() {
        assert_eq!(Frequency::per_year(52).to_string(), "52/year");
    }
}
