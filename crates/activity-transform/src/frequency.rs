//! Free-text recurrence parsing.
//!
//! Every recurrence is collapsed to an annual rate so downstream comparisons
//! only ever deal with one unit.

use std::sync::LazyLock;

use regex::Regex;

use activity_model::{Diagnostics, Frequency};

/// `<count> / <unit>`, anchored at the start; trailing text is ignored.
static COUNT_PER_PERIOD: LazyLock<Regex> = LazyLock::new(|| {
    Regex::new(r"^([0-9]+)\s*/\s*(year|month|week|day)").expect("Invalid frequency regex")
});

/// Plain-language phrases and their annual counts.
const PHRASES: &[(&str, u32)] = &[
    ("daily", 365),
    ("everyday", 365),
    ("every day", 365),
    ("weekly", 52),
    ("every week", 52),
    ("monthly", 12),
    ("every month", 12),
    ("yearly", 1),
    ("annually", 1),
    ("every year", 1),
];

/// Raw string used when a row has no frequency.
pub const DEFAULT_FREQUENCY: &str = "1/year";

fn annual_factor(unit: &str) -> Option<u32> {
    match unit {
        "day" => Some(365),
        "week" => Some(52),
        "month" => Some(12),
        "year" => Some(1),
        _ => None,
    }
}

/// Parses a recurrence description, or None when it is not recognized.
///
/// A zero count, or a count that overflows once scaled to a year, is not
/// recognized.
pub fn parse_frequency(raw: &str) -> Option<Frequency> {
    let normalized = raw.trim().to_lowercase();

    if let Some((_, times)) = PHRASES.iter().find(|(phrase, _)| *phrase == normalized) {
        return Some(Frequency::per_year(*times));
    }

    let captures = COUNT_PER_PERIOD.captures(&normalized)?;
    let count: u32 = captures.get(1)?.as_str().parse().ok()?;
    let factor = annual_factor(captures.get(2)?.as_str())?;
    let times = count.checked_mul(factor)?;
    (times > 0).then(|| Frequency::per_year(times))
}

/// Parses a recurrence description, falling back to once a year.
///
/// Never fails. An unrecognized description records one warning.
pub fn normalize_frequency(
    raw: &str,
    row: Option<usize>,
    diagnostics: &mut Diagnostics,
) -> Frequency {
    match parse_frequency(raw) {
        Some(frequency) => frequency,
        None => {
            let fallback = Frequency::default();
            diagnostics.warn(
                row,
                format!(
                    "could not parse frequency '{}', defaulting to {fallback}",
                    raw.trim()
                ),
            );
            fallback
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn normalize(raw: &str) -> (Frequency, Diagnostics) {
        let mut diagnostics = Diagnostics::new();
        let frequency = normalize_frequency(raw, None, &mut diagnostics);
        (frequency, diagnostics)
    }

    #[test]
    fn phrases_map_to_annual_counts() {
        assert_eq!(parse_frequency("daily"), Some(Frequency::per_year(365)));
        assert_eq!(parse_frequency(" Every Day "), Some(Frequency::per_year(365)));
        assert_eq!(parse_frequency("WEEKLY"), Some(Frequency::per_year(52)));
        assert_eq!(parse_frequency("every month"), Some(Frequency::per_year(12)));
        assert_eq!(parse_frequency("annually"), Some(Frequency::per_year(1)));
    }

    #[test]
    fn counts_are_scaled_to_a_year() {
        assert_eq!(parse_frequency("3/month"), Some(Frequency::per_year(36)));
        assert_eq!(parse_frequency("2 / week"), Some(Frequency::per_year(104)));
        assert_eq!(parse_frequency("1/day"), Some(Frequency::per_year(365)));
        assert_eq!(parse_frequency("52/year"), Some(Frequency::per_year(52)));
    }

    #[test]
    fn synonyms_agree() {
        assert_eq!(parse_frequency("52/year"), parse_frequency("weekly"));
        assert_eq!(parse_frequency("365/year"), parse_frequency("everyday"));
        assert_eq!(parse_frequency("12/year"), parse_frequency("monthly"));
    }

    #[test]
    fn trailing_text_after_unit_is_ignored() {
        assert_eq!(parse_frequency("4/years"), Some(Frequency::per_year(4)));
        assert_eq!(parse_frequency("2/weekly"), Some(Frequency::per_year(104)));
    }

    #[test]
    fn zero_and_overflow_are_rejected() {
        assert_eq!(parse_frequency("0/year"), None);
        assert_eq!(parse_frequency("99999999999/day"), None);
        assert_eq!(parse_frequency("20000000/day"), None);
    }

    #[test]
    fn garbage_defaults_with_one_warning() {
        let (frequency, diagnostics) = normalize("garbage");
        assert_eq!(frequency, Frequency::per_year(1));
        assert_eq!(diagnostics.warning_count(), 1);
        assert_eq!(diagnostics.error_count(), 0);
    }

    #[test]
    fn recognized_input_records_nothing() {
        let (frequency, diagnostics) = normalize("weekly");
        assert_eq!(frequency, Frequency::per_year(52));
        assert!(diagnostics.is_empty());
    }
}
