//! Figures for the post-conversion summary.

use std::collections::BTreeMap;

use activity_model::{ActivityRecord, ActivityType};
use activity_transform::CategoryStyles;

/// Categories listed in the summary.
pub const TOP_CATEGORIES: usize = 10;
/// Financial records shown as samples.
pub const FINANCIAL_SAMPLES: usize = 5;
/// Quotes shown as samples.
pub const QUOTE_SAMPLES: usize = 3;
/// Quote text is cut to this many characters in samples.
pub const QUOTE_PREVIEW_CHARS: usize = 50;

/// A count with its share of the total.
#[derive(Debug, Clone, PartialEq)]
pub struct Share {
    pub label: String,
    pub count: usize,
    pub percent: f64,
}

#[derive(Debug, Clone, PartialEq)]
pub struct FinancialSample {
    pub name: String,
    pub amount: f64,
    pub unit: String,
    pub currency: String,
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct QuoteSample {
    /// Text, truncated with `...` past [`QUOTE_PREVIEW_CHARS`].
    pub text: String,
    pub author: Option<String>,
}

/// Aggregates over one output document.
#[derive(Debug, Clone, Default, PartialEq)]
pub struct DocumentStats {
    pub total: usize,
    /// Per type, ordered by type name.
    pub by_type: Vec<Share>,
    /// Most common categories first, at most [`TOP_CATEGORIES`].
    pub top_categories: Vec<Share>,
    pub category_count: usize,
    pub financial_count: usize,
    /// Summed amounts per currency code.
    pub financial_totals: BTreeMap<String, f64>,
    pub financial_samples: Vec<FinancialSample>,
    pub quote_count: usize,
    pub quote_samples: Vec<QuoteSample>,
    pub active: usize,
    pub user_created: usize,
    pub with_age_end: usize,
    pub with_description: usize,
    pub with_custom_icon: usize,
}

impl DocumentStats {
    pub fn from_records(records: &[ActivityRecord], styles: &CategoryStyles) -> Self {
        let total = records.len();
        let mut type_counts: BTreeMap<&str, usize> = BTreeMap::new();
        let mut category_counts: BTreeMap<&str, usize> = BTreeMap::new();
        let mut stats = Self {
            total,
            ..Self::default()
        };

        for record in records {
            *type_counts.entry(record.activity_type.as_str()).or_default() += 1;
            *category_counts.entry(record.category.as_str()).or_default() += 1;

            match record.activity_type {
                ActivityType::Financial => {
                    stats.financial_count += 1;
                    if let Some(financial) = &record.financial {
                        *stats
                            .financial_totals
                            .entry(financial.currency.clone())
                            .or_default() += financial.amount;
                    }
                    if stats.financial_count <= FINANCIAL_SAMPLES
                        && let Some(financial) = &record.financial
                    {
                        stats.financial_samples.push(FinancialSample {
                            name: record.name.clone(),
                            amount: financial.amount,
                            unit: financial.unit.clone(),
                            currency: financial.currency.clone(),
                        });
                    }
                }
                ActivityType::Quote => {
                    stats.quote_count += 1;
                    if stats.quote_count <= QUOTE_SAMPLES
                        && let Some(quote) = &record.quote
                    {
                        stats.quote_samples.push(QuoteSample {
                            text: preview(&quote.text, QUOTE_PREVIEW_CHARS),
                            author: quote.author.clone(),
                        });
                    }
                }
                ActivityType::Experiential => {}
            }

            stats.active += usize::from(record.metadata.is_active);
            stats.user_created += usize::from(record.metadata.user_created);
            stats.with_age_end += usize::from(record.age_range.end.is_some());
            stats.with_description += usize::from(record.description.is_some());
            stats.with_custom_icon +=
                usize::from(styles.is_custom_icon(&record.category, &record.display.icon));
        }

        stats.by_type = type_counts
            .into_iter()
            .map(|(label, count)| share(label, count, total))
            .collect();

        let mut categories: Vec<_> = category_counts.into_iter().collect();
        stats.category_count = categories.len();
        // Stable sort keeps ties in name order.
        categories.sort_by(|a, b| b.1.cmp(&a.1));
        stats.top_categories = categories
            .into_iter()
            .take(TOP_CATEGORIES)
            .map(|(label, count)| share(label, count, total))
            .collect();
        stats
    }

    pub fn type_count(&self) -> usize {
        self.by_type.len()
    }
}

/// Percentage of `part` in `total`; zero when `total` is zero.
pub fn percent(part: usize, total: usize) -> f64 {
    if total == 0 {
        0.0
    } else {
        part as f64 / total as f64 * 100.0
    }
}

fn share(label: &str, count: usize, total: usize) -> Share {
    Share {
        label: label.to_string(),
        count,
        percent: percent(count, total),
    }
}

fn preview(text: &str, max_chars: usize) -> String {
    if text.chars().count() > max_chars {
        let cut: String = text.chars().take(max_chars).collect();
        format!("{cut}...")
    } else {
        text.to_string()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn preview_cuts_on_characters() {
        assert_eq!(preview("short", 50), "short");
        let long = "ü".repeat(60);
        let cut = preview(&long, 50);
        assert_eq!(cut.chars().count(), 53);
        assert!(cut.ends_with("..."));
    }

    #[test]
    fn percent_of_nothing_is_zero() {
        assert_eq!(percent(0, 0), 0.0);
        assert_eq!(percent(1, 4), 25.0);
    }
}
