//! Category lookup tables for icons and colors.

use std::collections::BTreeMap;

/// Key used when a category has no entry of its own.
pub const FALLBACK_CATEGORY: &str = "default";

const FALLBACK_COLOR: &str = "#95A5A6";
const FALLBACK_ICON: &str = "⭐";

const BUILTIN_STYLES: &[(&str, &str, &str)] = &[
    ("celebration", "#FFD700", "🎉"),
    ("nature", "#FF6347", "🌳"),
    ("routine", "#4A90E2", "☕"),
    ("exercise", "#2ECC71", "💪"),
    ("social", "#E74C3C", "👥"),
    ("learning", "#9B59B6", "📚"),
    ("travel", "#1ABC9C", "✈️"),
    ("food", "#F39C12", "🍽️"),
    ("work", "#34495E", "💼"),
    ("hobby", "#16A085", "🎨"),
    ("subscriptions", "#7C3AED", "📊"),
    ("insurance", "#2563EB", "🛡️"),
    ("utilities", "#059669", "🔌"),
    ("housing", "#DC2626", "🏠"),
    ("transportation", "#F59E0B", "🚗"),
    ("financial", "#10B981", "💰"),
    ("reflection", "#8B5CF6", "💭"),
    (FALLBACK_CATEGORY, FALLBACK_COLOR, FALLBACK_ICON),
];

/// Immutable category → color and category → icon tables.
///
/// Both tables carry a [`FALLBACK_CATEGORY`] entry; lookups for unknown
/// categories resolve to it.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct CategoryStyles {
    colors: BTreeMap<String, String>,
    icons: BTreeMap<String, String>,
}

impl CategoryStyles {
    /// Builds tables from explicit maps, adding built-in fallbacks when the
    /// maps do not provide them.
    pub fn new(mut colors: BTreeMap<String, String>, mut icons: BTreeMap<String, String>) -> Self {
        colors
            .entry(FALLBACK_CATEGORY.to_string())
            .or_insert_with(|| FALLBACK_COLOR.to_string());
        icons
            .entry(FALLBACK_CATEGORY.to_string())
            .or_insert_with(|| FALLBACK_ICON.to_string());
        Self { colors, icons }
    }

    pub fn color(&self, category: &str) -> &str {
        lookup(&self.colors, category)
    }

    pub fn icon(&self, category: &str) -> &str {
        lookup(&self.icons, category)
    }

    /// Whether `icon` differs from the icon the category would get by default.
    pub fn is_custom_icon(&self, category: &str, icon: &str) -> bool {
        self.icon(category) != icon
    }
}

impl Default for CategoryStyles {
    fn default() -> Self {
        let colors = BUILTIN_STYLES
            .iter()
            .map(|(category, color, _)| ((*category).to_string(), (*color).to_string()))
            .collect();
        let icons = BUILTIN_STYLES
            .iter()
            .map(|(category, _, icon)| ((*category).to_string(), (*icon).to_string()))
            .collect();
        Self { colors, icons }
    }
}

fn lookup<'a>(table: &'a BTreeMap<String, String>, category: &str) -> &'a str {
    table
        .get(category)
        .or_else(|| table.get(FALLBACK_CATEGORY))
        .map_or("", String::as_str)
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn known_categories_resolve() {
        let styles = CategoryStyles::default();
        assert_eq!(styles.color("routine"), "#4A90E2");
        assert_eq!(styles.icon("routine"), "☕");
        assert_eq!(styles.icon("subscriptions"), "📊");
    }

    #[test]
    fn unknown_categories_fall_back() {
        let styles = CategoryStyles::default();
        assert_eq!(styles.color("gardening"), "#95A5A6");
        assert_eq!(styles.icon("gardening"), "⭐");
    }

    #[test]
    fn custom_tables_gain_fallback_entries() {
        let colors = BTreeMap::from([("chess".to_string(), "#000000".to_string())]);
        let styles = CategoryStyles::new(colors, BTreeMap::new());
        assert_eq!(styles.color("chess"), "#000000");
        assert_eq!(styles.color("go"), "#95A5A6");
        assert_eq!(styles.icon("chess"), "⭐");
    }

    #[test]
    fn custom_icon_detection() {
        let styles = CategoryStyles::default();
        assert!(!styles.is_custom_icon("routine", "☕"));
        assert!(styles.is_custom_icon("routine", "🍵"));
    }
}
