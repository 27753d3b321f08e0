//! Id collision detection.
//!
//! Ids derive from names, so two rows with the same name (or names that
//! differ only in punctuation) share an id. Collisions are reported, never
//! resolved: every record stays in the output.

use std::collections::BTreeMap;

/// One id claimed by more than one row.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct DuplicateId {
    pub id: String,
    /// Spreadsheet row numbers, in source order.
    pub rows: Vec<usize>,
}

/// Finds ids that occur more than once, ordered by first occurrence.
pub fn find_duplicate_ids<'a>(
    ids: impl IntoIterator<Item = (&'a str, usize)>,
) -> Vec<DuplicateId> {
    let mut seen: BTreeMap<&str, Vec<usize>> = BTreeMap::new();
    let mut order = Vec::new();
    for (id, row) in ids {
        let rows = seen.entry(id).or_default();
        if rows.is_empty() {
            order.push(id);
        }
        rows.push(row);
    }

    order
        .into_iter()
        .filter_map(|id| {
            let rows = seen.remove(id)?;
            (rows.len() > 1).then(|| DuplicateId {
                id: id.to_string(),
                rows,
            })
        })
        .collect()
}
