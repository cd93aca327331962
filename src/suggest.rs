//! Title autocomplete for the guess box.

use crate::catalog::Track;

pub const DEFAULT_SUGGESTION_LIMIT: usize = 5;

/// Tracks whose title contains `query` (case-insensitive), in catalog order,
/// at most `limit` of them. A blank query suggests nothing.
pub fn suggestions<'a>(query: &str, catalog: &'a [Track], limit: usize) -> Vec<&'a Track> {
    if query.trim().is_empty() {
        return Vec::new();
    }
    let needle = query.to_lowercase();
    catalog
        .iter()
        .filter(|t| t.title.to_lowercase().contains(&needle))
        .take(limit)
        .collect()
}
