//! Read-only lookups over the catalog index.

use steamdex_core::GameRecord;

use crate::stores::CatalogIndex;

pub const NAME_RESULTS: usize = 10;
pub const CATEGORY_RESULTS: usize = 20;

/// Similarity above which a name counts as a fuzzy match.
const FUZZY_THRESHOLD: f64 = 0.7;

/// Only this many leading tags are searched by category.
const CATEGORY_TAG_DEPTH: usize = 3;

fn normalize(s: &str) -> String {
    s.chars()
        .filter(|c| !c.is_whitespace())
        .flat_map(char::to_lowercase)
        .collect()
}

/// Records whose name contains `query` or closely resembles it, ignoring
/// case and whitespace. Most-reviewed first, at most `limit`.
pub fn find_by_name<'a>(query: &str, index: &'a CatalogIndex, limit: usize) -> Vec<&'a GameRecord> {
    let needle = normalize(query);
    if needle.is_empty() {
        return Vec::new();
    }
    let matches = index.values().filter(|r| {
        let name = normalize(&r.name);
        name.contains(&needle) || strsim::normalized_levenshtein(&needle, &name) > FUZZY_THRESHOLD
    });
    most_reviewed(matches, limit)
}

/// Records with `category` in one of their leading tags (case-insensitive
/// substring). Most-reviewed first, at most `limit`.
pub fn find_by_category<'a>(category: &str, index: &'a CatalogIndex, limit: usize) -> Vec<&'a GameRecord> {
    let needle = category.trim().to_lowercase();
    if needle.is_empty() {
        return Vec::new();
    }
    let matches = index.values().filter(|r| {
        r.top_tags
            .iter()
            .take(CATEGORY_TAG_DEPTH)
            .any(|tag| tag.to_lowercase().contains(&needle))
    });
    most_reviewed(matches, limit)
}

fn most_reviewed<'a>(records: impl Iterator<Item = &'a GameRecord>, limit: usize) -> Vec<&'a GameRecord> {
    let mut out: Vec<&GameRecord> = records.collect();
    // Stable: ties keep index (ID) order.
    out.sort_by(|a, b| b.total_reviews().cmp(&a.total_reviews()));
    out.truncate(limit);
    out
}

/// Share of positive reviews in percent, or `None` without reviews.
pub fn positive_ratio(record: &GameRecord) -> Option<f64> {
    let total = record.total_reviews();
    (total > 0).then(|| record.positive_reviews as f64 / total as f64 * 100.0)
}
