//! Top-tag selection from SteamSpy vote counts.

use indexmap::IndexMap;

/// Number of tags kept on a record.
pub const TOP_TAG_COUNT: usize = 5;

/// The `n` most-voted tag names, most popular first.
///
/// Ties are broken by tag name so the result does not depend on the order
/// the upstream map happened to arrive in.
pub fn top_tags(tags: &IndexMap<String, u64>, n: usize) -> Vec<String> {
    let mut ranked: Vec<(&String, &u64)> = tags.iter().collect();
    ranked.sort_by(|(a_name, a_votes), (b_name, b_votes)| {
        b_votes.cmp(a_votes).then_with(|| a_name.cmp(b_name))
    });
    ranked
        .into_iter()
        .take(n)
        .map(|(name, _)| name.clone())
        .collect()
}

#[cfg(test)]
mod tests {
    use super::*;

    fn tags(pairs: &[(&str, u64)]) -> IndexMap<String, u64> {
        pairs.iter().map(|(k, v)| (k.to_string(), *v)).collect()
    }

    #[test]
    fn orders_by_votes_descending() {
        let t = tags(&[("Indie", 10), ("Action", 50), ("RPG", 30)]);
        assert_eq!(top_tags(&t, 5), vec!["Action", "RPG", "Indie"]);
    }

    #[test]
    fn keeps_at_most_n() {
        let t = tags(&[
            ("A", 7),
            ("B", 6),
            ("C", 5),
            ("D", 4),
            ("E", 3),
            ("F", 2),
            ("G", 1),
        ]);
        let top = top_tags(&t, TOP_TAG_COUNT);
        assert_eq!(top, vec!["A", "B", "C", "D", "E"]);
    }

    #[test]
    fn ties_break_by_name() {
        let t = tags(&[("Zombies", 10), ("Action", 10), ("Mystery", 10)]);
        assert_eq!(top_tags(&t, 2), vec!["Action", "Mystery"]);
    }

    #[test]
    fn empty_map_gives_no_tags() {
        assert!(top_tags(&IndexMap::new(), TOP_TAG_COUNT).is_empty());
    }
}
