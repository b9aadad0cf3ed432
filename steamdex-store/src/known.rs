//! Which IDs the catalog already has, and which it still needs.

use std::collections::{BTreeSet, HashSet};

use steamdex_core::AppId;

use crate::error::StoreError;
use crate::stores::CatalogStores;

/// IDs present in the valid store and, when `include_invalid` is set, the
/// invalid store.
///
/// An absent or empty store contributes nothing. A store that exists but
/// cannot be parsed is an error: treating it as empty would let the next
/// merge overwrite it.
pub fn known_ids(stores: &CatalogStores, include_invalid: bool) -> Result<HashSet<AppId>, StoreError> {
    let mut known: HashSet<AppId> = stores
        .valid
        .load_or_default()?
        .iter()
        .map(|r| r.id)
        .collect();
    if include_invalid {
        known.extend(stores.invalid.load_or_default()?.iter().map(|r| r.id));
    }
    Ok(known)
}

/// Universe IDs not yet known, ascending and without duplicates.
pub fn compute_delta(universe: impl IntoIterator<Item = AppId>, known: &HashSet<AppId>) -> Vec<AppId> {
    universe
        .into_iter()
        .filter(|id| !known.contains(id))
        .collect::<BTreeSet<_>>()
        .into_iter()
        .collect()
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn delta_is_sorted_and_unique() {
        let known: HashSet<AppId> = [20, 40].into_iter().collect();
        let delta = compute_delta([50, 10, 20, 30, 10, 40], &known);
        assert_eq!(delta, vec![10, 30, 50]);
    }

    #[test]
    fn everything_known_means_empty_delta() {
        let known: HashSet<AppId> = [1, 2, 3].into_iter().collect();
        assert!(compute_delta([3, 2, 1], &known).is_empty());
    }
}
