//! Folding a batch's staging documents into the long-lived stores.
//!
//! A merge loads both long-lived stores and both staging documents,
//! deduplicates by ID, keeps the valid and invalid stores disjoint, saves
//! the result and deletes the staging documents. Running it with nothing
//! staged just normalizes the existing stores.

use std::collections::{HashMap, HashSet};

use indexmap::IndexMap;
use steamdex_core::{AppId, GameRecord, InvalidGameRecord};

use crate::error::StoreError;
use crate::stores::CatalogStores;

/// Counts from one merge.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct MergeReport {
    pub staged_valid: usize,
    pub staged_invalid: usize,
    pub valid_total: usize,
    pub invalid_total: usize,
    /// Entries dropped because a later entry had the same ID.
    pub duplicates_removed: usize,
    /// Invalid entries dropped because the ID is now valid.
    pub promoted: usize,
    /// Staging documents that could not be deleted.
    pub cleanup_failures: usize,
    pub diagnostics: Diagnostics,
}

/// Advisory findings about store contents. Nothing here blocks a merge.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct Diagnostics {
    pub duplicate_valid: Vec<AppId>,
    pub duplicate_invalid: Vec<AppId>,
    /// IDs present in both stores.
    pub overlapping: Vec<AppId>,
    /// Valid records with blank required fields, and which fields.
    pub incomplete: Vec<(AppId, Vec<&'static str>)>,
    /// Invalid-store entries with a blank name.
    pub unnamed_invalid: Vec<AppId>,
}

impl Diagnostics {
    pub fn is_clean(&self) -> bool {
        self.duplicate_valid.is_empty()
            && self.duplicate_invalid.is_empty()
            && self.overlapping.is_empty()
            && self.incomplete.is_empty()
            && self.unnamed_invalid.is_empty()
    }

    fn log(&self, stage: &str) {
        if !self.duplicate_valid.is_empty() {
            log::warn!(
                "{}: {} duplicate IDs in the valid store",
                stage,
                self.duplicate_valid.len()
            );
        }
        if !self.duplicate_invalid.is_empty() {
            log::warn!(
                "{}: {} duplicate IDs in the invalid store",
                stage,
                self.duplicate_invalid.len()
            );
        }
        if !self.overlapping.is_empty() {
            log::warn!(
                "{}: {} IDs present in both stores",
                stage,
                self.overlapping.len()
            );
        }
        for (id, fields) in &self.incomplete {
            log::info!("{}: entry {} is missing {}", stage, id, fields.join(", "));
        }
        for id in &self.unnamed_invalid {
            log::info!("{}: invalid entry {} is missing Name", stage, id);
        }
    }
}

/// Inspect the long-lived stores without changing them.
pub fn diagnose(stores: &CatalogStores) -> Result<Diagnostics, StoreError> {
    let valid = stores.valid.load_or_default()?;
    let invalid = stores.invalid.load_or_default()?;
    Ok(diagnose_lists(&valid, &invalid))
}

fn diagnose_lists(valid: &[GameRecord], invalid: &[InvalidGameRecord]) -> Diagnostics {
    let valid_ids: HashSet<AppId> = valid.iter().map(|r| r.id).collect();
    let mut overlapping: Vec<AppId> = invalid
        .iter()
        .map(|r| r.id)
        .filter(|id| valid_ids.contains(id))
        .collect::<HashSet<_>>()
        .into_iter()
        .collect();
    overlapping.sort_unstable();

    Diagnostics {
        duplicate_valid: duplicate_ids(valid.iter().map(|r| r.id)),
        duplicate_invalid: duplicate_ids(invalid.iter().map(|r| r.id)),
        overlapping,
        incomplete: valid
            .iter()
            .filter_map(|r| {
                let missing = r.missing_fields();
                (!missing.is_empty()).then_some((r.id, missing))
            })
            .collect(),
        unnamed_invalid: invalid
            .iter()
            .filter(|r| r.name.trim().is_empty())
            .map(|r| r.id)
            .collect(),
    }
}

/// IDs that occur more than once, ascending.
pub fn duplicate_ids(ids: impl IntoIterator<Item = AppId>) -> Vec<AppId> {
    let mut counts: HashMap<AppId, usize> = HashMap::new();
    for id in ids {
        *counts.entry(id).or_default() += 1;
    }
    let mut dups: Vec<AppId> = counts
        .into_iter()
        .filter(|(_, n)| *n > 1)
        .map(|(id, _)| id)
        .collect();
    dups.sort_unstable();
    dups
}

/// Deduplicate by ID: the last entry wins, at the position of the first.
pub fn dedup_by_id<T>(items: impl IntoIterator<Item = T>, id: impl Fn(&T) -> AppId) -> Vec<T> {
    let mut by_id: IndexMap<AppId, T> = IndexMap::new();
    for item in items {
        by_id.insert(id(&item), item);
    }
    by_id.into_values().collect()
}

/// Merge staged results into the long-lived stores.
pub fn merge_checkpoint(stores: &CatalogStores) -> Result<MergeReport, StoreError> {
    let valid = stores.valid.load_or_default()?;
    let invalid = stores.invalid.load_or_default()?;
    let staged_valid = stores.staged_valid.load_or_default()?;
    let staged_invalid = stores.staged_invalid.load_or_default()?;

    let mut report = MergeReport {
        staged_valid: staged_valid.len(),
        staged_invalid: staged_invalid.len(),
        ..MergeReport::default()
    };

    let valid_in = valid.len() + staged_valid.len();
    let merged_valid = dedup_by_id(valid.into_iter().chain(staged_valid), |r| r.id);

    let invalid_in = invalid.len() + staged_invalid.len();
    let merged_invalid = dedup_by_id(
        invalid
            .into_iter()
            .chain(staged_invalid.iter().map(|e| e.to_invalid())),
        |r| r.id,
    );
    report.duplicates_removed =
        (valid_in - merged_valid.len()) + (invalid_in - merged_invalid.len());

    // A valid record always beats an invalid placeholder for the same ID.
    let valid_ids: HashSet<AppId> = merged_valid.iter().map(|r| r.id).collect();
    let before = merged_invalid.len();
    let merged_invalid: Vec<InvalidGameRecord> = merged_invalid
        .into_iter()
        .filter(|r| !valid_ids.contains(&r.id))
        .collect();
    report.promoted = before - merged_invalid.len();

    report.diagnostics = diagnose_lists(&merged_valid, &merged_invalid);
    report.diagnostics.log("merge");

    stores.valid.save(&merged_valid)?;
    stores.invalid.save(&merged_invalid)?;
    report.valid_total = merged_valid.len();
    report.invalid_total = merged_invalid.len();

    for result in [stores.staged_valid.remove(), stores.staged_invalid.remove()] {
        if let Err(e) = result {
            log::warn!("Could not remove staging document: {}", e);
            report.cleanup_failures += 1;
        }
    }

    log::debug!(
        "Merged {} valid / {} invalid staged entries ({} duplicates dropped, {} promoted)",
        report.staged_valid,
        report.staged_invalid,
        report.duplicates_removed,
        report.promoted,
    );
    Ok(report)
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn dedup_keeps_first_position_last_value() {
        let items = vec![(1, "a"), (2, "b"), (1, "c"), (3, "d")];
        let out = dedup_by_id(items, |(id, _)| *id);
        assert_eq!(out, vec![(1, "c"), (2, "b"), (3, "d")]);
    }

    #[test]
    fn duplicate_ids_are_reported_once() {
        assert_eq!(duplicate_ids([5, 1, 5, 2, 1, 5]), vec![1, 5]);
        assert!(duplicate_ids([1, 2, 3]).is_empty());
    }
}
