use steamdex_core::GameRecord;

use crate::error::StoreError;
use crate::stores::{CatalogIndex, CatalogStores};

/// Key valid records by ID. Later duplicates replace earlier ones.
pub fn build_index(records: &[GameRecord]) -> CatalogIndex {
    records.iter().map(|r| (r.id, r.clone())).collect()
}

/// Recompute the index from the valid store and save it.
/// Returns the number of indexed records.
pub fn rebuild_index(stores: &CatalogStores) -> Result<usize, StoreError> {
    let valid = stores.valid.load_or_default()?;
    let index = build_index(&valid);
    stores.index.save(&index)?;
    log::debug!("Index rebuilt with {} entries", index.len());
    Ok(index.len())
}
