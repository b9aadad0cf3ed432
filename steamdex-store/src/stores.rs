use std::collections::BTreeMap;
use std::path::Path;

use steamdex_core::{AppId, GameRecord, InvalidGameRecord, RejectedEntry};

use crate::document::{Document, JsonFile, MemoryDocument};

/// Valid records keyed by ID, as consumed by the query layer.
pub type CatalogIndex = BTreeMap<AppId, GameRecord>;

pub const VALID_FILE: &str = "detailed_games_actual.json";
pub const INVALID_FILE: &str = "invalid_games_actual.json";
pub const INDEX_FILE: &str = "detailed_games_transformed.json";
pub const STAGING_DIR: &str = "staging";
pub const STAGED_VALID_FILE: &str = "detailed_steam_games.json";
pub const STAGED_INVALID_FILE: &str = "invalid_games.json";

/// The five documents a catalog consists of.
///
/// `valid` and `invalid` are the long-lived stores, `index` is derived from
/// `valid`, and the two staging documents hold one batch until it is merged.
pub struct CatalogStores {
    pub valid: Box<dyn Document<Vec<GameRecord>>>,
    pub invalid: Box<dyn Document<Vec<InvalidGameRecord>>>,
    pub index: Box<dyn Document<CatalogIndex>>,
    pub staged_valid: Box<dyn Document<Vec<GameRecord>>>,
    pub staged_invalid: Box<dyn Document<Vec<RejectedEntry>>>,
}

impl CatalogStores {
    /// JSON files under `dir`.
    pub fn in_dir(dir: &Path) -> Self {
        let staging = dir.join(STAGING_DIR);
        Self {
            valid: Box::new(JsonFile::new(dir.join(VALID_FILE))),
            invalid: Box::new(JsonFile::new(dir.join(INVALID_FILE))),
            index: Box::new(JsonFile::new(dir.join(INDEX_FILE))),
            staged_valid: Box::new(JsonFile::new(staging.join(STAGED_VALID_FILE))),
            staged_invalid: Box::new(JsonFile::new(staging.join(STAGED_INVALID_FILE))),
        }
    }

    /// Empty in-memory stores.
    pub fn in_memory() -> Self {
        Self {
            valid: Box::new(MemoryDocument::new(VALID_FILE)),
            invalid: Box::new(MemoryDocument::new(INVALID_FILE)),
            index: Box::new(MemoryDocument::new(INDEX_FILE)),
            staged_valid: Box::new(MemoryDocument::new(STAGED_VALID_FILE)),
            staged_invalid: Box::new(MemoryDocument::new(STAGED_INVALID_FILE)),
        }
    }

    /// In-memory stores seeded with the current contents of `dir`, so a dry
    /// run sees the real catalog but never writes to it.
    pub fn snapshot_of(dir: &Path) -> Result<Self, crate::StoreError> {
        let on_disk = Self::in_dir(dir);
        Ok(Self {
            valid: Box::new(MemoryDocument::with_value(
                VALID_FILE,
                on_disk.valid.load_or_default()?,
            )),
            invalid: Box::new(MemoryDocument::with_value(
                INVALID_FILE,
                on_disk.invalid.load_or_default()?,
            )),
            ..Self::in_memory()
        })
    }

    /// Whether either staging document still holds data from an earlier run.
    pub fn has_leftover_staging(&self) -> Result<bool, crate::StoreError> {
        Ok(self.staged_valid.load()?.is_some() || self.staged_invalid.load()?.is_some())
    }
}
