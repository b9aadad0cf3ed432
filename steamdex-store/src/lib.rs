//! JSON-file persistence for the game catalog.
//!
//! Provides the document abstraction the crawler writes through, the
//! checkpoint merge, the ID-keyed index, the known-ID delta and read-only
//! queries over the index.

pub mod document;
pub mod error;
pub mod index;
pub mod known;
pub mod lock;
pub mod merge;
pub mod query;
pub mod stores;

pub use document::{Document, JsonFile, MemoryDocument};
pub use error::StoreError;
pub use index::{build_index, rebuild_index};
pub use known::{compute_delta, known_ids};
pub use lock::StoreLock;
pub use merge::{Diagnostics, MergeReport, diagnose, merge_checkpoint};
pub use query::{find_by_category, find_by_name, positive_ratio};
pub use stores::{CatalogIndex, CatalogStores};
