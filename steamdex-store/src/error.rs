use std::path::PathBuf;

use thiserror::Error;

#[derive(Debug, Error)]
pub enum StoreError {
    #[error("I/O error on {location}: {source}")]
    Io {
        location: String,
        source: std::io::Error,
    },
    #[error("Store {location} is corrupt: {source}")]
    Corrupt {
        location: String,
        source: serde_json::Error,
    },
    #[error("Could not serialize {location}: {source}")]
    Serialize {
        location: String,
        source: serde_json::Error,
    },
    #[error("Catalog is locked by another run ({0}); use --break-lock if that run is gone")]
    Locked(PathBuf),
}

impl StoreError {
    pub(crate) fn io(location: impl Into<String>, source: std::io::Error) -> Self {
        Self::Io {
            location: location.into(),
            source,
        }
    }
}
