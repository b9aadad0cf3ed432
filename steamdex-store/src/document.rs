//! Persistent documents: one value of type `D` stored somewhere.
//!
//! The crawler only ever reads or replaces a whole document, so the
//! interface is load/save/remove rather than per-record operations.

use std::fs;
use std::io::ErrorKind;
use std::marker::PhantomData;
use std::path::{Path, PathBuf};
use std::sync::Mutex;

use serde::Serialize;
use serde::de::DeserializeOwned;

use crate::error::StoreError;

/// A single stored value.
pub trait Document<D>: Send + Sync {
    /// Read the document. `Ok(None)` when it does not exist or is empty.
    fn load(&self) -> Result<Option<D>, StoreError>;

    /// Replace the document with `data`.
    fn save(&self, data: &D) -> Result<(), StoreError>;

    /// Delete the document. Returns whether anything was removed.
    fn remove(&self) -> Result<bool, StoreError>;

    /// Human-readable location for messages.
    fn location(&self) -> String;

    /// Read the document, treating an absent one as empty.
    fn load_or_default(&self) -> Result<D, StoreError>
    where
        D: Default,
    {
        Ok(self.load()?.unwrap_or_default())
    }
}

// ── JSON file ───────────────────────────────────────────────────────────────

/// Pretty-printed JSON file, written atomically via a sibling temp file.
pub struct JsonFile<D> {
    path: PathBuf,
    _marker: PhantomData<fn() -> D>,
}

impl<D> JsonFile<D> {
    pub fn new(path: impl Into<PathBuf>) -> Self {
        Self {
            path: path.into(),
            _marker: PhantomData,
        }
    }

    pub fn path(&self) -> &Path {
        &self.path
    }

    fn tmp_path(&self) -> PathBuf {
        let mut name = self.path.file_name().unwrap_or_default().to_os_string();
        name.push(".tmp");
        self.path.with_file_name(name)
    }
}

impl<D> Document<D> for JsonFile<D>
where
    D: Serialize + DeserializeOwned,
{
    fn load(&self) -> Result<Option<D>, StoreError> {
        let contents = match fs::read_to_string(&self.path) {
            Ok(c) => c,
            Err(e) if e.kind() == ErrorKind::NotFound => return Ok(None),
            Err(e) => return Err(StoreError::io(self.location(), e)),
        };
        if contents.trim().is_empty() {
            return Ok(None);
        }
        serde_json::from_str(&contents)
            .map(Some)
            .map_err(|source| StoreError::Corrupt {
                location: self.location(),
                source,
            })
    }

    fn save(&self, data: &D) -> Result<(), StoreError> {
        if let Some(parent) = self.path.parent() {
            if !parent.as_os_str().is_empty() {
                fs::create_dir_all(parent).map_err(|e| StoreError::io(self.location(), e))?;
            }
        }
        let serialized =
            serde_json::to_vec_pretty(data).map_err(|source| StoreError::Serialize {
                location: self.location(),
                source,
            })?;
        let tmp = self.tmp_path();
        fs::write(&tmp, serialized).map_err(|e| StoreError::io(tmp.display().to_string(), e))?;
        fs::rename(&tmp, &self.path).map_err(|e| StoreError::io(self.location(), e))
    }

    fn remove(&self) -> Result<bool, StoreError> {
        match fs::remove_file(&self.path) {
            Ok(()) => Ok(true),
            Err(e) if e.kind() == ErrorKind::NotFound => Ok(false),
            Err(e) => Err(StoreError::io(self.location(), e)),
        }
    }

    fn location(&self) -> String {
        self.path.display().to_string()
    }
}

// ── In-memory ───────────────────────────────────────────────────────────────

/// Document held in memory; used for dry runs and tests.
pub struct MemoryDocument<D> {
    name: String,
    value: Mutex<Option<D>>,
}

impl<D> MemoryDocument<D> {
    pub fn new(name: impl Into<String>) -> Self {
        Self {
            name: name.into(),
            value: Mutex::new(None),
        }
    }

    pub fn with_value(name: impl Into<String>, value: D) -> Self {
        Self {
            name: name.into(),
            value: Mutex::new(Some(value)),
        }
    }

    fn slot(&self) -> std::sync::MutexGuard<'_, Option<D>> {
        // A poisoned slot still holds a whole value; writes replace it in one step.
        self.value.lock().unwrap_or_else(|e| e.into_inner())
    }
}

impl<D> Document<D> for MemoryDocument<D>
where
    D: Clone + Send,
{
    fn load(&self) -> Result<Option<D>, StoreError> {
        Ok(self.slot().clone())
    }

    fn save(&self, data: &D) -> Result<(), StoreError> {
        *self.slot() = Some(data.clone());
        Ok(())
    }

    fn remove(&self) -> Result<bool, StoreError> {
        Ok(self.slot().take().is_some())
    }

    fn location(&self) -> String {
        format!("memory:{}", self.name)
    }
}
