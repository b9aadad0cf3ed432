//! Advisory single-writer lock on a catalog directory.

use std::fs::{self, OpenOptions};
use std::io::{ErrorKind, Write};
use std::path::{Path, PathBuf};

use crate::error::StoreError;

pub const LOCK_FILE: &str = ".steamdex.lock";

/// Held for the duration of a crawl; the lock file is removed on drop.
#[derive(Debug)]
pub struct StoreLock {
    path: PathBuf,
}

impl StoreLock {
    /// Take the lock on `dir`, creating the directory if needed.
    pub fn acquire(dir: &Path) -> Result<Self, StoreError> {
        let location = dir.display().to_string();
        fs::create_dir_all(dir).map_err(|e| StoreError::io(&location, e))?;

        let path = dir.join(LOCK_FILE);
        let mut file = match OpenOptions::new().write(true).create_new(true).open(&path) {
            Ok(f) => f,
            Err(e) if e.kind() == ErrorKind::AlreadyExists => return Err(StoreError::Locked(path)),
            Err(e) => return Err(StoreError::io(path.display().to_string(), e)),
        };
        writeln!(
            file,
            "pid {}\nstarted {}",
            std::process::id(),
            chrono::Utc::now().to_rfc3339()
        )
        .map_err(|e| StoreError::io(path.display().to_string(), e))?;

        log::debug!("Acquired {}", path.display());
        Ok(Self { path })
    }

    /// Remove a lock left behind by a run that did not exit cleanly.
    /// Returns whether a lock file was present.
    pub fn break_stale(dir: &Path) -> Result<bool, StoreError> {
        let path = dir.join(LOCK_FILE);
        match fs::remove_file(&path) {
            Ok(()) => Ok(true),
            Err(e) if e.kind() == ErrorKind::NotFound => Ok(false),
            Err(e) => Err(StoreError::io(path.display().to_string(), e)),
        }
    }

    pub fn path(&self) -> &Path {
        &self.path
    }
}

impl Drop for StoreLock {
    fn drop(&mut self) {
        if let Err(e) = fs::remove_file(&self.path) {
            log::warn!("Could not remove lock {}: {}", self.path.display(), e);
        }
    }
}
