//! Application settings: `~/.config/steamdex/settings.toml`.
//!
//! Every table and key is optional; missing values take the built-in
//! defaults, and command-line flags override whatever is loaded here.

use std::path::{Path, PathBuf};

use serde::{Deserialize, Serialize};
use steamdex_client::{ClientOptions, DEFAULT_REGION, Endpoints, RetryPolicy};

use crate::error::SettingsError;
use crate::orchestrator::{CrawlOptions, DEFAULT_BATCH_SIZE, DEFAULT_WORKERS};

/// Canonical path to the settings file.
pub fn settings_path() -> PathBuf {
    let config = dirs::config_dir().unwrap_or_else(|| PathBuf::from("."));
    config.join("steamdex").join("settings.toml")
}

#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct Settings {
    pub paths: PathSettings,
    pub crawl: CrawlSettings,
    pub retry: RetryPolicy,
    pub endpoints: Endpoints,
}

#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct PathSettings {
    /// Directory holding the catalog files.
    #[serde(skip_serializing_if = "Option::is_none")]
    pub data_dir: Option<PathBuf>,
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct CrawlSettings {
    pub batch_size: usize,
    pub workers: usize,
    /// Store region code used for prices.
    pub region: String,
    /// Minimum spacing between SteamSpy requests.
    pub spy_interval_ms: u64,
    /// Give up on a single ID after this many seconds.
    pub item_timeout_secs: u64,
}

impl Default for CrawlSettings {
    fn default() -> Self {
        Self {
            batch_size: DEFAULT_BATCH_SIZE,
            workers: DEFAULT_WORKERS,
            region: DEFAULT_REGION.to_string(),
            spy_interval_ms: 1_000,
            item_timeout_secs: crate::orchestrator::DEFAULT_ITEM_TIMEOUT.as_secs(),
        }
    }
}

impl Settings {
    /// Load from the canonical path. A missing file yields defaults.
    pub fn load() -> Result<Self, SettingsError> {
        Self::load_from(&settings_path())
    }

    pub fn load_from(path: &Path) -> Result<Self, SettingsError> {
        match std::fs::read_to_string(path) {
            Ok(contents) => Self::parse(&contents),
            Err(e) if e.kind() == std::io::ErrorKind::NotFound => Ok(Self::default()),
            Err(e) => Err(e.into()),
        }
    }

    pub fn parse(contents: &str) -> Result<Self, SettingsError> {
        Ok(toml::from_str(contents)?)
    }

    /// Write atomically to the canonical path.
    pub fn save(&self) -> Result<PathBuf, SettingsError> {
        let path = settings_path();
        self.save_to(&path)?;
        Ok(path)
    }

    pub fn save_to(&self, path: &Path) -> Result<(), SettingsError> {
        if let Some(parent) = path.parent() {
            std::fs::create_dir_all(parent)?;
        }
        let serialized = toml::to_string_pretty(self)?;
        let tmp = path.with_extension("toml.tmp");
        std::fs::write(&tmp, &serialized)?;
        std::fs::rename(&tmp, path)?;
        Ok(())
    }

    /// Resolve the catalog directory: CLI override, then `paths.data_dir`,
    /// then the current directory.
    pub fn data_dir(&self, cli_override: Option<PathBuf>) -> PathBuf {
        cli_override
            .or_else(|| self.paths.data_dir.clone())
            .unwrap_or_else(|| std::env::current_dir().unwrap_or_else(|_| PathBuf::from(".")))
    }

    pub fn client_options(&self) -> ClientOptions {
        ClientOptions {
            endpoints: self.endpoints.clone(),
            region: self.crawl.region.clone(),
            store_policy: self.retry.clone(),
            spy_policy: RetryPolicy {
                min_request_interval_ms: self
                    .crawl
                    .spy_interval_ms
                    .max(self.retry.min_request_interval_ms),
                ..self.retry.clone()
            },
        }
    }

    pub fn crawl_options(&self) -> CrawlOptions {
        CrawlOptions {
            batch_size: self.crawl.batch_size,
            workers: self.crawl.workers,
            item_timeout: std::time::Duration::from_secs(self.crawl.item_timeout_secs),
            ..CrawlOptions::default()
        }
    }
}

#[cfg(test)]
#[path = "tests/settings_tests.rs"]
mod tests;
