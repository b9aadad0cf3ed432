use steamdex_client::FetchError;
use steamdex_store::StoreError;
use thiserror::Error;

/// Errors that end a crawl.
#[derive(Debug, Error)]
pub enum CrawlError {
    /// The application list could not be fetched.
    #[error("Could not list the catalog: {0}")]
    Catalog(#[from] FetchError),

    #[error(transparent)]
    Store(#[from] StoreError),

    /// Upstream kept throttling past the configured limit. Everything
    /// finished before the circuit opened has been merged.
    #[error("Circuit open after {merged} merged entries: {reason}")]
    CircuitOpen { reason: String, merged: usize },

    /// The run was cancelled. Finished work has been merged.
    #[error("Crawl cancelled after {merged} merged entries")]
    Cancelled { merged: usize },

    #[error("Invalid crawl options: {0}")]
    Options(String),
}

/// Errors reading or writing the settings file.
#[derive(Debug, Error)]
pub enum SettingsError {
    #[error("I/O error on settings file: {0}")]
    Io(#[from] std::io::Error),

    #[error("Could not parse settings file: {0}")]
    Parse(#[from] toml::de::Error),

    #[error("Could not serialize settings: {0}")]
    Serialize(#[from] toml::ser::Error),
}
