/// Errors that can occur while talking to the Steam and SteamSpy APIs.
#[derive(Debug, thiserror::Error)]
pub enum FetchError {
    #[error("HTTP request failed: {0}")]
    Http(#[from] reqwest::Error),

    #[error("HTTP {status} from {url}")]
    Status { status: u16, url: String },

    #[error("HTTP {status} from {url} after {attempts} attempts")]
    RetriesExhausted { status: u16, url: String, attempts: u32 },

    #[error("Still throttled by {url} after {attempts} waits")]
    Throttled { url: String, attempts: u32 },

    #[error("Request cancelled")]
    Cancelled,

    #[error("JSON parsing error: {0}")]
    Json(#[from] serde_json::Error),

    #[error("I/O error: {0}")]
    Io(#[from] std::io::Error),

    #[error("Configuration error: {0}")]
    Config(String),
}

impl FetchError {
    /// Errors that mean the whole run should stop rather than the single ID
    /// being written off.
    pub fn trips_circuit(&self) -> bool {
        matches!(self, Self::Throttled { .. })
    }

    pub fn is_cancelled(&self) -> bool {
        matches!(self, Self::Cancelled)
    }
}
