use std::path::PathBuf;

use crate::error::FetchError;

const API_KEY_VAR: &str = "STEAM_API_KEY";

/// Credentials for the Steam Web API.
///
/// The Store `appdetails` endpoint answers without a key, so a missing key
/// is allowed; requests simply go out unauthenticated.
#[derive(Debug, Clone, Default)]
pub struct Credentials {
    pub api_key: Option<String>,
}

/// Where a credential value came from.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum CredentialSource {
    /// Loaded from an environment variable.
    EnvVar(&'static str),
    /// Loaded from the credentials file.
    ConfigFile,
    /// Given on the command line.
    Override,
    /// Not set anywhere.
    Missing,
}

impl std::fmt::Display for CredentialSource {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            Self::EnvVar(var) => write!(f, "env ${}", var),
            Self::ConfigFile => write!(f, "config file"),
            Self::Override => write!(f, "command line"),
            Self::Missing => write!(f, "not set"),
        }
    }
}

/// TOML credentials file format.
#[derive(Debug, Default, serde::Deserialize, serde::Serialize)]
struct CredentialsFile {
    steam: Option<SteamSection>,
}

#[derive(Debug, Default, serde::Deserialize, serde::Serialize)]
struct SteamSection {
    api_key: Option<String>,
}

impl Credentials {
    /// Load credentials. Priority: env var > credentials file.
    pub fn load() -> Self {
        let api_key = std::env::var(API_KEY_VAR)
            .ok()
            .filter(|k| !k.trim().is_empty())
            .or_else(|| load_config_file().and_then(|s| s.api_key));
        Self { api_key }
    }

    /// Apply a key given explicitly (e.g. from CLI args).
    pub fn with_override(mut self, api_key: Option<String>) -> Self {
        if let Some(key) = api_key {
            self.api_key = Some(key);
        }
        self
    }

    /// Key with all but the last four characters masked, for display.
    pub fn masked_key(&self) -> Option<String> {
        self.api_key.as_ref().map(|key| {
            let visible = key.chars().count().saturating_sub(4);
            key.chars()
                .enumerate()
                .map(|(i, c)| if i < visible { '*' } else { c })
                .collect()
        })
    }
}

/// Return the path to the credentials file.
pub fn config_path() -> Option<PathBuf> {
    dirs::config_dir().map(|d| d.join("steamdex").join("credentials.toml"))
}

/// Save credentials, creating parent directories as needed.
/// Returns the path the file was written to.
pub fn save_to_file(creds: &Credentials) -> Result<PathBuf, FetchError> {
    let path = config_path()
        .ok_or_else(|| FetchError::Config("Could not determine config directory".to_string()))?;

    if let Some(parent) = path.parent() {
        std::fs::create_dir_all(parent)?;
    }

    let file = CredentialsFile {
        steam: Some(SteamSection {
            api_key: creds.api_key.clone(),
        }),
    };
    let toml_str = toml::to_string_pretty(&file)
        .map_err(|e| FetchError::Config(format!("Failed to serialize credentials: {}", e)))?;

    std::fs::write(&path, toml_str)?;
    Ok(path)
}

/// Determine where the API key is coming from.
pub fn api_key_source() -> CredentialSource {
    if std::env::var(API_KEY_VAR).is_ok_and(|k| !k.trim().is_empty()) {
        CredentialSource::EnvVar(API_KEY_VAR)
    } else if load_config_file().and_then(|s| s.api_key).is_some() {
        CredentialSource::ConfigFile
    } else {
        CredentialSource::Missing
    }
}

fn load_config_file() -> Option<SteamSection> {
    let path = config_path()?;
    let content = std::fs::read_to_string(&path).ok()?;
    parse_credentials(&content)
}

fn parse_credentials(content: &str) -> Option<SteamSection> {
    let file: CredentialsFile = toml::from_str(content).ok()?;
    file.steam
}
