//! Response shapes of the Steam Store and SteamSpy `appdetails` endpoints.
//!
//! Only the fields the record builder consumes are modelled. Everything is
//! optional upstream, so every field defaults.

use indexmap::IndexMap;
use serde::{Deserialize, Deserializer};

/// `data` object of a successful Store `appdetails` entry.
#[derive(Debug, Clone, Default, Deserialize)]
pub struct AppDetails {
    #[serde(default)]
    pub name: Option<String>,
    #[serde(default)]
    pub is_free: bool,
    #[serde(default)]
    pub header_image: Option<String>,
    #[serde(default)]
    pub price_overview: Option<PriceOverview>,
    /// Package references. Usually bare integers; objects carrying a `price`
    /// are used as the last price fallback.
    #[serde(default)]
    pub packages: Vec<serde_json::Value>,
    #[serde(default)]
    pub developers: Vec<String>,
    #[serde(default)]
    pub publishers: Vec<String>,
    /// HTML-annotated language list.
    #[serde(default)]
    pub supported_languages: Option<String>,
    #[serde(default)]
    pub short_description: Option<String>,
    #[serde(default)]
    pub release_date: Option<ReleaseDate>,
    /// Platform name → availability, in upstream order.
    #[serde(default)]
    pub platforms: IndexMap<String, bool>,
}

#[derive(Debug, Clone, Default, Deserialize)]
pub struct PriceOverview {
    #[serde(default)]
    pub currency: Option<String>,
    #[serde(default)]
    pub final_formatted: Option<String>,
    #[serde(default)]
    pub initial_formatted: Option<String>,
    #[serde(default)]
    pub discount_percent: Option<u32>,
}

#[derive(Debug, Clone, Default, Deserialize)]
pub struct ReleaseDate {
    #[serde(default)]
    pub coming_soon: bool,
    #[serde(default)]
    pub date: Option<String>,
}

/// Per-app entry of the Store `appdetails` response, keyed by the ID string.
#[derive(Debug, Clone, Deserialize)]
pub struct AppDetailsEnvelope {
    #[serde(default)]
    pub success: bool,
    #[serde(default)]
    pub data: Option<AppDetails>,
}

/// SteamSpy `appdetails` counters.
#[derive(Debug, Clone, Default, PartialEq, Eq, Deserialize)]
pub struct AppStats {
    #[serde(default)]
    pub positive: u64,
    #[serde(default)]
    pub negative: u64,
    /// Peak concurrent users yesterday.
    #[serde(default)]
    pub ccu: u64,
    /// Tag name → vote count. SteamSpy sends `[]` instead of `{}` when an app
    /// has no tags.
    #[serde(default, deserialize_with = "tags_or_empty")]
    pub tags: IndexMap<String, u64>,
}

fn tags_or_empty<'de, D>(deserializer: D) -> Result<IndexMap<String, u64>, D::Error>
where
    D: Deserializer<'de>,
{
    let value = serde_json::Value::deserialize(deserializer)?;
    let serde_json::Value::Object(map) = value else {
        return Ok(IndexMap::new());
    };
    Ok(map
        .into_iter()
        .filter_map(|(tag, votes)| votes.as_u64().map(|v| (tag, v)))
        .collect())
}
