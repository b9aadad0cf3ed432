//! Data model for the game catalog stores.
//!
//! Field names on the wire follow the store files the catalog has always
//! used (`ID`, `Name`, `ImageURL`, ...), so existing stores load unchanged.

use serde::{Deserialize, Serialize};

/// Steam application identifier.
pub type AppId = u32;

/// Name recorded for IDs whose details could not be fetched at all.
pub const INVALID_GAME_NAME: &str = "Invalid Game";

/// Sentinel used for unknown developer, publisher, name and release date.
pub const UNKNOWN: &str = "Unknown";

// ── Complete entries ────────────────────────────────────────────────────────

/// A fully fetched and enriched catalog entry.
///
/// Every field defaults when absent so that partially written entries from
/// older runs still load; [`GameRecord::missing_fields`] reports them.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct GameRecord {
    #[serde(rename = "ID")]
    pub id: AppId,
    #[serde(rename = "Name", default)]
    pub name: String,
    #[serde(rename = "ImageURL", default)]
    pub image_url: String,
    /// Formatted price, or one of `Free`, `Coming Soon`, `N/A`.
    #[serde(rename = "Price", default)]
    pub price: String,
    #[serde(rename = "Developer", default)]
    pub developer: String,
    #[serde(rename = "Publisher", default)]
    pub publisher: String,
    #[serde(rename = "PositiveReviews", default)]
    pub positive_reviews: u64,
    #[serde(rename = "NegativeReviews", default)]
    pub negative_reviews: u64,
    /// Peak concurrent users over the last day.
    #[serde(rename = "DayPeak", default)]
    pub day_peak: u64,
    /// Up to five tags, most popular first.
    #[serde(rename = "TopTags", default)]
    pub top_tags: Vec<String>,
    #[serde(rename = "LanguagesSub", default)]
    pub languages_sub: Vec<String>,
    #[serde(rename = "LanguagesAudio", default)]
    pub languages_audio: Vec<String>,
    #[serde(rename = "ShortDesc", default)]
    pub short_desc: String,
    #[serde(rename = "ReleaseDate", default)]
    pub release_date: String,
    /// Comma-joined platform names (e.g. `windows, mac`).
    #[serde(rename = "Platforms", default)]
    pub platforms: String,
}

impl GameRecord {
    /// Total number of user reviews.
    pub fn total_reviews(&self) -> u64 {
        self.positive_reviews + self.negative_reviews
    }

    /// Names of required fields that are blank.
    ///
    /// Numeric counters and the tag/audio lists may legitimately be zero or
    /// empty, so only text fields and the subtitle list are checked.
    pub fn missing_fields(&self) -> Vec<&'static str> {
        let text = [
            ("Name", &self.name),
            ("ImageURL", &self.image_url),
            ("Price", &self.price),
            ("Developer", &self.developer),
            ("Publisher", &self.publisher),
            ("ShortDesc", &self.short_desc),
            ("ReleaseDate", &self.release_date),
        ];
        let mut missing: Vec<&'static str> = text
            .iter()
            .filter(|(_, v)| v.trim().is_empty())
            .map(|(k, _)| *k)
            .collect();
        if self.languages_sub.is_empty() {
            missing.push("LanguagesSub");
        }
        if self.languages_audio.is_empty() {
            missing.push("LanguagesAudio");
        }
        missing
    }
}

// ── Invalid entries ─────────────────────────────────────────────────────────

/// Placeholder kept in the long-lived invalid store: just enough to never
/// fetch the ID again.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct InvalidGameRecord {
    #[serde(rename = "ID")]
    pub id: AppId,
    #[serde(rename = "Name", default)]
    pub name: String,
}

impl InvalidGameRecord {
    /// Entry for an ID whose details were never obtained.
    pub fn placeholder(id: AppId) -> Self {
        Self {
            id,
            name: INVALID_GAME_NAME.to_string(),
        }
    }
}

/// Why an ID was routed to the invalid store.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum RejectReason {
    /// Detail fetch failed, was empty, unparseable, or the pipeline errored.
    FetchFailed,
    /// A trailer or similar non-game asset.
    NotAGame,
    /// Fetched fine but missing a real developer or publisher.
    Incomplete,
}

/// An invalid entry as written to the per-batch staging file.
///
/// Fetch failures carry only the placeholder name. Classification failures
/// keep the real name and the full record under `Details`; the merge step
/// projects both shapes down to [`InvalidGameRecord`].
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct RejectedEntry {
    #[serde(rename = "ID")]
    pub id: AppId,
    #[serde(rename = "Name", default)]
    pub name: String,
    #[serde(rename = "Reason")]
    pub reason: RejectReason,
    #[serde(rename = "Details", default, skip_serializing_if = "Option::is_none")]
    pub details: Option<Box<GameRecord>>,
}

impl RejectedEntry {
    pub fn fetch_failed(id: AppId) -> Self {
        Self {
            id,
            name: INVALID_GAME_NAME.to_string(),
            reason: RejectReason::FetchFailed,
            details: None,
        }
    }

    /// Trailers and other non-game apps get the placeholder name.
    pub fn not_a_game(id: AppId) -> Self {
        Self {
            id,
            name: INVALID_GAME_NAME.to_string(),
            reason: RejectReason::NotAGame,
            details: None,
        }
    }

    pub fn incomplete(record: GameRecord) -> Self {
        Self {
            id: record.id,
            name: record.name.clone(),
            reason: RejectReason::Incomplete,
            details: Some(Box::new(record)),
        }
    }

    /// Project down to the long-lived invalid-store shape.
    pub fn to_invalid(&self) -> InvalidGameRecord {
        InvalidGameRecord {
            id: self.id,
            name: self.name.clone(),
        }
    }
}

// ── Catalog universe ────────────────────────────────────────────────────────

/// One entry of the upstream application list.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct AppListEntry {
    pub appid: AppId,
    #[serde(default)]
    pub name: String,
}
