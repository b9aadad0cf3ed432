//! Turn fetched Store details and SteamSpy counters into catalog records.

use quick_xml::escape::{resolve_html5_entity, unescape_with};

use crate::languages::{NOT_AVAILABLE, parse_supported_languages};
use crate::tags::{TOP_TAG_COUNT, top_tags};
use crate::types::{AppId, GameRecord, RejectedEntry, UNKNOWN};
use crate::upstream::{AppDetails, AppStats};

pub const PRICE_FREE: &str = "Free";
pub const PRICE_COMING_SOON: &str = "Coming Soon";
pub const PRICE_NOT_AVAILABLE: &str = "N/A";
/// Used when a price block exists but carries no formatted value.
pub const PRICE_UNFORMATTED: &str = "Price not available";

const NO_IMAGE: &str = "No image available";
const NO_DESCRIPTION: &str = "No description available";

/// Result of classifying a built record.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Classification {
    /// Has a real developer and publisher; goes to the valid store.
    Complete(GameRecord),
    /// Missing developer or publisher; goes to the invalid store in full.
    Incomplete(GameRecord),
}

impl Classification {
    pub fn record(&self) -> &GameRecord {
        match self {
            Self::Complete(r) | Self::Incomplete(r) => r,
        }
    }
}

/// Resolve the display price. The first matching rule wins:
///
/// 1. free → `Free`
/// 2. price block → its formatted final price
/// 3. release marked coming soon → `Coming Soon`
/// 4. a package carrying a price → that price
/// 5. otherwise `N/A`
pub fn resolve_price(details: &AppDetails) -> String {
    if details.is_free {
        return PRICE_FREE.to_string();
    }
    if let Some(overview) = &details.price_overview {
        return overview
            .final_formatted
            .clone()
            .unwrap_or_else(|| PRICE_UNFORMATTED.to_string());
    }
    if details.release_date.as_ref().is_some_and(|r| r.coming_soon) {
        return PRICE_COMING_SOON.to_string();
    }
    if let Some(price) = package_price(details) {
        return price;
    }
    PRICE_NOT_AVAILABLE.to_string()
}

fn package_price(details: &AppDetails) -> Option<String> {
    details.packages.iter().find_map(|pkg| {
        let price = pkg.as_object()?.get("price")?;
        Some(match price {
            serde_json::Value::String(s) => s.clone(),
            other => other.to_string(),
        })
    })
}

/// True when at least one entry in each list is a real name.
pub fn is_complete(developers: &[String], publishers: &[String]) -> bool {
    fn has_real(names: &[String]) -> bool {
        names
            .iter()
            .any(|n| !n.trim().is_empty() && n.as_str() != UNKNOWN)
    }
    has_real(developers) && has_real(publishers)
}

/// Trailers and similar media are listed as apps but have no description.
pub fn is_non_game(details: &AppDetails) -> bool {
    let name = details.name.as_deref().unwrap_or_default();
    let has_description = details
        .short_description
        .as_deref()
        .is_some_and(|d| !d.trim().is_empty());
    name.to_lowercase().contains("trailer") && !has_description
}

/// Decoded app name, or `Unknown`.
pub fn display_name(details: &AppDetails) -> String {
    unescape_html(details.name.as_deref().unwrap_or(UNKNOWN))
}

/// Build the canonical record for an app.
pub fn build_record(id: AppId, details: &AppDetails, stats: &AppStats) -> GameRecord {
    let languages = parse_supported_languages(
        details.supported_languages.as_deref().unwrap_or(NOT_AVAILABLE),
    );

    let platforms = details
        .platforms
        .iter()
        .filter(|(_, available)| **available)
        .map(|(name, _)| name.as_str())
        .collect::<Vec<_>>()
        .join(", ");

    GameRecord {
        id,
        name: display_name(details),
        image_url: unescape_html(details.header_image.as_deref().unwrap_or(NO_IMAGE)),
        price: unescape_html(&resolve_price(details)),
        developer: unescape_html(first_or_unknown(&details.developers)),
        publisher: unescape_html(first_or_unknown(&details.publishers)),
        positive_reviews: stats.positive,
        negative_reviews: stats.negative,
        day_peak: stats.ccu,
        top_tags: top_tags(&stats.tags, TOP_TAG_COUNT),
        languages_sub: languages.subtitles,
        languages_audio: languages.full_audio,
        short_desc: unescape_html(details.short_description.as_deref().unwrap_or(NO_DESCRIPTION)),
        release_date: unescape_html(
            details
                .release_date
                .as_ref()
                .and_then(|r| r.date.as_deref())
                .unwrap_or(UNKNOWN),
        ),
        platforms: unescape_html(&platforms),
    }
}

/// Build and classify in one step.
pub fn classify(id: AppId, details: &AppDetails, stats: &AppStats) -> Classification {
    let record = build_record(id, details, stats);
    if is_complete(&details.developers, &details.publishers) {
        Classification::Complete(record)
    } else {
        Classification::Incomplete(record)
    }
}

impl Classification {
    /// Valid record, or the invalid-store entry carrying the full record.
    pub fn into_result(self) -> Result<GameRecord, RejectedEntry> {
        match self {
            Self::Complete(r) => Ok(r),
            Self::Incomplete(r) => Err(RejectedEntry::incomplete(r)),
        }
    }
}

fn first_or_unknown(names: &[String]) -> &str {
    names.first().map(String::as_str).unwrap_or(UNKNOWN)
}

/// Decode HTML character references, named (HTML5 set) and numeric.
/// References that do not resolve, and bare ampersands, are kept as written.
pub fn unescape_html(text: &str) -> String {
    if let Ok(decoded) = unescape_with(text, resolve_html5_entity) {
        return decoded.into_owned();
    }

    let mut out = String::with_capacity(text.len());
    let mut rest = text;
    while let Some(start) = rest.find('&') {
        out.push_str(&rest[..start]);
        let tail = &rest[start..];
        if let Some(end) = tail.find(';').filter(|&end| end > 1) {
            if let Ok(decoded) = unescape_with(&tail[..=end], resolve_html5_entity) {
                out.push_str(&decoded);
                rest = &tail[end + 1..];
                continue;
            }
        }
        out.push('&');
        rest = &tail[1..];
    }
    out.push_str(rest);
    out
}

#[cfg(test)]
#[path = "tests/builder_tests.rs"]
mod tests;
