//! Store `appdetails` lookups.

use std::collections::HashMap;

use steamdex_core::{AppDetails, AppDetailsEnvelope, AppId};

use crate::client::SteamClient;
use crate::error::FetchError;

/// What the Store said about one ID.
#[derive(Debug, Clone)]
pub enum DetailOutcome {
    Success(Box<AppDetails>),
    /// The Store answered but reported no data for the ID.
    NotFound,
    /// Non-empty body that is not the expected JSON.
    ParseFailure(String),
    /// Zero-length body.
    Empty,
}

impl DetailOutcome {
    pub fn label(&self) -> &'static str {
        match self {
            Self::Success(_) => "success",
            Self::NotFound => "not found",
            Self::ParseFailure(_) => "unparseable response",
            Self::Empty => "empty response",
        }
    }
}

impl SteamClient {
    /// Look up Store details for `id` in the configured region.
    pub async fn fetch_details(&self, id: AppId) -> Result<DetailOutcome, FetchError> {
        let mut query = vec![("appids", id.to_string()), ("cc", self.region().to_string())];
        if let Some(key) = self.api_key() {
            query.push(("key", key.to_string()));
        }
        let body = self
            .store_transport()
            .get_text(&self.endpoints().app_details, &query)
            .await?;
        Ok(parse_details(id, &body))
    }
}

/// Remove control characters (U+0000–U+001F, U+007F–U+009F). Some Store
/// payloads carry raw ones inside strings, which breaks JSON parsing.
pub fn sanitize_payload(raw: &str) -> String {
    raw.chars().filter(|c| !c.is_control()).collect()
}

/// Interpret an `appdetails` body for `id`.
pub fn parse_details(id: AppId, body: &str) -> DetailOutcome {
    if body.is_empty() {
        return DetailOutcome::Empty;
    }
    let cleaned = sanitize_payload(body);
    let parsed: Option<HashMap<String, AppDetailsEnvelope>> = match serde_json::from_str(&cleaned) {
        Ok(p) => p,
        Err(e) => return DetailOutcome::ParseFailure(e.to_string()),
    };
    let Some(mut entries) = parsed else {
        return DetailOutcome::NotFound;
    };
    match entries.remove(&id.to_string()) {
        Some(AppDetailsEnvelope {
            success: true,
            data: Some(details),
        }) => DetailOutcome::Success(Box::new(details)),
        _ => DetailOutcome::NotFound,
    }
}

#[cfg(test)]
#[path = "tests/detail_tests.rs"]
mod tests;
