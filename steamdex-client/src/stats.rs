//! SteamSpy `appdetails` lookups (review counts, CCU, tags).

use steamdex_core::{AppId, AppStats};

use crate::client::SteamClient;
use crate::error::FetchError;

impl SteamClient {
    /// Popularity counters for `id`. Unauthenticated.
    pub async fn fetch_stats(&self, id: AppId) -> Result<AppStats, FetchError> {
        let query = [("request", "appdetails".to_string()), ("appid", id.to_string())];
        let body = self
            .spy_transport()
            .get_text(&self.endpoints().spy_api, &query)
            .await?;
        parse_stats(&body)
    }
}

pub fn parse_stats(body: &str) -> Result<AppStats, FetchError> {
    Ok(serde_json::from_str(body)?)
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn parses_counters_and_tags() {
        let body = r#"{"appid":570,"name":"Dota 2","positive":1500000,"negative":300000,
            "ccu":650000,"tags":{"Free to Play":60000,"MOBA":20000}}"#;
        let stats = parse_stats(body).unwrap();
        assert_eq!(stats.positive, 1_500_000);
        assert_eq!(stats.negative, 300_000);
        assert_eq!(stats.ccu, 650_000);
        assert_eq!(stats.tags.len(), 2);
    }

    #[test]
    fn unknown_app_defaults_to_zero() {
        let stats = parse_stats(r#"{"appid":999999999,"name":null,"tags":[]}"#).unwrap();
        assert_eq!(stats, AppStats::default());
    }
}
