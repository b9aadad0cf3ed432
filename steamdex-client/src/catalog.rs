//! The application universe: every ID Steam reports as existing.

use steamdex_core::AppListEntry;

use crate::client::SteamClient;
use crate::error::FetchError;
use crate::types::AppListResponse;

impl SteamClient {
    /// Fetch the full application list.
    pub async fn list_apps(&self) -> Result<Vec<AppListEntry>, FetchError> {
        let body = self
            .store_transport()
            .get_text(&self.endpoints().app_list, &[])
            .await?;
        let apps = parse_app_list(&body)?;
        log::debug!("App list contains {} entries", apps.len());
        Ok(apps)
    }
}

pub fn parse_app_list(body: &str) -> Result<Vec<AppListEntry>, FetchError> {
    let response: AppListResponse = serde_json::from_str(body)?;
    Ok(response.applist.apps)
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn parses_app_list() {
        let body = r#"{"applist":{"apps":[{"appid":10,"name":"Counter-Strike"},{"appid":20,"name":""}]}}"#;
        let apps = parse_app_list(body).unwrap();
        assert_eq!(apps.len(), 2);
        assert_eq!(apps[0].appid, 10);
        assert_eq!(apps[0].name, "Counter-Strike");
    }

    #[test]
    fn missing_apps_array_is_empty() {
        let apps = parse_app_list(r#"{"applist":{}}"#).unwrap();
        assert!(apps.is_empty());
    }

    #[test]
    fn malformed_list_is_an_error() {
        assert!(matches!(
            parse_app_list("<html>"),
            Err(FetchError::Json(_))
        ));
    }
}
