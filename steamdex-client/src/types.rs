use serde::Deserialize;
use steamdex_core::AppListEntry;

/// Top-level response of `ISteamApps/GetAppList/v2`.
#[derive(Debug, Deserialize)]
pub struct AppListResponse {
    pub applist: AppList,
}

#[derive(Debug, Deserialize)]
pub struct AppList {
    #[serde(default)]
    pub apps: Vec<AppListEntry>,
}
