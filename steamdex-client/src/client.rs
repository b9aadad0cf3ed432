use serde::{Deserialize, Serialize};
use tokio_util::sync::CancellationToken;

use crate::credentials::Credentials;
use crate::error::FetchError;
use crate::transport::{RetryPolicy, RetryingTransport};

/// Region used for Store prices when none is configured.
pub const DEFAULT_REGION: &str = "US";

/// API locations, loadable from the `[endpoints]` settings table.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct Endpoints {
    pub app_list: String,
    pub app_details: String,
    pub spy_api: String,
}

impl Default for Endpoints {
    fn default() -> Self {
        Self {
            app_list: "https://api.steampowered.com/ISteamApps/GetAppList/v2/".to_string(),
            app_details: "https://store.steampowered.com/api/appdetails".to_string(),
            spy_api: "https://steamspy.com/api.php".to_string(),
        }
    }
}

/// Client for the Steam Web API, the Store API and SteamSpy.
///
/// Steam endpoints and SteamSpy each get their own [`RetryingTransport`], so
/// throttling on one host does not pause requests to the other. Both share
/// the run's cancellation token.
pub struct SteamClient {
    store: RetryingTransport,
    spy: RetryingTransport,
    endpoints: Endpoints,
    creds: Credentials,
    region: String,
}

/// Construction options for [`SteamClient`].
#[derive(Debug, Clone)]
pub struct ClientOptions {
    pub endpoints: Endpoints,
    pub region: String,
    pub store_policy: RetryPolicy,
    pub spy_policy: RetryPolicy,
}

impl Default for ClientOptions {
    fn default() -> Self {
        Self {
            endpoints: Endpoints::default(),
            region: DEFAULT_REGION.to_string(),
            store_policy: RetryPolicy::default(),
            // SteamSpy asks for at most one request per second.
            spy_policy: RetryPolicy {
                min_request_interval_ms: 1_000,
                ..RetryPolicy::default()
            },
        }
    }
}

impl SteamClient {
    pub fn new(
        creds: Credentials,
        options: ClientOptions,
        cancel: CancellationToken,
    ) -> Result<Self, FetchError> {
        if options.region.trim().is_empty() {
            return Err(FetchError::Config("Region code must not be empty".to_string()));
        }
        Ok(Self {
            store: RetryingTransport::new(options.store_policy, cancel.clone())?,
            spy: RetryingTransport::new(options.spy_policy, cancel)?,
            endpoints: options.endpoints,
            creds,
            region: options.region.to_uppercase(),
        })
    }

    pub fn region(&self) -> &str {
        &self.region
    }

    pub fn endpoints(&self) -> &Endpoints {
        &self.endpoints
    }

    pub fn api_key(&self) -> Option<&str> {
        self.creds.api_key.as_deref()
    }

    pub(crate) fn store_transport(&self) -> &RetryingTransport {
        &self.store
    }

    pub(crate) fn spy_transport(&self) -> &RetryingTransport {
        &self.spy
    }
}
