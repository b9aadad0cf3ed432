//! Steam Web API, Store API and SteamSpy access for the catalog crawler.

pub mod catalog;
pub mod client;
pub mod credentials;
pub mod detail;
pub mod error;
pub mod stats;
pub mod transport;
pub mod types;

pub use client::{ClientOptions, DEFAULT_REGION, Endpoints, SteamClient};
pub use credentials::{CredentialSource, Credentials, api_key_source, config_path, save_to_file};
pub use detail::{DetailOutcome, parse_details, sanitize_payload};
pub use error::FetchError;
pub use transport::{RetryPolicy, RetryingTransport, ThrottleGate};
