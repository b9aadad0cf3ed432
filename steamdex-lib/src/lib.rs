//! Crawl orchestration for the Steam catalog: the per-ID pipeline, the
//! batch orchestrator and its worker pool, and application settings.
//!
//! Frontends call [`run_crawl`] with a [`GameSource`] (normally a
//! [`steamdex_client::SteamClient`]) and a set of
//! [`steamdex_store::CatalogStores`], and follow progress through
//! [`CrawlEvent`]s.

pub mod async_util;
pub mod error;
pub mod orchestrator;
pub mod pipeline;
pub mod settings;
pub mod worker_pool;

#[cfg(test)]
#[path = "tests/fake_source.rs"]
pub(crate) mod fake_source;

pub use error::{CrawlError, SettingsError};
pub use orchestrator::{CrawlEvent, CrawlOptions, CrawlSummary, OutcomeKind, run_crawl};
pub use pipeline::{AbandonReason, GameSource, PipelineOutcome, PipelineStage, process_id};
pub use settings::{Settings, settings_path};
pub use worker_pool::{TaskFailure, WorkerPool};
