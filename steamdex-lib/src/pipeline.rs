//! Per-ID processing: fetch details, filter non-games, enrich, build and
//! classify.

use std::future::Future;

use steamdex_client::{DetailOutcome, FetchError, SteamClient};
use steamdex_core::{
    AppDetails, AppId, AppListEntry, AppStats, GameRecord, RejectedEntry, classify, display_name,
    is_non_game,
};
use tokio_util::sync::CancellationToken;

/// Where the data for the catalog comes from.
///
/// [`SteamClient`] is the production source; tests substitute canned data.
pub trait GameSource: Send + Sync {
    /// Every application upstream knows about.
    fn app_list(&self) -> impl Future<Output = Result<Vec<AppListEntry>, FetchError>> + Send;

    /// Store details for one ID.
    fn details(&self, id: AppId) -> impl Future<Output = Result<DetailOutcome, FetchError>> + Send;

    /// Review counts, peak players and tags for one ID.
    fn stats(&self, id: AppId) -> impl Future<Output = Result<AppStats, FetchError>> + Send;
}

impl GameSource for SteamClient {
    fn app_list(&self) -> impl Future<Output = Result<Vec<AppListEntry>, FetchError>> + Send {
        self.list_apps()
    }

    fn details(&self, id: AppId) -> impl Future<Output = Result<DetailOutcome, FetchError>> + Send {
        self.fetch_details(id)
    }

    fn stats(&self, id: AppId) -> impl Future<Output = Result<AppStats, FetchError>> + Send {
        self.fetch_stats(id)
    }
}

/// Progress of one ID through the pipeline, for debug logging.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum PipelineStage {
    Pending,
    Fetching,
    FetchFailed,
    Fetched,
    Enriching,
    Built,
    Classified,
    Persisted,
}

pub(crate) fn trace_stage(id: AppId, stage: PipelineStage) {
    log::trace!("{}: {:?}", id, stage);
}

/// Why an ID produced nothing to persist.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum AbandonReason {
    Cancelled,
    /// Throttle limit reached; the message describes the endpoint.
    Throttled(String),
}

/// Result of running one ID through the pipeline.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum PipelineOutcome {
    Valid(GameRecord),
    Rejected(RejectedEntry),
    /// Not persisted; the ID stays unknown and is retried by a later run.
    Abandoned { id: AppId, reason: AbandonReason },
}

impl PipelineOutcome {
    pub fn id(&self) -> AppId {
        match self {
            Self::Valid(r) => r.id,
            Self::Rejected(e) => e.id,
            Self::Abandoned { id, .. } => *id,
        }
    }

    fn from_error(id: AppId, err: FetchError) -> Result<Self, FetchError> {
        if err.is_cancelled() {
            Ok(Self::Abandoned {
                id,
                reason: AbandonReason::Cancelled,
            })
        } else if err.trips_circuit() {
            Ok(Self::Abandoned {
                id,
                reason: AbandonReason::Throttled(err.to_string()),
            })
        } else {
            Err(err)
        }
    }
}

/// Run `id` through the whole pipeline.
///
/// Never fails: fetch errors become `fetch_failed` rejections, enrichment
/// errors fall back to empty stats, and only cancellation or throttle
/// exhaustion abandons the ID.
pub async fn process_id<S: GameSource>(
    source: &S,
    id: AppId,
    cancel: &CancellationToken,
) -> PipelineOutcome {
    trace_stage(id, PipelineStage::Pending);
    if cancel.is_cancelled() {
        return PipelineOutcome::Abandoned {
            id,
            reason: AbandonReason::Cancelled,
        };
    }

    trace_stage(id, PipelineStage::Fetching);
    let details = match fetch_details(source, id).await {
        Ok(Some(details)) => details,
        Ok(None) => {
            trace_stage(id, PipelineStage::FetchFailed);
            return PipelineOutcome::Rejected(RejectedEntry::fetch_failed(id));
        }
        Err(outcome) => return outcome,
    };
    trace_stage(id, PipelineStage::Fetched);

    if is_non_game(&details) {
        log::debug!("{}: skipping non-game '{}'", id, display_name(&details));
        return PipelineOutcome::Rejected(RejectedEntry::not_a_game(id));
    }

    trace_stage(id, PipelineStage::Enriching);
    let stats = match source.stats(id).await {
        Ok(stats) => stats,
        Err(e) => match PipelineOutcome::from_error(id, e) {
            Ok(abandoned) => return abandoned,
            Err(e) => {
                log::warn!("{}: enrichment failed ({}), using empty stats", id, e);
                AppStats::default()
            }
        },
    };

    trace_stage(id, PipelineStage::Built);
    let classified = classify(id, &details, &stats);
    trace_stage(id, PipelineStage::Classified);

    match classified.into_result() {
        Ok(record) => PipelineOutcome::Valid(record),
        Err(rejected) => {
            log::debug!("{}: incomplete, routed to invalid store", id);
            PipelineOutcome::Rejected(rejected)
        }
    }
}

/// `Ok(Some)` on success, `Ok(None)` when the ID should be written off,
/// `Err` with the abandon outcome otherwise.
async fn fetch_details<S: GameSource>(
    source: &S,
    id: AppId,
) -> Result<Option<Box<AppDetails>>, PipelineOutcome> {
    match source.details(id).await {
        Ok(DetailOutcome::Success(details)) => Ok(Some(details)),
        Ok(other) => {
            log::debug!("{}: {}", id, other.label());
            Ok(None)
        }
        Err(e) => match PipelineOutcome::from_error(id, e) {
            Ok(abandoned) => Err(abandoned),
            Err(e) => {
                log::warn!("{}: detail fetch failed: {}", id, e);
                Ok(None)
            }
        },
    }
}

#[cfg(test)]
#[path = "tests/pipeline_tests.rs"]
mod tests;
