//! Batch crawl: list the catalog, work out which IDs are new, and process
//! them in checkpointed batches.
//!
//! Each batch runs on a [`WorkerPool`]. When every ID of the batch has an
//! outcome, valid and rejected entries are written to the staging
//! documents, merged into the long-lived stores and the index is rebuilt.
//! A crash therefore loses at most the batch in flight.

use std::sync::Arc;
use std::time::Duration;

use steamdex_core::{AppId, RejectedEntry};
use steamdex_store::{CatalogStores, MergeReport, compute_delta, known_ids, merge_checkpoint, rebuild_index};
use tokio::sync::mpsc;
use tokio_util::sync::CancellationToken;

use crate::error::CrawlError;
use crate::pipeline::{AbandonReason, GameSource, PipelineOutcome, PipelineStage, process_id, trace_stage};
use crate::worker_pool::WorkerPool;

pub const DEFAULT_BATCH_SIZE: usize = 100;
pub const DEFAULT_WORKERS: usize = 2;

/// Upper bound for one ID. Throttle waits can legitimately take minutes.
pub const DEFAULT_ITEM_TIMEOUT: Duration = Duration::from_secs(30 * 60);

/// Knobs for one crawl.
#[derive(Debug, Clone)]
pub struct CrawlOptions {
    pub batch_size: usize,
    pub workers: usize,
    /// Process at most this many new IDs.
    pub limit: Option<usize>,
    /// Treat IDs in the invalid store as unknown so they are fetched again.
    pub retry_invalid: bool,
    pub item_timeout: Duration,
}

impl Default for CrawlOptions {
    fn default() -> Self {
        Self {
            batch_size: DEFAULT_BATCH_SIZE,
            workers: DEFAULT_WORKERS,
            limit: None,
            retry_invalid: false,
            item_timeout: DEFAULT_ITEM_TIMEOUT,
        }
    }
}

/// Short outcome tag carried by [`CrawlEvent::IdFinished`].
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum OutcomeKind {
    Valid,
    Rejected,
    Abandoned,
}

impl From<&PipelineOutcome> for OutcomeKind {
    fn from(outcome: &PipelineOutcome) -> Self {
        match outcome {
            PipelineOutcome::Valid(_) => Self::Valid,
            PipelineOutcome::Rejected(_) => Self::Rejected,
            PipelineOutcome::Abandoned { .. } => Self::Abandoned,
        }
    }
}

/// Progress reported while a crawl runs.
#[derive(Debug, Clone)]
pub enum CrawlEvent {
    /// Leftover staging documents from an interrupted run were discarded.
    StagingDiscarded,
    /// Fetching the application list.
    Listing,
    /// Universe and delta are known.
    Planned {
        universe: usize,
        known: usize,
        pending: usize,
    },
    BatchStarted {
        batch: usize,
        batches: usize,
        size: usize,
    },
    IdFinished { id: AppId, outcome: OutcomeKind },
    BatchMerged { batch: usize, report: MergeReport },
    /// Throttling exhausted its budget; the run is winding down.
    CircuitOpen { reason: String },
    Done,
}

/// Totals for a finished crawl.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct CrawlSummary {
    pub universe: usize,
    pub known: usize,
    pub pending: usize,
    pub valid: usize,
    pub rejected: usize,
    pub abandoned: usize,
    pub batches: usize,
    pub indexed: usize,
}

impl CrawlSummary {
    pub fn merged(&self) -> usize {
        self.valid + self.rejected
    }
}

/// Outcomes of one batch, split by destination.
#[derive(Default)]
struct BatchResult {
    valid: Vec<steamdex_core::GameRecord>,
    rejected: Vec<RejectedEntry>,
    abandoned: usize,
    circuit: Option<String>,
}

/// Crawl every ID that is upstream but not yet in the stores.
pub async fn run_crawl<S: GameSource + 'static>(
    source: Arc<S>,
    stores: &CatalogStores,
    options: &CrawlOptions,
    events: mpsc::UnboundedSender<CrawlEvent>,
    cancel: CancellationToken,
) -> Result<CrawlSummary, CrawlError> {
    if options.batch_size == 0 || options.workers == 0 {
        return Err(CrawlError::Options(
            "batch size and worker count must be at least 1".to_string(),
        ));
    }

    if stores.has_leftover_staging()? {
        log::warn!("Discarding staging data left by an interrupted run");
        stores.staged_valid.remove()?;
        stores.staged_invalid.remove()?;
        let _ = events.send(CrawlEvent::StagingDiscarded);
    }

    let known = known_ids(stores, !options.retry_invalid)?;

    let _ = events.send(CrawlEvent::Listing);
    let universe = source.app_list().await.map_err(|e| {
        if e.is_cancelled() {
            CrawlError::Cancelled { merged: 0 }
        } else {
            CrawlError::Catalog(e)
        }
    })?;
    let mut pending = compute_delta(universe.iter().map(|e| e.appid), &known);
    if let Some(limit) = options.limit {
        pending.truncate(limit);
    }

    let mut summary = CrawlSummary {
        universe: universe.len(),
        known: known.len(),
        pending: pending.len(),
        ..CrawlSummary::default()
    };
    log::debug!(
        "Universe {} IDs, {} known, {} to crawl",
        summary.universe,
        summary.known,
        summary.pending
    );
    let _ = events.send(CrawlEvent::Planned {
        universe: summary.universe,
        known: summary.known,
        pending: summary.pending,
    });

    let batches = pending.len().div_ceil(options.batch_size);
    for (batch, ids) in pending.chunks(options.batch_size).enumerate() {
        if cancel.is_cancelled() {
            break;
        }
        let _ = events.send(CrawlEvent::BatchStarted {
            batch,
            batches,
            size: ids.len(),
        });

        let result = run_batch(source.clone(), ids.to_vec(), options, &events, &cancel).await;
        summary.abandoned += result.abandoned;

        let report = checkpoint(stores, &result)?;
        summary.valid += result.valid.len();
        summary.rejected += result.rejected.len();
        summary.batches += 1;
        summary.indexed = rebuild_index(stores)?;
        let _ = events.send(CrawlEvent::BatchMerged { batch, report });

        if let Some(reason) = result.circuit {
            return Err(CrawlError::CircuitOpen {
                reason,
                merged: summary.merged(),
            });
        }
    }

    if cancel.is_cancelled() {
        return Err(CrawlError::Cancelled {
            merged: summary.merged(),
        });
    }

    if summary.batches == 0 {
        summary.indexed = rebuild_index(stores)?;
    }
    let _ = events.send(CrawlEvent::Done);
    Ok(summary)
}

/// Run one batch to completion. Outcomes arriving after the circuit opened
/// are still collected; in-flight IDs see the cancelled token and abandon.
async fn run_batch<S: GameSource + 'static>(
    source: Arc<S>,
    ids: Vec<AppId>,
    options: &CrawlOptions,
    events: &mpsc::UnboundedSender<CrawlEvent>,
    cancel: &CancellationToken,
) -> BatchResult {
    let worker_cancel = cancel.clone();
    let mut pool = WorkerPool::start(
        options.workers,
        options.item_timeout,
        ids,
        move |id| {
            let source = source.clone();
            let cancel = worker_cancel.clone();
            async move { process_id(source.as_ref(), id, &cancel).await }
        },
        |id, failure| {
            log::warn!("{}: pipeline {}", id, failure);
            PipelineOutcome::Rejected(RejectedEntry::fetch_failed(id))
        },
    );

    let mut result = BatchResult::default();
    while let Some(outcome) = pool.recv().await {
        let _ = events.send(CrawlEvent::IdFinished {
            id: outcome.id(),
            outcome: OutcomeKind::from(&outcome),
        });
        match outcome {
            PipelineOutcome::Valid(record) => result.valid.push(record),
            PipelineOutcome::Rejected(entry) => result.rejected.push(entry),
            PipelineOutcome::Abandoned { id, reason } => {
                result.abandoned += 1;
                if let AbandonReason::Throttled(message) = reason {
                    if result.circuit.is_none() {
                        log::warn!("{}: throttle limit reached, stopping the crawl", id);
                        cancel.cancel();
                        let _ = events.send(CrawlEvent::CircuitOpen {
                            reason: message.clone(),
                        });
                        result.circuit = Some(message);
                    }
                }
            }
        }
    }
    result
}

/// Stage a batch's outcomes and fold them into the long-lived stores.
fn checkpoint(stores: &CatalogStores, result: &BatchResult) -> Result<MergeReport, CrawlError> {
    stores.staged_valid.save(&result.valid)?;
    stores.staged_invalid.save(&result.rejected)?;
    let report = merge_checkpoint(stores)?;
    for id in result
        .valid
        .iter()
        .map(|r| r.id)
        .chain(result.rejected.iter().map(|e| e.id))
    {
        trace_stage(id, PipelineStage::Persisted);
    }
    Ok(report)
}

#[cfg(test)]
#[path = "tests/orchestrator_tests.rs"]
mod tests;
