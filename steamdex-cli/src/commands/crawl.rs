use std::path::Path;
use std::sync::Arc;

use owo_colors::OwoColorize;
use owo_colors::Stream::Stdout;
use tokio_util::sync::CancellationToken;

use steamdex_client::{Credentials, SteamClient};
use steamdex_lib::{CrawlEvent, CrawlSummary, Settings};
use steamdex_store::{CatalogStores, StoreLock};

use crate::cli_types::CrawlArgs;
use crate::error::CliError;
use crate::progress::CrawlProgress;

/// Crawl every app that is not yet in the catalog under `data_dir`.
pub(crate) fn run_crawl(
    settings: &Settings,
    data_dir: &Path,
    args: CrawlArgs,
    quiet: bool,
) -> Result<(), CliError> {
    let mut options = settings.crawl_options();
    options.limit = args.limit;
    options.retry_invalid = args.retry_invalid;
    if let Some(n) = args.batch_size {
        options.batch_size = n;
    }
    if let Some(n) = args.workers {
        options.workers = n;
    }

    let mut client_options = settings.client_options();
    if let Some(region) = args.region {
        client_options.region = region;
    }

    let creds = Credentials::load().with_override(args.api_key);
    if creds.api_key.is_none() {
        log::warn!(
            "{} No Steam API key configured (set STEAM_API_KEY or run `steamdex config set-key`); requests go out unauthenticated",
            "\u{26A0}".if_supports_color(Stdout, |t| t.yellow()),
        );
    }

    if args.break_lock && StoreLock::break_stale(data_dir)? {
        log::warn!("Removed a stale lock in {}", data_dir.display());
    }

    // A dry run works on an in-memory copy and never takes the lock.
    let (_lock, stores) = if args.dry_run {
        log::info!(
            "{}",
            "Dry run: nothing will be written".if_supports_color(Stdout, |t| t.dimmed()),
        );
        (None, CatalogStores::snapshot_of(data_dir)?)
    } else {
        (
            Some(StoreLock::acquire(data_dir)?),
            CatalogStores::in_dir(data_dir),
        )
    };

    log::info!(
        "{} {}",
        "Crawling into".if_supports_color(Stdout, |t| t.bold()),
        data_dir.display().if_supports_color(Stdout, |t| t.cyan()),
    );

    let rt = tokio::runtime::Runtime::new()
        .map_err(|e| CliError::runtime(format!("Failed to create async runtime: {}", e)))?;

    rt.block_on(async {
        let cancel = CancellationToken::new();
        let client = Arc::new(SteamClient::new(creds, client_options, cancel.clone())?);

        let interrupt = cancel.clone();
        tokio::spawn(async move {
            if tokio::signal::ctrl_c().await.is_ok() {
                log::warn!("Interrupted; merging finished work and stopping...");
                interrupt.cancel();
            }
        });

        let (event_tx, event_rx) = tokio::sync::mpsc::unbounded_channel::<CrawlEvent>();
        let mut progress = CrawlProgress::new(quiet);

        let crawl = steamdex_lib::run_crawl(client, &stores, &options, event_tx, cancel);
        let result = steamdex_lib::async_util::run_with_events(crawl, event_rx, |e| match e {
            CrawlEvent::StagingDiscarded => progress.println(|| {
                log::warn!(
                    "  {} Discarded staging data from an interrupted run",
                    "\u{26A0}".if_supports_color(Stdout, |t| t.yellow()),
                )
            }),
            CrawlEvent::Listing => progress.listing(),
            CrawlEvent::Planned {
                universe,
                known,
                pending,
            } => {
                progress.println(|| {
                    log::info!(
                        "  {} apps upstream, {} already catalogued, {} to crawl",
                        universe,
                        known,
                        pending.if_supports_color(Stdout, |t| t.bold()),
                    )
                });
                progress.start(pending);
            }
            CrawlEvent::BatchStarted { batch, batches, .. } => progress.batch(batch, batches),
            CrawlEvent::IdFinished { outcome, .. } => progress.finished(outcome),
            CrawlEvent::BatchMerged { batch, report } => progress.println(|| {
                log::debug!(
                    "Batch {} merged: {} valid / {} invalid staged, stores now {} / {}",
                    batch + 1,
                    report.staged_valid,
                    report.staged_invalid,
                    report.valid_total,
                    report.invalid_total,
                )
            }),
            CrawlEvent::CircuitOpen { reason } => progress.println(|| {
                log::warn!(
                    "  {} Throttle limit reached, stopping: {}",
                    "\u{2718}".if_supports_color(Stdout, |t| t.red()),
                    reason,
                )
            }),
            CrawlEvent::Done => {}
        })
        .await;
        progress.clear();

        let summary = result?;
        print_summary(&summary);
        Ok::<(), CliError>(())
    })
}

fn print_summary(summary: &CrawlSummary) {
    if summary.pending == 0 {
        log::info!(
            "  {} Catalog is up to date ({} entries indexed)",
            "\u{2714}".if_supports_color(Stdout, |t| t.green()),
            summary.indexed,
        );
        return;
    }
    log::info!(
        "  {} {} valid, {} invalid merged in {} batches",
        "\u{2714}".if_supports_color(Stdout, |t| t.green()),
        summary.valid,
        summary.rejected,
        summary.batches,
    );
    log::info!("  {} entries indexed", summary.indexed);
    if summary.abandoned > 0 {
        log::warn!(
            "  {} {} apps abandoned; they will be retried next run",
            "\u{26A0}".if_supports_color(Stdout, |t| t.yellow()),
            summary.abandoned,
        );
    }
}
