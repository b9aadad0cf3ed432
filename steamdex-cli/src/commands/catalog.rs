use std::path::Path;

use owo_colors::OwoColorize;
use owo_colors::Stream::Stdout;

use steamdex_core::AppId;
use steamdex_store::{CatalogStores, StoreLock, diagnose, merge_checkpoint, rebuild_index};

use crate::error::CliError;

/// Rebuild the ID-keyed index from the valid store.
pub(crate) fn run_reindex(data_dir: &Path) -> Result<(), CliError> {
    let _lock = StoreLock::acquire(data_dir)?;
    let stores = CatalogStores::in_dir(data_dir);
    let count = rebuild_index(&stores)?;
    log::info!(
        "  {} Indexed {} entries",
        "\u{2714}".if_supports_color(Stdout, |t| t.green()),
        count,
    );
    Ok(())
}

/// Report store problems; with `fix`, rewrite the stores through a merge.
pub(crate) fn run_check(data_dir: &Path, fix: bool) -> Result<(), CliError> {
    let stores = CatalogStores::in_dir(data_dir);
    let diagnostics = diagnose(&stores)?;
    let leftover = stores.has_leftover_staging()?;

    log::info!(
        "{} {}",
        "Checking".if_supports_color(Stdout, |t| t.bold()),
        data_dir.display().if_supports_color(Stdout, |t| t.cyan()),
    );

    if diagnostics.is_clean() && !leftover {
        log::info!(
            "  {} No problems found",
            "\u{2714}".if_supports_color(Stdout, |t| t.green()),
        );
        return Ok(());
    }

    let warn = "\u{26A0}".if_supports_color(Stdout, |t| t.yellow()).to_string();
    if !diagnostics.duplicate_valid.is_empty() {
        log::warn!(
            "  {} {} duplicate IDs in the valid store: {}",
            warn,
            diagnostics.duplicate_valid.len(),
            preview(&diagnostics.duplicate_valid),
        );
    }
    if !diagnostics.duplicate_invalid.is_empty() {
        log::warn!(
            "  {} {} duplicate IDs in the invalid store: {}",
            warn,
            diagnostics.duplicate_invalid.len(),
            preview(&diagnostics.duplicate_invalid),
        );
    }
    if !diagnostics.overlapping.is_empty() {
        log::warn!(
            "  {} {} IDs in both stores: {}",
            warn,
            diagnostics.overlapping.len(),
            preview(&diagnostics.overlapping),
        );
    }
    if !diagnostics.incomplete.is_empty() {
        log::warn!(
            "  {} {} valid entries with blank fields",
            warn,
            diagnostics.incomplete.len(),
        );
        for (id, fields) in &diagnostics.incomplete {
            log::debug!("    {}: {}", id, fields.join(", "));
        }
    }
    if !diagnostics.unnamed_invalid.is_empty() {
        log::warn!(
            "  {} {} invalid entries without a name: {}",
            warn,
            diagnostics.unnamed_invalid.len(),
            preview(&diagnostics.unnamed_invalid),
        );
    }
    if leftover {
        log::warn!(
            "  {} Staging data from an interrupted run is present",
            warn,
        );
    }

    if !fix {
        log::info!("  Run with --fix to rewrite the stores");
        return Ok(());
    }

    let _lock = StoreLock::acquire(data_dir)?;
    let report = merge_checkpoint(&stores)?;
    let indexed = rebuild_index(&stores)?;
    log::info!(
        "  {} Rewrote stores: {} valid, {} invalid ({} duplicates dropped, {} placeholders replaced), {} indexed",
        "\u{2714}".if_supports_color(Stdout, |t| t.green()),
        report.valid_total,
        report.invalid_total,
        report.duplicates_removed,
        report.promoted,
        indexed,
    );
    Ok(())
}

fn preview(ids: &[AppId]) -> String {
    const SHOWN: usize = 10;
    let mut out = ids
        .iter()
        .take(SHOWN)
        .map(|id| id.to_string())
        .collect::<Vec<_>>()
        .join(", ");
    if ids.len() > SHOWN {
        out.push_str(&format!(", ... (+{})", ids.len() - SHOWN));
    }
    out
}
