use std::path::Path;

use owo_colors::OwoColorize;
use owo_colors::Stream::Stdout;

use steamdex_core::GameRecord;
use steamdex_store::{CatalogIndex, CatalogStores, build_index, find_by_category, find_by_name, positive_ratio};

use crate::error::CliError;

/// Load the index, building it in memory from the valid store when the
/// index file has not been written yet.
fn load_index(data_dir: &Path) -> Result<CatalogIndex, CliError> {
    let stores = CatalogStores::in_dir(data_dir);
    if let Some(index) = stores.index.load()? {
        return Ok(index);
    }
    log::debug!("No index file in {}, using the valid store", data_dir.display());
    Ok(build_index(&stores.valid.load_or_default()?))
}

pub(crate) fn run_search_name(data_dir: &Path, query: &str, limit: usize) -> Result<(), CliError> {
    let index = load_index(data_dir)?;
    print_results(&find_by_name(query, &index, limit), query);
    Ok(())
}

pub(crate) fn run_search_category(data_dir: &Path, tag: &str, limit: usize) -> Result<(), CliError> {
    let index = load_index(data_dir)?;
    print_results(&find_by_category(tag, &index, limit), tag);
    Ok(())
}

fn print_results(results: &[&GameRecord], query: &str) {
    if results.is_empty() {
        log::info!(
            "No games found for \"{}\"",
            query.if_supports_color(Stdout, |t| t.bold()),
        );
        return;
    }
    for (i, record) in results.iter().enumerate() {
        log::info!(
            "{:>2}. {} {}",
            i + 1,
            record.name.if_supports_color(Stdout, |t| t.bold()),
            format!("(Reviews: {})", record.total_reviews()).if_supports_color(Stdout, |t| t.dimmed()),
        );
        log::info!(
            "    Positive: {:.2}%  Price: {}  ID: {}",
            positive_ratio(record).unwrap_or(0.0),
            record.price,
            record.id,
        );
    }
}
