//! steamdex CLI
//!
//! Command-line interface for crawling the Steam catalog into local JSON
//! stores and searching the result.

mod cli_types;
mod commands;
mod error;
mod logging;
mod progress;

use clap::Parser;

use cli_types::{Cli, Commands, ConfigAction, SearchQuery};
use error::CliError;

fn main() {
    let cli = Cli::parse();

    if let Err(e) = logging::init(cli.quiet, cli.verbose, cli.logfile.as_deref()) {
        eprintln!("{}", e);
        std::process::exit(1);
    }

    if let Err(e) = run(cli) {
        // The log formatter adds the `error:` marker.
        log::error!("{}", e);
        std::process::exit(1);
    }
}

fn run(cli: Cli) -> Result<(), CliError> {
    let settings = steamdex_lib::Settings::load()?;
    let data_dir = settings.data_dir(cli.data_dir);

    match cli.command {
        Commands::Crawl(args) => commands::crawl::run_crawl(&settings, &data_dir, args, cli.quiet),
        Commands::Reindex => commands::catalog::run_reindex(&data_dir),
        Commands::Check { fix } => commands::catalog::run_check(&data_dir, fix),
        Commands::Search { query } => match query {
            SearchQuery::Name { query, limit } => {
                commands::search::run_search_name(&data_dir, &query, limit)
            }
            SearchQuery::Category { tag, limit } => {
                commands::search::run_search_category(&data_dir, &tag, limit)
            }
        },
        Commands::Config { action } => match action {
            ConfigAction::Show => commands::config::run_config_show(&settings, &data_dir),
            ConfigAction::Path => commands::config::run_config_path(),
            ConfigAction::Init { force } => commands::config::run_config_init(force),
            ConfigAction::SetKey { key } => commands::config::run_config_set_key(key),
        },
    }
}
