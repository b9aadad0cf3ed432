//! CLI type definitions: command enums and argument structs.

use std::path::PathBuf;

use clap::{Args, Parser, Subcommand};

#[derive(Parser)]
#[command(name = "steamdex")]
#[command(about = "Crawl the Steam catalog into local JSON stores", long_about = None)]
pub(crate) struct Cli {
    /// Directory holding the catalog files (defaults to settings, then current directory)
    #[arg(short, long, global = true)]
    pub data_dir: Option<PathBuf>,

    /// Only show warnings and errors (suppress normal output)
    #[arg(long, global = true)]
    pub quiet: bool,

    /// Enable verbose/debug logging (timestamps + debug-level messages)
    #[arg(short, long, global = true)]
    pub verbose: bool,

    /// Write log output to a file (ANSI codes stripped)
    #[arg(long, global = true)]
    pub logfile: Option<PathBuf>,

    #[command(subcommand)]
    pub command: Commands,
}

#[derive(Subcommand)]
pub(crate) enum Commands {
    /// Fetch every app not yet in the catalog
    Crawl(CrawlArgs),

    /// Rebuild the ID-keyed index from the valid store
    Reindex,

    /// Report duplicates, overlaps and incomplete entries
    Check {
        /// Rewrite the stores deduplicated and rebuild the index
        #[arg(long)]
        fix: bool,
    },

    /// Search the catalog index
    Search {
        #[command(subcommand)]
        query: SearchQuery,
    },

    /// Manage settings and the Steam API key
    Config {
        #[command(subcommand)]
        action: ConfigAction,
    },
}

#[derive(Args, Clone)]
pub(crate) struct CrawlArgs {
    /// Process at most this many new apps
    #[arg(short, long)]
    pub limit: Option<usize>,

    /// Apps per checkpoint
    #[arg(short, long)]
    pub batch_size: Option<usize>,

    /// Concurrent workers
    #[arg(short, long)]
    pub workers: Option<usize>,

    /// Store region for prices (e.g., US, DE, GB)
    #[arg(long)]
    pub region: Option<String>,

    /// Steam Web API key for this run (overrides env and credentials file)
    #[arg(long)]
    pub api_key: Option<String>,

    /// Fetch apps in the invalid store again
    #[arg(long)]
    pub retry_invalid: bool,

    /// Crawl without writing anything to the catalog
    #[arg(short = 'n', long)]
    pub dry_run: bool,

    /// Remove a lock left behind by a crashed run
    #[arg(long)]
    pub break_lock: bool,
}

#[derive(Subcommand)]
pub(crate) enum SearchQuery {
    /// Find games by (fuzzy) name
    Name {
        query: String,

        #[arg(short, long, default_value_t = steamdex_store::query::NAME_RESULTS)]
        limit: usize,
    },

    /// Find games whose leading tags match a category
    Category {
        tag: String,

        #[arg(short, long, default_value_t = steamdex_store::query::CATEGORY_RESULTS)]
        limit: usize,
    },
}

#[derive(Subcommand)]
pub(crate) enum ConfigAction {
    /// Show effective settings and where the API key comes from
    Show,

    /// Print the settings and credentials file paths
    Path,

    /// Write a settings file with the defaults
    Init {
        /// Overwrite an existing settings file
        #[arg(long)]
        force: bool,
    },

    /// Save a Steam Web API key to the credentials file
    SetKey { key: String },
}
