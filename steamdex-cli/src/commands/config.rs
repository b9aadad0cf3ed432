use std::path::Path;

use owo_colors::OwoColorize;
use owo_colors::Stream::Stdout;

use steamdex_client::{CredentialSource, Credentials};
use steamdex_lib::{Settings, settings_path};

use crate::error::CliError;

fn describe_file(label: &str, path: &Path) {
    if path.exists() {
        log::info!(
            "  {} {} {}",
            format!("{}:", label).if_supports_color(Stdout, |t| t.cyan()),
            path.display(),
            "(exists)".if_supports_color(Stdout, |t| t.green()),
        );
    } else {
        log::info!(
            "  {} {} {}",
            format!("{}:", label).if_supports_color(Stdout, |t| t.cyan()),
            path.display(),
            "(not found)".if_supports_color(Stdout, |t| t.dimmed()),
        );
    }
}

fn field(name: &str, value: impl std::fmt::Display) {
    log::info!(
        "  {} {}",
        format!("{}:", name).if_supports_color(Stdout, |t| t.cyan()),
        value,
    );
}

/// Show effective settings and where the API key comes from.
pub(crate) fn run_config_show(settings: &Settings, data_dir: &Path) -> Result<(), CliError> {
    log::info!("{}", "steamdex Configuration".if_supports_color(Stdout, |t| t.bold()));
    log::info!("");

    describe_file("Settings file", &settings_path());
    match steamdex_client::config_path() {
        Some(path) => describe_file("Credentials file", &path),
        None => log::info!(
            "  Credentials file: {}",
            "could not determine path".if_supports_color(Stdout, |t| t.red()),
        ),
    }
    log::info!("");

    field("data_dir", data_dir.display());
    field("region", &settings.crawl.region);
    field("batch_size", settings.crawl.batch_size);
    field("workers", settings.crawl.workers);
    field("spy_interval_ms", settings.crawl.spy_interval_ms);
    field("item_timeout_secs", settings.crawl.item_timeout_secs);
    field("max_retries", settings.retry.max_retries);
    field("max_throttle_retries", settings.retry.max_throttle_retries);
    log::info!("");

    let source = steamdex_client::api_key_source();
    let source_str = format!("({})", source);
    match Credentials::load().masked_key() {
        Some(masked) if source != CredentialSource::Missing => log::info!(
            "  {} {} {}",
            "api_key:".if_supports_color(Stdout, |t| t.cyan()),
            masked,
            source_str.if_supports_color(Stdout, |t| t.dimmed()),
        ),
        _ => log::info!(
            "  {} {} {}",
            "api_key:".if_supports_color(Stdout, |t| t.cyan()),
            "not set".if_supports_color(Stdout, |t| t.yellow()),
            source_str.if_supports_color(Stdout, |t| t.dimmed()),
        ),
    }
    Ok(())
}

/// Print the settings and credentials file paths.
pub(crate) fn run_config_path() -> Result<(), CliError> {
    log::info!("{}", settings_path().display());
    let creds = steamdex_client::config_path()
        .ok_or_else(|| CliError::config("Could not determine config directory"))?;
    log::info!("{}", creds.display());
    Ok(())
}

/// Write the default settings, refusing to clobber an existing file.
pub(crate) fn run_config_init(force: bool) -> Result<(), CliError> {
    let path = settings_path();
    if path.exists() && !force {
        return Err(CliError::config(format!(
            "{} already exists (use --force to overwrite)",
            path.display()
        )));
    }
    let path = Settings::default().save()?;
    log::info!(
        "{} Settings written to {}",
        "\u{2714}".if_supports_color(Stdout, |t| t.green()),
        path.display().if_supports_color(Stdout, |t| t.cyan()),
    );
    Ok(())
}

pub(crate) fn run_config_set_key(key: String) -> Result<(), CliError> {
    let key = key.trim().to_string();
    if key.is_empty() {
        return Err(CliError::config("API key must not be empty"));
    }
    let creds = Credentials { api_key: Some(key) };
    let path = steamdex_client::save_to_file(&creds)?;
    log::info!(
        "{} API key saved to {}",
        "\u{2714}".if_supports_color(Stdout, |t| t.green()),
        path.display().if_supports_color(Stdout, |t| t.cyan()),
    );
    if let CredentialSource::EnvVar(var) = steamdex_client::api_key_source() {
        log::warn!(
            "  {} ${} is set and takes precedence over the saved key",
            "\u{26A0}".if_supports_color(Stdout, |t| t.yellow()),
            var,
        );
    }
    Ok(())
}
