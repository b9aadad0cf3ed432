//! Console and logfile output through the `log` facade.
//!
//! Normal output is `log::info!`, so `--quiet` (warn and above) silences it
//! and `--verbose` adds debug messages with timestamps. `RUST_LOG`, when
//! set, refines the filter further.

use std::fs::File;
use std::io::{self, Write};
use std::path::Path;
use std::sync::Mutex;

use log::{Level, LevelFilter};
use owo_colors::OwoColorize;
use owo_colors::Stream::Stdout;

use crate::error::CliError;

/// Writes to stdout and, if configured, a logfile with ANSI codes removed.
struct Tee {
    file: Option<Mutex<File>>,
}

impl Write for Tee {
    fn write(&mut self, buf: &[u8]) -> io::Result<usize> {
        io::stdout().write_all(buf)?;
        if let Some(file) = &self.file {
            let plain = strip_ansi_escapes::strip(buf);
            let mut file = file.lock().unwrap_or_else(|e| e.into_inner());
            file.write_all(&plain)?;
        }
        Ok(buf.len())
    }

    fn flush(&mut self) -> io::Result<()> {
        io::stdout().flush()?;
        if let Some(file) = &self.file {
            file.lock().unwrap_or_else(|e| e.into_inner()).flush()?;
        }
        Ok(())
    }
}

/// Marker put in front of a record. Only errors get one.
fn line_prefix(level: Level) -> String {
    if level == Level::Error {
        format!("{} ", "error:".if_supports_color(Stdout, |t| t.red()))
    } else {
        String::new()
    }
}

pub(crate) fn level_for(quiet: bool, verbose: bool) -> LevelFilter {
    if verbose {
        LevelFilter::Debug
    } else if quiet {
        LevelFilter::Warn
    } else {
        LevelFilter::Info
    }
}

/// Install the global logger. Call once, before any output.
pub(crate) fn init(quiet: bool, verbose: bool, logfile: Option<&Path>) -> Result<(), CliError> {
    let file = logfile.map(File::create).transpose()?.map(Mutex::new);

    let mut builder = env_logger::Builder::new();
    builder
        .filter_level(level_for(quiet, verbose))
        // HTTP internals are noise even at debug level.
        .filter_module("reqwest", LevelFilter::Warn)
        .filter_module("hyper_util", LevelFilter::Warn)
        .filter_module("rustls", LevelFilter::Warn)
        .parse_default_env()
        .write_style(env_logger::WriteStyle::Never)
        .target(env_logger::Target::Pipe(Box::new(Tee { file })))
        .format(move |buf, record| {
            let prefix = line_prefix(record.level());
            if verbose {
                writeln!(
                    buf,
                    "{} {:<5} {}{}",
                    chrono::Local::now().format("%H:%M:%S%.3f"),
                    record.level(),
                    prefix,
                    record.args()
                )
            } else {
                writeln!(buf, "{}{}", prefix, record.args())
            }
        });

    builder
        .try_init()
        .map_err(|e| CliError::config(format!("Could not install logger: {}", e)))
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn verbose_wins_over_quiet() {
        assert_eq!(level_for(true, true), LevelFilter::Debug);
        assert_eq!(level_for(true, false), LevelFilter::Warn);
        assert_eq!(level_for(false, false), LevelFilter::Info);
    }

    #[test]
    fn errors_carry_a_single_marker() {
        let prefix = strip_ansi_escapes::strip_str(line_prefix(Level::Error));
        assert_eq!(prefix, "error: ");
        assert!(line_prefix(Level::Warn).is_empty());
        assert!(line_prefix(Level::Info).is_empty());
    }
}
