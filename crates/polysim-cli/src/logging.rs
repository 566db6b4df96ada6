use crate::error::{CliError, Result};
use std::fs::File;
use std::path::Path;
use tracing_subscriber::{filter::LevelFilter, fmt, prelude::*};

/// `-q` keeps errors visible; each `-v` opens one more level below WARN.
pub fn level_filter(verbosity: u8, quiet: bool) -> LevelFilter {
    const LEVELS: [LevelFilter; 4] = [
        LevelFilter::WARN,
        LevelFilter::INFO,
        LevelFilter::DEBUG,
        LevelFilter::TRACE,
    ];
    if quiet {
        LevelFilter::ERROR
    } else {
        LEVELS[usize::from(verbosity).min(LEVELS.len() - 1)]
    }
}

/// Installs the global subscriber: compact stderr output, plus a plain-text
/// copy with targets and thread ids when `log_file` is given.
pub fn setup_logging(verbosity: u8, quiet: bool, log_file: Option<&Path>) -> Result<()> {
    let file_layer = match log_file {
        Some(path) => {
            let file = File::create(path)?;
            Some(
                fmt::layer()
                    .with_writer(file)
                    .with_ansi(false)
                    .with_thread_ids(true)
                    .with_target(true),
            )
        }
        None => None,
    };

    tracing_subscriber::registry()
        .with(level_filter(verbosity, quiet))
        .with(
            fmt::layer()
                .with_writer(std::io::stderr)
                .with_target(false)
                .compact(),
        )
        .with(file_layer)
        .try_init()
        .map_err(|e| CliError::Other(e.into()))
}
