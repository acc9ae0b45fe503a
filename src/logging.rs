//! Tracing subscriber setup
//!
//! Log lines go to stderr and are appended to the log file, one line per
//! event with timestamp and level.

use std::fs::{File, OpenOptions};
use std::path::Path;
use std::sync::Mutex;
use tracing_subscriber::prelude::*;
use tracing_subscriber::{fmt, EnvFilter};

/// Filter for the given verbosity flags
pub fn build_filter(verbose: u8, quiet: bool) -> EnvFilter {
    if quiet {
        // Only show errors
        EnvFilter::new("error")
    } else {
        match verbose {
            0 => EnvFilter::new("pydoc_scout=info,warn"),
            1 => EnvFilter::new("pydoc_scout=debug,info"),
            2 => EnvFilter::new("pydoc_scout=trace,debug"),
            _ => EnvFilter::new("trace"),
        }
    }
}

/// Opens `path` for appending, creating it and its directory if needed
pub fn open_log_file(path: &Path) -> std::io::Result<File> {
    if let Some(parent) = path.parent() {
        if !parent.as_os_str().is_empty() {
            std::fs::create_dir_all(parent)?;
        }
    }
    OpenOptions::new().create(true).append(true).open(path)
}

/// Installs the global subscriber
///
/// If the log file cannot be opened, logging continues on stderr only and
/// the failure is reported as a warning.
pub fn setup_logging(log_file: &Path, verbose: u8, quiet: bool) {
    let (file_layer, file_error) = match open_log_file(log_file) {
        Ok(file) => (
            Some(
                fmt::layer()
                    .with_target(false)
                    .with_ansi(false)
                    .with_writer(Mutex::new(file)),
            ),
            None,
        ),
        Err(e) => (None, Some(e)),
    };

    tracing_subscriber::registry()
        .with(build_filter(verbose, quiet))
        .with(
            fmt::layer()
                .with_target(false)
                .with_writer(std::io::stderr),
        )
        .with(file_layer)
        .init();

    if let Some(e) = file_error {
        tracing::warn!("Cannot open log file {}: {}", log_file.display(), e);
    }
}
