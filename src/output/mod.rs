//! Output module for emitting result tables
//!
//! This module handles:
//! - Plain terminal output (one space-separated line per row)
//! - Pretty, left-aligned ASCII tables
//! - CSV result files under the results directory

pub mod csv;
mod table;

pub use table::ResultTable;

use chrono::Local;
use std::fmt::Write as _;
use std::io::{BufWriter, Write};
use std::path::{Path, PathBuf};
use tabled::builder::Builder;
use tabled::settings::{Alignment, Style};
use thiserror::Error;

/// Errors that can occur during output operations
#[derive(Debug, Error)]
pub enum OutputError {
    #[error("IO error: {0}")]
    Io(#[from] std::io::Error),

    #[error("CSV error: {0}")]
    Csv(#[from] ::csv::Error),

    #[error("Invalid datetime format '{0}'")]
    DatetimeFormat(String),

    #[error("Output is not valid UTF-8: {0}")]
    Utf8(#[from] std::string::FromUtf8Error),
}

/// Result type for output operations
pub type OutputResult<T> = Result<T, OutputError>;

/// Where results are sent
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, clap::ValueEnum)]
pub enum OutputMode {
    /// Space-separated rows on stdout
    #[default]
    #[value(skip)]
    Terminal,

    /// Aligned ASCII table on stdout
    Pretty,

    /// CSV file in the results directory
    File,
}

/// Settings for file output
#[derive(Debug, Clone)]
pub struct FileTarget {
    /// Directory that receives result files
    pub results_dir: PathBuf,

    /// Prefix of the file name (the scraping mode)
    pub prefix: String,

    /// chrono format for the timestamp part of the file name
    pub datetime_format: String,
}

/// Trait for result emitters
pub trait Emitter {
    /// Emits the table, returning the path of any file written
    fn emit(&self, table: &ResultTable) -> OutputResult<Option<PathBuf>>;
}

/// Prints each row space-separated
pub struct TerminalEmitter;

/// Prints a left-aligned ASCII table
pub struct PrettyEmitter;

/// Writes `{prefix}_{timestamp}.csv`
pub struct CsvFileEmitter {
    pub target: FileTarget,
}

impl Emitter for TerminalEmitter {
    fn emit(&self, table: &ResultTable) -> OutputResult<Option<PathBuf>> {
        let mut stdout = std::io::stdout().lock();
        stdout.write_all(render_terminal(table).as_bytes())?;
        Ok(None)
    }
}

impl Emitter for PrettyEmitter {
    fn emit(&self, table: &ResultTable) -> OutputResult<Option<PathBuf>> {
        println!("{}", render_pretty(table));
        Ok(None)
    }
}

impl Emitter for CsvFileEmitter {
    fn emit(&self, table: &ResultTable) -> OutputResult<Option<PathBuf>> {
        write_csv_file(table, &self.target)
    }
}

/// Renders rows as space-separated lines, header included
pub fn render_terminal(table: &ResultTable) -> String {
    let mut out = String::new();
    for row in table.all_rows() {
        out.push_str(&row.join(" "));
        out.push('\n');
    }
    out
}

/// Renders a left-aligned ASCII table with the header as field names
pub fn render_pretty(table: &ResultTable) -> String {
    let mut builder = Builder::default();
    builder.push_record(table.header().iter().cloned());
    for row in table.rows() {
        builder.push_record(row.iter().cloned());
    }

    let mut rendered = builder.build();
    rendered.with(Style::ascii()).with(Alignment::left());
    rendered.to_string()
}

/// Builds the result file name for `prefix` at the current local time
pub fn result_file_name(prefix: &str, datetime_format: &str) -> OutputResult<String> {
    let mut name = String::new();
    write!(name, "{}_{}.csv", prefix, Local::now().format(datetime_format))
        .map_err(|_| OutputError::DatetimeFormat(datetime_format.to_string()))?;
    Ok(name)
}

/// Writes the table as a CSV file under `target.results_dir`
///
/// A results directory that cannot be created is logged and the write is
/// abandoned (`Ok(None)`). A failed write removes the partial file.
pub fn write_csv_file(table: &ResultTable, target: &FileTarget) -> OutputResult<Option<PathBuf>> {
    if let Err(e) = std::fs::create_dir_all(&target.results_dir) {
        tracing::error!(
            "Failed to create results directory {}: {}",
            target.results_dir.display(),
            e
        );
        return Ok(None);
    }

    let path = target
        .results_dir
        .join(result_file_name(&target.prefix, &target.datetime_format)?);
    let written = std::fs::File::create(&path)
        .map_err(OutputError::from)
        .and_then(|file| csv::write_rows(BufWriter::new(file), table.all_rows()));

    if let Err(e) = written {
        remove_partial(&path);
        return Err(e);
    }

    tracing::info!("Results saved to {}", path.display());
    Ok(Some(path))
}

fn remove_partial(path: &Path) {
    if path.exists() {
        if let Err(e) = std::fs::remove_file(path) {
            tracing::warn!("Failed to remove partial file {}: {}", path.display(), e);
        }
    }
}

/// Emits `table` according to `mode`
///
/// # Returns
///
/// * `Ok(Some(path))` - A result file was written
/// * `Ok(None)` - Output went to the terminal, or file output was abandoned
/// * `Err(OutputError)` - Writing failed
pub fn emit(table: &ResultTable, mode: OutputMode, target: FileTarget) -> OutputResult<Option<PathBuf>> {
    let emitter: Box<dyn Emitter> = match mode {
        OutputMode::Terminal => Box::new(TerminalEmitter),
        OutputMode::Pretty => Box::new(PrettyEmitter),
        OutputMode::File => Box::new(CsvFileEmitter { target }),
    };
    emitter.emit(table)
}
