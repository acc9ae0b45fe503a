//! pydoc-scout: a scraper for the Python documentation portal
//!
//! This crate fetches index and detail pages from docs.python.org and
//! peps.python.org, extracts release notes, version tables and PEP statuses,
//! cross-checks PEP statuses against an expected-status table and emits the
//! results as terminal output, a pretty table or a CSV file.

pub mod config;
pub mod fetch;
pub mod html;
pub mod logging;
pub mod output;
pub mod reconcile;
pub mod scrape;

use thiserror::Error;

/// Main error type for pydoc-scout operations
#[derive(Debug, Error)]
pub enum ScoutError {
    #[error("Configuration error: {0}")]
    Config(#[from] ConfigError),

    #[error("HTTP error for {url}: {source}")]
    Http { url: String, source: reqwest::Error },

    #[error("HTTP client error: {0}")]
    Client(#[from] reqwest::Error),

    #[error("HTTP status {status} for {url}")]
    HttpStatus { url: String, status: u16 },

    #[error("Cache error: {0}")]
    Cache(#[from] rusqlite::Error),

    #[error("URL parse error: {0}")]
    UrlParse(#[from] ::url::ParseError),

    #[error("{0}")]
    FindTag(#[from] FindTagError),

    #[error("Unknown status code '{code}'")]
    UnknownStatus { code: String },

    #[error("No 'Status:' field on {url}")]
    MissingStatusField { url: String },

    #[error("Row {row} has no link to a detail page")]
    MissingLink { row: usize },

    #[error("Python version list not found")]
    VersionListNotFound,

    #[error("Output error: {0}")]
    Output(#[from] output::OutputError),

    #[error("IO error: {0}")]
    Io(#[from] std::io::Error),
}

/// Configuration-specific errors
#[derive(Debug, Error)]
pub enum ConfigError {
    #[error("Failed to read config file: {0}")]
    Io(#[from] std::io::Error),

    #[error("Failed to parse TOML: {0}")]
    Parse(#[from] toml::de::Error),

    #[error("Validation error: {0}")]
    Validation(String),

    #[error("Invalid URL in config: {0}")]
    InvalidUrl(String),
}

/// Raised when an expected tag is absent from a document
#[derive(Debug, Clone, PartialEq, Eq, Error)]
#[error("Tag not found: {tag} {filters}")]
pub struct FindTagError {
    /// The tag name that was searched for
    pub tag: String,

    /// Human-readable rendering of the attribute filters
    pub filters: String,
}

/// Result type alias for pydoc-scout operations
pub type Result<T> = std::result::Result<T, ScoutError>;

/// Result type alias for configuration operations
pub type ConfigResult<T> = std::result::Result<T, ConfigError>;

// Re-export commonly used types
pub use config::Config;
pub use fetch::{fetch_page, CachedSession, Fetch};
pub use html::{find_tag, AttrFilter};
pub use output::{emit, OutputMode, ResultTable};
pub use reconcile::{reconcile, ExpectedStatuses, Reconciler, StatusCode};
pub use scrape::{run_mode, Mode};
