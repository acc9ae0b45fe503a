//! Configuration module for pydoc-scout
//!
//! This module handles the built-in defaults, optional TOML overrides and
//! validation of the resulting configuration.
//!
//! # Example
//!
//! ```no_run
//! use pydoc_scout::config::load_config;
//! use std::path::Path;
//!
//! let config = load_config(Path::new("scout.toml")).unwrap();
//! println!("Results go to: {}", config.paths.results().display());
//! ```

mod parser;
mod types;
mod validation;

// Re-export types
pub use types::{
    default_expected_status, CacheConfig, Config, HttpConfig, OutputConfig, PathConfig, UrlConfig,
};

// Re-export parser functions
pub use parser::{
    compute_config_hash, load_config, load_config_with_hash, load_or_default, parse_config,
};
pub use validation::validate;

use crate::reconcile::ExpectedStatuses;

impl Config {
    /// Builds the immutable expected-status table injected into the reconciler
    pub fn expected_statuses(&self) -> ExpectedStatuses {
        ExpectedStatuses::from_map(&self.expected_status)
    }
}
