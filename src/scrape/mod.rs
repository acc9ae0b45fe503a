//! Scraping modes
//!
//! Each mode fetches one entry page from the portal and turns it into a
//! result table (or, for `download`, a file on disk):
//! - `whats-new`: release notes per Python version
//! - `latest-versions`: documentation links with version and status
//! - `download`: the A4 PDF documentation archive
//! - `pep`: PEP status tally, cross-checked against each PEP page

mod download;
mod latest_versions;
mod pep;
mod whats_new;

pub use download::{archive_file_name, archive_link, download};
pub use latest_versions::{latest_versions, parse_version_label, version_rows};
pub use pep::pep;
pub use whats_new::{article_summary, version_links, whats_new};

use crate::config::Config;
use crate::fetch::Fetch;
use crate::output::ResultTable;
use crate::Result;
use indicatif::{ProgressBar, ProgressStyle};
use std::fmt;

/// Scraping mode selected on the command line
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, clap::ValueEnum)]
pub enum Mode {
    WhatsNew,
    LatestVersions,
    Download,
    Pep,
}

impl Mode {
    /// Name used on the command line and in result file names
    pub fn as_str(&self) -> &'static str {
        match self {
            Self::WhatsNew => "whats-new",
            Self::LatestVersions => "latest-versions",
            Self::Download => "download",
            Self::Pep => "pep",
        }
    }

    /// Whether the mode produces a result table for the emitter
    pub fn produces_table(&self) -> bool {
        !matches!(self, Self::Download)
    }
}

impl fmt::Display for Mode {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

/// Runs `mode` against the portal
///
/// # Returns
///
/// * `Ok(Some(table))` - Results to emit
/// * `Ok(None)` - Nothing to emit (entry page unreachable, or `download`)
/// * `Err(ScoutError)` - The entry page did not have the expected shape
pub async fn run_mode<F: Fetch>(
    mode: Mode,
    fetcher: &mut F,
    config: &Config,
) -> Result<Option<ResultTable>> {
    match mode {
        Mode::WhatsNew => whats_new(fetcher, config).await,
        Mode::LatestVersions => latest_versions(fetcher, config).await,
        Mode::Pep => pep(fetcher, config).await,
        Mode::Download => {
            if let Some(path) = download(fetcher, config).await? {
                println!("Archive saved to: {}", path.display());
            }
            Ok(None)
        }
    }
}

/// Progress bar over `len` items, drawn on stderr when it is a terminal
pub(crate) fn progress_bar(len: u64, message: &str) -> ProgressBar {
    let bar = ProgressBar::new(len);
    bar.set_style(
        ProgressStyle::default_bar()
            .template("{msg} [{bar:40.cyan/blue}] {pos}/{len} ({eta})")
            .unwrap_or_else(|_| ProgressStyle::default_bar())
            .progress_chars("█▓▒░"),
    );
    bar.set_message(message.to_string());
    bar
}
