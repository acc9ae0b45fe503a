use serde::Deserialize;
use std::collections::BTreeMap;
use std::path::PathBuf;

/// Main configuration structure for pydoc-scout
///
/// Every section has built-in defaults, so an empty TOML document (or no
/// config file at all) yields a working configuration.
#[derive(Debug, Clone, Deserialize)]
#[serde(default)]
pub struct Config {
    pub urls: UrlConfig,
    pub paths: PathConfig,
    pub http: HttpConfig,
    pub cache: CacheConfig,
    pub output: OutputConfig,

    /// Status code -> acceptable full-text statuses
    #[serde(rename = "expected-status")]
    pub expected_status: BTreeMap<String, Vec<String>>,
}

impl Default for Config {
    fn default() -> Self {
        Self {
            urls: UrlConfig::default(),
            paths: PathConfig::default(),
            http: HttpConfig::default(),
            cache: CacheConfig::default(),
            output: OutputConfig::default(),
            expected_status: default_expected_status(),
        }
    }
}

/// Built-in expected-status table for PEP status codes
pub fn default_expected_status() -> BTreeMap<String, Vec<String>> {
    [
        ("A", &["Active", "Accepted"][..]),
        ("D", &["Deferred"]),
        ("F", &["Final"]),
        ("P", &["Provisional"]),
        ("R", &["Rejected"]),
        ("S", &["Superseded"]),
        ("W", &["Withdrawn"]),
        ("", &["Draft", "Active"]),
    ]
    .into_iter()
    .map(|(code, statuses)| {
        (
            code.to_string(),
            statuses.iter().map(|s| s.to_string()).collect(),
        )
    })
    .collect()
}

/// Entry points on the documentation portal
#[derive(Debug, Clone, Deserialize)]
#[serde(default)]
pub struct UrlConfig {
    /// Root of the Python 3 documentation
    #[serde(rename = "main-doc")]
    pub main_doc: String,

    /// Numerical PEP index (the summary document)
    #[serde(rename = "peps-index")]
    pub peps_index: String,

    /// Base URL that PEP detail links are resolved against
    #[serde(rename = "pep-base")]
    pub pep_base: String,
}

impl Default for UrlConfig {
    fn default() -> Self {
        Self {
            main_doc: "https://docs.python.org/3/".to_string(),
            peps_index: "https://peps.python.org/numerical/".to_string(),
            pep_base: "https://peps.python.org/".to_string(),
        }
    }
}

/// Filesystem layout, relative to `base-dir`
#[derive(Debug, Clone, Deserialize)]
#[serde(default)]
pub struct PathConfig {
    #[serde(rename = "base-dir")]
    pub base_dir: PathBuf,

    #[serde(rename = "downloads-dir")]
    pub downloads_dir: PathBuf,

    #[serde(rename = "results-dir")]
    pub results_dir: PathBuf,

    #[serde(rename = "log-file")]
    pub log_file: PathBuf,

    #[serde(rename = "cache-file")]
    pub cache_file: PathBuf,
}

impl Default for PathConfig {
    fn default() -> Self {
        Self {
            base_dir: PathBuf::from("."),
            downloads_dir: PathBuf::from("downloads"),
            results_dir: PathBuf::from("results"),
            log_file: PathBuf::from("logs/parser.log"),
            cache_file: PathBuf::from("scout_cache.sqlite"),
        }
    }
}

impl PathConfig {
    pub fn downloads(&self) -> PathBuf {
        self.base_dir.join(&self.downloads_dir)
    }

    pub fn results(&self) -> PathBuf {
        self.base_dir.join(&self.results_dir)
    }

    pub fn log(&self) -> PathBuf {
        self.base_dir.join(&self.log_file)
    }

    pub fn cache(&self) -> PathBuf {
        self.base_dir.join(&self.cache_file)
    }
}

/// HTTP client configuration
#[derive(Debug, Clone, Deserialize)]
#[serde(default)]
pub struct HttpConfig {
    #[serde(rename = "user-agent")]
    pub user_agent: String,

    /// Total request timeout (seconds)
    #[serde(rename = "timeout-secs")]
    pub timeout_secs: u64,

    /// Connection establishment timeout (seconds)
    #[serde(rename = "connect-timeout-secs")]
    pub connect_timeout_secs: u64,
}

impl Default for HttpConfig {
    fn default() -> Self {
        Self {
            user_agent: format!("pydoc-scout/{}", env!("CARGO_PKG_VERSION")),
            timeout_secs: 30,
            connect_timeout_secs: 10,
        }
    }
}

/// Response cache configuration
#[derive(Debug, Clone, Default, Deserialize)]
#[serde(default)]
pub struct CacheConfig {
    /// Cached responses older than this are refetched; `None` keeps them forever
    #[serde(rename = "expire-after-secs")]
    pub expire_after_secs: Option<u64>,
}

/// Result file configuration
#[derive(Debug, Clone, Deserialize)]
#[serde(default)]
pub struct OutputConfig {
    /// chrono format string used in result file names
    #[serde(rename = "datetime-format")]
    pub datetime_format: String,
}

impl Default for OutputConfig {
    fn default() -> Self {
        Self {
            datetime_format: "%Y-%m-%d_%H-%M-%S".to_string(),
        }
    }
}
