use crate::config::types::{Config, HttpConfig, OutputConfig, UrlConfig};
use crate::ConfigError;
use chrono::format::{Item, StrftimeItems};
use chrono::Utc;
use std::collections::BTreeMap;
use std::fmt::Write;
use url::Url;

/// Validates the entire configuration
pub fn validate(config: &Config) -> Result<(), ConfigError> {
    validate_urls(&config.urls)?;
    validate_http_config(&config.http)?;
    validate_output_config(&config.output)?;
    validate_expected_status(&config.expected_status)?;
    Ok(())
}

/// Validates portal URLs: each must parse and use http(s)
fn validate_urls(config: &UrlConfig) -> Result<(), ConfigError> {
    for (name, value) in [
        ("main-doc", &config.main_doc),
        ("peps-index", &config.peps_index),
        ("pep-base", &config.pep_base),
    ] {
        let url = Url::parse(value)
            .map_err(|e| ConfigError::InvalidUrl(format!("Invalid {} '{}': {}", name, value, e)))?;

        if url.scheme() != "http" && url.scheme() != "https" {
            return Err(ConfigError::InvalidUrl(format!(
                "{} '{}' must use http or https",
                name, value
            )));
        }
    }

    Ok(())
}

fn validate_http_config(config: &HttpConfig) -> Result<(), ConfigError> {
    if config.user_agent.trim().is_empty() {
        return Err(ConfigError::Validation(
            "user-agent cannot be empty".to_string(),
        ));
    }

    if config.timeout_secs == 0 {
        return Err(ConfigError::Validation(
            "timeout-secs must be >= 1".to_string(),
        ));
    }

    Ok(())
}

/// Validates the result file timestamp format
///
/// The format must be understood by chrono and its rendering must be usable
/// inside a file name.
fn validate_output_config(config: &OutputConfig) -> Result<(), ConfigError> {
    let format = config.datetime_format.as_str();
    if format.is_empty() {
        return Err(ConfigError::Validation(
            "datetime-format cannot be empty".to_string(),
        ));
    }

    let items: Vec<Item<'_>> = StrftimeItems::new(format).collect();
    if items.iter().any(|item| matches!(item, Item::Error)) {
        return Err(ConfigError::Validation(format!(
            "datetime-format '{}' is not a valid strftime format",
            format
        )));
    }

    let mut rendered = String::new();
    write!(rendered, "{}", Utc::now().format_with_items(items.iter())).map_err(|_| {
        ConfigError::Validation(format!("datetime-format '{}' cannot be rendered", format))
    })?;

    if rendered.contains(['/', '\\']) {
        return Err(ConfigError::Validation(format!(
            "datetime-format '{}' produces a path separator",
            format
        )));
    }

    Ok(())
}

/// Validates the expected-status table
///
/// Codes are a single character (or empty) and every code maps to at least
/// one status.
fn validate_expected_status(table: &BTreeMap<String, Vec<String>>) -> Result<(), ConfigError> {
    if table.is_empty() {
        return Err(ConfigError::Validation(
            "expected-status table cannot be empty".to_string(),
        ));
    }

    for (code, statuses) in table {
        if code.chars().count() > 1 {
            return Err(ConfigError::Validation(format!(
                "status code '{}' must be at most one character",
                code
            )));
        }

        if statuses.is_empty() || statuses.iter().any(|s| s.trim().is_empty()) {
            return Err(ConfigError::Validation(format!(
                "status code '{}' must map to non-empty statuses",
                code
            )));
        }
    }

    Ok(())
}
