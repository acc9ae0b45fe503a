//! Documentation versions from the sidebar

use crate::config::Config;
use crate::fetch::{fetch_page, Fetch};
use crate::html::{element_text, find_all, find_tag, AttrFilter};
use crate::output::ResultTable;
use crate::{Result, ScoutError};
use regex::Regex;
use scraper::Html;
use std::sync::OnceLock;
use url::Url;

const HEADER: [&str; 3] = ["Link to documentation", "Version", "Status"];

fn version_pattern() -> &'static Regex {
    static PATTERN: OnceLock<Regex> = OnceLock::new();
    PATTERN.get_or_init(|| {
        Regex::new(r"Python (?P<version>\d\.\d+) \((?P<status>.*)\)")
            .expect("version pattern is a valid regex")
    })
}

/// Splits a label like `Python 3.13 (stable)` into version and status
///
/// Labels that do not follow the pattern come back whole, with an empty status.
pub fn parse_version_label(label: &str) -> (String, String) {
    match version_pattern().captures(label) {
        Some(caps) => (caps["version"].to_string(), caps["status"].to_string()),
        None => (label.to_string(), String::new()),
    }
}

/// Rows for every link in the sidebar's "All versions" list
///
/// # Errors
///
/// Fails when the sidebar is missing or no list mentions "All versions".
pub fn version_rows(doc: &Html, base: &Url) -> Result<Vec<Vec<String>>> {
    let sidebar = find_tag(
        doc.root_element(),
        "div",
        &[AttrFilter::class("sphinxsidebarwrapper")],
    )?;

    let links = find_all(sidebar, "ul", &[])
        .into_iter()
        .find(|ul| element_text(*ul).contains("All versions"))
        .map(|ul| find_all(ul, "a", &[]))
        .filter(|links| !links.is_empty())
        .ok_or(ScoutError::VersionListNotFound)?;

    let mut rows = Vec::with_capacity(links.len());
    for a in links {
        let href = a.value().attr("href").unwrap_or("");
        let link = base.join(href)?.to_string();
        let (version, status) = parse_version_label(&element_text(a));
        rows.push(vec![link, version, status]);
    }

    Ok(rows)
}

/// Collects documentation links with their version and status
pub async fn latest_versions<F: Fetch>(
    fetcher: &mut F,
    config: &Config,
) -> Result<Option<ResultTable>> {
    let base = Url::parse(&config.urls.main_doc)?;
    let Some(doc) = fetch_page(fetcher, base.as_str()).await else {
        return Ok(None);
    };

    let rows = version_rows(&doc, &base)?;
    tracing::info!("Found {} documentation versions", rows.len());
    Ok(Some(ResultTable::from_cells(HEADER, rows)))
}
