//! A4 PDF documentation archive

use crate::config::Config;
use crate::fetch::{fetch_page, Fetch};
use crate::html::{find_tag, AttrFilter};
use crate::Result;
use regex::Regex;
use scraper::Html;
use std::path::PathBuf;
use std::sync::OnceLock;
use url::Url;

fn archive_pattern() -> &'static Regex {
    static PATTERN: OnceLock<Regex> = OnceLock::new();
    PATTERN.get_or_init(|| Regex::new(r".+pdf-a4\.zip$").expect("archive pattern is a valid regex"))
}

/// Absolute URL of the A4 PDF archive linked from the downloads page
///
/// # Errors
///
/// Fails when the main block, the downloads table or the archive link is
/// missing.
pub fn archive_link(doc: &Html, page_url: &Url) -> Result<Url> {
    let main = find_tag(
        doc.root_element(),
        "div",
        &[AttrFilter::equals("role", "main")],
    )?;
    let table = find_tag(main, "table", &[AttrFilter::class("docutils")])?;

    let anchor = find_tag(
        table,
        "a",
        &[AttrFilter::matches("href", archive_pattern().clone())],
    )?;
    let href = anchor.value().attr("href").unwrap_or("");

    Ok(page_url.join(href)?)
}

/// Last non-empty path segment of `url`
pub fn archive_file_name(url: &Url) -> String {
    url.path()
        .trim_end_matches('/')
        .rsplit('/')
        .next()
        .filter(|name| !name.is_empty())
        .unwrap_or("archive.zip")
        .to_string()
}

/// Downloads the A4 PDF archive into the downloads directory
///
/// # Returns
///
/// * `Ok(Some(path))` - Where the archive was saved
/// * `Ok(None)` - The downloads page could not be fetched
/// * `Err(ScoutError)` - Unexpected page shape, or the archive itself failed
pub async fn download<F: Fetch>(fetcher: &mut F, config: &Config) -> Result<Option<PathBuf>> {
    let page_url = Url::parse(&config.urls.main_doc)?.join("download.html")?;
    let Some(doc) = fetch_page(fetcher, page_url.as_str()).await else {
        return Ok(None);
    };

    let archive_url = archive_link(&doc, &page_url)?;
    tracing::info!("Archive link: {}", archive_url);

    let downloads_dir = config.paths.downloads();
    std::fs::create_dir_all(&downloads_dir)?;
    let archive_path = downloads_dir.join(archive_file_name(&archive_url));

    let bytes = fetcher.get_uncached(archive_url.as_str()).await?;
    std::fs::write(&archive_path, bytes)?;

    tracing::info!("Archive downloaded and saved to {}", archive_path.display());
    Ok(Some(archive_path))
}
