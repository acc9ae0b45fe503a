//! "What's New" release notes

use crate::config::Config;
use crate::fetch::{fetch_page, Fetch};
use crate::html::{element_text, find_all, find_tag, AttrFilter};
use crate::output::ResultTable;
use crate::scrape::progress_bar;
use crate::Result;
use scraper::Html;
use url::Url;

const HEADER: [&str; 3] = ["Link to article", "Title", "Editor, author"];

/// Links to the per-version "What's New" articles
///
/// # Errors
///
/// Fails when the "What's New" section or its table of contents is missing.
pub fn version_links(index: &Html, index_url: &Url) -> Result<Vec<String>> {
    let section = find_tag(
        index.root_element(),
        "section",
        &[AttrFilter::id("what-s-new-in-python")],
    )?;
    let toctree = find_tag(section, "div", &[AttrFilter::class("toctree-wrapper")])?;

    let links = find_all(toctree, "li", &[AttrFilter::class("toctree-l1")])
        .into_iter()
        .filter_map(|li| {
            let href = find_all(li, "a", &[]).into_iter().next()?.value().attr("href")?;
            index_url.join(href).ok().map(|url| url.to_string())
        })
        .collect();

    Ok(links)
}

/// Title and editor line of an article; absent parts are empty
pub fn article_summary(article: &Html) -> (String, String) {
    let root = article.root_element();
    let title = find_all(root, "h1", &[])
        .into_iter()
        .next()
        .map(|h1| element_text(h1).trim().to_string())
        .unwrap_or_default();
    let editors = find_all(root, "dl", &[])
        .into_iter()
        .next()
        .map(|dl| element_text(dl).replace('\n', " ").trim().to_string())
        .unwrap_or_default();

    (title, editors)
}

/// Collects one row per Python version: link, title and editors
pub async fn whats_new<F: Fetch>(fetcher: &mut F, config: &Config) -> Result<Option<ResultTable>> {
    let index_url = Url::parse(&config.urls.main_doc)?.join("whatsnew/")?;
    let Some(index) = fetch_page(fetcher, index_url.as_str()).await else {
        return Ok(None);
    };
    let links = version_links(&index, &index_url)?;
    tracing::info!("Found {} release note articles", links.len());

    let progress = progress_bar(links.len() as u64, "whats-new");
    let mut rows = Vec::with_capacity(links.len());
    for link in links {
        progress.inc(1);
        let Some(article) = fetch_page(fetcher, &link).await else {
            continue;
        };
        let (title, editors) = article_summary(&article);
        rows.push(vec![link, title, editors]);
    }
    progress.finish_and_clear();

    Ok(Some(ResultTable::from_cells(HEADER, rows)))
}
