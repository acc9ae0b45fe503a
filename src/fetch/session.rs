//! Cached HTTP session and the page-fetch contract

use crate::config::Config;
use crate::fetch::cache::ResponseCache;
use crate::fetch::client::build_http_client;
use crate::{Result, ScoutError};
use reqwest::Client;
use scraper::Html;

/// Raw GET collaborator
///
/// Implementations return the response body or fail on transport errors
/// and non-success statuses. [`fetch_page`] normalizes failures to `None`.
#[allow(async_fn_in_trait)]
pub trait Fetch {
    /// Fetches the raw body of `url`
    async fn get(&mut self, url: &str) -> Result<Vec<u8>>;

    /// Fetches `url` without storing the body in any cache
    ///
    /// Used for large binaries that should not live in the page cache.
    async fn get_uncached(&mut self, url: &str) -> Result<Vec<u8>> {
        self.get(url).await
    }
}

/// HTTP session that transparently caches successful responses by URL
pub struct CachedSession {
    client: Client,
    cache: ResponseCache,
}

impl CachedSession {
    pub fn new(client: Client, cache: ResponseCache) -> Self {
        Self { client, cache }
    }

    /// Builds the HTTP client and opens the on-disk cache described by `config`
    pub fn from_config(config: &Config) -> Result<Self> {
        let client = build_http_client(&config.http)?;
        let expire_after = config
            .cache
            .expire_after_secs
            .map(|secs| chrono::Duration::seconds(secs as i64));
        let cache = ResponseCache::open(&config.paths.cache(), expire_after)?;

        Ok(Self::new(client, cache))
    }

    /// Drops every cached response
    pub fn clear_cache(&self) -> Result<usize> {
        let removed = self.cache.clear()?;
        tracing::info!("Cleared {} cached responses", removed);
        Ok(removed)
    }

    pub fn cache(&self) -> &ResponseCache {
        &self.cache
    }
}

impl CachedSession {
    /// Performs the request, mapping non-success statuses to errors
    async fn request(&self, url: &str) -> Result<(u16, Vec<u8>)> {
        tracing::debug!("Fetching {}", url);
        let response = self
            .client
            .get(url)
            .send()
            .await
            .map_err(|source| ScoutError::Http {
                url: url.to_string(),
                source,
            })?;

        let status = response.status();
        if !status.is_success() {
            return Err(ScoutError::HttpStatus {
                url: url.to_string(),
                status: status.as_u16(),
            });
        }

        let body = response
            .bytes()
            .await
            .map_err(|source| ScoutError::Http {
                url: url.to_string(),
                source,
            })?
            .to_vec();

        Ok((status.as_u16(), body))
    }
}

impl Fetch for CachedSession {
    async fn get(&mut self, url: &str) -> Result<Vec<u8>> {
        if let Some(hit) = self.cache.get(url)? {
            tracing::debug!("Cache hit for {}", url);
            return Ok(hit.body);
        }

        let (status, body) = self.request(url).await?;
        self.cache.put(url, status, &body)?;
        Ok(body)
    }

    async fn get_uncached(&mut self, url: &str) -> Result<Vec<u8>> {
        let (_, body) = self.request(url).await?;
        Ok(body)
    }
}

/// Fetches `url` and parses it as an HTML document
///
/// Any failure is logged and reported as `None`; callers treat that as
/// "skip this resource" and carry on with the rest of their work.
pub async fn fetch_page<F: Fetch>(fetcher: &mut F, url: &str) -> Option<Html> {
    match fetcher.get(url).await {
        Ok(body) => Some(Html::parse_document(&String::from_utf8_lossy(&body))),
        Err(e) => {
            tracing::error!("Failed to load page {}: {}", url, e);
            None
        }
    }
}
