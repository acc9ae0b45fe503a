//! Integration tests for the scraping modes
//!
//! These tests use wiremock to stand in for the documentation portal and
//! run each mode end-to-end through a real `CachedSession`.

mod modes_tests;
mod pep_tests;
mod session_tests;

use pydoc_scout::config::{Config, HttpConfig};
use pydoc_scout::fetch::{build_http_client, ResponseCache};
use pydoc_scout::CachedSession;
use std::path::Path;
use wiremock::matchers::{method, path};
use wiremock::{Mock, MockServer, ResponseTemplate};

/// Session with an in-memory cache
pub fn test_session() -> CachedSession {
    let client = build_http_client(&HttpConfig::default()).expect("Failed to build client");
    let cache = ResponseCache::in_memory(None).expect("Failed to open cache");
    CachedSession::new(client, cache)
}

/// Configuration pointing every URL at the mock server
pub fn test_config(server: &MockServer, base_dir: &Path) -> Config {
    let mut config = Config::default();
    config.urls.main_doc = format!("{}/3/", server.uri());
    config.urls.peps_index = format!("{}/numerical/", server.uri());
    config.urls.pep_base = format!("{}/", server.uri());
    config.paths.base_dir = base_dir.to_path_buf();
    config
}

/// Serves `body` as HTML at `route`
pub async fn mount_page(server: &MockServer, route: &str, body: &str) {
    Mock::given(method("GET"))
        .and(path(route))
        .respond_with(
            ResponseTemplate::new(200)
                .set_body_string(body)
                .insert_header("content-type", "text/html; charset=utf-8"),
        )
        .mount(server)
        .await;
}

/// Answers `route` with an HTTP error status
pub async fn mount_status(server: &MockServer, route: &str, status: u16) {
    Mock::given(method("GET"))
        .and(path(route))
        .respond_with(ResponseTemplate::new(status))
        .mount(server)
        .await;
}
