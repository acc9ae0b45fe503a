//! Cached session behaviour

use crate::test_session;
use pydoc_scout::config::{Config, HttpConfig};
use pydoc_scout::fetch::{build_http_client, fetch_page, Fetch, ResponseCache};
use pydoc_scout::{CachedSession, ScoutError};
use tempfile::TempDir;
use wiremock::matchers::{method, path};
use wiremock::{Mock, MockServer, ResponseTemplate};

#[tokio::test]
async fn test_second_get_is_served_from_cache() {
    let server = MockServer::start().await;
    Mock::given(method("GET"))
        .and(path("/page"))
        .respond_with(ResponseTemplate::new(200).set_body_string("<h1>cached</h1>"))
        .expect(1)
        .mount(&server)
        .await;

    let url = format!("{}/page", server.uri());
    let mut session = test_session();

    let first = session.get(&url).await.unwrap();
    let second = session.get(&url).await.unwrap();

    assert_eq!(first, second);
    assert_eq!(session.cache().len().unwrap(), 1);
}

#[tokio::test]
async fn test_uncached_get_bypasses_cache() {
    let server = MockServer::start().await;
    Mock::given(method("GET"))
        .and(path("/archive.zip"))
        .respond_with(ResponseTemplate::new(200).set_body_bytes(b"PK\x03\x04".to_vec()))
        .expect(2)
        .mount(&server)
        .await;

    let url = format!("{}/archive.zip", server.uri());
    let mut session = test_session();

    assert_eq!(session.get_uncached(&url).await.unwrap(), b"PK\x03\x04");
    assert!(session.cache().is_empty().unwrap());

    session.get_uncached(&url).await.unwrap();
    assert!(session.cache().is_empty().unwrap());
}

#[tokio::test]
async fn test_uncached_get_reports_error_status() {
    let server = MockServer::start().await;
    Mock::given(method("GET"))
        .and(path("/archive.zip"))
        .respond_with(ResponseTemplate::new(404))
        .mount(&server)
        .await;

    let url = format!("{}/archive.zip", server.uri());
    let mut session = test_session();

    assert!(matches!(
        session.get_uncached(&url).await,
        Err(ScoutError::HttpStatus { status: 404, .. })
    ));
}

#[tokio::test]
async fn test_clear_cache_forces_refetch() {
    let server = MockServer::start().await;
    Mock::given(method("GET"))
        .and(path("/page"))
        .respond_with(ResponseTemplate::new(200).set_body_string("body"))
        .expect(2)
        .mount(&server)
        .await;

    let url = format!("{}/page", server.uri());
    let mut session = test_session();

    session.get(&url).await.unwrap();
    assert_eq!(session.clear_cache().unwrap(), 1);
    session.get(&url).await.unwrap();
}

#[tokio::test]
async fn test_error_status_is_not_cached() {
    let server = MockServer::start().await;
    Mock::given(method("GET"))
        .and(path("/missing"))
        .respond_with(ResponseTemplate::new(404))
        .expect(2)
        .mount(&server)
        .await;

    let url = format!("{}/missing", server.uri());
    let mut session = test_session();

    let err = session.get(&url).await.unwrap_err();
    assert!(matches!(err, ScoutError::HttpStatus { status: 404, .. }));
    assert!(fetch_page(&mut session, &url).await.is_none());
    assert!(session.cache().is_empty().unwrap());
}

#[tokio::test]
async fn test_connection_failure_is_none() {
    // Nothing listens on the discard port
    let mut session = test_session();
    assert!(fetch_page(&mut session, "http://127.0.0.1:9/").await.is_none());
}

#[tokio::test]
async fn test_on_disk_cache_survives_new_session() {
    let server = MockServer::start().await;
    Mock::given(method("GET"))
        .and(path("/page"))
        .respond_with(ResponseTemplate::new(200).set_body_string("persisted"))
        .expect(1)
        .mount(&server)
        .await;

    let dir = TempDir::new().unwrap();
    let mut config = Config::default();
    config.paths.base_dir = dir.path().to_path_buf();
    let url = format!("{}/page", server.uri());

    {
        let mut session = CachedSession::from_config(&config).unwrap();
        session.get(&url).await.unwrap();
    }

    let client = build_http_client(&HttpConfig::default()).unwrap();
    let cache = ResponseCache::open(&config.paths.cache(), None).unwrap();
    let mut session = CachedSession::new(client, cache);
    assert_eq!(session.get(&url).await.unwrap(), b"persisted");
}
