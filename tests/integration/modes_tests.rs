//! whats-new, latest-versions and download against a mock portal

use crate::{mount_page, mount_status, test_config, test_session};
use pydoc_scout::scrape::{download, run_mode, Mode};
use pydoc_scout::ScoutError;
use tempfile::TempDir;
use wiremock::matchers::{method, path};
use wiremock::{Mock, MockServer, ResponseTemplate};

const WHATS_NEW_INDEX: &str = r#"
<html><body>
<section id="what-s-new-in-python">
  <h1>What's New in Python</h1>
  <div class="toctree-wrapper compound">
    <ul>
      <li class="toctree-l1"><a class="reference internal" href="3.12.html">What's New In Python 3.12</a></li>
      <li class="toctree-l1"><a class="reference internal" href="3.11.html">What's New In Python 3.11</a></li>
      <li class="toctree-l1"><a class="reference internal" href="3.10.html">What's New In Python 3.10</a></li>
    </ul>
  </div>
</section>
</body></html>
"#;

fn article(version: &str, editor: &str) -> String {
    format!(
        "<html><body><section><h1>What's New In Python {}</h1>\
         <dl class=\"field-list simple\"><dt>Editor</dt>\n<dd>{}</dd></dl></section></body></html>",
        version, editor
    )
}

#[tokio::test]
async fn test_whats_new_collects_articles() {
    let server = MockServer::start().await;
    let dir = TempDir::new().unwrap();

    mount_page(&server, "/3/whatsnew/", WHATS_NEW_INDEX).await;
    mount_page(&server, "/3/whatsnew/3.12.html", &article("3.12", "Adam Turner")).await;
    mount_page(&server, "/3/whatsnew/3.11.html", &article("3.11", "Pablo Galindo Salgado")).await;
    mount_status(&server, "/3/whatsnew/3.10.html", 404).await;

    let config = test_config(&server, dir.path());
    let mut session = test_session();
    let table = run_mode(Mode::WhatsNew, &mut session, &config)
        .await
        .unwrap()
        .unwrap();

    assert_eq!(table.header(), ["Link to article", "Title", "Editor, author"]);
    assert_eq!(table.len(), 2);
    assert_eq!(table.rows()[0][0], format!("{}/3/whatsnew/3.12.html", server.uri()));
    assert_eq!(table.rows()[0][1], "What's New In Python 3.12");
    assert_eq!(table.rows()[1][2], "Editor Pablo Galindo Salgado");
}

#[tokio::test]
async fn test_whats_new_changed_layout_is_error() {
    let server = MockServer::start().await;
    let dir = TempDir::new().unwrap();
    mount_page(&server, "/3/whatsnew/", "<html><body><p>redesigned</p></body></html>").await;

    let config = test_config(&server, dir.path());
    let mut session = test_session();
    let result = run_mode(Mode::WhatsNew, &mut session, &config).await;

    assert!(matches!(result, Err(ScoutError::FindTag(_))));
}

#[tokio::test]
async fn test_latest_versions() {
    let server = MockServer::start().await;
    let dir = TempDir::new().unwrap();

    mount_page(
        &server,
        "/3/",
        r#"<html><body><div class="sphinxsidebarwrapper">
           <h3>Navigation</h3>
           <ul>
             <li><a href="https://docs.python.org/3.14/">Python 3.14 (in development)</a></li>
             <li><a href="https://docs.python.org/3.13/">Python 3.13 (stable)</a></li>
             <li><a href="https://docs.python.org/2.7/">Python 2.7 (EOL)</a></li>
             <li><a href="https://www.python.org/doc/versions/">All versions</a></li>
           </ul></div></body></html>"#,
    )
    .await;

    let config = test_config(&server, dir.path());
    let mut session = test_session();
    let table = run_mode(Mode::LatestVersions, &mut session, &config)
        .await
        .unwrap()
        .unwrap();

    assert_eq!(table.header(), ["Link to documentation", "Version", "Status"]);
    assert_eq!(table.len(), 4);
    assert_eq!(table.rows()[1], ["https://docs.python.org/3.13/", "3.13", "stable"]);
    assert_eq!(table.rows()[3][2], "");
}

#[tokio::test]
async fn test_latest_versions_without_list() {
    let server = MockServer::start().await;
    let dir = TempDir::new().unwrap();
    mount_page(
        &server,
        "/3/",
        r#"<div class="sphinxsidebarwrapper"><ul><li>Index</li></ul></div>"#,
    )
    .await;

    let config = test_config(&server, dir.path());
    let mut session = test_session();
    let result = run_mode(Mode::LatestVersions, &mut session, &config).await;

    assert!(matches!(result, Err(ScoutError::VersionListNotFound)));
}

#[tokio::test]
async fn test_download_saves_archive() {
    let server = MockServer::start().await;
    let dir = TempDir::new().unwrap();

    mount_page(
        &server,
        "/3/download.html",
        r#"<html><body><div class="body" role="main">
           <table class="docutils align-default">
             <tr><td>PDF (A4 paper size)</td>
                 <td><a class="reference external" href="archives/python-3.13-docs-pdf-a4.zip">Download</a></td></tr>
             <tr><td>HTML</td>
                 <td><a class="reference external" href="archives/python-3.13-docs-html.zip">Download</a></td></tr>
           </table></div></body></html>"#,
    )
    .await;
    Mock::given(method("GET"))
        .and(path("/3/archives/python-3.13-docs-pdf-a4.zip"))
        .respond_with(ResponseTemplate::new(200).set_body_bytes(b"PK\x03\x04archive".to_vec()))
        .mount(&server)
        .await;

    let config = test_config(&server, dir.path());
    let mut session = test_session();
    let saved = download(&mut session, &config).await.unwrap().unwrap();

    assert_eq!(saved, dir.path().join("downloads").join("python-3.13-docs-pdf-a4.zip"));
    assert_eq!(std::fs::read(&saved).unwrap(), b"PK\x03\x04archive");

    // Only the downloads page is cached, never the archive
    assert_eq!(session.cache().len().unwrap(), 1);
}

#[tokio::test]
async fn test_download_mode_has_no_table() {
    let server = MockServer::start().await;
    let dir = TempDir::new().unwrap();
    mount_status(&server, "/3/download.html", 500).await;

    let config = test_config(&server, dir.path());
    let mut session = test_session();
    let result = run_mode(Mode::Download, &mut session, &config).await.unwrap();

    assert!(result.is_none());
    assert!(!dir.path().join("downloads").exists());
}

#[tokio::test]
async fn test_download_archive_failure_is_error() {
    let server = MockServer::start().await;
    let dir = TempDir::new().unwrap();

    mount_page(
        &server,
        "/3/download.html",
        r#"<div role="main"><table class="docutils">
           <tr><td><a href="archives/docs-pdf-a4.zip">A4</a></td></tr></table></div>"#,
    )
    .await;
    mount_status(&server, "/3/archives/docs-pdf-a4.zip", 404).await;

    let config = test_config(&server, dir.path());
    let mut session = test_session();
    let result = download(&mut session, &config).await;

    assert!(matches!(result, Err(ScoutError::HttpStatus { status: 404, .. })));
}
