//! PEP status reconciliation against a mock portal

use crate::{mount_page, mount_status, test_config, test_session};
use pydoc_scout::output::{emit, csv, FileTarget, OutputMode};
use pydoc_scout::scrape::{run_mode, Mode};
use pydoc_scout::ResultTable;
use tempfile::TempDir;
use wiremock::MockServer;

fn numerical_index(rows: &[(&str, &str, &str)]) -> String {
    let mut html = String::from(
        r#"<html><body><section id="numerical-index"><table class="pep-zero-table docutils">
        <thead><tr><th>Type/Status</th><th>PEP</th><th>Title</th></tr></thead><tbody>"#,
    );
    for (cell, number, title) in rows {
        html.push_str(&format!(
            r#"<tr><td><abbr title="status">{}</abbr></td>
               <td><a class="pep reference internal" href="pep-{:0>4}/">{}</a></td>
               <td>{}</td></tr>"#,
            cell, number, number, title
        ));
    }
    html.push_str("</tbody></table></section></body></html>");
    html
}

fn pep_page(status: &str) -> String {
    format!(
        r#"<html><body><section id="pep-content">
        <dl class="rfc2822 field-list simple">
          <dt class="field-odd">Author<span class="colon">:</span></dt>
          <dd class="field-odd">Someone</dd>
          <dt class="field-even">Status<span class="colon">:</span></dt>
          <dd class="field-even"><abbr title="Status">{}</abbr></dd>
          <dt class="field-odd">Type<span class="colon">:</span></dt>
          <dd class="field-odd">Process</dd>
        </dl></section></body></html>"#,
        status
    )
}

fn expected_table(rows: Vec<Vec<&str>>) -> ResultTable {
    ResultTable::from_cells(["Status", "Count"], rows)
}

#[tokio::test]
async fn test_pep_mismatch_scenario() {
    let server = MockServer::start().await;
    let dir = TempDir::new().unwrap();

    mount_page(
        &server,
        "/numerical/",
        &numerical_index(&[("PA", "1", "PEP Purpose"), ("SR", "2", "Procedure")]),
    )
    .await;
    mount_page(&server, "/pep-0001/", &pep_page("Active")).await;
    mount_page(&server, "/pep-0002/", &pep_page("Draft")).await;

    let config = test_config(&server, dir.path());
    let mut session = test_session();
    let table = run_mode(Mode::Pep, &mut session, &config)
        .await
        .expect("pep mode failed")
        .expect("no results");

    assert_eq!(
        table,
        expected_table(vec![vec!["Active", "1"], vec!["Draft", "1"], vec!["Total", "2"]])
    );
}

#[tokio::test]
async fn test_pep_detail_fetch_failure() {
    let server = MockServer::start().await;
    let dir = TempDir::new().unwrap();

    mount_page(
        &server,
        "/numerical/",
        &numerical_index(&[("PA", "1", "PEP Purpose"), ("SR", "2", "Procedure")]),
    )
    .await;
    mount_page(&server, "/pep-0001/", &pep_page("Active")).await;
    mount_status(&server, "/pep-0002/", 500).await;

    let config = test_config(&server, dir.path());
    let mut session = test_session();
    let table = run_mode(Mode::Pep, &mut session, &config)
        .await
        .unwrap()
        .unwrap();

    assert_eq!(
        table,
        expected_table(vec![vec!["Active", "1"], vec!["Total", "2"]])
    );
}

#[tokio::test]
async fn test_pep_unknown_code_and_broken_page_do_not_abort() {
    let server = MockServer::start().await;
    let dir = TempDir::new().unwrap();

    mount_page(
        &server,
        "/numerical/",
        &numerical_index(&[
            ("PX", "1", "Unknown code"),
            ("SF", "8", "Style Guide"),
            ("IA", "20", "Zen"),
            ("SF", "12", "Sample"),
        ]),
    )
    .await;
    mount_page(&server, "/pep-0001/", &pep_page("Active")).await;
    mount_page(&server, "/pep-0008/", &pep_page("Final")).await;
    mount_page(&server, "/pep-0020/", "<html><body>moved</body></html>").await;
    mount_page(&server, "/pep-0012/", &pep_page("Final")).await;

    let config = test_config(&server, dir.path());
    let mut session = test_session();
    let table = run_mode(Mode::Pep, &mut session, &config)
        .await
        .unwrap()
        .unwrap();

    assert_eq!(
        table,
        expected_table(vec![vec!["Final", "2"], vec!["Total", "4"]])
    );
}

#[tokio::test]
async fn test_pep_index_unreachable() {
    let server = MockServer::start().await;
    let dir = TempDir::new().unwrap();
    mount_status(&server, "/numerical/", 503).await;

    let config = test_config(&server, dir.path());
    let mut session = test_session();
    let results = run_mode(Mode::Pep, &mut session, &config).await.unwrap();

    assert!(results.is_none());
}

#[tokio::test]
async fn test_pep_results_to_csv_file() {
    let server = MockServer::start().await;
    let dir = TempDir::new().unwrap();

    mount_page(
        &server,
        "/numerical/",
        &numerical_index(&[("SF", "8", "Style Guide"), ("PW", "3", "Withdrawn")]),
    )
    .await;
    mount_page(&server, "/pep-0008/", &pep_page("Final")).await;
    mount_page(&server, "/pep-0003/", &pep_page("Withdrawn")).await;

    let config = test_config(&server, dir.path());
    let mut session = test_session();
    let table = run_mode(Mode::Pep, &mut session, &config)
        .await
        .unwrap()
        .unwrap();

    let target = FileTarget {
        results_dir: config.paths.results(),
        prefix: Mode::Pep.as_str().to_string(),
        datetime_format: config.output.datetime_format.clone(),
    };
    let path = emit(&table, OutputMode::File, target).unwrap().unwrap();

    let text = std::fs::read_to_string(&path).unwrap();
    assert_eq!(
        text,
        "\"Status\",\"Count\"\n\"Final\",\"1\"\n\"Withdrawn\",\"1\"\n\"Total\",\"2\"\n"
    );
    let rows = csv::parse_rows(&text).unwrap();
    assert_eq!(rows, table.all_rows().cloned().collect::<Vec<_>>());
}
