//! PEP status tally

use crate::config::Config;
use crate::fetch::{fetch_page, Fetch};
use crate::output::ResultTable;
use crate::reconcile::Reconciler;
use crate::scrape::progress_bar;
use crate::Result;
use url::Url;

/// Counts PEP statuses and logs every status that disagrees with the index
pub async fn pep<F: Fetch>(fetcher: &mut F, config: &Config) -> Result<Option<ResultTable>> {
    let base = Url::parse(&config.urls.pep_base)?;
    let Some(index) = fetch_page(fetcher, &config.urls.peps_index).await else {
        return Ok(None);
    };

    let reconciler = Reconciler::new(config.expected_statuses(), base);
    let progress = progress_bar(0, "pep");
    let report = reconciler
        .run_with_progress(fetcher, &index, &progress)
        .await;

    for message in report.messages() {
        tracing::info!("{}", message);
    }
    tracing::info!(
        "Checked {} PEPs: {} mismatches, {} errors, {} unreachable",
        report.row_count,
        report.mismatches.len(),
        report.errors.len(),
        report.skipped.len()
    );

    Ok(Some(report.to_table()))
}
