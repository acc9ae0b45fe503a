//! PEP status reconciliation
//!
//! Compares the short status codes of the numerical PEP index against the
//! full-text status on each PEP's own page. The pass is best effort: a row
//! that fails (unknown code, missing markup, unreachable page) is recorded
//! and the pass moves on to the next row.
//!
//! # Algorithm
//!
//! 1. Every `<tr>` of the summary document is a row; the first is the header.
//! 2. For each data row: read the status code from its `<abbr>`, look up the
//!    acceptable statuses, resolve the row's link and fetch the detail page.
//! 3. Read the `Status:` field from the page's metadata `<dl>`, count it in
//!    the tally and record a mismatch when it is not acceptable.

mod status;
mod tally;

pub use status::{ExpectedStatuses, StatusCode};
pub use tally::{Mismatch, RowError, RowOutcome, Tally};

use crate::fetch::{fetch_page, Fetch};
use crate::html::{element_text, find_all, find_tag, labeled_field_value, AttrFilter};
use crate::output::ResultTable;
use crate::{Result, ScoutError};
use indicatif::ProgressBar;
use scraper::Html;
use url::Url;

/// Label of the status field on detail pages
pub const STATUS_LABEL: &str = "Status:";

/// Class of the metadata block on detail pages
pub const METADATA_CLASS: &str = "rfc2822 field-list simple";

/// One data row of the summary table
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct SummaryRow {
    /// 1-based index among data rows
    pub index: usize,

    pub code: StatusCode,

    /// Link to the detail page, as written in the table
    pub href: String,
}

/// Everything a reconciliation pass produced
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct ReconcileReport {
    pub tally: Tally,
    pub mismatches: Vec<Mismatch>,
    pub errors: Vec<RowError>,

    /// Detail pages that could not be fetched
    pub skipped: Vec<String>,

    /// Number of data rows in the summary table
    pub row_count: usize,
}

impl ReconcileReport {
    fn fold(&mut self, index: usize, outcome: Result<RowOutcome>) {
        match outcome {
            Ok(RowOutcome::Matched { status, .. }) => self.tally.record(&status),
            Ok(RowOutcome::Mismatched(mismatch)) => {
                self.tally.record(&mismatch.observed);
                self.mismatches.push(mismatch);
            }
            Ok(RowOutcome::Skipped { link }) => self.skipped.push(link),
            Err(e) => self.errors.push(RowError {
                row: index,
                message: e.to_string(),
            }),
        }
    }

    /// Mismatch and error messages, for the log
    pub fn messages(&self) -> Vec<String> {
        self.mismatches
            .iter()
            .map(ToString::to_string)
            .chain(self.errors.iter().map(ToString::to_string))
            .collect()
    }

    /// `Status | Count` rows in first-seen order, closed by the `Total` row
    pub fn to_table(&self) -> ResultTable {
        let mut rows: Vec<Vec<String>> = self
            .tally
            .iter()
            .map(|(status, count)| vec![status.to_string(), count.to_string()])
            .collect();
        rows.push(vec!["Total".to_string(), self.row_count.to_string()]);

        ResultTable::new(vec!["Status".to_string(), "Count".to_string()], rows)
    }
}

/// Reconciles a summary table against detail pages
#[derive(Debug, Clone)]
pub struct Reconciler {
    expected: ExpectedStatuses,
    base_url: Url,
}

impl Reconciler {
    /// # Arguments
    ///
    /// * `expected` - The expected-status table
    /// * `base_url` - Base that row links are resolved against
    pub fn new(expected: ExpectedStatuses, base_url: Url) -> Self {
        Self { expected, base_url }
    }

    pub fn expected(&self) -> &ExpectedStatuses {
        &self.expected
    }

    /// Runs a pass without a visible progress indicator
    pub async fn run<F: Fetch>(&self, fetcher: &mut F, summary: &Html) -> ReconcileReport {
        self.run_with_progress(fetcher, summary, &ProgressBar::hidden())
            .await
    }

    /// Runs a pass, advancing `progress` once per data row
    pub async fn run_with_progress<F: Fetch>(
        &self,
        fetcher: &mut F,
        summary: &Html,
        progress: &ProgressBar,
    ) -> ReconcileReport {
        let rows = summary_rows(summary);
        let mut report = ReconcileReport {
            row_count: rows.len(),
            ..Default::default()
        };
        progress.set_length(rows.len() as u64);

        for (i, row) in rows.into_iter().enumerate() {
            let outcome = match row {
                Ok(row) => self.process_row(fetcher, &row).await,
                Err(e) => Err(e),
            };

            if let Err(e) = &outcome {
                tracing::debug!("Row {} failed: {}", i + 1, e);
            }
            report.fold(i + 1, outcome);
            progress.inc(1);
        }

        progress.finish_and_clear();
        tracing::debug!(
            "Reconciled {} rows: {} statuses, {} mismatches, {} errors, {} skipped",
            report.row_count,
            report.tally.total(),
            report.mismatches.len(),
            report.errors.len(),
            report.skipped.len()
        );
        report
    }

    /// Reconciles one row
    ///
    /// # Returns
    ///
    /// * `Ok(RowOutcome)` - Matched, mismatched, or skipped on fetch failure
    /// * `Err(ScoutError)` - Unknown code, bad link, or unexpected page shape
    pub async fn process_row<F: Fetch>(&self, fetcher: &mut F, row: &SummaryRow) -> Result<RowOutcome> {
        let expected = self.expected.lookup(&row.code)?;
        let link = self.base_url.join(&row.href)?.to_string();

        let Some(page) = fetch_page(fetcher, &link).await else {
            return Ok(RowOutcome::Skipped { link });
        };

        let status = detail_status(&page, &link)?;
        if expected.iter().any(|s| *s == status) {
            Ok(RowOutcome::Matched { link, status })
        } else {
            Ok(RowOutcome::Mismatched(Mismatch {
                link,
                observed: status,
                expected: expected.to_vec(),
            }))
        }
    }
}

/// Reconciles `summary` with a one-off [`Reconciler`]
pub async fn reconcile<F: Fetch>(
    fetcher: &mut F,
    summary: &Html,
    expected: &ExpectedStatuses,
    base_url: &Url,
) -> ReconcileReport {
    Reconciler::new(expected.clone(), base_url.clone())
        .run(fetcher, summary)
        .await
}

/// Extracts the data rows of the summary document
///
/// Every `<tr>` after the first is a data row. A row without a status
/// `<abbr>` or without a link yields an error for that row only.
pub fn summary_rows(summary: &Html) -> Vec<Result<SummaryRow>> {
    find_all(summary.root_element(), "tr", &[])
        .into_iter()
        .skip(1)
        .enumerate()
        .map(|(i, tr)| -> Result<SummaryRow> {
            let index = i + 1;
            let abbr = find_tag(tr, "abbr", &[])?;
            let code = StatusCode::from_cell_text(&element_text(abbr));
            let href = find_all(tr, "a", &[])
                .into_iter()
                .find_map(|a| a.value().attr("href"))
                .ok_or(ScoutError::MissingLink { row: index })?;

            Ok(SummaryRow {
                index,
                code,
                href: href.to_string(),
            })
        })
        .collect()
}

/// Reads the `Status:` value from a detail page's metadata block
pub fn detail_status(page: &Html, link: &str) -> Result<String> {
    let metadata = find_tag(
        page.root_element(),
        "dl",
        &[AttrFilter::class(METADATA_CLASS)],
    )?;

    labeled_field_value(metadata, STATUS_LABEL).ok_or_else(|| ScoutError::MissingStatusField {
        url: link.to_string(),
    })
}
