//! Accumulators for a reconciliation pass

use indexmap::IndexMap;
use std::fmt;

/// Occurrence count per observed status, in first-seen order
#[derive(Debug, Clone, Default)]
pub struct Tally {
    counts: IndexMap<String, u64>,
}

impl Tally {
    pub fn new() -> Self {
        Self::default()
    }

    /// Increments the count for `status`
    pub fn record(&mut self, status: &str) {
        match self.counts.get_mut(status) {
            Some(count) => *count += 1,
            None => {
                self.counts.insert(status.to_string(), 1);
            }
        }
    }

    pub fn get(&self, status: &str) -> u64 {
        self.counts.get(status).copied().unwrap_or(0)
    }

    /// Sum of all counts
    pub fn total(&self) -> u64 {
        self.counts.values().sum()
    }

    pub fn iter(&self) -> impl Iterator<Item = (&str, u64)> {
        self.counts.iter().map(|(s, count)| (s.as_str(), *count))
    }

    pub fn len(&self) -> usize {
        self.counts.len()
    }

    pub fn is_empty(&self) -> bool {
        self.counts.is_empty()
    }
}

// Order is part of a tally's value; `IndexMap` equality ignores it
impl PartialEq for Tally {
    fn eq(&self, other: &Self) -> bool {
        self.iter().eq(other.iter())
    }
}

impl Eq for Tally {}

/// A detail page whose status is not acceptable for its summary code
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Mismatch {
    /// Absolute link to the detail page
    pub link: String,

    /// Status found on the detail page
    pub observed: String,

    /// Statuses acceptable for the summary-table code
    pub expected: Vec<String>,
}

impl fmt::Display for Mismatch {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(
            f,
            "Mismatched status for: {}\nStatus on detail page: {}\nExpected statuses: {:?}",
            self.link, self.observed, self.expected
        )
    }
}

/// A row that could not be reconciled
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct RowError {
    /// 1-based data row index in the summary table
    pub row: usize,
    pub message: String,
}

impl fmt::Display for RowError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "Error while parsing row {}: {}", self.row, self.message)
    }
}

/// What happened to a single summary row
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum RowOutcome {
    /// Detail status is acceptable for the row's code
    Matched { link: String, status: String },

    /// Detail status is not acceptable
    Mismatched(Mismatch),

    /// Detail page could not be fetched
    Skipped { link: String },
}
