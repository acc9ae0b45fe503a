//! PEP status codes and the expected-status table

use crate::ScoutError;
use std::collections::BTreeMap;
use std::fmt;

/// Short status code from the summary table (`A`, `D`, `F`, ... or empty)
#[derive(Debug, Clone, PartialEq, Eq, Hash, PartialOrd, Ord)]
pub struct StatusCode(String);

impl StatusCode {
    pub fn new(code: &str) -> Self {
        Self(code.to_string())
    }

    /// Parses the text of a summary-table status cell
    ///
    /// The cell holds a one-character type prefix followed by the status
    /// code, so `"SF"` yields `F` and `"I"` yields the empty code.
    pub fn from_cell_text(text: &str) -> Self {
        let mut chars = text.trim().chars();
        chars.next();
        Self(chars.as_str().to_string())
    }

    pub fn as_str(&self) -> &str {
        &self.0
    }
}

impl fmt::Display for StatusCode {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.0)
    }
}

/// Immutable mapping from status code to acceptable full-text statuses
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ExpectedStatuses {
    table: BTreeMap<StatusCode, Vec<String>>,
}

impl ExpectedStatuses {
    pub fn from_map(map: &BTreeMap<String, Vec<String>>) -> Self {
        Self {
            table: map
                .iter()
                .map(|(code, statuses)| (StatusCode::new(code), statuses.clone()))
                .collect(),
        }
    }

    /// Acceptable statuses for `code`
    ///
    /// # Errors
    ///
    /// An unknown code is an error, never a silent default.
    pub fn lookup(&self, code: &StatusCode) -> Result<&[String], ScoutError> {
        self.table
            .get(code)
            .map(Vec::as_slice)
            .ok_or_else(|| ScoutError::UnknownStatus {
                code: code.to_string(),
            })
    }

    pub fn codes(&self) -> impl Iterator<Item = &StatusCode> {
        self.table.keys()
    }

    pub fn len(&self) -> usize {
        self.table.len()
    }

    pub fn is_empty(&self) -> bool {
        self.table.is_empty()
    }
}

impl Default for ExpectedStatuses {
    fn default() -> Self {
        Self::from_map(&crate::config::default_expected_status())
    }
}
