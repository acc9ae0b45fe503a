//! Result tables handed to the emitters

/// Header row plus data rows; every cell is text
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ResultTable {
    header: Vec<String>,
    rows: Vec<Vec<String>>,
}

impl ResultTable {
    pub fn new(header: Vec<String>, rows: Vec<Vec<String>>) -> Self {
        Self { header, rows }
    }

    /// Builds a table from string-like cells
    ///
    /// # Example
    ///
    /// ```
    /// use pydoc_scout::ResultTable;
    ///
    /// let table = ResultTable::from_cells(["Status", "Count"], vec![vec!["Final", "3"]]);
    /// assert_eq!(table.rows()[0][1], "3");
    /// ```
    pub fn from_cells<H, R, C>(header: H, rows: Vec<R>) -> Self
    where
        H: IntoIterator,
        H::Item: ToString,
        R: IntoIterator<Item = C>,
        C: ToString,
    {
        Self {
            header: header.into_iter().map(|h| h.to_string()).collect(),
            rows: rows
                .into_iter()
                .map(|row| row.into_iter().map(|c| c.to_string()).collect())
                .collect(),
        }
    }

    pub fn header(&self) -> &[String] {
        &self.header
    }

    pub fn rows(&self) -> &[Vec<String>] {
        &self.rows
    }

    /// Header followed by every data row
    pub fn all_rows(&self) -> impl Iterator<Item = &Vec<String>> {
        std::iter::once(&self.header).chain(self.rows.iter())
    }

    /// Number of data rows
    pub fn len(&self) -> usize {
        self.rows.len()
    }

    pub fn is_empty(&self) -> bool {
        self.rows.is_empty()
    }
}
