//! Ordered row matrix for one extract table.
//!
//! Headers keep their input order and are not required to be unique; column
//! access is always by exact header-name match (first occurrence wins), never
//! by a cached position, because transforms change the header layout.

use serde::{Deserialize, Serialize};

/// Column holding the case identifier in every KAERS table.
pub const CASE_KEY_COLUMN: &str = "KAERS_NO";

/// One parsed extract table: a header row plus string-cell data rows.
///
/// Rows are rectangular (padded/truncated to the header length at parse
/// time) and keep input file order throughout the pipeline.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct Sheet {
    pub headers: Vec<String>,
    pub rows: Vec<Vec<String>>,
}

impl Sheet {
    pub fn new(headers: Vec<String>) -> Self {
        Self {
            headers,
            rows: Vec::new(),
        }
    }

    pub fn is_empty(&self) -> bool {
        self.headers.is_empty() && self.rows.is_empty()
    }

    /// Index of the first column with this exact header name.
    pub fn column(&self, name: &str) -> Option<usize> {
        self.headers.iter().position(|header| header == name)
    }

    /// Cell value at (row index, named column); empty string when absent.
    pub fn cell(&self, row: usize, name: &str) -> &str {
        self.column(name)
            .and_then(|idx| self.rows.get(row).and_then(|cells| cells.get(idx)))
            .map(String::as_str)
            .unwrap_or("")
    }

    pub fn push_row(&mut self, row: Vec<String>) {
        self.rows.push(row);
    }

    /// The sheet as a row matrix with the header first, for workbook output.
    pub fn to_matrix(&self) -> Vec<Vec<String>> {
        let mut matrix = Vec::with_capacity(self.rows.len() + 1);
        if !self.headers.is_empty() {
            matrix.push(self.headers.clone());
        }
        matrix.extend(self.rows.iter().cloned());
        matrix
    }
}
