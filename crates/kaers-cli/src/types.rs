//! Result types shared between commands and the summary printer.

use std::path::PathBuf;

use kaers_model::TableKind;

/// Per-table outcome of one conversion run.
#[derive(Debug)]
pub struct TableSummary {
    pub kind: TableKind,
    /// Rows read from the extract file.
    pub rows_in: usize,
    /// Rows remaining after deduplication.
    pub rows_out: usize,
}

/// Outcome of the convert command.
#[derive(Debug)]
pub struct ConvertResult {
    pub tables: Vec<TableSummary>,
    /// Case keys removed by deduplication.
    pub dropped_cases: usize,
    pub narrative_count: usize,
    /// Written submission workbook, absent on dry runs.
    pub output: Option<PathBuf>,
    /// Written narrative workbook, absent on dry runs or with --no-narrative.
    pub narrative_output: Option<PathBuf>,
    /// Non-fatal errors accumulated along the way.
    pub errors: Vec<String>,
}

impl ConvertResult {
    pub fn has_errors(&self) -> bool {
        !self.errors.is_empty()
    }
}
