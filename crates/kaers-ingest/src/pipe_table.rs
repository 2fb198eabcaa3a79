//! Pipe-delimited extract parsing.
//!
//! One record per line, fields separated by `|`, every field trimmed, blank
//! lines skipped. The first surviving line is the header; data rows are
//! padded or truncated to the header length so downstream structural edits
//! operate on rectangular rows.

use std::path::Path;

use kaers_model::Sheet;

use crate::error::{IngestError, Result};

fn normalize_cell(raw: &str) -> String {
    raw.trim().trim_matches('\u{feff}').to_string()
}

/// Parse pipe-delimited text into a [`Sheet`].
///
/// An empty (or all-blank) input yields an empty sheet: no header, no rows.
pub fn parse_pipe_text(content: &str) -> Sheet {
    let mut lines = content
        .lines()
        .filter(|line| !line.trim().is_empty())
        .map(|line| line.split('|').map(normalize_cell).collect::<Vec<_>>());

    let Some(headers) = lines.next() else {
        return Sheet::default();
    };

    let mut sheet = Sheet::new(headers);
    for record in lines {
        let mut row = Vec::with_capacity(sheet.headers.len());
        for idx in 0..sheet.headers.len() {
            row.push(record.get(idx).cloned().unwrap_or_default());
        }
        sheet.push_row(row);
    }
    sheet
}

/// Read and parse one extract file.
pub fn read_pipe_table(path: &Path) -> Result<Sheet> {
    let bytes = std::fs::read(path).map_err(|source| IngestError::FileRead {
        path: path.to_path_buf(),
        source,
    })?;
    let content = String::from_utf8(bytes).map_err(|_| IngestError::InvalidEncoding {
        path: path.to_path_buf(),
    })?;
    Ok(parse_pipe_text(&content))
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn parses_header_and_rows() {
        let sheet = parse_pipe_text("KAERS_NO|PTNT_SEX\nC1|1\nC2|2\n");
        assert_eq!(sheet.headers, vec!["KAERS_NO", "PTNT_SEX"]);
        assert_eq!(sheet.rows.len(), 2);
        assert_eq!(sheet.rows[1], vec!["C2", "2"]);
    }

    #[test]
    fn trims_fields_and_skips_blank_lines() {
        let sheet = parse_pipe_text(" KAERS_NO | PTNT_SEX \n\n C1 | 1 \n   \n");
        assert_eq!(sheet.headers, vec!["KAERS_NO", "PTNT_SEX"]);
        assert_eq!(sheet.rows, vec![vec!["C1".to_string(), "1".to_string()]]);
    }

    #[test]
    fn pads_short_rows_and_truncates_long_rows() {
        let sheet = parse_pipe_text("A|B|C\n1\n1|2|3|4\n");
        assert_eq!(sheet.rows[0], vec!["1", "", ""]);
        assert_eq!(sheet.rows[1], vec!["1", "2", "3"]);
    }

    #[test]
    fn empty_input_yields_empty_sheet() {
        let sheet = parse_pipe_text("");
        assert!(sheet.is_empty());
        let blank = parse_pipe_text("\n  \n");
        assert!(blank.is_empty());
    }

    #[test]
    fn header_only_input_yields_zero_rows() {
        let sheet = parse_pipe_text("KAERS_NO|PTNT_SEX\n");
        assert_eq!(sheet.headers.len(), 2);
        assert!(sheet.rows.is_empty());
    }
}
