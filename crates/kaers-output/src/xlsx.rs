//! XLSX implementation of the workbook sink.

use std::path::Path;

use rust_xlsxwriter::{Format, Workbook};

use crate::Result;
use crate::error::OutputError;
use crate::sink::WorkbookSink;

/// Writes sheets into an in-memory workbook, saved on `finish`.
pub struct XlsxSink {
    workbook: Workbook,
    header_format: Format,
}

impl XlsxSink {
    pub fn new() -> Self {
        Self {
            workbook: Workbook::new(),
            header_format: Format::new().set_bold(),
        }
    }
}

impl Default for XlsxSink {
    fn default() -> Self {
        Self::new()
    }
}

impl WorkbookSink for XlsxSink {
    fn put_sheet(&mut self, name: &str, rows: &[Vec<String>]) -> Result<()> {
        let worksheet = self.workbook.add_worksheet();
        worksheet.set_name(name)?;
        for (row_idx, row) in rows.iter().enumerate() {
            let row_num = u32::try_from(row_idx).unwrap_or(u32::MAX);
            for (col_idx, cell) in row.iter().enumerate() {
                let col_num = u16::try_from(col_idx).unwrap_or(u16::MAX);
                if row_idx == 0 {
                    worksheet.write_string_with_format(row_num, col_num, cell, &self.header_format)?;
                } else {
                    worksheet.write_string(row_num, col_num, cell)?;
                }
            }
        }
        Ok(())
    }

    fn finish(&mut self, path: &Path) -> Result<()> {
        self.workbook
            .save(path)
            .map_err(|source| OutputError::WorkbookWrite {
                path: path.to_path_buf(),
                source,
            })
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use tempfile::TempDir;

    #[test]
    fn writes_workbook_file() {
        let dir = TempDir::new().unwrap();
        let path = dir.path().join("out.xlsx");
        let mut sink = XlsxSink::new();
        sink.put_sheet(
            "DEMO",
            &[
                vec!["KAERS_NO".to_string(), "PATIENT SEX".to_string()],
                vec!["C1".to_string(), "female".to_string()],
            ],
        )
        .unwrap();
        sink.finish(&path).unwrap();
        assert!(path.is_file());
        assert!(std::fs::metadata(&path).unwrap().len() > 0);
    }

    #[test]
    fn invalid_save_path_surfaces_error() {
        let mut sink = XlsxSink::new();
        sink.put_sheet("DEMO", &[vec!["A".to_string()]]).unwrap();
        let err = sink
            .finish(Path::new("/nonexistent/dir/out.xlsx"))
            .unwrap_err();
        assert!(matches!(err, OutputError::WorkbookWrite { .. }));
    }
}
