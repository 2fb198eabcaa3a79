use std::path::PathBuf;

use thiserror::Error;

#[derive(Debug, Error)]
pub enum OutputError {
    #[error("failed to write workbook {path}: {source}")]
    WorkbookWrite {
        path: PathBuf,
        source: rust_xlsxwriter::XlsxError,
    },
    #[error("workbook error: {0}")]
    Xlsx(#[from] rust_xlsxwriter::XlsxError),
}

pub type Result<T> = std::result::Result<T, OutputError>;
