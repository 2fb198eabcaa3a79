use std::path::PathBuf;

use thiserror::Error;

#[derive(Debug, Error)]
pub enum CodesError {
    #[error("code table not found: {path}")]
    TableNotFound { path: PathBuf },

    #[error("failed to read code table {path}: {source}")]
    TableRead {
        path: PathBuf,
        #[source]
        source: csv::Error,
    },

    #[error("malformed code table {path}: line {line} has {found} fields, expected {expected}")]
    MalformedRow {
        path: PathBuf,
        line: usize,
        found: usize,
        expected: usize,
    },
}

pub type Result<T> = std::result::Result<T, CodesError>;
