//! Reference vocabulary loading.
//!
//! Each vocabulary is a pipe-delimited file with a fixed field layout: the
//! key field(s) first, the display label last. A missing or malformed file
//! is fatal for the whole run, never a per-row fallback.

use std::path::Path;

use csv::ReaderBuilder;
use tracing::debug;

use crate::error::{CodesError, Result};
use crate::table::{CodeTable, FileTable};

/// Load one vocabulary from the codes directory.
pub fn load_code_table(codes_dir: &Path, table: FileTable) -> Result<CodeTable> {
    let path = codes_dir.join(table.file_name());
    if !path.is_file() {
        return Err(CodesError::TableNotFound { path });
    }

    let mut reader = ReaderBuilder::new()
        .has_headers(false)
        .delimiter(b'|')
        .flexible(true)
        .from_path(&path)
        .map_err(|source| CodesError::TableRead {
            path: path.clone(),
            source,
        })?;

    let expected = table.key_fields() + 1;
    let mut loaded = CodeTable::new(table);
    for (idx, record) in reader.records().enumerate() {
        let record = record.map_err(|source| CodesError::TableRead {
            path: path.clone(),
            source,
        })?;
        let fields: Vec<&str> = record.iter().map(str::trim).collect();
        if fields.iter().all(|field| field.is_empty()) {
            continue;
        }
        if fields.len() < expected {
            return Err(CodesError::MalformedRow {
                path,
                line: idx + 1,
                found: fields.len(),
                expected,
            });
        }
        let key_parts = &fields[..table.key_fields()];
        let label = fields[table.key_fields()].to_string();
        loaded.insert(key_parts, label);
    }

    debug!(table = %table, entries = loaded.len(), path = %path.display(), "code table loaded");
    Ok(loaded)
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::fs;
    use tempfile::TempDir;

    fn codes_dir() -> TempDir {
        let dir = TempDir::new().unwrap();
        fs::write(
            dir.path().join("dosage_unit.txt"),
            "00103|years\n00106|months\n\n00107|days\n",
        )
        .unwrap();
        fs::write(
            dir.path().join("whoart.txt"),
            "0001|001|Nausea\n0001|002|Vomiting\n",
        )
        .unwrap();
        fs::write(dir.path().join("drug_code.txt"), "000001234\n").unwrap();
        dir
    }

    #[test]
    fn loads_single_key_table() {
        let dir = codes_dir();
        let table = load_code_table(dir.path(), FileTable::DosageUnit).unwrap();
        assert_eq!(table.len(), 3);
        assert_eq!(table.resolve("00103"), "years");
    }

    #[test]
    fn loads_composite_key_table() {
        let dir = codes_dir();
        let table = load_code_table(dir.path(), FileTable::Whoart).unwrap();
        assert_eq!(table.get_parts(&["0001", "002"]), Some("Vomiting"));
    }

    #[test]
    fn missing_file_is_fatal() {
        let dir = codes_dir();
        let err = load_code_table(dir.path(), FileTable::DiseaseCode).unwrap_err();
        assert!(matches!(err, CodesError::TableNotFound { .. }));
    }

    #[test]
    fn short_row_is_fatal() {
        let dir = codes_dir();
        let err = load_code_table(dir.path(), FileTable::DrugCode).unwrap_err();
        assert!(matches!(err, CodesError::MalformedRow { line: 1, .. }));
    }
}
