//! Batch discovery: matching uploaded files to recognized table kinds.

use std::path::{Path, PathBuf};

use tracing::debug;

use kaers_model::{Sheet, TableKind};

use crate::error::{IngestError, Result};
use crate::pipe_table::read_pipe_table;

/// A file in the batch whose base name matched a recognized table kind.
#[derive(Debug, Clone)]
pub struct DiscoveredFile {
    pub path: PathBuf,
    pub kind: TableKind,
}

/// List the extract files in a directory, classified by base name.
///
/// A file participates only when its base name (without extension) exactly
/// matches a recognized kind; anything else is skipped without error. When
/// several files match the same kind the last one in name order wins, the
/// same way a re-uploaded file replaces its predecessor.
pub fn discover_extract_files(dir: &Path) -> Result<Vec<DiscoveredFile>> {
    if !dir.is_dir() {
        return Err(IngestError::DirectoryNotFound {
            path: dir.to_path_buf(),
        });
    }

    let entries = std::fs::read_dir(dir).map_err(|source| IngestError::DirectoryRead {
        path: dir.to_path_buf(),
        source,
    })?;

    let mut files = Vec::new();
    for entry in entries {
        let entry = entry.map_err(|source| IngestError::DirectoryRead {
            path: dir.to_path_buf(),
            source,
        })?;
        let path = entry.path();
        if path.is_file() {
            files.push(path);
        }
    }
    files.sort_by(|a, b| a.file_name().cmp(&b.file_name()));

    let mut discovered: Vec<DiscoveredFile> = Vec::new();
    for path in files {
        let stem = path.file_stem().and_then(|v| v.to_str()).unwrap_or("");
        let Some(kind) = TableKind::from_base_name(stem) else {
            debug!(path = %path.display(), "skipping unrecognized file");
            continue;
        };
        // Last match for a kind replaces earlier ones
        discovered.retain(|file| file.kind != kind);
        discovered.push(DiscoveredFile { path, kind });
    }

    discovered.sort_by_key(|file| file.kind.sort_order());
    Ok(discovered)
}

/// Read one discovered file into a sheet.
pub fn read_extract_file(file: &DiscoveredFile) -> Result<Sheet> {
    read_pipe_table(&file.path)
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::fs;
    use tempfile::TempDir;

    fn batch_dir() -> TempDir {
        let dir = TempDir::new().unwrap();
        for name in &["DEMO.txt", "GROUP.dat", "EVENT.csv", "NOTES.txt", "DEMO_OLD.txt"] {
            fs::write(dir.path().join(name), "KAERS_NO|X\nC1|1\n").unwrap();
        }
        dir
    }

    #[test]
    fn discovers_only_recognized_base_names() {
        let dir = batch_dir();
        let discovered = discover_extract_files(dir.path()).unwrap();
        let kinds: Vec<TableKind> = discovered.iter().map(|f| f.kind).collect();
        assert_eq!(kinds, vec![TableKind::Demo, TableKind::Event, TableKind::Group]);
    }

    #[test]
    fn later_file_replaces_earlier_for_same_kind() {
        let dir = TempDir::new().unwrap();
        fs::write(dir.path().join("DEMO.csv"), "A\n1\n").unwrap();
        fs::write(dir.path().join("DEMO.txt"), "B\n2\n").unwrap();
        let discovered = discover_extract_files(dir.path()).unwrap();
        assert_eq!(discovered.len(), 1);
        // .txt sorts after .csv, so it wins
        assert!(discovered[0].path.to_string_lossy().ends_with("DEMO.txt"));
    }

    #[test]
    fn base_name_match_is_case_sensitive() {
        let dir = TempDir::new().unwrap();
        fs::write(dir.path().join("demo.txt"), "A\n1\n").unwrap();
        fs::write(dir.path().join("Group.txt"), "A\n1\n").unwrap();
        assert!(discover_extract_files(dir.path()).unwrap().is_empty());
    }

    #[test]
    fn reads_discovered_file() {
        let dir = batch_dir();
        let discovered = discover_extract_files(dir.path()).unwrap();
        let sheet = read_extract_file(&discovered[0]).unwrap();
        assert_eq!(sheet.headers, vec!["KAERS_NO", "X"]);
        assert_eq!(sheet.rows.len(), 1);
    }

    #[test]
    fn missing_directory_errors() {
        let err = discover_extract_files(Path::new("/nonexistent/batch")).unwrap_err();
        assert!(matches!(err, IngestError::DirectoryNotFound { .. }));
    }
}
