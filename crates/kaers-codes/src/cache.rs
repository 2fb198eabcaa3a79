//! Per-run vocabulary cache.
//!
//! Vocabularies load lazily on first use and are memoized for the lifetime
//! of the cache. The cache is an explicit object handed to the pipeline at
//! construction, never ambient global state; the slot map lock is held
//! across a load, so concurrent first use of a table id loads it exactly
//! once and every waiter observes the same shared table.

use std::collections::BTreeMap;
use std::path::{Path, PathBuf};
use std::sync::{Arc, Mutex, PoisonError};

use crate::error::Result;
use crate::loader::load_code_table;
use crate::table::{CodeTable, FileTable};

#[derive(Debug)]
pub struct CodeTableCache {
    codes_dir: PathBuf,
    slots: Mutex<BTreeMap<FileTable, Arc<CodeTable>>>,
}

impl CodeTableCache {
    pub fn new(codes_dir: impl Into<PathBuf>) -> Self {
        Self {
            codes_dir: codes_dir.into(),
            slots: Mutex::new(BTreeMap::new()),
        }
    }

    pub fn codes_dir(&self) -> &Path {
        &self.codes_dir
    }

    /// Get a vocabulary, loading and memoizing it on first use.
    ///
    /// Load failure is fatal for the run and is not cached, so a caller can
    /// surface it immediately rather than replay a stale error.
    pub fn get(&self, table: FileTable) -> Result<Arc<CodeTable>> {
        let mut slots = self
            .slots
            .lock()
            .unwrap_or_else(PoisonError::into_inner);
        if let Some(loaded) = slots.get(&table) {
            return Ok(Arc::clone(loaded));
        }
        let loaded = Arc::new(load_code_table(&self.codes_dir, table)?);
        slots.insert(table, Arc::clone(&loaded));
        Ok(loaded)
    }

    /// Translate a single-part code; misses pass the input through.
    pub fn resolve(&self, table: FileTable, code: &str) -> Result<String> {
        Ok(self.get(table)?.resolve(code))
    }

    /// Composite lookup returning nothing on a miss.
    pub fn get_composite(&self, table: FileTable, parts: &[&str]) -> Result<Option<String>> {
        Ok(self
            .get(table)?
            .get_parts(parts)
            .map(str::to_string))
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::fs;
    use tempfile::TempDir;

    #[test]
    fn repeated_loads_share_one_table() {
        let dir = TempDir::new().unwrap();
        fs::write(dir.path().join("dosage_unit.txt"), "00103|years\n").unwrap();
        let cache = CodeTableCache::new(dir.path());

        let first = cache.get(FileTable::DosageUnit).unwrap();
        let second = cache.get(FileTable::DosageUnit).unwrap();
        assert!(Arc::ptr_eq(&first, &second));
        assert_eq!(cache.resolve(FileTable::DosageUnit, "00103").unwrap(), "years");
    }

    #[test]
    fn missing_table_surfaces_error() {
        let dir = TempDir::new().unwrap();
        let cache = CodeTableCache::new(dir.path());
        assert!(cache.get(FileTable::DrugCode).is_err());
    }
}
