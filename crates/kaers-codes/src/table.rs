//! File-loaded reference vocabularies.

use std::collections::BTreeMap;
use std::fmt;

/// A reference vocabulary loaded from the codes directory.
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash)]
pub enum FileTable {
    /// Drug product codes to product names.
    DrugCode,
    /// Ingredient codes to ingredient names.
    IngredientCode,
    /// Dosage/age unit codes to unit labels.
    DosageUnit,
    /// Administration route and shape codes.
    RouteShape,
    /// KCD disease classification codes.
    DiseaseCode,
    /// WHO-ART coded terms, keyed by (record number, sequence).
    Whoart,
}

impl FileTable {
    pub const ALL: [FileTable; 6] = [
        FileTable::DrugCode,
        FileTable::IngredientCode,
        FileTable::DosageUnit,
        FileTable::RouteShape,
        FileTable::DiseaseCode,
        FileTable::Whoart,
    ];

    pub fn id(&self) -> &'static str {
        match self {
            FileTable::DrugCode => "DRUG_CODE",
            FileTable::IngredientCode => "INGREDIENT_CODE",
            FileTable::DosageUnit => "DOSAGE_UNIT",
            FileTable::RouteShape => "ROUTE_SHAPE",
            FileTable::DiseaseCode => "DISEASE_CODE",
            FileTable::Whoart => "WHOART",
        }
    }

    /// Source file name under the codes directory.
    pub fn file_name(&self) -> &'static str {
        match self {
            FileTable::DrugCode => "drug_code.txt",
            FileTable::IngredientCode => "ingredient_code.txt",
            FileTable::DosageUnit => "dosage_unit.txt",
            FileTable::RouteShape => "route_shape.txt",
            FileTable::DiseaseCode => "disease_code.txt",
            FileTable::Whoart => "whoart.txt",
        }
    }

    /// Number of key fields per source row (WHO-ART keys are two-part).
    pub fn key_fields(&self) -> usize {
        match self {
            FileTable::Whoart => 2,
            _ => 1,
        }
    }

    /// Zero-pad width for numeric key parts; 0 disables padding.
    fn pad_width(&self) -> usize {
        match self {
            FileTable::DrugCode => 9,
            FileTable::IngredientCode => 6,
            FileTable::DosageUnit => 5,
            FileTable::RouteShape => 3,
            FileTable::DiseaseCode | FileTable::Whoart => 0,
        }
    }

    /// Normalize one key part the way the vocabulary's codes are written.
    pub fn normalize_part(&self, raw: &str) -> String {
        let trimmed = raw.trim();
        if matches!(self, FileTable::DiseaseCode) {
            return trimmed.to_ascii_uppercase();
        }
        let width = self.pad_width();
        if width > 0
            && trimmed.len() < width
            && !trimmed.is_empty()
            && trimmed.bytes().all(|b| b.is_ascii_digit())
        {
            return format!("{trimmed:0>width$}");
        }
        trimmed.to_string()
    }

    /// Normalize a full (possibly composite) key from its parts.
    pub fn normalize_key(&self, parts: &[&str]) -> String {
        let mut key = String::new();
        for (pos, part) in parts.iter().enumerate() {
            if pos > 0 {
                key.push('-');
            }
            key.push_str(&self.normalize_part(part));
        }
        key
    }
}

impl fmt::Display for FileTable {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.id())
    }
}

/// An immutable code-to-label dictionary for one vocabulary.
#[derive(Debug, Clone)]
pub struct CodeTable {
    table: FileTable,
    entries: BTreeMap<String, String>,
}

impl CodeTable {
    pub fn new(table: FileTable) -> Self {
        Self {
            table,
            entries: BTreeMap::new(),
        }
    }

    pub fn table(&self) -> FileTable {
        self.table
    }

    pub fn len(&self) -> usize {
        self.entries.len()
    }

    pub fn is_empty(&self) -> bool {
        self.entries.is_empty()
    }

    /// Insert an entry; key parts are normalized before storage.
    pub fn insert(&mut self, key_parts: &[&str], label: String) {
        let key = self.table.normalize_key(key_parts);
        self.entries.insert(key, label);
    }

    /// Translate a single-part code; misses pass the input through.
    pub fn resolve(&self, code: &str) -> String {
        self.resolve_parts(&[code])
    }

    /// Translate a (possibly composite) code; misses pass the trimmed input
    /// through so the raw code is never lost.
    pub fn resolve_parts(&self, parts: &[&str]) -> String {
        let key = self.table.normalize_key(parts);
        match self.entries.get(&key) {
            Some(label) => label.clone(),
            None => parts
                .iter()
                .map(|part| part.trim())
                .collect::<Vec<_>>()
                .join("-"),
        }
    }

    /// Look up a composite key, returning nothing on a miss (used where a
    /// derived column should stay empty rather than echo the key).
    pub fn get_parts(&self, parts: &[&str]) -> Option<&str> {
        let key = self.table.normalize_key(parts);
        self.entries.get(&key).map(String::as_str)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn normalize_pads_numeric_codes() {
        assert_eq!(FileTable::DrugCode.normalize_part("1234"), "000001234");
        assert_eq!(FileTable::DosageUnit.normalize_part("103"), "00103");
        // Non-numeric codes are left alone
        assert_eq!(FileTable::DrugCode.normalize_part("A1234"), "A1234");
        assert_eq!(FileTable::DiseaseCode.normalize_part("k52.9"), "K52.9");
    }

    #[test]
    fn composite_key_joins_with_dash() {
        assert_eq!(FileTable::Whoart.normalize_key(&["0001", " 002 "]), "0001-002");
    }

    #[test]
    fn resolve_passes_through_on_miss() {
        let mut table = CodeTable::new(FileTable::DosageUnit);
        table.insert(&["00103"], "years".to_string());
        assert_eq!(table.resolve("00103"), "years");
        assert_eq!(table.resolve("103"), "years"); // padded before lookup
        assert_eq!(table.resolve("99999"), "99999");
        // A missed lookup echoes the raw input, not the padded key
        let drugs = CodeTable::new(FileTable::DrugCode);
        assert_eq!(drugs.resolve("1234"), "1234");
    }

    #[test]
    fn get_parts_returns_none_on_miss() {
        let mut table = CodeTable::new(FileTable::Whoart);
        table.insert(&["0001", "001"], "Nausea".to_string());
        assert_eq!(table.get_parts(&["0001", "001"]), Some("Nausea"));
        assert_eq!(table.get_parts(&["0001", "002"]), None);
    }
}
