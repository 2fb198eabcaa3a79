//! Format-independent workbook writing.

use std::collections::BTreeMap;
use std::path::Path;

use tracing::{debug, info};

use kaers_model::{NARRATIVE_HEADER, NARRATIVE_SHEET_NAME, NarrativeRecord, Sheet, TableKind};

use crate::Result;
use crate::names::SheetNamer;

/// A destination for finished sheets.
///
/// Sheets are appended in call order; `finish` persists the workbook.
pub trait WorkbookSink {
    fn put_sheet(&mut self, name: &str, rows: &[Vec<String>]) -> Result<()>;
    fn finish(&mut self, path: &Path) -> Result<()>;
}

/// Write the submission workbook: one sheet per table, fixed kind order,
/// only kinds present in the batch.
pub fn write_submission_workbook(
    sink: &mut dyn WorkbookSink,
    path: &Path,
    tables: &BTreeMap<TableKind, Sheet>,
) -> Result<()> {
    let mut namer = SheetNamer::new();
    let mut ordered: Vec<(&TableKind, &Sheet)> = tables.iter().collect();
    ordered.sort_by_key(|(kind, _)| kind.sort_order());

    for (kind, sheet) in ordered {
        let name = namer.allocate(kind.as_str());
        let rows = sheet.to_matrix();
        debug!(sheet = %name, rows = rows.len(), "sheet written");
        sink.put_sheet(&name, &rows)?;
    }
    sink.finish(path)?;
    info!(path = %path.display(), sheet_count = tables.len(), "submission workbook written");
    Ok(())
}

/// Write the narrative workbook: a single summary sheet.
pub fn write_narrative_workbook(
    sink: &mut dyn WorkbookSink,
    path: &Path,
    records: &[NarrativeRecord],
) -> Result<()> {
    let mut rows = Vec::with_capacity(records.len() + 1);
    rows.push(NARRATIVE_HEADER.iter().map(|h| (*h).to_string()).collect());
    for record in records {
        rows.push(record.to_row());
    }
    sink.put_sheet(NARRATIVE_SHEET_NAME, &rows)?;
    sink.finish(path)?;
    info!(path = %path.display(), record_count = records.len(), "narrative workbook written");
    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;

    #[derive(Default)]
    struct RecordingSink {
        sheets: Vec<(String, Vec<Vec<String>>)>,
        finished: bool,
    }

    impl WorkbookSink for RecordingSink {
        fn put_sheet(&mut self, name: &str, rows: &[Vec<String>]) -> Result<()> {
            self.sheets.push((name.to_string(), rows.to_vec()));
            Ok(())
        }

        fn finish(&mut self, _path: &Path) -> Result<()> {
            self.finished = true;
            Ok(())
        }
    }

    #[test]
    fn submission_sheets_follow_kind_order() {
        let mut tables = BTreeMap::new();
        for kind in [TableKind::Group, TableKind::Demo, TableKind::Event] {
            tables.insert(
                kind,
                Sheet {
                    headers: vec!["KAERS_NO".to_string()],
                    rows: vec![vec!["C1".to_string()]],
                },
            );
        }
        let mut sink = RecordingSink::default();
        write_submission_workbook(&mut sink, Path::new("out.xlsx"), &tables).unwrap();
        let names: Vec<&str> = sink.sheets.iter().map(|(name, _)| name.as_str()).collect();
        assert_eq!(names, vec!["DEMO", "EVENT", "GROUP"]);
        assert!(sink.finished);
        // Header row precedes data rows
        assert_eq!(sink.sheets[0].1[0], vec!["KAERS_NO"]);
        assert_eq!(sink.sheets[0].1[1], vec!["C1"]);
    }

    #[test]
    fn narrative_workbook_has_single_sheet_with_header() {
        let records = vec![NarrativeRecord {
            case_key: "C1".to_string(),
            group_id: "G1".to_string(),
            suspect_drug: "Aspirin".to_string(),
            patient_sex: "female".to_string(),
            patient_birth_year: "1980".to_string(),
            adverse_events: "Nausea".to_string(),
            causality_assessments: "Probable".to_string(),
            adr_start_date: "20240101".to_string(),
        }];
        let mut sink = RecordingSink::default();
        write_narrative_workbook(&mut sink, Path::new("narrative.xlsx"), &records).unwrap();
        assert_eq!(sink.sheets.len(), 1);
        let (name, rows) = &sink.sheets[0];
        assert_eq!(name, NARRATIVE_SHEET_NAME);
        assert_eq!(rows[0][0], "KAERS_NO");
        assert_eq!(rows[1][2], "Aspirin");
    }
}
