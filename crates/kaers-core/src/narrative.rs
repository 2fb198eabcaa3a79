//! Narrative summary assembly.
//!
//! Builds one summary record per surviving case, joining across the
//! transformed tables. Singular fields come from a first-row index and
//! multi-valued fields from a full-row index; the two are kept separate so
//! a repeated case in DEMO can never multiply events, and repeated EVENT
//! rows can never be collapsed to one.

use std::collections::{BTreeMap, BTreeSet};

use kaers_codes::StaticMap;
use kaers_model::{CASE_KEY_COLUMN, NarrativeRecord, Sheet, TableKind};

const GROUP_ID_COLUMN: &str = "GROUP_ID";
const DRUG_GROUP_COLUMN: &str = "DRUG_GROUP";
const DRUG_CODE_COLUMN: &str = "DRUG_CODE";
const DRUG_SEQ_COLUMN: &str = "DRUG_SEQ";
const CAUSALITY_COLUMN: &str = "CAUSALITY_ASSESSMENT";
const PATIENT_SEX_COLUMN: &str = "PATIENT SEX";
const PATIENT_BIRTH_YEAR_COLUMN: &str = "PATIENT BIRTH YEAR";
const WHOART_TERM_COLUMN: &str = "WHOART_TERM_ENG";
const ADR_START_DATE_COLUMN: &str = "ADR_START_DATE";

/// Row indexes over one sheet, keyed by case key.
struct SheetIndex<'a> {
    sheet: &'a Sheet,
    first: BTreeMap<&'a str, usize>,
    all: BTreeMap<&'a str, Vec<usize>>,
}

impl<'a> SheetIndex<'a> {
    fn new(sheet: &'a Sheet) -> Self {
        let mut first = BTreeMap::new();
        let mut all: BTreeMap<&str, Vec<usize>> = BTreeMap::new();
        if let Some(key_idx) = sheet.column(CASE_KEY_COLUMN) {
            for (row, cells) in sheet.rows.iter().enumerate() {
                let case = cells.get(key_idx).map(String::as_str).unwrap_or("").trim();
                if case.is_empty() {
                    continue;
                }
                first.entry(case).or_insert(row);
                all.entry(case).or_default().push(row);
            }
        }
        Self { sheet, first, all }
    }

    fn empty() -> Self {
        static EMPTY: Sheet = Sheet {
            headers: Vec::new(),
            rows: Vec::new(),
        };
        Self {
            sheet: &EMPTY,
            first: BTreeMap::new(),
            all: BTreeMap::new(),
        }
    }

    /// Value from the case's first row, empty when absent.
    fn first_cell(&self, case: &str, column: &str) -> String {
        self.first
            .get(case)
            .map(|&row| self.sheet.cell(row, column).to_string())
            .unwrap_or_default()
    }

    /// All of the case's rows in file order.
    fn rows(&self, case: &str) -> &[usize] {
        self.all.get(case).map(Vec::as_slice).unwrap_or(&[])
    }
}

/// Assemble one narrative record per surviving case.
///
/// `tables` holds the transformed, deduplicated sheets. Records follow the
/// GROUP table's file order, first occurrence per case. Any table or field
/// a case is absent from yields an empty string.
pub fn assemble_narratives(tables: &BTreeMap<TableKind, Sheet>) -> Vec<NarrativeRecord> {
    let Some(group) = tables.get(&TableKind::Group) else {
        return Vec::new();
    };
    let index = |kind: TableKind| {
        tables
            .get(&kind)
            .map(SheetIndex::new)
            .unwrap_or_else(SheetIndex::empty)
    };
    let demo = index(TableKind::Demo);
    let event = index(TableKind::Event);
    let drug = index(TableKind::Drug);
    let assessment = index(TableKind::Assessment);

    let mut records = Vec::new();
    let mut seen = BTreeSet::new();
    for row in 0..group.rows.len() {
        let case = group.cell(row, CASE_KEY_COLUMN).trim();
        if case.is_empty() || !seen.insert(case.to_string()) {
            continue;
        }

        let suspect_rows: Vec<usize> = drug
            .rows(case)
            .iter()
            .copied()
            .filter(|&r| drug.sheet.cell(r, DRUG_GROUP_COLUMN) == StaticMap::suspected_drug_label())
            .collect();
        let suspect_drug = suspect_rows
            .first()
            .map(|&r| drug.sheet.cell(r, DRUG_CODE_COLUMN).to_string())
            .unwrap_or_default();
        let causality = join_causality(case, &suspect_rows, &drug, &assessment);
        let adverse_events = event
            .rows(case)
            .iter()
            .map(|&r| event.sheet.cell(r, WHOART_TERM_COLUMN))
            .filter(|term| !term.is_empty())
            .collect::<Vec<_>>()
            .join("\n");

        records.push(NarrativeRecord {
            case_key: case.to_string(),
            group_id: group.cell(row, GROUP_ID_COLUMN).to_string(),
            suspect_drug,
            patient_sex: demo.first_cell(case, PATIENT_SEX_COLUMN),
            patient_birth_year: demo.first_cell(case, PATIENT_BIRTH_YEAR_COLUMN),
            adverse_events,
            causality_assessments: causality,
            adr_start_date: event.first_cell(case, ADR_START_DATE_COLUMN),
        });
    }
    records
}

/// For each suspect drug sequence, every matching assessment value in file
/// order, newline-joined.
fn join_causality(
    case: &str,
    suspect_rows: &[usize],
    drug: &SheetIndex<'_>,
    assessment: &SheetIndex<'_>,
) -> String {
    let mut values = Vec::new();
    for &drug_row in suspect_rows {
        let drug_seq = drug.sheet.cell(drug_row, DRUG_SEQ_COLUMN).trim();
        if drug_seq.is_empty() {
            continue;
        }
        for &assess_row in assessment.rows(case) {
            if assessment.sheet.cell(assess_row, DRUG_SEQ_COLUMN).trim() == drug_seq {
                let value = assessment.sheet.cell(assess_row, CAUSALITY_COLUMN);
                if !value.is_empty() {
                    values.push(value.to_string());
                }
            }
        }
    }
    values.join("\n")
}

#[cfg(test)]
mod tests {
    use super::*;

    fn sheet(headers: &[&str], rows: &[&[&str]]) -> Sheet {
        let mut s = Sheet {
            headers: headers.iter().map(|h| (*h).to_string()).collect(),
            rows: Vec::new(),
        };
        for row in rows {
            s.push_row(row.iter().map(|c| (*c).to_string()).collect());
        }
        s
    }

    fn batch() -> BTreeMap<TableKind, Sheet> {
        let mut tables = BTreeMap::new();
        tables.insert(
            TableKind::Group,
            sheet(
                &["KAERS_NO", "GROUP_ID", "GROUP_SEQ"],
                &[&["C1", "G1", "1"], &["C1", "G1", "1"], &["C2", "G2", "1"]],
            ),
        );
        tables.insert(
            TableKind::Demo,
            sheet(
                &["KAERS_NO", "PATIENT SEX", "PATIENT BIRTH YEAR"],
                &[&["C1", "female", "1980"], &["C2", "male", "1975"]],
            ),
        );
        tables.insert(
            TableKind::Event,
            sheet(
                &["KAERS_NO", "WHOART_TERM_ENG", "ADR_START_DATE"],
                &[
                    &["C1", "Nausea", "20240101"],
                    &["C1", "Headache", "20240102"],
                    &["C1", "", "20240103"],
                ],
            ),
        );
        tables.insert(
            TableKind::Drug,
            sheet(
                &["KAERS_NO", "DRUG_SEQ", "DRUG_GROUP", "DRUG_CODE"],
                &[
                    &["C1", "1", "Concomitant drug", "Other"],
                    &["C1", "2", "Suspected drug", "Aspirin"],
                ],
            ),
        );
        tables.insert(
            TableKind::Assessment,
            sheet(
                &["KAERS_NO", "DRUG_SEQ", "CAUSALITY_ASSESSMENT"],
                &[
                    &["C1", "2", "Probable"],
                    &["C1", "1", "Unlikely"],
                    &["C1", "2", "Possible"],
                ],
            ),
        );
        tables
    }

    #[test]
    fn one_record_per_case_in_group_order() {
        let records = assemble_narratives(&batch());
        assert_eq!(records.len(), 2);
        assert_eq!(records[0].case_key, "C1");
        assert_eq!(records[1].case_key, "C2");
        assert_eq!(records[0].group_id, "G1");
    }

    #[test]
    fn multi_valued_fields_join_with_newlines() {
        let records = assemble_narratives(&batch());
        assert_eq!(records[0].adverse_events, "Nausea\nHeadache");
        // Only assessments for the suspect drug's sequence, in file order
        assert_eq!(records[0].causality_assessments, "Probable\nPossible");
    }

    #[test]
    fn singular_fields_come_from_first_rows() {
        let records = assemble_narratives(&batch());
        assert_eq!(records[0].patient_sex, "female");
        assert_eq!(records[0].patient_birth_year, "1980");
        assert_eq!(records[0].suspect_drug, "Aspirin");
        assert_eq!(records[0].adr_start_date, "20240101");
    }

    #[test]
    fn absent_case_yields_empty_fields() {
        let records = assemble_narratives(&batch());
        let c2 = &records[1];
        assert_eq!(c2.patient_sex, "male");
        assert_eq!(c2.suspect_drug, "");
        assert_eq!(c2.adverse_events, "");
        assert_eq!(c2.causality_assessments, "");
        assert_eq!(c2.adr_start_date, "");
    }

    #[test]
    fn missing_group_table_yields_no_records() {
        let mut tables = batch();
        tables.remove(&TableKind::Group);
        assert!(assemble_narratives(&tables).is_empty());
    }
}
