//! Denormalized per-case narrative record.

use serde::{Deserialize, Serialize};

/// Sheet name of the narrative workbook's single sheet.
pub const NARRATIVE_SHEET_NAME: &str = "Narrative";

/// Fixed header row of the narrative sheet.
pub const NARRATIVE_HEADER: [&str; 8] = [
    "KAERS_NO",
    "GROUP_ID",
    "SUSPECT_DRUG",
    "PATIENT_SEX",
    "PATIENT_BIRTH_YEAR",
    "ADVERSE_EVENT",
    "CAUSALITY_ASSESSMENT",
    "ADR_START_DATE",
];

/// One narrative row: group, suspect drug, demographics, events and
/// causality assessments joined for a single surviving case.
///
/// Multi-valued fields are newline-joined in source row order. Constructed
/// once per run from the transformed tables and never mutated afterwards.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct NarrativeRecord {
    pub case_key: String,
    pub group_id: String,
    pub suspect_drug: String,
    pub patient_sex: String,
    pub patient_birth_year: String,
    pub adverse_events: String,
    pub causality_assessments: String,
    pub adr_start_date: String,
}

impl NarrativeRecord {
    /// The record as one output row, column order matching [`NARRATIVE_HEADER`].
    pub fn to_row(&self) -> Vec<String> {
        vec![
            self.case_key.clone(),
            self.group_id.clone(),
            self.suspect_drug.clone(),
            self.patient_sex.clone(),
            self.patient_birth_year.clone(),
            self.adverse_events.clone(),
            self.causality_assessments.clone(),
            self.adr_start_date.clone(),
        ]
    }
}
