//! Case deduplication across report versions.
//!
//! A KAERS case can be re-submitted under the same group id with an
//! incremented sequence number; nullification reports mark a case for
//! withdrawal. The drop set computed here names every case key that must
//! not appear in the submission, and is applied uniformly to each table
//! carrying a case-key column.

use std::collections::{BTreeMap, BTreeSet};

use tracing::{debug, warn};

use kaers_codes::StaticMap;
use kaers_model::{CASE_KEY_COLUMN, Sheet};

const GROUP_ID_COLUMN: &str = "GROUP_ID";
const GROUP_SEQ_COLUMN: &str = "GROUP_SEQ";
const NULLIFICATION_COLUMN: &str = "NULLIFICATION_AMENDMENT";

/// Compute the set of case keys to drop from every table.
///
/// `group` and `demo` are the transformed GROUP and DEMO sheets. A case is
/// nullified when its DEMO nullification field reads "Delete" (translated)
/// or the raw code "1". Per group id, only the members at the highest
/// sequence survive, except that a nullification at the top of a chain
/// that still starts at sequence 1 withdraws the whole group.
pub fn compute_drop_set(group: &Sheet, demo: &Sheet) -> BTreeSet<String> {
    let nullified = nullified_cases(demo);

    // Members per group id, file order preserved within each group.
    let mut groups: BTreeMap<String, Vec<(String, u64)>> = BTreeMap::new();
    for row in 0..group.rows.len() {
        let case = group.cell(row, CASE_KEY_COLUMN).trim();
        let group_id = group.cell(row, GROUP_ID_COLUMN).trim();
        if case.is_empty() || group_id.is_empty() {
            continue;
        }
        let seq = parse_seq(group.cell(row, GROUP_SEQ_COLUMN), case);
        groups
            .entry(group_id.to_string())
            .or_default()
            .push((case.to_string(), seq));
    }

    let mut drop = BTreeSet::new();
    for (group_id, members) in &groups {
        let max_seq = members.iter().map(|(_, seq)| *seq).max().unwrap_or(0);
        let has_seq1 = members.iter().any(|(_, seq)| *seq == 1);
        let null_max_seq = members
            .iter()
            .filter(|(case, _)| nullified.contains(case))
            .map(|(_, seq)| *seq)
            .max();

        let drop_all = matches!(null_max_seq, Some(null_max) if null_max >= max_seq && has_seq1);
        if drop_all {
            debug!(group_id, "group withdrawn by nullification");
        }

        for (case, seq) in members {
            if drop_all || *seq < max_seq {
                drop.insert(case.clone());
            }
        }
    }
    drop
}

/// Remove the rows of dropped cases. Sheets without a case-key column pass
/// through untouched.
pub fn apply_drop_set(sheet: &mut Sheet, drop: &BTreeSet<String>) {
    if drop.is_empty() {
        return;
    }
    let Some(idx) = sheet.column(CASE_KEY_COLUMN) else {
        return;
    };
    sheet.rows.retain(|row| {
        row.get(idx)
            .map(|case| !drop.contains(case.trim()))
            .unwrap_or(true)
    });
}

fn nullified_cases(demo: &Sheet) -> BTreeSet<String> {
    let mut nullified = BTreeSet::new();
    for row in 0..demo.rows.len() {
        let marker = demo.cell(row, NULLIFICATION_COLUMN).trim();
        // Both the translated label and the raw code mark nullification
        if marker == StaticMap::nullification_delete_label() || marker == "1" {
            let case = demo.cell(row, CASE_KEY_COLUMN).trim();
            if !case.is_empty() {
                nullified.insert(case.to_string());
            }
        }
    }
    nullified
}

fn parse_seq(raw: &str, case: &str) -> u64 {
    let trimmed = raw.trim();
    match trimmed.parse::<u64>() {
        Ok(seq) => seq,
        Err(_) => {
            warn!(case, seq = trimmed, "unparseable group sequence, treating as 0");
            0
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn group_sheet(rows: &[(&str, &str, &str)]) -> Sheet {
        let mut sheet = Sheet {
            headers: vec![
                CASE_KEY_COLUMN.to_string(),
                GROUP_ID_COLUMN.to_string(),
                GROUP_SEQ_COLUMN.to_string(),
            ],
            rows: Vec::new(),
        };
        for (case, group, seq) in rows {
            sheet.push_row(vec![case.to_string(), group.to_string(), seq.to_string()]);
        }
        sheet
    }

    fn demo_sheet(rows: &[(&str, &str)]) -> Sheet {
        let mut sheet = Sheet {
            headers: vec![CASE_KEY_COLUMN.to_string(), NULLIFICATION_COLUMN.to_string()],
            rows: Vec::new(),
        };
        for (case, marker) in rows {
            sheet.push_row(vec![case.to_string(), marker.to_string()]);
        }
        sheet
    }

    #[test]
    fn keeps_only_highest_sequence_without_nullification() {
        let group = group_sheet(&[("C1", "G1", "1"), ("C2", "G1", "2"), ("C3", "G1", "3")]);
        let demo = demo_sheet(&[("C1", ""), ("C2", ""), ("C3", "")]);
        let drop = compute_drop_set(&group, &demo);
        assert_eq!(drop, BTreeSet::from(["C1".to_string(), "C2".to_string()]));
    }

    #[test]
    fn nullification_below_top_still_keeps_latest() {
        let group = group_sheet(&[("C1", "G1", "1"), ("C2", "G1", "2")]);
        let demo = demo_sheet(&[("C1", "Delete"), ("C2", "")]);
        let drop = compute_drop_set(&group, &demo);
        assert_eq!(drop, BTreeSet::from(["C1".to_string()]));
    }

    #[test]
    fn nullification_at_top_withdraws_whole_group() {
        let group = group_sheet(&[("C1", "G1", "1"), ("C2", "G1", "2")]);
        let demo = demo_sheet(&[("C1", ""), ("C2", "Delete")]);
        let drop = compute_drop_set(&group, &demo);
        assert_eq!(drop, BTreeSet::from(["C1".to_string(), "C2".to_string()]));
    }

    #[test]
    fn nullified_top_without_seq_one_keeps_latest() {
        let group = group_sheet(&[("C2", "G1", "2"), ("C3", "G1", "3")]);
        let demo = demo_sheet(&[("C2", ""), ("C3", "Delete")]);
        let drop = compute_drop_set(&group, &demo);
        assert_eq!(drop, BTreeSet::from(["C2".to_string()]));
    }

    #[test]
    fn raw_nullification_code_is_honored() {
        let group = group_sheet(&[("C1", "G1", "1"), ("C2", "G1", "2")]);
        let demo = demo_sheet(&[("C1", ""), ("C2", "1")]);
        let drop = compute_drop_set(&group, &demo);
        assert_eq!(drop.len(), 2);
    }

    #[test]
    fn unparseable_sequence_counts_as_zero() {
        let group = group_sheet(&[("C1", "G1", "x"), ("C2", "G1", "2")]);
        let demo = demo_sheet(&[]);
        let drop = compute_drop_set(&group, &demo);
        assert_eq!(drop, BTreeSet::from(["C1".to_string()]));
    }

    #[test]
    fn groups_are_independent() {
        let group = group_sheet(&[("C1", "G1", "1"), ("C2", "G2", "1")]);
        let demo = demo_sheet(&[]);
        assert!(compute_drop_set(&group, &demo).is_empty());
    }

    #[test]
    fn drop_set_filters_rows_by_case_key() {
        let mut sheet = group_sheet(&[("C1", "G1", "1"), ("C2", "G1", "2")]);
        let drop = BTreeSet::from(["C1".to_string()]);
        apply_drop_set(&mut sheet, &drop);
        assert_eq!(sheet.rows.len(), 1);
        assert_eq!(sheet.rows[0][0], "C2");

        let mut keyless = Sheet {
            headers: vec!["OTHER".to_string()],
            rows: vec![vec!["C1".to_string()]],
        };
        apply_drop_set(&mut keyless, &drop);
        assert_eq!(keyless.rows.len(), 1);
    }
}
