//! Applies a kind's rule set to a parsed sheet.
//!
//! Stages run in a fixed order against an evolving header: deletes, then
//! renames, then coded-value translations, then derived-column inserts.
//! Every column reference after the rename stage uses the renamed name and
//! is resolved against the live header, so rule tables never hard-code
//! positions.

use std::sync::Arc;

use tracing::{debug, warn};

use kaers_codes::{CodeTable, CodeTableCache};
use kaers_model::{Sheet, TableKind};

use crate::error::Result;
use crate::rules::{Derive, HeaderOp, ValueSource, rules_for};

/// Transform one raw extract sheet into its submission form.
///
/// File-backed vocabularies are fetched through the cache once per rule
/// that needs them; a vocabulary that fails to load aborts the whole sheet.
/// Per-cell misses never fail, the raw code passes through instead.
pub fn transform_sheet(kind: TableKind, sheet: &Sheet, codes: &CodeTableCache) -> Result<Sheet> {
    let rules = rules_for(kind);
    let mut out = sheet.clone();
    if out.headers.is_empty() {
        return Ok(out);
    }

    for column in rules.deletes {
        delete_columns(&mut out, column);
    }

    // Input headers are not necessarily unique, so renames and translations
    // cover every occurrence of a name, never just the first.
    for (source, target) in rules.renames {
        for header in &mut out.headers {
            if header.as_str() == *source {
                *header = (*target).to_string();
            }
        }
    }

    for (column, source) in rules.translations {
        let indexes = matching_columns(&out, column);
        if indexes.is_empty() {
            debug!(kind = %kind, column, "translation column absent");
            continue;
        }
        match source {
            ValueSource::Static(map) => {
                for row in &mut out.rows {
                    for &idx in &indexes {
                        let cell = &row[idx];
                        if !cell.is_empty() {
                            row[idx] = map.resolve(cell).to_string();
                        }
                    }
                }
            }
            ValueSource::File(table) => {
                let table = codes.get(*table)?;
                for row in &mut out.rows {
                    for &idx in &indexes {
                        let cell = &row[idx];
                        if !cell.is_empty() {
                            row[idx] = table.resolve(cell);
                        }
                    }
                }
            }
        }
    }

    for op in rules.inserts {
        apply_insert(&mut out, kind, op, codes)?;
    }

    Ok(out)
}

fn delete_columns(sheet: &mut Sheet, name: &str) {
    while let Some(idx) = sheet.column(name) {
        sheet.headers.remove(idx);
        for row in &mut sheet.rows {
            row.remove(idx);
        }
    }
}

/// Every column index whose header matches the name, in layout order.
fn matching_columns(sheet: &Sheet, name: &str) -> Vec<usize> {
    sheet
        .headers
        .iter()
        .enumerate()
        .filter(|(_, header)| header.as_str() == name)
        .map(|(idx, _)| idx)
        .collect()
}

fn apply_insert(
    sheet: &mut Sheet,
    kind: TableKind,
    op: &HeaderOp,
    codes: &CodeTableCache,
) -> Result<()> {
    let (anchor, column, derive, offset) = match op {
        HeaderOp::InsertAfter { anchor, column, derive } => (anchor, column, derive, 1),
        HeaderOp::InsertBefore { anchor, column, derive } => (anchor, column, derive, 0),
    };
    let Some(anchor_idx) = sheet.column(anchor) else {
        warn!(kind = %kind, anchor, column, "anchor column absent, derived column skipped");
        return Ok(());
    };

    // Derived values are computed against the pre-insert layout.
    let values = match derive {
        Derive::WhoartEnglish { record_col, seq_col } => {
            derive_whoart_english(sheet, record_col, seq_col, codes)?
        }
        Derive::AnyNonEmpty { columns } => derive_any_non_empty(sheet, columns),
    };

    let insert_at = anchor_idx + offset;
    sheet.headers.insert(insert_at, (*column).to_string());
    for (row, value) in sheet.rows.iter_mut().zip(values) {
        row.insert(insert_at, value);
    }
    Ok(())
}

fn derive_whoart_english(
    sheet: &Sheet,
    record_col: &str,
    seq_col: &str,
    codes: &CodeTableCache,
) -> Result<Vec<String>> {
    let table: Arc<CodeTable> = codes.get(kaers_codes::FileTable::Whoart)?;
    let record_idx = sheet.column(record_col);
    let seq_idx = sheet.column(seq_col);
    let mut values = Vec::with_capacity(sheet.rows.len());
    for row in &sheet.rows {
        let record = record_idx.map(|i| row[i].as_str()).unwrap_or("");
        let seq = seq_idx.map(|i| row[i].as_str()).unwrap_or("");
        if record.is_empty() || seq.is_empty() {
            values.push(String::new());
        } else {
            values.push(
                table
                    .get_parts(&[record, seq])
                    .map(str::to_string)
                    .unwrap_or_default(),
            );
        }
    }
    Ok(values)
}

fn derive_any_non_empty(sheet: &Sheet, columns: &[&str]) -> Vec<String> {
    let indexes: Vec<usize> = columns.iter().filter_map(|c| sheet.column(c)).collect();
    sheet
        .rows
        .iter()
        .map(|row| {
            let any = indexes.iter().any(|&i| !row[i].is_empty());
            if any { "Y" } else { "N" }.to_string()
        })
        .collect()
}
