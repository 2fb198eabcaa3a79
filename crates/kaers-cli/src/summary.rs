use comfy_table::modifiers::UTF8_ROUND_CORNERS;
use comfy_table::presets::UTF8_FULL_CONDENSED;
use comfy_table::{Attribute, Cell, CellAlignment, Color, ContentArrangement, Table};

use crate::types::ConvertResult;

pub fn print_summary(result: &ConvertResult) {
    if let Some(path) = &result.output {
        println!("Submission workbook: {}", path.display());
    }
    if let Some(path) = &result.narrative_output {
        println!("Narrative workbook: {}", path.display());
    }

    let mut table = Table::new();
    table.set_header(vec![
        header_cell("Table"),
        header_cell("Rows in"),
        header_cell("Rows out"),
    ]);
    apply_table_style(&mut table);
    align_column(&mut table, 1, CellAlignment::Right);
    align_column(&mut table, 2, CellAlignment::Right);

    let mut total_in = 0usize;
    let mut total_out = 0usize;
    for summary in &result.tables {
        total_in += summary.rows_in;
        total_out += summary.rows_out;
        table.add_row(vec![
            Cell::new(summary.kind.as_str()).fg(Color::Green),
            Cell::new(summary.rows_in),
            Cell::new(summary.rows_out),
        ]);
    }
    table.add_row(vec![
        Cell::new("TOTAL")
            .fg(Color::Cyan)
            .add_attribute(Attribute::Bold),
        Cell::new(total_in).add_attribute(Attribute::Bold),
        Cell::new(total_out).add_attribute(Attribute::Bold),
    ]);
    println!("{table}");

    println!("Dropped cases: {}", result.dropped_cases);
    if result.narrative_output.is_some() {
        println!("Narrative records: {}", result.narrative_count);
    }
    if !result.errors.is_empty() {
        eprintln!("Errors:");
        for error in &result.errors {
            eprintln!("- {error}");
        }
    }
}

pub fn apply_table_style(table: &mut Table) {
    table
        .load_preset(UTF8_FULL_CONDENSED)
        .apply_modifier(UTF8_ROUND_CORNERS)
        .set_content_arrangement(ContentArrangement::Dynamic);
}

fn header_cell(text: &str) -> Cell {
    Cell::new(text).add_attribute(Attribute::Bold)
}

fn align_column(table: &mut Table, index: usize, alignment: CellAlignment) {
    if let Some(column) = table.column_mut(index) {
        column.set_cell_alignment(alignment);
    }
}
