use std::sync::Arc;

use anyhow::{Context, Result};
use comfy_table::Table;
use tracing::{info, info_span};

use kaers_codes::CodeTableCache;
use kaers_core::{ConversionInput, run_conversion};
use kaers_model::TableKind;
use kaers_output::{XlsxSink, write_narrative_workbook, write_submission_workbook};

use crate::cli::ConvertArgs;
use crate::summary::apply_table_style;
use crate::types::{ConvertResult, TableSummary};

pub fn run_tables() -> Result<()> {
    let mut table = Table::new();
    table.set_header(vec!["Table", "File name"]);
    apply_table_style(&mut table);
    for kind in TableKind::ALL {
        table.add_row(vec![kind.as_str().to_string(), format!("{kind}.txt")]);
    }
    println!("{table}");
    Ok(())
}

pub fn run_convert(args: &ConvertArgs) -> Result<ConvertResult> {
    let span = info_span!("convert", input_dir = %args.input_dir.display());
    let _guard = span.enter();

    let codes_dir = args
        .codes_dir
        .clone()
        .unwrap_or_else(|| args.input_dir.join("codes"));
    let output_path = args
        .output
        .clone()
        .unwrap_or_else(|| args.input_dir.join("submission.xlsx"));
    let narrative_path = args
        .narrative_output
        .clone()
        .unwrap_or_else(|| args.input_dir.join("narrative.xlsx"));

    let codes = Arc::new(CodeTableCache::new(codes_dir));
    let outcome = run_conversion(ConversionInput {
        input_dir: &args.input_dir,
        codes,
        narrative: !args.no_narrative,
    })
    .context("conversion")?;

    let tables = outcome
        .tables
        .iter()
        .map(|(kind, sheet)| TableSummary {
            kind: *kind,
            rows_in: outcome.input_counts.get(kind).copied().unwrap_or(0),
            rows_out: sheet.rows.len(),
        })
        .collect();

    let output_span = info_span!("output");
    let _output_guard = output_span.enter();
    let (output, narrative_output) = if args.dry_run {
        info!("workbooks skipped (dry run)");
        (None, None)
    } else {
        let mut sink = XlsxSink::new();
        write_submission_workbook(&mut sink, &output_path, &outcome.tables)
            .context("write submission workbook")?;
        let narrative_output = if args.no_narrative {
            None
        } else {
            let mut sink = XlsxSink::new();
            write_narrative_workbook(&mut sink, &narrative_path, &outcome.narratives)
                .context("write narrative workbook")?;
            Some(narrative_path)
        };
        (Some(output_path), narrative_output)
    };

    Ok(ConvertResult {
        tables,
        dropped_cases: outcome.dropped.len(),
        narrative_count: outcome.narratives.len(),
        output,
        narrative_output,
        errors: outcome.errors,
    })
}
