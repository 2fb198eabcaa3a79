//! Conversion pipeline with explicit stages.
//!
//! The pipeline follows these stages in order:
//! 1. **Ingest**: Discover and read pipe-delimited extract files
//! 2. **Transform**: Rename headers, translate codes, derive columns
//! 3. **Dedupe**: Compute and apply the cross-version drop set
//! 4. **Narrative**: Assemble one summary record per surviving case
//!
//! Each stage takes the output of the previous stage and returns typed
//! results. A file that cannot be read is logged and skipped; a reference
//! vocabulary that cannot be loaded aborts the run.

use std::collections::{BTreeMap, BTreeSet};
use std::path::Path;
use std::sync::Arc;
use std::time::Instant;

use anyhow::{Context, Result};
use tracing::{debug, info, info_span};

use kaers_codes::CodeTableCache;
use kaers_ingest::{discover_extract_files, read_extract_file};
use kaers_model::{NarrativeRecord, Sheet, TableKind};
use kaers_transform::transform_sheet;

use crate::dedupe::{apply_drop_set, compute_drop_set};
use crate::narrative::assemble_narratives;

/// Result of the ingest stage.
#[derive(Debug, Default)]
pub struct IngestResult {
    /// Parsed sheets keyed by recognized kind.
    pub sheets: BTreeMap<TableKind, Sheet>,
    /// Errors from files that were skipped.
    pub errors: Vec<String>,
}

/// Discover and read the extract files of one batch.
pub fn ingest(input_dir: &Path) -> Result<IngestResult> {
    let span = info_span!("ingest", input_dir = %input_dir.display());
    let _guard = span.enter();
    let start = Instant::now();

    let discovered = discover_extract_files(input_dir).context("discover extract files")?;
    let mut result = IngestResult::default();
    for file in &discovered {
        match read_extract_file(file) {
            Ok(sheet) => {
                debug!(
                    kind = %file.kind,
                    path = %file.path.display(),
                    rows = sheet.rows.len(),
                    "file read"
                );
                result.sheets.insert(file.kind, sheet);
            }
            Err(error) => {
                result
                    .errors
                    .push(format!("{}: {error}", file.path.display()));
            }
        }
    }
    info!(
        file_count = result.sheets.len(),
        skipped = result.errors.len(),
        duration_ms = start.elapsed().as_millis(),
        "ingest complete"
    );
    Ok(result)
}

/// Transform every ingested sheet into its submission form.
pub fn transform_all(
    sheets: &BTreeMap<TableKind, Sheet>,
    codes: &CodeTableCache,
) -> Result<BTreeMap<TableKind, Sheet>> {
    let span = info_span!("transform");
    let _guard = span.enter();
    let start = Instant::now();

    let mut transformed = BTreeMap::new();
    for (kind, sheet) in sheets {
        let out = transform_sheet(*kind, sheet, codes)
            .with_context(|| format!("transform {kind}"))?;
        debug!(kind = %kind, rows = out.rows.len(), "sheet transformed");
        transformed.insert(*kind, out);
    }
    info!(
        sheet_count = transformed.len(),
        duration_ms = start.elapsed().as_millis(),
        "transform complete"
    );
    Ok(transformed)
}

/// Result of the dedupe stage.
#[derive(Debug, Default)]
pub struct DedupeResult {
    /// Case keys removed from every table.
    pub dropped: BTreeSet<String>,
}

/// Compute the drop set from GROUP and DEMO and apply it to every table.
pub fn dedupe(tables: &mut BTreeMap<TableKind, Sheet>) -> DedupeResult {
    let span = info_span!("dedupe");
    let _guard = span.enter();
    let start = Instant::now();

    let dropped = match (tables.get(&TableKind::Group), tables.get(&TableKind::Demo)) {
        (Some(group), Some(demo)) => compute_drop_set(group, demo),
        _ => BTreeSet::new(),
    };
    for sheet in tables.values_mut() {
        apply_drop_set(sheet, &dropped);
    }
    info!(
        dropped_cases = dropped.len(),
        duration_ms = start.elapsed().as_millis(),
        "dedupe complete"
    );
    DedupeResult { dropped }
}

/// Input for a full conversion run.
pub struct ConversionInput<'a> {
    pub input_dir: &'a Path,
    pub codes: Arc<CodeTableCache>,
    /// Skip narrative assembly entirely.
    pub narrative: bool,
}

/// Result of a full conversion run.
#[derive(Debug, Default)]
pub struct ConversionOutcome {
    /// Row counts per kind before transformation.
    pub input_counts: BTreeMap<TableKind, usize>,
    /// Final transformed and deduplicated tables.
    pub tables: BTreeMap<TableKind, Sheet>,
    /// Case keys removed by deduplication.
    pub dropped: BTreeSet<String>,
    /// Narrative records, empty when narrative assembly is disabled.
    pub narratives: Vec<NarrativeRecord>,
    /// Non-fatal errors accumulated along the way.
    pub errors: Vec<String>,
}

/// Run ingest, transform, dedupe and narrative assembly for one batch.
pub fn run_conversion(input: ConversionInput<'_>) -> Result<ConversionOutcome> {
    let run_start = Instant::now();
    let ingested = ingest(input.input_dir)?;
    let input_counts = ingested
        .sheets
        .iter()
        .map(|(kind, sheet)| (*kind, sheet.rows.len()))
        .collect();

    let mut tables = transform_all(&ingested.sheets, &input.codes)?;
    let deduped = dedupe(&mut tables);

    let narratives = if input.narrative {
        let span = info_span!("narrative");
        let _guard = span.enter();
        let start = Instant::now();
        let records = assemble_narratives(&tables);
        info!(
            record_count = records.len(),
            duration_ms = start.elapsed().as_millis(),
            "narrative complete"
        );
        records
    } else {
        Vec::new()
    };

    info!(
        table_count = tables.len(),
        dropped_cases = deduped.dropped.len(),
        narrative_count = narratives.len(),
        duration_ms = run_start.elapsed().as_millis(),
        "conversion complete"
    );
    Ok(ConversionOutcome {
        input_counts,
        tables,
        dropped: deduped.dropped,
        narratives,
        errors: ingested.errors,
    })
}
