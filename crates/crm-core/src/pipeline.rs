//! Staged import pipeline: validate, transform rows, write in batches.

use std::time::Instant;

use anyhow::{Result, bail};
use chrono::{DateTime, Utc};
use tracing::{debug, info};

use crm_ingest::CsvTable;
use crm_model::{FieldCatalog, FieldMapping, ImportTarget, Record};
use crm_validate::validate_import;

use crate::dedupe::{DuplicateStrategy, find_duplicate};
use crate::store::RecordStore;

pub const DEFAULT_BATCH_SIZE: usize = 50;

#[derive(Debug, Clone, Copy)]
pub struct ImportOptions {
    /// Rows written per batch; batches are processed sequentially.
    pub batch_size: usize,
    pub on_duplicate: DuplicateStrategy,
}

impl Default for ImportOptions {
    fn default() -> Self {
        Self {
            batch_size: DEFAULT_BATCH_SIZE,
            on_duplicate: DuplicateStrategy::Skip,
        }
    }
}

/// Outcome of one import run.
#[derive(Debug, Clone)]
pub struct ImportSummary {
    pub target: ImportTarget,
    pub total_rows: usize,
    pub batches: usize,
    pub inserted: usize,
    pub updated: usize,
    pub skipped: usize,
    /// Advisory row-validation findings from the pre-flight report.
    pub row_issues: usize,
    /// Per-row store failures; the run continues past them.
    pub errors: Vec<String>,
    pub started_at: DateTime<Utc>,
    pub finished_at: DateTime<Utc>,
}

impl ImportSummary {
    pub fn has_errors(&self) -> bool {
        !self.errors.is_empty()
    }
}

enum RowOutcome {
    Inserted,
    Updated,
    Skipped,
}

/// Transform one data row into a record using the confirmed mapping.
///
/// Unmapped columns and empty cells are dropped. When two columns map to
/// the same field, the later column wins.
pub fn build_record(table: &CsvTable, row_idx: usize, mappings: &[FieldMapping]) -> Record {
    let mut record = Record::new();
    for mapping in mappings {
        let Some(target) = mapping.target_field.as_deref() else {
            continue;
        };
        let Some(value) = table.row_value(row_idx, &mapping.source_column) else {
            continue;
        };
        let value = value.trim();
        if value.is_empty() {
            continue;
        }
        record.insert(target.to_string(), value.to_string());
    }
    record
}

/// Run a full import of `table` into `store` using the confirmed mapping.
///
/// Refuses to start while required fields are unmapped. Row-validation
/// findings are advisory: they are counted on the summary and the rows
/// are imported anyway. Store failures for individual rows are collected
/// into `errors` without aborting the run.
pub fn run_import(
    store: &mut dyn RecordStore,
    catalog: &FieldCatalog,
    table: &CsvTable,
    mappings: &[FieldMapping],
    options: &ImportOptions,
) -> Result<ImportSummary> {
    let started_at = Utc::now();
    let report = validate_import(catalog, mappings, table);
    if report.has_blocking() {
        let missing: Vec<&str> = report
            .catalog_issues()
            .map(|issue| issue.field.as_str())
            .collect();
        bail!(
            "cannot start import: required fields unmapped: {}",
            missing.join(", ")
        );
    }

    let table_name = catalog.target.as_str();
    let batch_size = options.batch_size.max(1);
    let mut summary = ImportSummary {
        target: catalog.target,
        total_rows: table.rows.len(),
        batches: 0,
        inserted: 0,
        updated: 0,
        skipped: 0,
        row_issues: report.row_error_count(),
        errors: Vec::new(),
        started_at,
        finished_at: started_at,
    };

    let mut processed = 0usize;
    for batch in table.rows.chunks(batch_size) {
        let batch_start = Instant::now();
        for offset in 0..batch.len() {
            let row_idx = processed + offset;
            let record = build_record(table, row_idx, mappings);
            if record.is_empty() {
                summary.skipped += 1;
                continue;
            }
            match import_row(store, table_name, record, options.on_duplicate) {
                Ok(RowOutcome::Inserted) => summary.inserted += 1,
                Ok(RowOutcome::Updated) => summary.updated += 1,
                Ok(RowOutcome::Skipped) => summary.skipped += 1,
                Err(error) => summary.errors.push(format!("row {}: {error:#}", row_idx + 1)),
            }
        }
        processed += batch.len();
        summary.batches += 1;
        debug!(
            batch = summary.batches,
            rows = batch.len(),
            duration_ms = batch_start.elapsed().as_millis() as u64,
            "batch complete"
        );
    }

    summary.finished_at = Utc::now();
    info!(
        target_table = table_name,
        total_rows = summary.total_rows,
        inserted = summary.inserted,
        updated = summary.updated,
        skipped = summary.skipped,
        errors = summary.errors.len(),
        "import complete"
    );
    Ok(summary)
}

/// Check-by-email, then skip-or-update, as one per-row decision.
fn import_row(
    store: &mut dyn RecordStore,
    table_name: &str,
    record: Record,
    on_duplicate: DuplicateStrategy,
) -> Result<RowOutcome> {
    match find_duplicate(store, table_name, &record)? {
        Some(existing_id) => match on_duplicate {
            DuplicateStrategy::Skip => Ok(RowOutcome::Skipped),
            DuplicateStrategy::Update => {
                store.update(table_name, &existing_id, record)?;
                Ok(RowOutcome::Updated)
            }
        },
        None => {
            store.insert(table_name, record)?;
            Ok(RowOutcome::Inserted)
        }
    }
}
