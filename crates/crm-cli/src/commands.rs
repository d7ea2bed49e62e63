use std::time::Instant;

use anyhow::{Context, Result};
use comfy_table::Table;
use tracing::{info, info_span};

use crm_core::{ImportOptions, MemoryStore, run_import};
use crm_ingest::read_csv_table;
use crm_map::FieldMapper;
use crm_model::{FieldCatalog, FieldKind, ImportTarget};
use crm_validate::validate_import;

use crate::cli::ImportArgs;
use crate::summary::apply_table_style;
use crate::types::ImportRunResult;

pub fn run_targets() -> Result<()> {
    let mut table = Table::new();
    table.set_header(vec!["Target", "Field", "Kind", "Required", "Aliases"]);
    apply_table_style(&mut table);
    for target in ImportTarget::all() {
        let catalog = FieldCatalog::for_target(*target);
        for field in &catalog.fields {
            table.add_row(vec![
                target.to_string(),
                field.name.clone(),
                kind_name(field.kind).to_string(),
                if field.required { "yes" } else { "" }.to_string(),
                field.aliases.join(", "),
            ]);
        }
    }
    println!("{table}");
    Ok(())
}

fn kind_name(kind: FieldKind) -> &'static str {
    match kind {
        FieldKind::Text => "text",
        FieldKind::Email => "email",
        FieldKind::Phone => "phone",
    }
}

pub fn run_import_command(args: &ImportArgs) -> Result<ImportRunResult> {
    let target: ImportTarget = args.target.into();
    let span = info_span!("import", file = %args.file.display(), import_target = %target);
    let _guard = span.enter();

    // Stage 1: ingest
    let ingest_start = Instant::now();
    let table = read_csv_table(&args.file)?;
    info!(
        columns = table.headers.len(),
        rows = table.rows.len(),
        duration_ms = ingest_start.elapsed().as_millis() as u64,
        "ingest complete"
    );

    // Stage 2: propose the column-to-field mapping
    let catalog = FieldCatalog::for_target(target);
    let mapper = FieldMapper::new(catalog.clone()).with_min_confidence(args.min_confidence);
    let mapping = mapper.map(&table.headers);
    info!(
        mapped = mapping.mapped().count(),
        unmapped = mapping.unmapped_columns().len(),
        "mapping proposed"
    );

    // Stage 3: pre-flight validation
    let report = validate_import(&catalog, &mapping.mappings, &table);
    let blocked = report.has_blocking();
    if blocked {
        info!(
            catalog_errors = report.catalog_error_count(),
            "import blocked by unmapped required fields"
        );
    }

    if args.dry_run || blocked {
        return Ok(ImportRunResult {
            file: args.file.clone(),
            target,
            mapping,
            report,
            summary: None,
            store_path: None,
            blocked,
        });
    }

    // Stage 4: batched import into the record store
    let mut store = MemoryStore::load(&args.store)?;
    let options = ImportOptions {
        batch_size: args.batch_size,
        on_duplicate: args.on_duplicate.into(),
    };
    let summary = run_import(&mut store, &catalog, &table, &mapping.mappings, &options)?;
    store.save(&args.store).context("persist store")?;

    Ok(ImportRunResult {
        file: args.file.clone(),
        target,
        mapping,
        report,
        summary: Some(summary),
        store_path: Some(args.store.clone()),
        blocked: false,
    })
}
