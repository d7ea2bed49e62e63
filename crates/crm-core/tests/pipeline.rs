//! Integration tests for the import pipeline.

use anyhow::{Result, bail};

use crm_core::{
    DuplicateStrategy, ImportOptions, MemoryStore, RecordStore, build_record, run_import,
};
use crm_ingest::CsvTable;
use crm_map::FieldMapper;
use crm_model::{FieldCatalog, FieldMapping, ImportTarget, Record, StoredRecord};

fn contacts_table(rows: &[&[&str]]) -> CsvTable {
    CsvTable {
        headers: vec![
            "First Name".to_string(),
            "E-mail".to_string(),
            "City".to_string(),
        ],
        rows: rows
            .iter()
            .map(|row| row.iter().map(|cell| (*cell).to_string()).collect())
            .collect(),
    }
}

fn contacts_mappings(table: &CsvTable) -> Vec<FieldMapping> {
    let mapper = FieldMapper::new(FieldCatalog::for_target(ImportTarget::Contacts));
    mapper.map(&table.headers).mappings
}

#[test]
fn imports_rows_in_batches() {
    let table = contacts_table(&[
        &["Ada", "ada@example.com", "London"],
        &["Grace", "grace@example.com", ""],
        &["Edsger", "edsger@example.com", "Nuenen"],
    ]);
    let mappings = contacts_mappings(&table);
    let catalog = FieldCatalog::for_target(ImportTarget::Contacts);
    let mut store = MemoryStore::new();
    let options = ImportOptions {
        batch_size: 2,
        ..ImportOptions::default()
    };

    let summary = run_import(&mut store, &catalog, &table, &mappings, &options).expect("import");

    assert_eq!(summary.total_rows, 3);
    assert_eq!(summary.batches, 2);
    assert_eq!(summary.inserted, 3);
    assert_eq!(summary.updated, 0);
    assert_eq!(summary.skipped, 0);
    assert!(!summary.has_errors());
    assert_eq!(store.record_count("contacts"), 3);

    let ada = store
        .find_by_field("contacts", "email", "ada@example.com")
        .unwrap()
        .expect("ada stored");
    assert_eq!(ada.field("first_name"), Some("Ada"));
    assert_eq!(ada.field("city"), Some("London"));
}

#[test]
fn duplicate_rows_are_skipped_by_default() {
    let table = contacts_table(&[
        &["Ada", "ada@example.com", "London"],
        &["Ada again", "ADA@example.com", "Paris"],
    ]);
    let mappings = contacts_mappings(&table);
    let catalog = FieldCatalog::for_target(ImportTarget::Contacts);
    let mut store = MemoryStore::new();

    let summary = run_import(
        &mut store,
        &catalog,
        &table,
        &mappings,
        &ImportOptions::default(),
    )
    .expect("import");

    assert_eq!(summary.inserted, 1);
    assert_eq!(summary.skipped, 1);
    let ada = store
        .find_by_field("contacts", "email", "ada@example.com")
        .unwrap()
        .expect("ada stored");
    assert_eq!(ada.field("city"), Some("London"));
}

#[test]
fn duplicate_rows_update_when_requested() {
    let table = contacts_table(&[
        &["Ada", "ada@example.com", "London"],
        &["Ada", "ada@example.com", "Paris"],
    ]);
    let mappings = contacts_mappings(&table);
    let catalog = FieldCatalog::for_target(ImportTarget::Contacts);
    let mut store = MemoryStore::new();
    let options = ImportOptions {
        on_duplicate: DuplicateStrategy::Update,
        ..ImportOptions::default()
    };

    let summary = run_import(&mut store, &catalog, &table, &mappings, &options).expect("import");

    assert_eq!(summary.inserted, 1);
    assert_eq!(summary.updated, 1);
    assert_eq!(store.record_count("contacts"), 1);
    let ada = store
        .find_by_field("contacts", "email", "ada@example.com")
        .unwrap()
        .expect("ada stored");
    assert_eq!(ada.field("city"), Some("Paris"));
}

#[test]
fn unmapped_required_fields_block_the_run() {
    let table = CsvTable {
        headers: vec!["Notes".to_string()],
        rows: vec![vec!["hello".to_string()]],
    };
    let mappings = contacts_mappings(&table);
    let catalog = FieldCatalog::for_target(ImportTarget::Contacts);
    let mut store = MemoryStore::new();

    let error = run_import(
        &mut store,
        &catalog,
        &table,
        &mappings,
        &ImportOptions::default(),
    )
    .expect_err("blocked");

    assert!(error.to_string().contains("required fields unmapped"));
    assert_eq!(store.record_count("contacts"), 0);
}

#[test]
fn blank_rows_are_skipped() {
    let table = contacts_table(&[
        &["", "", ""],
        &["Ada", "ada@example.com", "London"],
    ]);
    let mappings = contacts_mappings(&table);
    let catalog = FieldCatalog::for_target(ImportTarget::Contacts);
    let mut store = MemoryStore::new();

    let summary = run_import(
        &mut store,
        &catalog,
        &table,
        &mappings,
        &ImportOptions::default(),
    )
    .expect("import");

    assert_eq!(summary.inserted, 1);
    assert_eq!(summary.skipped, 1);
}

#[test]
fn build_record_drops_unmapped_and_empty_cells() {
    let table = contacts_table(&[&["Ada", "", "  "]]);
    let mut mappings = contacts_mappings(&table);
    // Simulate a user skipping the city column in review.
    for mapping in &mut mappings {
        if mapping.source_column == "City" {
            mapping.skip();
        }
    }

    let record = build_record(&table, 0, &mappings);
    assert_eq!(record.get("first_name").map(String::as_str), Some("Ada"));
    assert!(!record.contains_key("email"));
    assert!(!record.contains_key("city"));
}

/// Store that fails every insert, for error-accounting tests.
struct FailingStore;

impl RecordStore for FailingStore {
    fn insert(&mut self, _table: &str, _record: Record) -> Result<String> {
        bail!("store unavailable");
    }

    fn update(&mut self, _table: &str, _id: &str, _record: Record) -> Result<()> {
        bail!("store unavailable");
    }

    fn find_by_field(
        &self,
        _table: &str,
        _field: &str,
        _value: &str,
    ) -> Result<Option<StoredRecord>> {
        Ok(None)
    }
}

#[test]
fn store_failures_are_counted_without_aborting() {
    let table = contacts_table(&[
        &["Ada", "ada@example.com", ""],
        &["Grace", "grace@example.com", ""],
    ]);
    let mappings = contacts_mappings(&table);
    let catalog = FieldCatalog::for_target(ImportTarget::Contacts);
    let mut store = FailingStore;

    let summary = run_import(
        &mut store,
        &catalog,
        &table,
        &mappings,
        &ImportOptions::default(),
    )
    .expect("run completes");

    assert_eq!(summary.inserted, 0);
    assert_eq!(summary.errors.len(), 2);
    assert!(summary.errors[0].starts_with("row 1:"));
    assert!(summary.has_errors());
}
