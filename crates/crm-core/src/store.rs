//! Record store abstraction and the JSON-backed in-memory implementation.

use std::collections::BTreeMap;
use std::path::Path;

use anyhow::{Context, Result, bail};
use serde::{Deserialize, Serialize};

use crm_model::{Record, StoredRecord};

/// Downstream record store the import orchestrator writes into.
///
/// `find_by_field` compares values trimmed and ASCII-case-insensitively,
/// so lookups are stable against casing differences in uploaded data.
pub trait RecordStore {
    fn insert(&mut self, table: &str, record: Record) -> Result<String>;
    fn update(&mut self, table: &str, id: &str, record: Record) -> Result<()>;
    fn find_by_field(&self, table: &str, field: &str, value: &str)
    -> Result<Option<StoredRecord>>;
}

/// In-memory store with sequential ids, serializable for JSON-file
/// persistence between CLI runs.
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct MemoryStore {
    tables: BTreeMap<String, Vec<StoredRecord>>,
    next_id: u64,
}

impl MemoryStore {
    pub fn new() -> Self {
        Self::default()
    }

    /// Load a store from a JSON file; a missing file yields an empty store.
    pub fn load(path: &Path) -> Result<Self> {
        if !path.exists() {
            return Ok(Self::new());
        }
        let contents = std::fs::read_to_string(path)
            .with_context(|| format!("read store: {}", path.display()))?;
        serde_json::from_str(&contents).with_context(|| format!("parse store: {}", path.display()))
    }

    pub fn save(&self, path: &Path) -> Result<()> {
        let contents = serde_json::to_string_pretty(self).context("serialize store")?;
        std::fs::write(path, contents).with_context(|| format!("write store: {}", path.display()))
    }

    pub fn records(&self, table: &str) -> &[StoredRecord] {
        self.tables.get(table).map(Vec::as_slice).unwrap_or(&[])
    }

    pub fn record_count(&self, table: &str) -> usize {
        self.records(table).len()
    }
}

fn value_matches(stored: &str, wanted: &str) -> bool {
    stored.trim().eq_ignore_ascii_case(wanted.trim())
}

impl RecordStore for MemoryStore {
    fn insert(&mut self, table: &str, record: Record) -> Result<String> {
        self.next_id += 1;
        let id = format!("rec-{:06}", self.next_id);
        self.tables
            .entry(table.to_string())
            .or_default()
            .push(StoredRecord {
                id: id.clone(),
                fields: record,
            });
        Ok(id)
    }

    fn update(&mut self, table: &str, id: &str, record: Record) -> Result<()> {
        let Some(existing) = self
            .tables
            .get_mut(table)
            .and_then(|records| records.iter_mut().find(|stored| stored.id == id))
        else {
            bail!("no record '{id}' in table '{table}'");
        };
        // Merge: incoming values win, untouched fields are kept.
        for (field, value) in record {
            existing.fields.insert(field, value);
        }
        Ok(())
    }

    fn find_by_field(
        &self,
        table: &str,
        field: &str,
        value: &str,
    ) -> Result<Option<StoredRecord>> {
        Ok(self
            .records(table)
            .iter()
            .find(|stored| {
                stored
                    .fields
                    .get(field)
                    .is_some_and(|stored_value| value_matches(stored_value, value))
            })
            .cloned())
    }
}
