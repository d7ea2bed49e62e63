use std::collections::BTreeMap;

use serde::{Deserialize, Serialize};

/// A flat field-name to value map, as handed to the record store.
pub type Record = BTreeMap<String, String>;

/// A record as held by a store, with its assigned id.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct StoredRecord {
    pub id: String,
    pub fields: Record,
}

impl StoredRecord {
    pub fn field(&self, name: &str) -> Option<&str> {
        self.fields.get(name).map(String::as_str)
    }
}
