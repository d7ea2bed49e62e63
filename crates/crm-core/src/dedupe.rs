//! Per-row duplicate detection against the record store.

use anyhow::Result;
use serde::{Deserialize, Serialize};

use crm_model::Record;

use crate::store::RecordStore;

/// Field used as the duplicate-detection key.
pub const DUPLICATE_KEY_FIELD: &str = "email";

/// What to do when an incoming row matches an existing record.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum DuplicateStrategy {
    /// Leave the existing record untouched.
    Skip,
    /// Merge the incoming values into the existing record.
    Update,
}

/// Id of the existing record this row duplicates, if any.
///
/// Rows without an email value never match. The check-then-act decision
/// for a row is made before the next row is considered, so each row's
/// outcome is independent of later rows.
pub fn find_duplicate(
    store: &dyn RecordStore,
    table: &str,
    record: &Record,
) -> Result<Option<String>> {
    let Some(email) = record.get(DUPLICATE_KEY_FIELD) else {
        return Ok(None);
    };
    let email = email.trim();
    if email.is_empty() {
        return Ok(None);
    }
    Ok(store
        .find_by_field(table, DUPLICATE_KEY_FIELD, email)?
        .map(|existing| existing.id))
}
