//! Pre-flight validation of an import: catalog coverage plus per-row
//! value checks.
//!
//! Validation never fails — it only collects advisory issues for a human
//! to review before the import run starts. Two kinds exist:
//!
//! - **Catalog**: a required target field received no mapped source
//!   column. Reported once at row 0; blocks starting the import.
//! - **Row**: a mapped cell is empty for a required field, or fails the
//!   format check of an email/phone-tagged field. Reported per row
//!   (1-based); the row is still importable.

mod checks;

pub use checks::{is_valid_email, is_valid_phone};

use std::collections::BTreeSet;

use serde::Serialize;

use crm_ingest::CsvTable;
use crm_model::{FieldCatalog, FieldKind, FieldMapping, TargetField};

/// Which pass produced an issue.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
#[serde(rename_all = "lowercase")]
pub enum IssueKind {
    /// Per-row, per-field problem; the row is reported but not excluded.
    Row,
    /// A required field has no mapped source column; blocks the run.
    Catalog,
}

/// A single validation finding.
#[derive(Debug, Clone, Serialize)]
pub struct ValidationIssue {
    pub kind: IssueKind,
    /// 1-based data row, or 0 for catalog-level issues.
    pub row: usize,
    pub field: String,
    pub message: String,
    pub value: Option<String>,
}

/// All findings for one import, in catalog-then-row order.
#[derive(Debug, Clone, Default, Serialize)]
pub struct ValidationReport {
    pub issues: Vec<ValidationIssue>,
}

impl ValidationReport {
    pub fn is_empty(&self) -> bool {
        self.issues.is_empty()
    }

    pub fn catalog_error_count(&self) -> usize {
        self.issues
            .iter()
            .filter(|issue| issue.kind == IssueKind::Catalog)
            .count()
    }

    pub fn row_error_count(&self) -> usize {
        self.issues
            .iter()
            .filter(|issue| issue.kind == IssueKind::Row)
            .count()
    }

    /// Catalog-level issues block the import until resolved.
    pub fn has_blocking(&self) -> bool {
        self.catalog_error_count() > 0
    }

    pub fn catalog_issues(&self) -> impl Iterator<Item = &ValidationIssue> {
        self.issues
            .iter()
            .filter(|issue| issue.kind == IssueKind::Catalog)
    }
}

/// Validate a proposed mapping against the catalog and the row data.
///
/// All issues are collected; nothing short-circuits. Empty tables and
/// empty mapping lists degrade to a report with only catalog findings.
pub fn validate_import(
    catalog: &FieldCatalog,
    mappings: &[FieldMapping],
    table: &CsvTable,
) -> ValidationReport {
    let mut report = ValidationReport::default();

    let mapped_targets: BTreeSet<&str> = mappings
        .iter()
        .filter_map(|mapping| mapping.target_field.as_deref())
        .collect();
    for field in catalog.required_fields() {
        if !mapped_targets.contains(field.name.as_str()) {
            report.issues.push(ValidationIssue {
                kind: IssueKind::Catalog,
                row: 0,
                field: field.name.clone(),
                message: format!("required field '{}' has no mapped column", field.label),
                value: None,
            });
        }
    }

    for (row_idx, row) in table.rows.iter().enumerate() {
        for mapping in mappings {
            let Some(target) = mapping.target_field.as_deref() else {
                continue;
            };
            let Some(field) = catalog.field(target) else {
                continue;
            };
            let Some(col) = table.column_index(&mapping.source_column) else {
                continue;
            };
            let value = row.get(col).map(String::as_str).unwrap_or("").trim();
            if let Some(issue) = check_cell(field, row_idx + 1, value) {
                report.issues.push(issue);
            }
        }
    }

    report
}

fn check_cell(field: &TargetField, row: usize, value: &str) -> Option<ValidationIssue> {
    if value.is_empty() {
        if field.required {
            return Some(ValidationIssue {
                kind: IssueKind::Row,
                row,
                field: field.name.clone(),
                message: format!("required field '{}' is empty", field.label),
                value: None,
            });
        }
        return None;
    }
    match field.kind {
        FieldKind::Email if !is_valid_email(value) => Some(ValidationIssue {
            kind: IssueKind::Row,
            row,
            field: field.name.clone(),
            message: format!("invalid email format for '{}'", field.label),
            value: Some(value.to_string()),
        }),
        FieldKind::Phone if !is_valid_phone(value) => Some(ValidationIssue {
            kind: IssueKind::Row,
            row,
            field: field.name.clone(),
            message: format!("invalid phone format for '{}'", field.label),
            value: Some(value.to_string()),
        }),
        _ => None,
    }
}
