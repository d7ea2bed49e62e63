use std::path::Path;

use comfy_table::modifiers::UTF8_ROUND_CORNERS;
use comfy_table::presets::UTF8_FULL_CONDENSED;
use comfy_table::{Attribute, Cell, CellAlignment, Color, ContentArrangement, Table};

use crm_cli::logging::redact_value;
use crm_core::ImportSummary;
use crm_map::{ConfidenceLevel, ConfidenceThresholds, MappingResult};
use crm_validate::{IssueKind, ValidationReport};

use crate::types::ImportRunResult;

pub fn print_summary(result: &ImportRunResult) {
    println!("File: {}", result.file.display());
    println!("Target: {}", result.target);
    print_mapping_table(&result.mapping);
    print_validation_table(&result.report);
    if result.blocked {
        eprintln!("Import blocked: map every required field, then retry.");
        return;
    }
    match &result.summary {
        Some(summary) => print_import_totals(summary, result.store_path.as_deref()),
        None => println!("Dry run: no records written."),
    }
}

fn print_mapping_table(mapping: &MappingResult) {
    if mapping.is_empty() {
        println!("No columns found in file.");
        return;
    }
    let thresholds = ConfidenceThresholds::default();
    let mut table = Table::new();
    table.set_header(vec![
        header_cell("Column"),
        header_cell("Field"),
        header_cell("Confidence"),
        header_cell("Assessment"),
    ]);
    apply_table_style(&mut table);
    align_column(&mut table, 2, CellAlignment::Right);
    for entry in &mapping.mappings {
        match entry.target_field.as_deref() {
            Some(field) => {
                table.add_row(vec![
                    Cell::new(&entry.source_column),
                    Cell::new(field),
                    Cell::new(format!("{:.0}%", entry.confidence * 100.0)),
                    level_cell(thresholds.categorize(entry.confidence)),
                ]);
            }
            None => {
                table.add_row(vec![
                    Cell::new(&entry.source_column),
                    dim_cell("-"),
                    dim_cell("-"),
                    Cell::new("unmapped - column will be skipped").fg(Color::DarkGrey),
                ]);
            }
        }
    }
    println!("{table}");
}

fn print_validation_table(report: &ValidationReport) {
    if report.is_empty() {
        println!("Validation: no issues found.");
        return;
    }
    let mut table = Table::new();
    table.set_header(vec![
        header_cell("Row"),
        header_cell("Field"),
        header_cell("Problem"),
        header_cell("Value"),
    ]);
    apply_table_style(&mut table);
    align_column(&mut table, 0, CellAlignment::Right);
    for issue in &report.issues {
        let row_cell = if issue.row == 0 {
            dim_cell("-")
        } else {
            Cell::new(issue.row)
        };
        let problem_color = match issue.kind {
            IssueKind::Catalog => Color::Red,
            IssueKind::Row => Color::Yellow,
        };
        let value_cell = match &issue.value {
            Some(value) => Cell::new(redact_value(value)),
            None => dim_cell("-"),
        };
        table.add_row(vec![
            row_cell,
            Cell::new(&issue.field),
            Cell::new(&issue.message).fg(problem_color),
            value_cell,
        ]);
    }
    println!("{table}");
}

fn print_import_totals(summary: &ImportSummary, store_path: Option<&Path>) {
    if let Some(path) = store_path {
        println!("Store: {}", path.display());
    }
    let mut table = Table::new();
    table.set_header(vec![
        header_cell("Rows"),
        header_cell("Batches"),
        header_cell("Inserted"),
        header_cell("Updated"),
        header_cell("Skipped"),
        header_cell("Row issues"),
        header_cell("Errors"),
    ]);
    apply_table_style(&mut table);
    for idx in 0..7 {
        align_column(&mut table, idx, CellAlignment::Right);
    }
    table.add_row(vec![
        Cell::new(summary.total_rows),
        Cell::new(summary.batches),
        Cell::new(summary.inserted).fg(Color::Green),
        Cell::new(summary.updated).fg(Color::Cyan),
        Cell::new(summary.skipped),
        count_cell(summary.row_issues, Color::Yellow),
        count_cell(summary.errors.len(), Color::Red),
    ]);
    println!("{table}");
    let elapsed = (summary.finished_at - summary.started_at).num_milliseconds();
    println!("Completed in {elapsed} ms");
    if !summary.errors.is_empty() {
        eprintln!("Errors:");
        for error in &summary.errors {
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

fn align_column(table: &mut Table, index: usize, alignment: CellAlignment) {
    if let Some(column) = table.column_mut(index) {
        column.set_cell_alignment(alignment);
    }
}

fn header_cell(text: &str) -> Cell {
    Cell::new(text).add_attribute(Attribute::Bold)
}

fn dim_cell(text: &str) -> Cell {
    Cell::new(text).fg(Color::DarkGrey)
}

fn level_cell(level: Option<ConfidenceLevel>) -> Cell {
    match level {
        Some(level @ ConfidenceLevel::High) => Cell::new(level.description()).fg(Color::Green),
        Some(level @ ConfidenceLevel::Medium) => Cell::new(level.description()).fg(Color::Yellow),
        Some(level @ ConfidenceLevel::Low) => Cell::new(level.description()).fg(Color::Red),
        None => dim_cell("-"),
    }
}

fn count_cell(count: usize, color: Color) -> Cell {
    if count == 0 {
        Cell::new(0)
    } else {
        Cell::new(count).fg(color)
    }
}
