use std::path::PathBuf;

use crm_core::ImportSummary;
use crm_map::MappingResult;
use crm_model::ImportTarget;
use crm_validate::ValidationReport;

/// Everything one `import` invocation produced, for summary rendering.
#[derive(Debug)]
pub struct ImportRunResult {
    pub file: PathBuf,
    pub target: ImportTarget,
    pub mapping: MappingResult,
    pub report: ValidationReport,
    /// `None` on dry runs and blocked runs.
    pub summary: Option<ImportSummary>,
    pub store_path: Option<PathBuf>,
    /// Catalog-level validation errors prevented the run.
    pub blocked: bool,
}

impl ImportRunResult {
    pub fn has_errors(&self) -> bool {
        self.blocked
            || self
                .summary
                .as_ref()
                .is_some_and(ImportSummary::has_errors)
    }
}
