//! Mapping engine implementation.

use std::cmp::Ordering;
use std::collections::BTreeMap;

use rapidfuzz::distance::levenshtein;

use crm_model::{FieldCatalog, FieldMapping, TargetField};

use crate::utils::normalize_text;

/// Default acceptance threshold: a proposal must score strictly above this
/// to be mapped. Tunable via [`FieldMapper::with_min_confidence`].
pub const DEFAULT_MIN_CONFIDENCE: f32 = 0.5;

/// Confidence level categories for mapping quality assessment.
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash)]
pub enum ConfidenceLevel {
    /// Weak match requiring manual confirmation.
    Low,
    /// Reasonable match that should be reviewed.
    Medium,
    /// Near-certain match.
    High,
}

impl ConfidenceLevel {
    pub fn description(&self) -> &'static str {
        match self {
            Self::High => "high confidence - likely correct",
            Self::Medium => "medium confidence - should review",
            Self::Low => "low confidence - needs verification",
        }
    }
}

/// Thresholds for categorizing mapping confidence.
#[derive(Debug, Clone, Copy)]
pub struct ConfidenceThresholds {
    /// Minimum confidence for high-quality matches (default: 0.95).
    pub high: f32,
    /// Minimum confidence for medium-quality matches (default: 0.80).
    pub medium: f32,
    /// Minimum confidence for any accepted match (default: 0.50).
    pub low: f32,
}

impl Default for ConfidenceThresholds {
    fn default() -> Self {
        Self {
            high: 0.95,
            medium: 0.80,
            low: DEFAULT_MIN_CONFIDENCE,
        }
    }
}

impl ConfidenceThresholds {
    /// Categorizes a confidence score, or `None` below the low threshold.
    pub fn categorize(&self, confidence: f32) -> Option<ConfidenceLevel> {
        if confidence >= self.high {
            Some(ConfidenceLevel::High)
        } else if confidence >= self.medium {
            Some(ConfidenceLevel::Medium)
        } else if confidence >= self.low {
            Some(ConfidenceLevel::Low)
        } else {
            None
        }
    }
}

/// Result of a mapping operation: exactly one entry per source column,
/// in source-column order.
#[derive(Debug, Clone)]
pub struct MappingResult {
    pub mappings: Vec<FieldMapping>,
}

impl MappingResult {
    pub fn len(&self) -> usize {
        self.mappings.len()
    }

    pub fn is_empty(&self) -> bool {
        self.mappings.is_empty()
    }

    /// Mappings that resolved to a catalog field.
    pub fn mapped(&self) -> impl Iterator<Item = &FieldMapping> {
        self.mappings.iter().filter(|mapping| mapping.is_mapped())
    }

    /// Source columns left unmapped.
    pub fn unmapped_columns(&self) -> Vec<&str> {
        self.mappings
            .iter()
            .filter(|mapping| !mapping.is_mapped())
            .map(|mapping| mapping.source_column.as_str())
            .collect()
    }

    /// First mapping that targets the given field, if any.
    pub fn target_of(&self, field: &str) -> Option<&FieldMapping> {
        self.mappings
            .iter()
            .find(|mapping| mapping.target_field.as_deref() == Some(field))
    }

    /// Count of mapped columns at each confidence level.
    pub fn count_by_level(
        &self,
        thresholds: &ConfidenceThresholds,
    ) -> BTreeMap<ConfidenceLevel, usize> {
        let mut counts = BTreeMap::new();
        for mapping in self.mapped() {
            if let Some(level) = thresholds.categorize(mapping.confidence) {
                *counts.entry(level).or_insert(0) += 1;
            }
        }
        counts
    }

    /// Lowest confidence among mapped columns, if any.
    pub fn min_confidence(&self) -> Option<f32> {
        self.mapped()
            .map(|mapping| mapping.confidence)
            .min_by(|a, b| a.partial_cmp(b).unwrap_or(Ordering::Equal))
    }

    /// Highest confidence among mapped columns, if any.
    pub fn max_confidence(&self) -> Option<f32> {
        self.mapped()
            .map(|mapping| mapping.confidence)
            .max_by(|a, b| a.partial_cmp(b).unwrap_or(Ordering::Equal))
    }

    /// Mean confidence across mapped columns, if any.
    pub fn mean_confidence(&self) -> Option<f32> {
        let mapped: Vec<f32> = self.mapped().map(|mapping| mapping.confidence).collect();
        if mapped.is_empty() {
            return None;
        }
        Some(mapped.iter().sum::<f32>() / mapped.len() as f32)
    }
}

/// Engine for mapping uploaded column headers to catalog fields.
///
/// For each source column the engine proposes at most one field: an exact
/// normalized match on the field name, label, or a registered alias wins
/// outright; otherwise the best normalized Levenshtein similarity across
/// those strings is taken, and accepted only above the confidence
/// threshold. Columns are scored independently, so the output always has
/// one entry per column in input order and a human reviews the proposal
/// before any import runs.
pub struct FieldMapper {
    catalog: FieldCatalog,
    min_confidence: f32,
}

struct FieldComparands<'a> {
    field: &'a TargetField,
    normalized: Vec<String>,
}

impl FieldMapper {
    pub fn new(catalog: FieldCatalog) -> Self {
        Self {
            catalog,
            min_confidence: DEFAULT_MIN_CONFIDENCE,
        }
    }

    /// Override the acceptance threshold. Acceptance stays strictly
    /// greater-than, so a score equal to the threshold is rejected.
    pub fn with_min_confidence(mut self, min_confidence: f32) -> Self {
        self.min_confidence = min_confidence;
        self
    }

    pub fn catalog(&self) -> &FieldCatalog {
        &self.catalog
    }

    /// Propose a mapping for every source column, in input order.
    pub fn map(&self, columns: &[String]) -> MappingResult {
        let fields: Vec<FieldComparands> = self
            .catalog
            .fields
            .iter()
            .map(|field| FieldComparands {
                field,
                normalized: comparands(field),
            })
            .collect();
        let mappings = columns
            .iter()
            .map(|column| self.map_column(column, &fields))
            .collect();
        MappingResult { mappings }
    }

    fn map_column(&self, column: &str, fields: &[FieldComparands]) -> FieldMapping {
        let header = normalize_text(column);
        let mut best: Option<(&TargetField, f64)> = None;
        for comparand in fields {
            // First exact match wins in catalog iteration order.
            if comparand.normalized.iter().any(|value| *value == header) {
                return FieldMapping {
                    source_column: column.to_string(),
                    target_field: Some(comparand.field.name.clone()),
                    confidence: 1.0,
                };
            }
            let score = comparand
                .normalized
                .iter()
                .map(|value| levenshtein::normalized_similarity(header.chars(), value.chars()))
                .fold(0.0_f64, f64::max);
            // Strictly greater keeps the first-in-catalog winner on ties.
            if best.is_none_or(|(_, current)| score > current) {
                best = Some((comparand.field, score));
            }
        }
        match best {
            Some((field, score)) if score > f64::from(self.min_confidence) => FieldMapping {
                source_column: column.to_string(),
                target_field: Some(field.name.clone()),
                confidence: score as f32,
            },
            _ => FieldMapping::unmapped(column),
        }
    }
}

fn comparands(field: &TargetField) -> Vec<String> {
    let mut values = Vec::with_capacity(field.aliases.len() + 2);
    values.push(normalize_text(&field.name));
    values.push(normalize_text(&field.label));
    for alias in &field.aliases {
        values.push(normalize_text(alias));
    }
    values.sort_unstable();
    values.dedup();
    values
}
