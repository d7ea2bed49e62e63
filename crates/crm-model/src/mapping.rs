//! Column mapping types for source-to-field mapping.

use serde::{Deserialize, Serialize};

/// Association of one uploaded column to zero-or-one catalog field.
///
/// `target_field = None` means the column is unmapped and will be skipped
/// by the import. Confidence is derived purely from string similarity
/// between normalized header and field names, except after an explicit
/// user override.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct FieldMapping {
    /// Literal header text of the source column.
    pub source_column: String,
    /// Unique name of the mapped catalog field, if any.
    pub target_field: Option<String>,
    /// Confidence score in [0.0, 1.0].
    pub confidence: f32,
}

impl FieldMapping {
    pub fn unmapped(source_column: impl Into<String>) -> Self {
        Self {
            source_column: source_column.into(),
            target_field: None,
            confidence: 0.0,
        }
    }

    pub fn is_mapped(&self) -> bool {
        self.target_field.is_some()
    }

    /// Manual override: pick a field for this column. Manual picks carry
    /// full confidence.
    pub fn accept(&mut self, field: impl Into<String>) {
        self.target_field = Some(field.into());
        self.confidence = 1.0;
    }

    /// Manual override: explicitly skip this column.
    pub fn skip(&mut self) {
        self.target_field = None;
        self.confidence = 0.0;
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn overrides_reset_confidence() {
        let mut mapping = FieldMapping {
            source_column: "E-mail".to_string(),
            target_field: Some("email".to_string()),
            confidence: 0.8,
        };

        mapping.accept("phone");
        assert_eq!(mapping.target_field.as_deref(), Some("phone"));
        assert_eq!(mapping.confidence, 1.0);

        mapping.skip();
        assert!(!mapping.is_mapped());
        assert_eq!(mapping.confidence, 0.0);
    }
}
