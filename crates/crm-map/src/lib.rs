pub mod engine;
pub mod utils;

pub use engine::{
    ConfidenceLevel, ConfidenceThresholds, DEFAULT_MIN_CONFIDENCE, FieldMapper, MappingResult,
};
pub use utils::normalize_text;

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn thresholds_categorize() {
        let thresholds = ConfidenceThresholds::default();
        assert_eq!(thresholds.categorize(1.0), Some(ConfidenceLevel::High));
        assert_eq!(thresholds.categorize(0.85), Some(ConfidenceLevel::Medium));
        assert_eq!(thresholds.categorize(0.6), Some(ConfidenceLevel::Low));
        assert_eq!(thresholds.categorize(0.3), None);
    }
}
