//! Binary confusion-matrix counts.

use serde::{Deserialize, Serialize};
use std::fmt;

use crate::error::GridError;

/// The four cells of a binary classifier's confusion matrix.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub struct ConfusionCounts {
    #[serde(rename = "tp")]
    pub true_positives: u32,
    #[serde(rename = "tn")]
    pub true_negatives: u32,
    #[serde(rename = "fp")]
    pub false_positives: u32,
    #[serde(rename = "fn")]
    pub false_negatives: u32,
}

impl ConfusionCounts {
    pub fn new(
        true_positives: u32,
        true_negatives: u32,
        false_positives: u32,
        false_negatives: u32,
    ) -> Self {
        Self {
            true_positives,
            true_negatives,
            false_positives,
            false_negatives,
        }
    }

    /// Build counts for a fixed population, deriving true positives as the
    /// remainder `total - fn - fp - tn`.
    pub fn derive(
        total: u32,
        true_negatives: u32,
        false_negatives: u32,
        false_positives: u32,
    ) -> Result<Self, GridError> {
        let requested = u64::from(true_negatives)
            + u64::from(false_negatives)
            + u64::from(false_positives);
        if requested > u64::from(total) {
            return Err(GridError::CountsExceedTotal {
                total,
                requested: u32::try_from(requested).unwrap_or(u32::MAX),
            });
        }
        // requested <= total, so the narrowing cannot truncate
        let true_positives = total - requested as u32;
        Ok(Self::new(
            true_positives,
            true_negatives,
            false_positives,
            false_negatives,
        ))
    }

    /// Total number of classified items.
    pub fn total(&self) -> u64 {
        u64::from(self.true_positives)
            + u64::from(self.true_negatives)
            + u64::from(self.false_positives)
            + u64::from(self.false_negatives)
    }

    /// Items the classifier got right.
    pub fn correct(&self) -> u64 {
        u64::from(self.true_positives) + u64::from(self.true_negatives)
    }

    pub fn is_empty(&self) -> bool {
        self.total() == 0
    }
}

impl fmt::Display for ConfusionCounts {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(
            f,
            "TP={} TN={} FP={} FN={}",
            self.true_positives, self.true_negatives, self.false_positives, self.false_negatives
        )
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_derive_true_positives() {
        let counts = ConfusionCounts::derive(100, 7, 3, 1).unwrap();
        assert_eq!(counts.true_positives, 89);
        assert_eq!(counts.true_negatives, 7);
        assert_eq!(counts.false_negatives, 3);
        assert_eq!(counts.false_positives, 1);
        assert_eq!(counts.total(), 100);
        assert_eq!(counts.correct(), 96);
    }

    #[test]
    fn test_derive_exact_fit_gives_zero_tp() {
        let counts = ConfusionCounts::derive(10, 4, 3, 3).unwrap();
        assert_eq!(counts.true_positives, 0);
        assert_eq!(counts.total(), 10);
    }

    #[test]
    fn test_derive_rejects_overflowing_counts() {
        let err = ConfusionCounts::derive(10, 7, 3, 1).unwrap_err();
        assert_eq!(
            err,
            GridError::CountsExceedTotal {
                total: 10,
                requested: 11
            }
        );
    }

    #[test]
    fn test_derive_does_not_overflow_u32() {
        let err = ConfusionCounts::derive(u32::MAX, u32::MAX, 1, 0).unwrap_err();
        assert!(matches!(err, GridError::CountsExceedTotal { .. }));
    }

    #[test]
    fn test_empty_and_display() {
        assert!(ConfusionCounts::default().is_empty());
        let counts = ConfusionCounts::new(93, 7, 0, 0);
        assert!(!counts.is_empty());
        assert_eq!(counts.to_string(), "TP=93 TN=7 FP=0 FN=0");
    }

    #[test]
    fn test_serde_uses_short_names() {
        let json = serde_json::to_value(ConfusionCounts::new(89, 7, 1, 3)).unwrap();
        assert_eq!(json["tp"], 89);
        assert_eq!(json["tn"], 7);
        assert_eq!(json["fp"], 1);
        assert_eq!(json["fn"], 3);
    }
}
