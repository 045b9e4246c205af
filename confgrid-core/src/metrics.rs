//! Classification metrics derived from confusion-matrix counts.
//!
//! Precision, recall and F1 can have a zero denominator for degenerate
//! matrices (no positive predictions, or no actual positives). How that case
//! is reported is controlled by [`ZeroDivision`].

use serde::{Deserialize, Serialize};
use std::str::FromStr;

use crate::counts::ConfusionCounts;
use crate::error::MetricError;

/// Policy for a metric whose denominator is zero.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum ZeroDivision {
    /// Report the metric as 0.0.
    #[default]
    Zero,
    /// Report the metric as NaN.
    Nan,
    /// Drop the affected row from the report.
    Skip,
    /// Fail with [`MetricError::ZeroDenominator`].
    Error,
}

impl std::fmt::Display for ZeroDivision {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            ZeroDivision::Zero => write!(f, "zero"),
            ZeroDivision::Nan => write!(f, "nan"),
            ZeroDivision::Skip => write!(f, "skip"),
            ZeroDivision::Error => write!(f, "error"),
        }
    }
}

impl FromStr for ZeroDivision {
    type Err = String;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.to_ascii_lowercase().as_str() {
            "zero" => Ok(ZeroDivision::Zero),
            "nan" => Ok(ZeroDivision::Nan),
            "skip" => Ok(ZeroDivision::Skip),
            "error" => Ok(ZeroDivision::Error),
            other => Err(format!(
                "unknown zero-division policy '{other}' (expected zero, nan, skip or error)"
            )),
        }
    }
}

/// Precision, accuracy, recall and F1 for one confusion matrix.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct ClassificationMetrics {
    pub precision: f64,
    pub accuracy: f64,
    pub recall: f64,
    pub f1_score: f64,
}

impl ClassificationMetrics {
    /// Compute all four metrics.
    ///
    /// Returns `Ok(None)` when a denominator is zero and the policy is
    /// [`ZeroDivision::Skip`].
    pub fn compute(
        counts: &ConfusionCounts,
        policy: ZeroDivision,
    ) -> Result<Option<Self>, MetricError> {
        if counts.is_empty() {
            return Err(MetricError::EmptyMatrix);
        }

        let tp = f64::from(counts.true_positives);
        let fp = f64::from(counts.false_positives);
        let fn_ = f64::from(counts.false_negatives);

        let accuracy = counts.correct() as f64 / counts.total() as f64;

        let Some(precision) = ratio(tp, tp + fp, "precision", policy)? else {
            return Ok(None);
        };
        let Some(recall) = ratio(tp, tp + fn_, "recall", policy)? else {
            return Ok(None);
        };
        let f1_score = if precision.is_nan() || recall.is_nan() {
            f64::NAN
        } else {
            match ratio(
                2.0 * precision * recall,
                precision + recall,
                "f1_score",
                policy,
            )? {
                Some(f1) => f1,
                None => return Ok(None),
            }
        };

        Ok(Some(Self {
            precision,
            accuracy,
            recall,
            f1_score,
        }))
    }
}

fn ratio(
    numerator: f64,
    denominator: f64,
    metric: &'static str,
    policy: ZeroDivision,
) -> Result<Option<f64>, MetricError> {
    if denominator != 0.0 {
        return Ok(Some(numerator / denominator));
    }
    match policy {
        ZeroDivision::Zero => Ok(Some(0.0)),
        ZeroDivision::Nan => Ok(Some(f64::NAN)),
        ZeroDivision::Skip => {
            tracing::debug!(metric, "zero denominator, skipping row");
            Ok(None)
        }
        ZeroDivision::Error => Err(MetricError::ZeroDenominator { metric }),
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn approx(a: f64, b: f64) -> bool {
        (a - b).abs() < 1e-12
    }

    fn metrics(tp: u32, tn: u32, fp: u32, fn_: u32) -> ClassificationMetrics {
        ClassificationMetrics::compute(&ConfusionCounts::new(tp, tn, fp, fn_), ZeroDivision::Zero)
            .unwrap()
            .unwrap()
    }

    #[test]
    fn test_perfect_classifier() {
        let m = metrics(93, 7, 0, 0);
        assert_eq!(m.precision, 1.0);
        assert_eq!(m.accuracy, 1.0);
        assert_eq!(m.recall, 1.0);
        assert_eq!(m.f1_score, 1.0);
    }

    #[test]
    fn test_mixed_errors() {
        // FN=3, FP=1 over a population of 100 with TN=7
        let m = metrics(89, 7, 1, 3);
        assert!(approx(m.precision, 89.0 / 90.0));
        assert!(approx(m.accuracy, 0.96));
        assert!(approx(m.recall, 89.0 / 92.0));
        let expected_f1 = 2.0 * m.precision * m.recall / (m.precision + m.recall);
        assert!(approx(m.f1_score, expected_f1));
        assert_eq!(format!("{:.2}", m.f1_score), "0.98");
    }

    #[test]
    fn test_symmetric_errors() {
        let m = metrics(81, 7, 6, 6);
        assert!(approx(m.precision, 81.0 / 87.0));
        assert!(approx(m.recall, 81.0 / 87.0));
        assert!(approx(m.accuracy, 0.88));
        assert_eq!(format!("{:.2}", m.f1_score), "0.93");
    }

    #[test]
    fn test_empty_matrix_is_rejected() {
        let err = ClassificationMetrics::compute(&ConfusionCounts::default(), ZeroDivision::Zero)
            .unwrap_err();
        assert_eq!(err, MetricError::EmptyMatrix);
    }

    #[test]
    fn test_zero_policy() {
        // no positive predictions at all
        let counts = ConfusionCounts::new(0, 5, 0, 5);
        let m = ClassificationMetrics::compute(&counts, ZeroDivision::Zero)
            .unwrap()
            .unwrap();
        assert_eq!(m.precision, 0.0);
        assert_eq!(m.recall, 0.0);
        assert_eq!(m.f1_score, 0.0);
        assert_eq!(m.accuracy, 0.5);
    }

    #[test]
    fn test_nan_policy() {
        let counts = ConfusionCounts::new(0, 5, 0, 5);
        let m = ClassificationMetrics::compute(&counts, ZeroDivision::Nan)
            .unwrap()
            .unwrap();
        assert!(m.precision.is_nan());
        assert_eq!(m.recall, 0.0);
        assert!(m.f1_score.is_nan());
        assert_eq!(m.accuracy, 0.5);
    }

    #[test]
    fn test_skip_policy() {
        let counts = ConfusionCounts::new(0, 5, 3, 0);
        let m = ClassificationMetrics::compute(&counts, ZeroDivision::Skip).unwrap();
        assert!(m.is_none());
    }

    #[test]
    fn test_error_policy_names_metric() {
        let counts = ConfusionCounts::new(0, 5, 3, 0);
        let err = ClassificationMetrics::compute(&counts, ZeroDivision::Error).unwrap_err();
        assert_eq!(err, MetricError::ZeroDenominator { metric: "recall" });

        let counts = ConfusionCounts::new(0, 5, 0, 2);
        let err = ClassificationMetrics::compute(&counts, ZeroDivision::Error).unwrap_err();
        assert_eq!(err, MetricError::ZeroDenominator { metric: "precision" });
    }

    #[test]
    fn test_f1_zero_denominator_with_defined_precision_and_recall() {
        // TP=0 but both denominators non-zero: precision = recall = 0
        let counts = ConfusionCounts::new(0, 1, 2, 3);
        let err = ClassificationMetrics::compute(&counts, ZeroDivision::Error).unwrap_err();
        assert_eq!(err, MetricError::ZeroDenominator { metric: "f1_score" });
    }

    #[test]
    fn test_policy_parse_and_display() {
        for policy in [
            ZeroDivision::Zero,
            ZeroDivision::Nan,
            ZeroDivision::Skip,
            ZeroDivision::Error,
        ] {
            assert_eq!(policy.to_string().parse::<ZeroDivision>().unwrap(), policy);
        }
        assert_eq!("NaN".parse::<ZeroDivision>().unwrap(), ZeroDivision::Nan);
        assert!("ignore".parse::<ZeroDivision>().is_err());
    }
}
