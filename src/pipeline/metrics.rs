//! Evaluation metrics for the dashboard.

use crate::types::Priority;
use serde::{Deserialize, Serialize};
use std::collections::BTreeMap;

/// Rows are true labels, columns predicted labels, both in `Priority::ALL` order
pub type ConfusionMatrix = [[u64; 3]; 3];

/// Accuracy, confusion matrix, and label distribution
///
/// All fields are `None` when there was not enough data or no trained model.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct EvaluationMetrics {
    pub accuracy: Option<f64>,
    pub confusion_matrix: Option<ConfusionMatrix>,
    pub priority_counts: Option<BTreeMap<String, u64>>,
}

impl EvaluationMetrics {
    /// The all-null "insufficient data" result
    pub fn insufficient() -> Self {
        Self::default()
    }

    pub fn is_available(&self) -> bool {
        self.accuracy.is_some()
    }

    /// Compute metrics from (true, predicted) label pairs
    pub fn from_predictions(pairs: &[(Priority, Priority)]) -> Self {
        if pairs.is_empty() {
            return Self::insufficient();
        }

        let mut matrix: ConfusionMatrix = [[0; 3]; 3];
        let mut counts: BTreeMap<String, u64> = Priority::ALL
            .iter()
            .map(|p| (p.name().to_string(), 0))
            .collect();
        let mut correct = 0u64;

        for &(truth, predicted) in pairs {
            matrix[truth.index()][predicted.index()] += 1;
            *counts.entry(truth.name().to_string()).or_insert(0) += 1;
            if truth == predicted {
                correct += 1;
            }
        }

        Self {
            accuracy: Some(correct as f64 / pairs.len() as f64),
            confusion_matrix: Some(matrix),
            priority_counts: Some(counts),
        }
    }

    /// Sum of all confusion matrix cells
    pub fn total(&self) -> Option<u64> {
        self.confusion_matrix
            .map(|m| m.iter().flat_map(|row| row.iter()).sum())
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use proptest::prelude::*;
    use Priority::*;

    #[test]
    fn test_insufficient_is_all_null() {
        let metrics = EvaluationMetrics::insufficient();
        let json = serde_json::to_value(&metrics).unwrap();
        assert_eq!(
            json,
            serde_json::json!({
                "accuracy": null,
                "confusion_matrix": null,
                "priority_counts": null,
            })
        );
    }

    #[test]
    fn test_matrix_layout() {
        let metrics = EvaluationMetrics::from_predictions(&[
            (Low, Low),
            (Low, High),
            (High, High),
            (High, Medium),
        ]);

        assert_eq!(metrics.accuracy, Some(0.5));
        assert_eq!(
            metrics.confusion_matrix,
            Some([[1, 0, 1], [0, 0, 0], [0, 1, 1]])
        );
        let counts = metrics.priority_counts.unwrap();
        assert_eq!(counts["Low"], 2);
        assert_eq!(counts["Medium"], 0);
        assert_eq!(counts["High"], 2);
    }

    fn priority() -> impl Strategy<Value = Priority> {
        prop_oneof![Just(Low), Just(Medium), Just(High)]
    }

    proptest! {
        #[test]
        fn prop_rows_match_label_counts(
            pairs in prop::collection::vec((priority(), priority()), 1..50)
        ) {
            let metrics = EvaluationMetrics::from_predictions(&pairs);
            prop_assert_eq!(metrics.total(), Some(pairs.len() as u64));

            let matrix = metrics.confusion_matrix.unwrap();
            let counts = metrics.priority_counts.clone().unwrap();
            for p in Priority::ALL {
                let row_sum: u64 = matrix[p.index()].iter().sum();
                prop_assert_eq!(row_sum, counts[p.name()]);
            }
            let accuracy = metrics.accuracy.unwrap();
            prop_assert!((0.0..=1.0).contains(&accuracy));
        }
    }
}
