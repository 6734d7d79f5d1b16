//! Multinomial naive Bayes over TF-IDF features.
//!
//! Class priors come from the label distribution of the training corpus;
//! class-conditional term weights use additive (Laplace) smoothing.

use crate::error::{Result, TriageError};
use crate::pipeline::vectorizer::SparseVector;
use crate::types::Priority;
use serde::{Deserialize, Serialize};

/// Additive smoothing parameter
pub const DEFAULT_ALPHA: f64 = 1.0;

/// Fitted multinomial naive Bayes classifier
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
pub struct MultinomialNb {
    /// Labels seen during training, ascending
    classes: Vec<Priority>,
    class_log_prior: Vec<f64>,
    /// [class][feature] log probability
    feature_log_prob: Vec<Vec<f64>>,
}

impl MultinomialNb {
    /// Fit on vectorized rows and their labels
    pub fn fit(
        rows: &[SparseVector],
        labels: &[Priority],
        n_features: usize,
        alpha: f64,
    ) -> Result<Self> {
        if rows.len() != labels.len() {
            return Err(TriageError::Validation(format!(
                "{} rows but {} labels",
                rows.len(),
                labels.len()
            )));
        }
        if rows.is_empty() {
            return Err(TriageError::Validation("cannot fit on an empty corpus".to_string()));
        }

        let mut classes: Vec<Priority> = labels.to_vec();
        classes.sort();
        classes.dedup();

        let mut class_count = vec![0usize; classes.len()];
        let mut feature_count = vec![vec![0.0f64; n_features]; classes.len()];

        for (row, label) in rows.iter().zip(labels) {
            let c = classes
                .iter()
                .position(|class| class == label)
                .ok_or_else(|| TriageError::Other(format!("unindexed label {}", label)))?;
            class_count[c] += 1;
            for &(feature, weight) in row {
                let slot = feature_count[c].get_mut(feature).ok_or_else(|| {
                    TriageError::Validation(format!(
                        "feature index {} exceeds dimension {}",
                        feature, n_features
                    ))
                })?;
                *slot += weight;
            }
        }

        let total = rows.len() as f64;
        let class_log_prior = class_count
            .iter()
            .map(|&count| (count as f64 / total).ln())
            .collect();

        let feature_log_prob = feature_count
            .into_iter()
            .map(|counts| {
                let smoothed_total: f64 = counts.iter().map(|c| c + alpha).sum();
                let log_total = smoothed_total.ln();
                counts.into_iter().map(|c| (c + alpha).ln() - log_total).collect()
            })
            .collect();

        Ok(Self {
            classes,
            class_log_prior,
            feature_log_prob,
        })
    }

    pub fn classes(&self) -> &[Priority] {
        &self.classes
    }

    /// Joint log likelihood per class for one row
    pub fn joint_log_likelihood(&self, row: &SparseVector) -> Result<Vec<f64>> {
        self.class_log_prior
            .iter()
            .zip(&self.feature_log_prob)
            .map(|(prior, log_probs)| {
                let mut score = *prior;
                for &(feature, weight) in row {
                    let log_prob = log_probs.get(feature).ok_or_else(|| {
                        TriageError::Other(format!(
                            "feature index {} outside classifier dimension {}",
                            feature,
                            log_probs.len()
                        ))
                    })?;
                    score += weight * log_prob;
                }
                Ok(score)
            })
            .collect()
    }

    /// Most probable label; ties go to the lowest label
    pub fn predict(&self, row: &SparseVector) -> Result<Priority> {
        let scores = self.joint_log_likelihood(row)?;
        let mut best: Option<(usize, f64)> = None;
        for (i, score) in scores.into_iter().enumerate() {
            match best {
                Some((_, best_score)) if score <= best_score => {}
                _ => best = Some((i, score)),
            }
        }

        best.and_then(|(i, _)| self.classes.get(i).copied())
            .ok_or_else(|| TriageError::Other("classifier has no classes".to_string()))
    }
}
