//! Fitted model artifact: vectorizer chained into the classifier.

use crate::error::{Result, TriageError};
use crate::pipeline::classifier::{MultinomialNb, DEFAULT_ALPHA};
use crate::pipeline::vectorizer::TfidfVectorizer;
use crate::types::{Priority, TrainingExample};
use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};

/// Everything needed to predict: vocabulary, idf weights, and classifier
/// parameters. Exactly one is live at a time, held by a `ModelStore`.
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
pub struct FittedModel {
    pub vectorizer: TfidfVectorizer,
    pub classifier: MultinomialNb,
    pub sample_count: usize,
    pub trained_at: DateTime<Utc>,
}

impl FittedModel {
    /// Fit a fresh vectorizer and classifier on the full corpus
    pub fn fit(examples: &[TrainingExample]) -> Result<Self> {
        let texts: Vec<&str> = examples.iter().map(|e| e.text.as_str()).collect();
        let labels: Vec<Priority> = examples.iter().map(|e| e.label).collect();

        let vectorizer = TfidfVectorizer::fit(&texts)?;
        let rows = vectorizer.transform_all(&texts)?;
        let classifier = MultinomialNb::fit(&rows, &labels, vectorizer.dimension(), DEFAULT_ALPHA)?;

        Ok(Self {
            vectorizer,
            classifier,
            sample_count: examples.len(),
            trained_at: Utc::now(),
        })
    }

    /// Predict the priority of one text
    pub fn predict(&self, text: &str) -> Result<Priority> {
        if text.trim().is_empty() {
            return Err(TriageError::Validation("cannot predict on empty text".to_string()));
        }
        let row = self.vectorizer.transform(text)?;
        self.classifier.predict(&row)
    }
}
