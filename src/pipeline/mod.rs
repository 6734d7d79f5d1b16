//! Priority pipeline: predict, train, and evaluate task priorities.
//!
//! Text is vectorized with TF-IDF over unigrams and bigrams and classified
//! with multinomial naive Bayes. User overrides collected by the task store
//! are the only training labels.
//!
//! # Failure model
//!
//! No operation here returns an error to its caller:
//! - Fewer than [`MIN_TRAINING_SAMPLES`] examples: training is skipped and
//!   evaluation returns all-null metrics.
//! - No artifact yet: prediction returns [`DEFAULT_PRIORITY`], evaluation
//!   returns all-null metrics.
//! - Load or inference failure: logged, then the same defaults apply.
//!
//! # Usage
//!
//! ```rust,no_run
//! use std::sync::Arc;
//! use triage_core::pipeline::{FileModelStore, PriorityPipeline};
//!
//! let pipeline = PriorityPipeline::new(Arc::new(FileModelStore::new("model.bin")));
//! let priority = pipeline.predict("renew car insurance");
//! println!("suggested: {}", priority);
//! ```

pub mod classifier;
pub mod metrics;
pub mod model;
pub mod model_store;
pub mod stop_words;
pub mod vectorizer;

pub use classifier::MultinomialNb;
pub use metrics::{ConfusionMatrix, EvaluationMetrics};
pub use model::FittedModel;
pub use model_store::{FileModelStore, InMemoryModelStore, ModelStore};
pub use vectorizer::TfidfVectorizer;

use crate::types::{Priority, TrainingExample};
use serde::Serialize;
use std::sync::Arc;
use tracing::{debug, error, info, warn};

/// Minimum number of labeled tasks before a model is trained or evaluated
pub const MIN_TRAINING_SAMPLES: usize = 10;

/// Returned whenever no usable model exists
pub const DEFAULT_PRIORITY: Priority = Priority::Medium;

/// Result of a training request
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
#[serde(tag = "status", rename_all = "snake_case")]
pub enum TrainingOutcome {
    /// Too few labeled examples; nothing was written
    InsufficientData { have: usize, need: usize },
    /// A new model replaced the old one
    Trained { sample_count: usize },
    /// Fitting or saving failed; the previous artifact is untouched
    Failed { reason: String },
}

impl TrainingOutcome {
    /// Human-readable status line
    pub fn message(&self) -> String {
        match self {
            TrainingOutcome::InsufficientData { have, need } => format!(
                "Not enough data to train. Need at least {} prioritized tasks. You have {}.",
                need, have
            ),
            TrainingOutcome::Trained { sample_count } => format!(
                "Model trained successfully on {} tasks and saved.",
                sample_count
            ),
            TrainingOutcome::Failed { reason } => format!("Error during training: {}", reason),
        }
    }

    /// Short machine-readable status
    pub fn status(&self) -> &'static str {
        match self {
            TrainingOutcome::InsufficientData { .. } => "insufficient_data",
            TrainingOutcome::Trained { .. } => "trained",
            TrainingOutcome::Failed { .. } => "failed",
        }
    }

    /// Number of examples the new model was fit on
    pub fn sample_count(&self) -> Option<usize> {
        match self {
            TrainingOutcome::Trained { sample_count } => Some(*sample_count),
            _ => None,
        }
    }

    pub fn is_trained(&self) -> bool {
        matches!(self, TrainingOutcome::Trained { .. })
    }
}

/// Predict/train/evaluate entry points over an injected model store
#[derive(Clone)]
pub struct PriorityPipeline {
    store: Arc<dyn ModelStore>,
}

impl PriorityPipeline {
    pub fn new(store: Arc<dyn ModelStore>) -> Self {
        Self { store }
    }

    pub fn store(&self) -> &Arc<dyn ModelStore> {
        &self.store
    }

    /// Suggest a priority for new task text
    ///
    /// Falls back to Medium when no model exists or anything goes wrong.
    pub fn predict(&self, text: &str) -> Priority {
        let model = match self.store.load() {
            Ok(Some(model)) => model,
            Ok(None) => {
                debug!("Model file not found, returning default priority");
                return DEFAULT_PRIORITY;
            }
            Err(e) => {
                error!("Error loading model for prediction: {}", e);
                return DEFAULT_PRIORITY;
            }
        };

        match model.predict(text) {
            Ok(priority) => priority,
            Err(e) => {
                error!("Error during prediction: {}", e);
                DEFAULT_PRIORITY
            }
        }
    }

    /// Refit on the whole corpus and replace the stored model
    pub fn train(&self, examples: &[TrainingExample]) -> TrainingOutcome {
        info!("Starting model training...");

        if examples.len() < MIN_TRAINING_SAMPLES {
            let outcome = TrainingOutcome::InsufficientData {
                have: examples.len(),
                need: MIN_TRAINING_SAMPLES,
            };
            info!("{}", outcome.message());
            return outcome;
        }

        info!("Training on {} samples", examples.len());

        let outcome = match FittedModel::fit(examples).and_then(|model| self.store.save(&model)) {
            Ok(()) => TrainingOutcome::Trained {
                sample_count: examples.len(),
            },
            Err(e) => {
                error!("Model training failed: {}", e);
                TrainingOutcome::Failed {
                    reason: e.to_string(),
                }
            }
        };

        info!("{}", outcome.message());
        outcome
    }

    /// Score the stored model against labeled examples
    ///
    /// This is in-sample: the examples are normally the same corpus the
    /// model was fit on, so the numbers measure fit, not generalization.
    pub fn evaluate(&self, examples: &[TrainingExample]) -> EvaluationMetrics {
        if examples.len() < MIN_TRAINING_SAMPLES {
            debug!(
                "Skipping evaluation: {} of {} required samples",
                examples.len(),
                MIN_TRAINING_SAMPLES
            );
            return EvaluationMetrics::insufficient();
        }

        let model = match self.store.load() {
            Ok(Some(model)) => model,
            Ok(None) => {
                debug!("No trained model to evaluate");
                return EvaluationMetrics::insufficient();
            }
            Err(e) => {
                error!("Error loading model for evaluation: {}", e);
                return EvaluationMetrics::insufficient();
            }
        };

        let pairs: Vec<(Priority, Priority)> = examples
            .iter()
            .map(|example| {
                let predicted = model.predict(&example.text).unwrap_or_else(|e| {
                    warn!("Prediction failed during evaluation: {}", e);
                    DEFAULT_PRIORITY
                });
                (example.label, predicted)
            })
            .collect();

        let metrics = EvaluationMetrics::from_predictions(&pairs);
        debug!(
            "Evaluated {} samples, accuracy {:.3}",
            pairs.len(),
            metrics.accuracy.unwrap_or_default()
        );
        metrics
    }
}
