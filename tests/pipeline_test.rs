//! Pipeline behavior against a file-backed model store

mod common;

use common::balanced_corpus;
use std::sync::Arc;
use tempfile::TempDir;
use triage_core::{
    FileModelStore, InMemoryModelStore, ModelStore, Priority, PriorityPipeline, TrainingExample,
    TrainingOutcome,
};

fn file_pipeline(temp_dir: &TempDir) -> (PriorityPipeline, Arc<FileModelStore>) {
    let store = Arc::new(FileModelStore::new(temp_dir.path().join("model.bin")));
    (PriorityPipeline::new(store.clone()), store)
}

#[test]
fn test_predict_without_artifact_is_medium() {
    let temp_dir = TempDir::new().unwrap();
    let (pipeline, store) = file_pipeline(&temp_dir);

    assert!(!store.exists());
    assert_eq!(pipeline.predict("call the plumber"), Priority::Medium);
}

#[test]
fn test_five_examples_do_not_train() {
    let temp_dir = TempDir::new().unwrap();
    let (pipeline, store) = file_pipeline(&temp_dir);
    let examples: Vec<TrainingExample> = balanced_corpus().into_iter().take(5).collect();

    let outcome = pipeline.train(&examples);

    assert_eq!(
        outcome.message(),
        "Not enough data to train. Need at least 10 prioritized tasks. You have 5."
    );
    assert!(!store.exists());
}

#[test]
fn test_insufficient_data_leaves_existing_artifact_alone() {
    let temp_dir = TempDir::new().unwrap();
    let (pipeline, store) = file_pipeline(&temp_dir);

    assert!(pipeline.train(&balanced_corpus()).is_trained());
    let before = std::fs::read(store.path()).unwrap();

    let few: Vec<TrainingExample> = balanced_corpus().into_iter().take(9).collect();
    let outcome = pipeline.train(&few);

    assert!(matches!(outcome, TrainingOutcome::InsufficientData { have: 9, need: 10 }));
    assert_eq!(std::fs::read(store.path()).unwrap(), before);
}

#[test]
fn test_twelve_examples_train_and_evaluate() {
    let temp_dir = TempDir::new().unwrap();
    let (pipeline, store) = file_pipeline(&temp_dir);
    let examples = balanced_corpus();

    let outcome = pipeline.train(&examples);
    assert_eq!(
        outcome.message(),
        "Model trained successfully on 12 tasks and saved."
    );
    assert!(store.exists());

    let metrics = pipeline.evaluate(&examples);
    let accuracy = metrics.accuracy.expect("accuracy should be present");
    assert!((0.0..=1.0).contains(&accuracy));

    let matrix = metrics.confusion_matrix.expect("matrix should be present");
    let counts = metrics.priority_counts.expect("counts should be present");
    let total: u64 = matrix.iter().flatten().sum();
    assert_eq!(total, 12);

    for (row, priority) in matrix.iter().zip(Priority::ALL) {
        assert_eq!(row.iter().sum::<u64>(), counts[priority.name()]);
        assert_eq!(counts[priority.name()], 4);
    }
}

#[test]
fn test_predict_on_training_text_returns_valid_label() {
    let temp_dir = TempDir::new().unwrap();
    let (pipeline, _store) = file_pipeline(&temp_dir);
    let examples = balanced_corpus();
    pipeline.train(&examples);

    for example in &examples {
        let predicted = pipeline.predict(&example.text);
        assert!(Priority::ALL.contains(&predicted));
    }
}

#[test]
fn test_separable_corpus_is_fit() {
    let temp_dir = TempDir::new().unwrap();
    let (pipeline, _store) = file_pipeline(&temp_dir);
    pipeline.train(&balanced_corpus());

    assert_eq!(pipeline.predict("pay the overdue bill"), Priority::High);
    assert_eq!(pipeline.predict("water garden"), Priority::Low);
}

#[test]
fn test_evaluate_is_idempotent() {
    let temp_dir = TempDir::new().unwrap();
    let (pipeline, _store) = file_pipeline(&temp_dir);
    let examples = balanced_corpus();
    pipeline.train(&examples);

    let first = pipeline.evaluate(&examples);
    let second = pipeline.evaluate(&examples);
    assert_eq!(first, second);
}

#[test]
fn test_evaluate_without_artifact_is_null() {
    let temp_dir = TempDir::new().unwrap();
    let (pipeline, _store) = file_pipeline(&temp_dir);

    let metrics = pipeline.evaluate(&balanced_corpus());
    assert!(metrics.accuracy.is_none());
    assert!(metrics.confusion_matrix.is_none());
    assert!(metrics.priority_counts.is_none());
}

#[test]
fn test_evaluate_below_threshold_is_null() {
    let pipeline = PriorityPipeline::new(Arc::new(InMemoryModelStore::new()));
    pipeline.train(&balanced_corpus());

    let few: Vec<TrainingExample> = balanced_corpus().into_iter().take(9).collect();
    let metrics = pipeline.evaluate(&few);
    assert!(!metrics.is_available());

    let json = serde_json::to_value(&metrics).unwrap();
    assert!(json["accuracy"].is_null());
    assert!(json["confusion_matrix"].is_null());
    assert!(json["priority_counts"].is_null());
}

#[test]
fn test_corrupt_artifact_falls_back() {
    let temp_dir = TempDir::new().unwrap();
    let (pipeline, store) = file_pipeline(&temp_dir);
    std::fs::write(store.path(), b"definitely not a model").unwrap();

    assert_eq!(pipeline.predict("pay rent"), Priority::Medium);
    assert!(!pipeline.evaluate(&balanced_corpus()).is_available());
}

#[test]
fn test_retrain_replaces_vocabulary() {
    let temp_dir = TempDir::new().unwrap();
    let (pipeline, store) = file_pipeline(&temp_dir);
    pipeline.train(&balanced_corpus());

    let relabeled: Vec<TrainingExample> = (0..10)
        .map(|i| {
            let label = if i % 2 == 0 { Priority::High } else { Priority::Low };
            TrainingExample::new(format!("quarterly report draft{}", i), label)
        })
        .collect();
    assert!(pipeline.train(&relabeled).is_trained());

    let model = store.load().unwrap().unwrap();
    assert_eq!(model.sample_count, 10);
    assert!(!model.vectorizer.vocabulary().contains_key("garden"));
    assert!(model.vectorizer.vocabulary().contains_key("quarterly report"));
}
