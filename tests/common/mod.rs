//! Common test utilities and helpers

#![allow(dead_code)]

use std::sync::Arc;
use tempfile::TempDir;
use triage_core::{
    ConnectionMode, FileModelStore, LibsqlTaskRepository, Priority, PriorityPipeline, TaskService,
    TrainingExample,
};

/// Twelve labeled tasks, four per priority, with distinct vocabulary per class
pub fn balanced_corpus() -> Vec<TrainingExample> {
    let low = [
        "water the garden plants",
        "sort old photo albums",
        "browse garden catalog ideas",
        "organize photo bookshelf",
    ];
    let medium = [
        "schedule dentist checkup appointment",
        "renew library membership card",
        "book dentist cleaning visit",
        "return library books",
    ];
    let high = [
        "pay overdue electricity bill today",
        "submit tax return before deadline",
        "pay rent before deadline",
        "fix production server outage",
    ];

    low.iter()
        .map(|t| TrainingExample::new(*t, Priority::Low))
        .chain(medium.iter().map(|t| TrainingExample::new(*t, Priority::Medium)))
        .chain(high.iter().map(|t| TrainingExample::new(*t, Priority::High)))
        .collect()
}

/// Service over a scratch libSQL database and model file
///
/// Keep the returned `TempDir` alive for the duration of the test.
pub async fn create_test_service() -> (TaskService, TempDir) {
    let temp_dir = TempDir::new().expect("Failed to create temp dir");
    let db_path = temp_dir.path().join("tasks.db");
    let model_path = temp_dir.path().join("model.bin");

    let repo = LibsqlTaskRepository::new(ConnectionMode::Local(
        db_path.to_string_lossy().to_string(),
    ))
    .await
    .expect("Failed to create test repository");
    let pipeline = PriorityPipeline::new(Arc::new(FileModelStore::new(model_path)));

    (TaskService::new(Arc::new(repo), pipeline), temp_dir)
}

/// Add a task and immediately label it
pub async fn add_labeled(service: &TaskService, content: &str, priority: Priority) {
    let added = service
        .add_task(content)
        .await
        .expect("Failed to add task");
    service
        .set_priority(added.data.id, priority)
        .await
        .expect("Failed to set priority");
}
