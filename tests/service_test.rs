//! End-to-end task flow over a libSQL database and file model store

mod common;

use common::{add_labeled, balanced_corpus, create_test_service};
use triage_core::{Priority, TaskId, TrainingOutcome, TriageError};

#[tokio::test]
async fn test_add_before_training_suggests_medium() {
    let (service, _temp_dir) = create_test_service().await;

    let added = service.add_task("  Call mom  ").await.unwrap();
    assert_eq!(added.data.content, "Call mom");
    assert_eq!(added.data.suggested_priority, Priority::Medium);
    assert_eq!(added.data.user_priority, None);
    assert_eq!(
        added.message,
        "Task added with a suggested priority of 'Medium'"
    );
}

#[tokio::test]
async fn test_empty_content_is_rejected() {
    let (service, _temp_dir) = create_test_service().await;

    let err = service.add_task("   ").await.unwrap_err();
    assert!(matches!(
        err,
        TriageError::Validation(ref msg) if msg == "Task content cannot be empty!"
    ));
    assert!(service.list_tasks().await.unwrap().is_empty());
}

#[tokio::test]
async fn test_overlong_content_is_rejected() {
    let (service, _temp_dir) = create_test_service().await;

    let content = "a".repeat(301);
    assert!(matches!(
        service.add_task(&content).await,
        Err(TriageError::Validation(_))
    ));
    assert!(service.add_task(&"a".repeat(300)).await.is_ok());
}

#[tokio::test]
async fn test_labels_become_training_examples() {
    let (service, _temp_dir) = create_test_service().await;

    add_labeled(&service, "pay rent", Priority::High).await;
    service.add_task("unlabeled errand").await.unwrap();

    let examples = service.training_examples().await.unwrap();
    assert_eq!(examples.len(), 1);
    assert_eq!(examples[0].text, "pay rent");
    assert_eq!(examples[0].label, Priority::High);
}

#[tokio::test]
async fn test_retrain_needs_ten_labels() {
    let (service, _temp_dir) = create_test_service().await;

    for example in balanced_corpus().iter().take(5) {
        add_labeled(&service, &example.text, example.label).await;
    }

    let outcome = service.retrain().await.unwrap();
    assert_eq!(outcome, TrainingOutcome::InsufficientData { have: 5, need: 10 });
    assert!(!service.pipeline().store().exists());

    let report = service.metrics().await.unwrap();
    assert_eq!(report.labeled_count, 5);
    assert!(!report.metrics.is_available());
}

#[tokio::test]
async fn test_full_feedback_loop() {
    let (service, _temp_dir) = create_test_service().await;

    for example in balanced_corpus() {
        add_labeled(&service, &example.text, example.label).await;
    }

    let outcome = service.retrain().await.unwrap();
    assert_eq!(outcome.message(), "Model trained successfully on 12 tasks and saved.");

    let report = service.metrics().await.unwrap();
    assert!(report.model_available);
    assert_eq!(report.labeled_count, 12);
    assert_eq!(report.metrics.total(), Some(12));

    let added = service.add_task("pay overdue electricity invoice").await.unwrap();
    assert_eq!(added.data.suggested_priority, Priority::High);
    assert_eq!(
        added.message,
        "Task added with a suggested priority of 'High'"
    );
}

#[tokio::test]
async fn test_list_orders_by_user_then_suggested_priority() {
    let (service, _temp_dir) = create_test_service().await;

    let unlabeled = service.add_task("first unlabeled").await.unwrap().data;
    add_labeled(&service, "labeled low", Priority::Low).await;
    add_labeled(&service, "labeled high", Priority::High).await;

    let contents: Vec<String> = service
        .list_tasks()
        .await
        .unwrap()
        .into_iter()
        .map(|t| t.content)
        .collect();

    assert_eq!(contents, vec!["labeled high", "labeled low", "first unlabeled"]);
    assert_eq!(unlabeled.suggested_priority, Priority::Medium);
}

#[tokio::test]
async fn test_delete_removes_training_example() {
    let (service, _temp_dir) = create_test_service().await;

    let added = service.add_task("one-off chore").await.unwrap();
    service.set_priority(added.data.id, Priority::Low).await.unwrap();

    let deleted = service.delete_task(added.data.id).await.unwrap();
    assert_eq!(deleted.message, "Task deleted.");
    assert!(service.training_examples().await.unwrap().is_empty());
}

#[tokio::test]
async fn test_unknown_task_is_not_found() {
    let (service, _temp_dir) = create_test_service().await;
    let missing = TaskId::new();

    assert!(matches!(
        service.set_priority(missing, Priority::High).await,
        Err(TriageError::TaskNotFound(_))
    ));
    assert!(matches!(
        service.delete_task(missing).await,
        Err(TriageError::TaskNotFound(_))
    ));
}
