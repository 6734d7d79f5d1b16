//! Task service: the driver that connects the task store to the pipeline.
//!
//! Every user-facing action (add, label, delete, retrain, dashboard) goes
//! through here, so the HTTP layer and the CLI share one implementation.

use crate::error::{Result, TriageError};
use crate::pipeline::{EvaluationMetrics, PriorityPipeline, TrainingOutcome};
use crate::storage::{TaskRepository, TaskSortOrder};
use crate::types::{Priority, Task, TaskId, TrainingExample};
use serde::Serialize;
use std::sync::Arc;
use tracing::{debug, info};

/// Default cap on task content length, in characters
pub const DEFAULT_MAX_CONTENT_LEN: usize = 300;

/// A result plus the status line shown to the user
#[derive(Debug, Clone, Serialize)]
pub struct Notice<T> {
    #[serde(flatten)]
    pub data: T,
    pub message: String,
}

impl<T> Notice<T> {
    fn new(data: T, message: impl Into<String>) -> Self {
        Self {
            data,
            message: message.into(),
        }
    }
}

#[derive(Debug, Clone, Serialize)]
pub struct DeletedTask {
    pub id: TaskId,
}

/// Dashboard payload: metrics plus how many labeled tasks fed them
#[derive(Debug, Clone, Serialize)]
pub struct MetricsReport {
    #[serde(flatten)]
    pub metrics: EvaluationMetrics,
    pub labeled_count: usize,
    pub total_tasks: usize,
    pub model_available: bool,
}

/// Task operations over an injected repository and pipeline
#[derive(Clone)]
pub struct TaskService {
    repo: Arc<dyn TaskRepository>,
    pipeline: PriorityPipeline,
    max_content_len: usize,
}

impl TaskService {
    pub fn new(repo: Arc<dyn TaskRepository>, pipeline: PriorityPipeline) -> Self {
        Self {
            repo,
            pipeline,
            max_content_len: DEFAULT_MAX_CONTENT_LEN,
        }
    }

    pub fn with_max_content_len(mut self, max_content_len: usize) -> Self {
        self.max_content_len = max_content_len;
        self
    }

    pub fn pipeline(&self) -> &PriorityPipeline {
        &self.pipeline
    }

    fn validate_content(&self, content: &str) -> Result<String> {
        let trimmed = content.trim();
        if trimmed.is_empty() {
            return Err(TriageError::Validation("Task content cannot be empty!".to_string()));
        }
        if trimmed.chars().count() > self.max_content_len {
            return Err(TriageError::Validation(format!(
                "Task content cannot exceed {} characters",
                self.max_content_len
            )));
        }
        Ok(trimmed.to_string())
    }

    /// Add a task with a model-suggested priority
    pub async fn add_task(&self, content: &str) -> Result<Notice<Task>> {
        let content = self.validate_content(content)?;
        let suggested = self.pipeline.predict(&content);
        let task = Task::new(content, suggested);

        self.repo.insert_task(&task).await?;
        info!("Added task {} with suggested priority {}", task.id, suggested);

        let message = format!("Task added with a suggested priority of '{}'", suggested);
        Ok(Notice::new(task, message))
    }

    /// Record the user's priority; this becomes a training label
    pub async fn set_priority(&self, id: TaskId, priority: Priority) -> Result<Notice<Task>> {
        let task = self.repo.set_user_priority(id, priority).await?;
        debug!("Task {} labeled {}", id, priority);
        Ok(Notice::new(task, "Task priority updated!"))
    }

    pub async fn delete_task(&self, id: TaskId) -> Result<Notice<DeletedTask>> {
        self.repo.delete_task(id).await?;
        Ok(Notice::new(DeletedTask { id }, "Task deleted."))
    }

    /// All tasks, labeled first, highest priority first
    pub async fn list_tasks(&self) -> Result<Vec<Task>> {
        self.list_tasks_by(TaskSortOrder::Priority).await
    }

    pub async fn list_tasks_by(&self, order: TaskSortOrder) -> Result<Vec<Task>> {
        self.repo.list_tasks(order).await
    }

    /// Current training corpus
    pub async fn training_examples(&self) -> Result<Vec<TrainingExample>> {
        let labeled = self.repo.labeled_tasks().await?;
        Ok(TrainingExample::from_tasks(&labeled))
    }

    /// Refit the model on every labeled task
    pub async fn retrain(&self) -> Result<TrainingOutcome> {
        let examples = self.training_examples().await?;
        Ok(self.pipeline.train(&examples))
    }

    /// Evaluate the live model on every labeled task
    pub async fn metrics(&self) -> Result<MetricsReport> {
        let examples = self.training_examples().await?;
        let metrics = self.pipeline.evaluate(&examples);
        Ok(MetricsReport {
            metrics,
            labeled_count: examples.len(),
            total_tasks: self.repo.count_tasks().await?,
            model_available: self.pipeline.store().exists(),
        })
    }

    /// Suggest a priority without storing anything
    pub fn suggest(&self, content: &str) -> Result<Priority> {
        let content = self.validate_content(content)?;
        Ok(self.pipeline.predict(&content))
    }
}
