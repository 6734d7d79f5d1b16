//! Storage layer for tasks
//!
//! The repository is passed explicitly into whatever drives the pipeline;
//! the pipeline itself never touches storage.

pub mod libsql;
pub mod memory;
pub mod schema;

pub use self::libsql::{ConnectionMode, LibsqlTaskRepository};
pub use self::memory::InMemoryTaskRepository;

use crate::error::Result;
use crate::types::{Priority, Task, TaskId};
use async_trait::async_trait;

/// Task persistence operations
#[async_trait]
pub trait TaskRepository: Send + Sync {
    /// Store a new task
    async fn insert_task(&self, task: &Task) -> Result<()>;

    /// Retrieve a task by ID
    async fn get_task(&self, id: TaskId) -> Result<Task>;

    /// List all tasks in the requested order
    async fn list_tasks(&self, sort_by: TaskSortOrder) -> Result<Vec<Task>>;

    /// Record the user's priority decision
    async fn set_user_priority(&self, id: TaskId, priority: Priority) -> Result<Task>;

    /// Remove a task (and with it, its training example)
    async fn delete_task(&self, id: TaskId) -> Result<()>;

    /// Tasks with a user priority, oldest first
    async fn labeled_tasks(&self) -> Result<Vec<Task>>;

    /// Total number of tasks
    async fn count_tasks(&self) -> Result<usize>;
}

/// Sort order for listing tasks
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub enum TaskSortOrder {
    /// User priority first (unset last), then suggestion, then oldest
    #[default]
    Priority,
    /// Newest first
    Recent,
}

impl TaskSortOrder {
    /// Apply this ordering to an in-memory list
    pub fn sort(self, tasks: &mut [Task]) {
        match self {
            TaskSortOrder::Priority => tasks.sort_by(|a, b| {
                b.user_priority
                    .map(Priority::as_i64)
                    .unwrap_or(0)
                    .cmp(&a.user_priority.map(Priority::as_i64).unwrap_or(0))
                    .then_with(|| b.suggested_priority.cmp(&a.suggested_priority))
                    .then_with(|| a.created_at.cmp(&b.created_at))
            }),
            TaskSortOrder::Recent => tasks.sort_by(|a, b| b.created_at.cmp(&a.created_at)),
        }
    }
}
