//! In-memory task repository for tests and throwaway sessions.

use crate::error::{Result, TriageError};
use crate::storage::{TaskRepository, TaskSortOrder};
use crate::types::{Priority, Task, TaskId};
use async_trait::async_trait;
use std::collections::HashMap;
use tokio::sync::RwLock;

#[derive(Debug, Default)]
pub struct InMemoryTaskRepository {
    tasks: RwLock<HashMap<TaskId, Task>>,
}

impl InMemoryTaskRepository {
    pub fn new() -> Self {
        Self::default()
    }
}

#[async_trait]
impl TaskRepository for InMemoryTaskRepository {
    async fn insert_task(&self, task: &Task) -> Result<()> {
        let mut tasks = self.tasks.write().await;
        tasks.insert(task.id, task.clone());
        Ok(())
    }

    async fn get_task(&self, id: TaskId) -> Result<Task> {
        let tasks = self.tasks.read().await;
        tasks
            .get(&id)
            .cloned()
            .ok_or_else(|| TriageError::TaskNotFound(id.to_string()))
    }

    async fn list_tasks(&self, sort_by: TaskSortOrder) -> Result<Vec<Task>> {
        let tasks = self.tasks.read().await;
        let mut list: Vec<Task> = tasks.values().cloned().collect();
        sort_by.sort(&mut list);
        Ok(list)
    }

    async fn set_user_priority(&self, id: TaskId, priority: Priority) -> Result<Task> {
        let mut tasks = self.tasks.write().await;
        let task = tasks
            .get_mut(&id)
            .ok_or_else(|| TriageError::TaskNotFound(id.to_string()))?;
        task.user_priority = Some(priority);
        Ok(task.clone())
    }

    async fn delete_task(&self, id: TaskId) -> Result<()> {
        let mut tasks = self.tasks.write().await;
        tasks
            .remove(&id)
            .map(|_| ())
            .ok_or_else(|| TriageError::TaskNotFound(id.to_string()))
    }

    async fn labeled_tasks(&self) -> Result<Vec<Task>> {
        let tasks = self.tasks.read().await;
        let mut labeled: Vec<Task> = tasks.values().filter(|t| t.is_labeled()).cloned().collect();
        labeled.sort_by(|a, b| a.created_at.cmp(&b.created_at));
        Ok(labeled)
    }

    async fn count_tasks(&self) -> Result<usize> {
        Ok(self.tasks.read().await.len())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[tokio::test]
    async fn test_matches_priority_ordering() {
        let repo = InMemoryTaskRepository::new();
        let plain = Task::new("plain".to_string(), Priority::High);
        let labeled = Task::new("labeled".to_string(), Priority::Low);
        repo.insert_task(&plain).await.unwrap();
        repo.insert_task(&labeled).await.unwrap();
        repo.set_user_priority(labeled.id, Priority::Low).await.unwrap();

        let list = repo.list_tasks(TaskSortOrder::Priority).await.unwrap();
        assert_eq!(list[0].id, labeled.id);
        assert_eq!(list[1].id, plain.id);
    }

    #[tokio::test]
    async fn test_delete_removes_training_example() {
        let repo = InMemoryTaskRepository::new();
        let task = Task::new("x".to_string(), Priority::Medium);
        repo.insert_task(&task).await.unwrap();
        repo.set_user_priority(task.id, Priority::High).await.unwrap();
        assert_eq!(repo.labeled_tasks().await.unwrap().len(), 1);

        repo.delete_task(task.id).await.unwrap();
        assert!(repo.labeled_tasks().await.unwrap().is_empty());
        assert!(repo.delete_task(task.id).await.is_err());
    }
}
