//! LibSQL task repository
//!
//! Persists tasks in a local libSQL (SQLite) database. A single connection is
//! held for the repository's lifetime so in-memory databases keep their
//! schema between calls.

use crate::error::{Result, TriageError};
use crate::storage::schema::init_task_tables;
use crate::storage::{TaskRepository, TaskSortOrder};
use crate::types::{Priority, Task, TaskId};
use async_trait::async_trait;
use chrono::{DateTime, SecondsFormat, Utc};
use libsql::{params, Builder, Connection, Database};
use std::path::Path;
use tracing::{debug, info};

const SELECT_COLUMNS: &str =
    "SELECT id, content, suggested_priority, user_priority, created_at FROM tasks";

/// Database connection mode
#[derive(Debug, Clone)]
pub enum ConnectionMode {
    /// Local file-based database
    Local(String),
    /// In-memory database (for testing)
    InMemory,
}

/// Task repository backed by libSQL
pub struct LibsqlTaskRepository {
    _db: Database,
    conn: Connection,
}

impl LibsqlTaskRepository {
    /// Open (creating if needed) a task database and ensure the schema exists
    pub async fn new(mode: ConnectionMode) -> Result<Self> {
        let db = match &mode {
            ConnectionMode::Local(path) => {
                Self::validate_database_file(path)?;
                if let Some(parent) = Path::new(path).parent() {
                    if !parent.as_os_str().is_empty() {
                        std::fs::create_dir_all(parent)?;
                    }
                }
                info!("Opening task database: {}", path);
                Builder::new_local(path).build().await
            }
            ConnectionMode::InMemory => {
                debug!("Opening in-memory task database");
                Builder::new_local(":memory:").build().await
            }
        }
        .map_err(|e| TriageError::Database(format!("Failed to open database: {}", e)))?;

        let conn = db
            .connect()
            .map_err(|e| TriageError::Database(format!("Failed to get connection: {}", e)))?;

        init_task_tables(&conn).await?;

        Ok(Self { _db: db, conn })
    }

    /// Reject files that exist but are not SQLite databases
    fn validate_database_file(db_path: &str) -> Result<()> {
        let path = Path::new(db_path);
        if !path.exists() {
            return Ok(());
        }

        let bytes = std::fs::read(path)?;
        // An empty file is a fresh database
        if bytes.is_empty() {
            return Ok(());
        }
        if bytes.len() < 16 || &bytes[0..16] != b"SQLite format 3\0" {
            return Err(TriageError::Database(format!(
                "Database file at '{}' is corrupted or not a valid SQLite database",
                db_path
            )));
        }
        Ok(())
    }

    fn format_timestamp(ts: &DateTime<Utc>) -> String {
        // Fixed width so lexical order matches chronological order
        ts.to_rfc3339_opts(SecondsFormat::Micros, true)
    }

    fn row_to_task(row: &libsql::Row) -> Result<Task> {
        let id_str: String = row.get(0)?;
        let content: String = row.get(1)?;
        let suggested: i64 = row.get(2)?;
        let user: Option<i64> = row.get(3)?;
        let created_at_str: String = row.get(4)?;

        let created_at = DateTime::parse_from_rfc3339(&created_at_str)
            .map_err(|e| {
                TriageError::Database(format!("Invalid created_at '{}': {}", created_at_str, e))
            })?
            .with_timezone(&Utc);

        Ok(Task {
            id: TaskId::from_string(&id_str)?,
            content,
            suggested_priority: Priority::try_from(suggested)?,
            user_priority: user.map(Priority::try_from).transpose()?,
            created_at,
        })
    }

    async fn query_tasks(&self, sql: &str, args: Vec<libsql::Value>) -> Result<Vec<Task>> {
        let mut rows = self
            .conn
            .query(sql, args)
            .await
            .map_err(|e| TriageError::Database(format!("Failed to fetch tasks: {}", e)))?;

        let mut tasks = Vec::new();
        while let Some(row) = rows
            .next()
            .await
            .map_err(|e| TriageError::Database(format!("Failed to read row: {}", e)))?
        {
            tasks.push(Self::row_to_task(&row)?);
        }
        Ok(tasks)
    }
}

#[async_trait]
impl TaskRepository for LibsqlTaskRepository {
    async fn insert_task(&self, task: &Task) -> Result<()> {
        debug!("Storing task: {}", task.id);

        self.conn
            .execute(
                r#"
                INSERT INTO tasks (id, content, suggested_priority, user_priority, created_at)
                VALUES (?, ?, ?, ?, ?)
                "#,
                params![
                    task.id.to_string(),
                    task.content.clone(),
                    task.suggested_priority.as_i64(),
                    task.user_priority.map(Priority::as_i64),
                    Self::format_timestamp(&task.created_at),
                ],
            )
            .await
            .map_err(|e| TriageError::Database(format!("Failed to insert task: {}", e)))?;

        Ok(())
    }

    async fn get_task(&self, id: TaskId) -> Result<Task> {
        let sql = format!("{} WHERE id = ?", SELECT_COLUMNS);
        self.query_tasks(&sql, vec![id.to_string().into()])
            .await?
            .into_iter()
            .next()
            .ok_or_else(|| TriageError::TaskNotFound(id.to_string()))
    }

    async fn list_tasks(&self, sort_by: TaskSortOrder) -> Result<Vec<Task>> {
        let order = match sort_by {
            // NULL sorts lowest in SQLite, so unlabeled tasks land last under DESC
            TaskSortOrder::Priority => {
                "ORDER BY user_priority DESC, suggested_priority DESC, created_at ASC"
            }
            TaskSortOrder::Recent => "ORDER BY created_at DESC",
        };
        let sql = format!("{} {}", SELECT_COLUMNS, order);
        self.query_tasks(&sql, Vec::new()).await
    }

    async fn set_user_priority(&self, id: TaskId, priority: Priority) -> Result<Task> {
        debug!("Setting user priority {} on task {}", priority, id);

        let changed = self
            .conn
            .execute(
                "UPDATE tasks SET user_priority = ? WHERE id = ?",
                params![priority.as_i64(), id.to_string()],
            )
            .await
            .map_err(|e| TriageError::Database(format!("Failed to update priority: {}", e)))?;

        if changed == 0 {
            return Err(TriageError::TaskNotFound(id.to_string()));
        }

        self.get_task(id).await
    }

    async fn delete_task(&self, id: TaskId) -> Result<()> {
        let changed = self
            .conn
            .execute("DELETE FROM tasks WHERE id = ?", params![id.to_string()])
            .await
            .map_err(|e| TriageError::Database(format!("Failed to delete task: {}", e)))?;

        if changed == 0 {
            return Err(TriageError::TaskNotFound(id.to_string()));
        }

        debug!("Deleted task {}", id);
        Ok(())
    }

    async fn labeled_tasks(&self) -> Result<Vec<Task>> {
        let sql = format!(
            "{} WHERE user_priority IS NOT NULL ORDER BY created_at ASC",
            SELECT_COLUMNS
        );
        self.query_tasks(&sql, Vec::new()).await
    }

    async fn count_tasks(&self) -> Result<usize> {
        let mut rows = self
            .conn
            .query("SELECT COUNT(*) FROM tasks", params![])
            .await
            .map_err(|e| TriageError::Database(format!("Failed to count tasks: {}", e)))?;

        let row = rows
            .next()
            .await
            .map_err(|e| TriageError::Database(format!("Failed to read row: {}", e)))?
            .ok_or_else(|| TriageError::Database("COUNT returned no rows".to_string()))?;

        let count: i64 = row.get(0)?;
        Ok(count as usize)
    }
}
