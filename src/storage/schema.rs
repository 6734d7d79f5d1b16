//! Database schema for tasks.

use crate::error::{Result, TriageError};

/// Create the tasks table and its indexes
///
/// Safe to call multiple times (uses IF NOT EXISTS).
pub async fn init_task_tables(conn: &libsql::Connection) -> Result<()> {
    conn.execute(
        r#"
        CREATE TABLE IF NOT EXISTS tasks (
            id TEXT PRIMARY KEY NOT NULL,
            content TEXT NOT NULL CHECK(length(content) > 0),
            suggested_priority INTEGER NOT NULL DEFAULT 2 CHECK(suggested_priority BETWEEN 1 AND 3),
            user_priority INTEGER CHECK(user_priority IS NULL OR user_priority BETWEEN 1 AND 3),
            created_at TEXT NOT NULL
        )
        "#,
        libsql::params![],
    )
    .await
    .map_err(|e| TriageError::Database(format!("Failed to create tasks table: {}", e)))?;

    conn.execute(
        "CREATE INDEX IF NOT EXISTS idx_tasks_priority ON tasks(user_priority, suggested_priority)",
        libsql::params![],
    )
    .await
    .map_err(|e| TriageError::Database(format!("Failed to create index: {}", e)))?;

    tracing::debug!("Task database schema initialized");
    Ok(())
}
