//! Core data types for the triage task system
//!
//! Defines tasks, priority labels, and the training examples derived from
//! user feedback. Priorities use a fixed integer encoding across the whole
//! system: 1 = Low, 2 = Medium, 3 = High.

use crate::error::{Result, TriageError};
use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use std::str::FromStr;
use uuid::Uuid;

/// Priority label for a task
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord, Default)]
pub enum Priority {
    Low,
    #[default]
    Medium,
    High,
}

impl Priority {
    /// All labels in matrix order
    pub const ALL: [Priority; 3] = [Priority::Low, Priority::Medium, Priority::High];

    /// Integer code used in storage and on the wire
    pub fn as_i64(self) -> i64 {
        match self {
            Priority::Low => 1,
            Priority::Medium => 2,
            Priority::High => 3,
        }
    }

    /// Row/column index in a confusion matrix
    pub fn index(self) -> usize {
        (self.as_i64() - 1) as usize
    }

    /// Human-readable name
    pub fn name(self) -> &'static str {
        match self {
            Priority::Low => "Low",
            Priority::Medium => "Medium",
            Priority::High => "High",
        }
    }
}

impl std::fmt::Display for Priority {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "{}", self.name())
    }
}

impl TryFrom<i64> for Priority {
    type Error = TriageError;

    fn try_from(value: i64) -> Result<Self> {
        match value {
            1 => Ok(Priority::Low),
            2 => Ok(Priority::Medium),
            3 => Ok(Priority::High),
            other => Err(TriageError::InvalidPriority(other.to_string())),
        }
    }
}

impl FromStr for Priority {
    type Err = TriageError;

    fn from_str(s: &str) -> Result<Self> {
        match s.trim().to_lowercase().as_str() {
            "1" | "low" => Ok(Priority::Low),
            "2" | "medium" => Ok(Priority::Medium),
            "3" | "high" => Ok(Priority::High),
            _ => Err(TriageError::InvalidPriority(s.to_string())),
        }
    }
}

impl Serialize for Priority {
    fn serialize<S: serde::Serializer>(
        &self,
        serializer: S,
    ) -> std::result::Result<S::Ok, S::Error> {
        serializer.serialize_i64(self.as_i64())
    }
}

impl<'de> Deserialize<'de> for Priority {
    fn deserialize<D: serde::Deserializer<'de>>(
        deserializer: D,
    ) -> std::result::Result<Self, D::Error> {
        let code = i64::deserialize(deserializer)?;
        Priority::try_from(code).map_err(serde::de::Error::custom)
    }
}

/// Display name for a stored priority code
///
/// Anything that is not 1 or 3 reads as "Medium".
pub fn priority_name(code: Option<i64>) -> &'static str {
    match code {
        Some(3) => "High",
        Some(1) => "Low",
        _ => "Medium",
    }
}

/// Unique identifier for tasks
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(transparent)]
pub struct TaskId(pub Uuid);

impl TaskId {
    /// Create a new random task ID
    pub fn new() -> Self {
        Self(Uuid::new_v4())
    }

    /// Parse a task ID from a string
    pub fn from_string(s: &str) -> std::result::Result<Self, uuid::Error> {
        Ok(Self(Uuid::parse_str(s)?))
    }
}

impl Default for TaskId {
    fn default() -> Self {
        Self::new()
    }
}

impl std::fmt::Display for TaskId {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "{}", self.0)
    }
}

/// A to-do item
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Task {
    pub id: TaskId,
    pub content: String,

    /// What the model suggested when the task was added
    pub suggested_priority: Priority,

    /// The user's explicit decision; ground truth for training
    pub user_priority: Option<Priority>,

    pub created_at: DateTime<Utc>,
}

impl Task {
    /// Create a task with the given suggestion and no user label
    pub fn new(content: String, suggested_priority: Priority) -> Self {
        Self {
            id: TaskId::new(),
            content,
            suggested_priority,
            user_priority: None,
            created_at: Utc::now(),
        }
    }

    pub fn is_labeled(&self) -> bool {
        self.user_priority.is_some()
    }
}

/// A (text, label) pair used for training and evaluation
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct TrainingExample {
    pub text: String,
    pub label: Priority,
}

impl TrainingExample {
    pub fn new(text: impl Into<String>, label: Priority) -> Self {
        Self {
            text: text.into(),
            label,
        }
    }

    /// Derive the training corpus from tasks that carry a user label
    pub fn from_tasks<'a>(tasks: impl IntoIterator<Item = &'a Task>) -> Vec<Self> {
        tasks
            .into_iter()
            .filter_map(|task| {
                task.user_priority
                    .map(|label| Self::new(task.content.clone(), label))
            })
            .collect()
    }
}
