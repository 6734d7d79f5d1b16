//! Triage - a to-do list that learns how you prioritize
//!
//! Every new task gets a suggested priority (Low, Medium, High) from a text
//! classifier trained on the priorities you assigned to earlier tasks:
//! - TF-IDF features over word unigrams and bigrams, English stop words removed
//! - Multinomial naive Bayes over those features
//! - Medium whenever no usable model exists
//!
//! # Architecture
//!
//! - **Types**: Core data structures (Task, Priority, TrainingExample)
//! - **Pipeline**: Vectorizer, classifier, and the predict/train/evaluate entry points
//! - **Storage**: Task repositories (libSQL, in-memory)
//! - **Service**: Glue between the repository and the pipeline
//! - **API**: JSON HTTP surface
//!
//! # Example
//!
//! ```ignore
//! use std::sync::Arc;
//! use triage_core::{FileModelStore, InMemoryTaskRepository, PriorityPipeline, TaskService};
//!
//! #[tokio::main]
//! async fn main() -> triage_core::Result<()> {
//!     let pipeline = PriorityPipeline::new(Arc::new(FileModelStore::new("model.bin")));
//!     let service = TaskService::new(Arc::new(InMemoryTaskRepository::new()), pipeline);
//!
//!     let added = service.add_task("File quarterly taxes").await?;
//!     println!("{}", added.message);
//!     Ok(())
//! }
//! ```

pub mod api;
pub mod config;
pub mod error;
pub mod pipeline;
pub mod service;
pub mod storage;
pub mod types;

// Re-export commonly used types
pub use config::TriageConfig;
pub use error::{Result, TriageError};
pub use pipeline::{
    EvaluationMetrics, FileModelStore, InMemoryModelStore, ModelStore, PriorityPipeline,
    TrainingOutcome, DEFAULT_PRIORITY, MIN_TRAINING_SAMPLES,
};
pub use service::{MetricsReport, Notice, TaskService};
pub use storage::{
    ConnectionMode, InMemoryTaskRepository, LibsqlTaskRepository, TaskRepository, TaskSortOrder,
};
pub use types::{Priority, Task, TaskId, TrainingExample};
