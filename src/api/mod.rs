//! HTTP API for tasks and the priority model
//!
//! Provides:
//! - Task CRUD with model-suggested priorities
//! - User priority overrides (training labels)
//! - Retraining trigger and dashboard metrics

pub mod error;
pub mod server;

pub use error::ApiError;
pub use server::{build_router, ApiServer, ApiServerConfig};
