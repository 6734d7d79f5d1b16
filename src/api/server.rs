//! HTTP API server
//!
//! JSON replacement for the to-do web pages: list, add, label, delete,
//! retrain, and the metrics dashboard feed.

use super::error::ApiError;
use crate::service::{DeletedTask, MetricsReport, Notice, TaskService};
use crate::types::{priority_name, Priority, Task, TaskId};
use axum::{
    extract::{rejection::JsonRejection, Path, State},
    http::StatusCode,
    routing::{delete, get, post},
    Json, Router,
};
use serde::{Deserialize, Serialize};
use std::net::SocketAddr;
use tower_http::{cors::CorsLayer, trace::TraceLayer};
use tracing::{debug, info};

/// API server configuration
#[derive(Debug, Clone)]
pub struct ApiServerConfig {
    /// Server address
    pub addr: SocketAddr,
}

impl Default for ApiServerConfig {
    fn default() -> Self {
        Self {
            addr: ([127, 0, 0, 1], 5000).into(),
        }
    }
}

/// API server state
#[derive(Clone)]
struct AppState {
    service: TaskService,
}

/// API server
pub struct ApiServer {
    config: ApiServerConfig,
    service: TaskService,
}

impl ApiServer {
    pub fn new(config: ApiServerConfig, service: TaskService) -> Self {
        Self { config, service }
    }

    /// Bind and serve until Ctrl-C
    pub async fn serve(self) -> anyhow::Result<()> {
        let router = build_router(self.service);
        let listener = tokio::net::TcpListener::bind(self.config.addr).await?;
        info!("API server listening on http://{}", listener.local_addr()?);

        axum::serve(listener, router)
            .with_graceful_shutdown(shutdown_signal())
            .await?;

        info!("API server stopped");
        Ok(())
    }
}

async fn shutdown_signal() {
    if let Err(e) = tokio::signal::ctrl_c().await {
        tracing::warn!("Failed to listen for shutdown signal: {}", e);
        std::future::pending::<()>().await;
    }
    debug!("Shutdown signal received");
}

/// Build the router over a task service
pub fn build_router(service: TaskService) -> Router {
    Router::new()
        .route("/tasks", get(list_tasks_handler).post(add_task_handler))
        .route("/tasks/:id", delete(delete_task_handler))
        .route("/tasks/:id/priority", post(set_priority_handler))
        .route("/predict", post(predict_handler))
        .route("/retrain", post(retrain_handler))
        .route("/metrics", get(metrics_handler))
        .route("/health", get(health_handler))
        .with_state(AppState { service })
        .layer(CorsLayer::permissive())
        .layer(TraceLayer::new_for_http())
}

/// Task with display names for its priorities
///
/// `priority_name` is what the task list shows: the user's priority, or
/// Medium while the task is unlabeled.
#[derive(Debug, Serialize)]
struct TaskView {
    #[serde(flatten)]
    task: Task,
    suggested_priority_name: &'static str,
    priority_name: &'static str,
}

impl From<Task> for TaskView {
    fn from(task: Task) -> Self {
        Self {
            suggested_priority_name: task.suggested_priority.name(),
            priority_name: priority_name(task.user_priority.map(Priority::as_i64)),
            task,
        }
    }
}

fn parse_task_id(raw: &str) -> Result<TaskId, ApiError> {
    TaskId::from_string(raw).map_err(|_| ApiError::bad_request(format!("Invalid task ID: {}", raw)))
}

/// Accepts 1/2/3 or "low"/"medium"/"high"
fn parse_priority(value: &serde_json::Value) -> Result<Priority, ApiError> {
    match value {
        serde_json::Value::Number(n) => n
            .as_i64()
            .ok_or_else(|| ApiError::bad_request(format!("Invalid priority: {}", n)))
            .and_then(|code| Priority::try_from(code).map_err(ApiError::from)),
        serde_json::Value::String(s) => s.parse::<Priority>().map_err(ApiError::from),
        other => Err(ApiError::bad_request(format!("Invalid priority: {}", other))),
    }
}

/// List tasks handler
async fn list_tasks_handler(
    State(state): State<AppState>,
) -> Result<Json<Vec<TaskView>>, ApiError> {
    let tasks = state.service.list_tasks().await?;
    Ok(Json(tasks.into_iter().map(TaskView::from).collect()))
}

#[derive(Debug, Deserialize)]
struct AddTaskRequest {
    content: String,
}

/// Add task handler
async fn add_task_handler(
    State(state): State<AppState>,
    payload: Result<Json<AddTaskRequest>, JsonRejection>,
) -> Result<(StatusCode, Json<Notice<TaskView>>), ApiError> {
    let Json(req) = payload?;
    let added = state.service.add_task(&req.content).await?;
    Ok((
        StatusCode::CREATED,
        Json(Notice {
            data: TaskView::from(added.data),
            message: added.message,
        }),
    ))
}

#[derive(Debug, Deserialize)]
struct SetPriorityRequest {
    priority: serde_json::Value,
}

/// Set user priority handler
async fn set_priority_handler(
    State(state): State<AppState>,
    Path(id): Path<String>,
    payload: Result<Json<SetPriorityRequest>, JsonRejection>,
) -> Result<Json<Notice<TaskView>>, ApiError> {
    let Json(req) = payload?;
    let id = parse_task_id(&id)?;
    let priority = parse_priority(&req.priority)?;
    let updated = state.service.set_priority(id, priority).await?;
    Ok(Json(Notice {
        data: TaskView::from(updated.data),
        message: updated.message,
    }))
}

/// Delete task handler
async fn delete_task_handler(
    State(state): State<AppState>,
    Path(id): Path<String>,
) -> Result<Json<Notice<DeletedTask>>, ApiError> {
    let id = parse_task_id(&id)?;
    Ok(Json(state.service.delete_task(id).await?))
}

#[derive(Debug, Deserialize)]
struct PredictRequest {
    content: String,
}

#[derive(Debug, Serialize)]
struct PredictResponse {
    priority: Priority,
    priority_name: &'static str,
}

/// Predict handler (no side effects)
async fn predict_handler(
    State(state): State<AppState>,
    payload: Result<Json<PredictRequest>, JsonRejection>,
) -> Result<Json<PredictResponse>, ApiError> {
    let Json(req) = payload?;
    let priority = state.service.suggest(&req.content)?;
    Ok(Json(PredictResponse {
        priority,
        priority_name: priority.name(),
    }))
}

#[derive(Debug, Serialize)]
struct RetrainResponse {
    status: &'static str,
    message: String,
    sample_count: Option<usize>,
}

/// Retrain handler
async fn retrain_handler(State(state): State<AppState>) -> Result<Json<RetrainResponse>, ApiError> {
    let outcome = state.service.retrain().await?;
    Ok(Json(RetrainResponse {
        status: outcome.status(),
        message: outcome.message(),
        sample_count: outcome.sample_count(),
    }))
}

/// Dashboard metrics handler
async fn metrics_handler(State(state): State<AppState>) -> Result<Json<MetricsReport>, ApiError> {
    Ok(Json(state.service.metrics().await?))
}

/// Health check handler
#[derive(Debug, Serialize)]
struct HealthResponse {
    status: String,
    version: String,
    model_available: bool,
}

async fn health_handler(State(state): State<AppState>) -> Json<HealthResponse> {
    Json(HealthResponse {
        status: "ok".to_string(),
        version: env!("CARGO_PKG_VERSION").to_string(),
        model_available: state.service.pipeline().store().exists(),
    })
}
