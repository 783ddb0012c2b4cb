//! HTTP surface: route table and handlers.
//!
//! Handlers validate, call the repository, and map outcomes to statuses:
//! 422 for schema/enum violations, 400 for unparsable due dates, 404 for
//! anything that reads as "no such task", 500 for store failures.

use axum::extract::{Path, Query, State};
use axum::http::StatusCode;
use axum::routing::get;
use axum::{Json, Router};
use serde::Deserialize;
use serde_json::{json, Value};
use std::sync::Arc;
use tower_http::cors::{Any, CorsLayer};
use tower_http::trace::TraceLayer;

use crate::error::ApiError;
use crate::model::{CreateTaskRequest, TaskResponse, UpdateTaskRequest};
use crate::repo::{TaskFilter, TaskRepository};

// ── Shared state ───────────────────────────────────────────────

pub struct AppState {
    pub repo: TaskRepository,
}

pub type SharedState = Arc<AppState>;

// ── Router ─────────────────────────────────────────────────────

pub fn router(state: SharedState) -> Router {
    Router::new()
        .route("/", get(root))
        .route("/health", get(health))
        .route("/api/tasks", get(list_tasks).post(create_task))
        .route(
            "/api/tasks/:id",
            get(get_task).put(update_task).delete(delete_task),
        )
        .with_state(state)
        .layer(
            CorsLayer::new()
                .allow_origin(Any)
                .allow_methods(Any)
                .allow_headers(Any),
        )
        .layer(TraceLayer::new_for_http())
}

// ── Handlers ───────────────────────────────────────────────────

pub async fn root() -> Json<Value> {
    Json(json!({ "message": "Task Manager API is running!" }))
}

pub async fn health() -> Json<Value> {
    Json(json!({ "status": "healthy" }))
}

// POST /api/tasks
pub async fn create_task(
    State(state): State<SharedState>,
    Json(payload): Json<CreateTaskRequest>,
) -> Result<(StatusCode, Json<TaskResponse>), ApiError> {
    validate_title(&payload.title)?;
    let task = state.repo.create(payload)?;
    Ok((StatusCode::CREATED, Json(task)))
}

#[derive(Debug, Deserialize)]
pub struct ListParams {
    #[serde(default)]
    pub skip: usize,
    #[serde(default = "default_limit")]
    pub limit: usize,
    pub status: Option<String>,
    pub priority: Option<String>,
    pub search: Option<String>,
}

fn default_limit() -> usize {
    10
}

// GET /api/tasks
pub async fn list_tasks(
    State(state): State<SharedState>,
    Query(params): Query<ListParams>,
) -> Result<Json<Vec<TaskResponse>>, ApiError> {
    let status = params
        .status
        .as_deref()
        .map(|s| {
            s.parse()
                .map_err(|_| ApiError::Validation(format!("invalid status filter: {s}")))
        })
        .transpose()?;
    let priority = params
        .priority
        .as_deref()
        .map(|p| {
            p.parse()
                .map_err(|_| ApiError::Validation(format!("invalid priority filter: {p}")))
        })
        .transpose()?;

    // Blank search means no search
    let search = params
        .search
        .as_deref()
        .map(str::trim)
        .filter(|s| !s.is_empty())
        .map(str::to_string);

    let filter = TaskFilter {
        skip: params.skip,
        limit: params.limit,
        status,
        priority,
        search,
    };
    Ok(Json(state.repo.list(&filter)))
}

// GET /api/tasks/:id
pub async fn get_task(
    State(state): State<SharedState>,
    Path(id): Path<String>,
) -> Result<Json<TaskResponse>, ApiError> {
    let task = state.repo.get(&id)?.ok_or(ApiError::NotFound)?;
    Ok(Json(task))
}

// PUT /api/tasks/:id
pub async fn update_task(
    State(state): State<SharedState>,
    Path(id): Path<String>,
    Json(payload): Json<UpdateTaskRequest>,
) -> Result<Json<TaskResponse>, ApiError> {
    if let Some(title) = &payload.title {
        validate_title(title)?;
    }
    let task = state.repo.update(&id, payload)?.ok_or(ApiError::NotFound)?;
    Ok(Json(task))
}

// DELETE /api/tasks/:id
pub async fn delete_task(
    State(state): State<SharedState>,
    Path(id): Path<String>,
) -> Result<StatusCode, ApiError> {
    if !state.repo.delete(&id)? {
        return Err(ApiError::NotFound);
    }
    Ok(StatusCode::NO_CONTENT)
}

fn validate_title(title: &str) -> Result<(), ApiError> {
    if title.trim().is_empty() {
        return Err(ApiError::Validation("title must not be empty".to_string()));
    }
    Ok(())
}

// ── Tests ──────────────────────────────────────────────────────
