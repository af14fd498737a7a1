/// Task endpoints
///
/// Every handler runs behind the bearer middleware and only ever sees the
/// caller's own tasks. A task that exists but belongs to someone else is
/// reported exactly like a missing one (`404`).
///
/// # Endpoints
///
/// - `GET    /api/tasks`     - List own tasks, newest first
/// - `POST   /api/tasks`     - Create a task
/// - `PUT    /api/tasks/:id` - Partially update a task
/// - `DELETE /api/tasks/:id` - Delete a task

use crate::{
    app::AppState,
    error::{ApiError, ApiJson, ApiPath, ApiResult},
};
use axum::{
    extract::State,
    http::StatusCode,
    Extension, Json,
};
use serde::{Deserialize, Serialize};
use taskboard_shared::{
    auth::middleware::AuthContext,
    models::task::{NewTask, Task, TaskChanges, TaskInput},
};
use uuid::Uuid;

/// Body of a successful delete
#[derive(Debug, Serialize, Deserialize)]
pub struct DeleteResponse {
    pub message: String,
}

fn task_not_found() -> ApiError {
    ApiError::NotFound("Task not found".to_string())
}

/// List the caller's tasks
pub async fn list_tasks(
    State(state): State<AppState>,
    Extension(auth): Extension<AuthContext>,
) -> ApiResult<Json<Vec<Task>>> {
    let tasks = Task::list_by_owner(&state.db, auth.user_id).await?;

    Ok(Json(tasks))
}

/// Create a task
///
/// # Endpoint
///
/// ```text
/// POST /api/tasks
/// Authorization: Bearer eyJ...
///
/// {
///   "title": "Write report",
///   "description": "",
///   "dueDate": "2025-03-01",
///   "priority": "High",
///   "status": "To Do"
/// }
/// ```
///
/// Omitted `priority` / `status` default to `Medium` / `To Do`.
///
/// # Errors
///
/// - `422 Unprocessable Entity`: Missing title, unknown priority or status, bad date
pub async fn create_task(
    State(state): State<AppState>,
    Extension(auth): Extension<AuthContext>,
    ApiJson(input): ApiJson<TaskInput>,
) -> ApiResult<(StatusCode, Json<Task>)> {
    let new_task = NewTask::from_input(input)?;

    let task = Task::create(&state.db, auth.user_id, new_task).await?;

    tracing::debug!(task_id = %task.id, owner = %auth.user_id, "Created task");

    Ok((StatusCode::CREATED, Json(task)))
}

/// Partially update a task
///
/// Only fields present in the body change.
pub async fn update_task(
    State(state): State<AppState>,
    Extension(auth): Extension<AuthContext>,
    ApiPath(id): ApiPath<Uuid>,
    ApiJson(input): ApiJson<TaskInput>,
) -> ApiResult<Json<Task>> {
    let changes = TaskChanges::from_input(input)?;

    let task = Task::update(&state.db, id, auth.user_id, changes)
        .await?
        .ok_or_else(task_not_found)?;

    Ok(Json(task))
}

/// Delete a task
pub async fn delete_task(
    State(state): State<AppState>,
    Extension(auth): Extension<AuthContext>,
    ApiPath(id): ApiPath<Uuid>,
) -> ApiResult<Json<DeleteResponse>> {
    if !Task::delete(&state.db, id, auth.user_id).await? {
        return Err(task_not_found());
    }

    tracing::debug!(task_id = %id, owner = %auth.user_id, "Deleted task");

    Ok(Json(DeleteResponse {
        message: "Task deleted".to_string(),
    }))
}
