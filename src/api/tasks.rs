//! Task handlers scoped to the authenticated caller.

use super::views::{MessageView, TaskView};
use super::{ApiError, AppState, CurrentUser};
use crate::projection::StatusFilter;
use crate::task::domain::TaskId;
use crate::task::services::{CreateTaskRequest, UpdateTaskRequest};
use axum::Json;
use axum::extract::rejection::{JsonRejection, QueryRejection};
use axum::extract::{Path, Query, State};
use axum::http::StatusCode;
use serde::Deserialize;
use uuid::Uuid;

/// How the list endpoint arranges its result.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum ListView {
    /// Storage order, oldest first.
    #[default]
    Stored,
    /// Display order: priority, then deadline, then newest.
    Ordered,
}

/// Query parameters accepted by `GET /api/tasks`.
#[derive(Debug, Clone, Default, Deserialize)]
#[serde(default)]
pub struct ListQuery {
    /// Status filter, `all` when absent.
    pub status: StatusFilter,
    /// Result arrangement.
    pub view: ListView,
}

/// `GET /api/tasks`
pub async fn list(
    State(state): State<AppState>,
    user: CurrentUser,
    query: Result<Query<ListQuery>, QueryRejection>,
) -> Result<Json<Vec<TaskView>>, ApiError> {
    let Query(query) = query?;
    let owner = user.owner();
    let tasks = match query.view {
        ListView::Ordered => state.tasks.list_projected(owner, query.status).await?,
        ListView::Stored => state
            .tasks
            .list_tasks(owner)
            .await?
            .into_iter()
            .filter(|task| query.status.accepts(Some(task.status())))
            .collect(),
    };
    Ok(Json(tasks.iter().map(TaskView::from).collect()))
}

/// `POST /api/tasks`
pub async fn create(
    State(state): State<AppState>,
    user: CurrentUser,
    payload: Result<Json<CreateTaskRequest>, JsonRejection>,
) -> Result<(StatusCode, Json<TaskView>), ApiError> {
    let Json(request) = payload?;
    let task = state.tasks.create_task(user.owner(), request).await?;
    Ok((StatusCode::CREATED, Json(TaskView::from(&task))))
}

/// `GET /api/tasks/{id}`
pub async fn fetch(
    State(state): State<AppState>,
    user: CurrentUser,
    Path(id): Path<String>,
) -> Result<Json<TaskView>, ApiError> {
    let task = state.tasks.get_task(user.owner(), parse_id(&id)?).await?;
    Ok(Json(TaskView::from(&task)))
}

/// `PUT /api/tasks/{id}`
pub async fn update(
    State(state): State<AppState>,
    user: CurrentUser,
    Path(id): Path<String>,
    payload: Result<Json<UpdateTaskRequest>, JsonRejection>,
) -> Result<Json<TaskView>, ApiError> {
    let task_id = parse_id(&id)?;
    let Json(request) = payload?;
    let task = state
        .tasks
        .update_task(user.owner(), task_id, request)
        .await?;
    Ok(Json(TaskView::from(&task)))
}

/// `POST /api/tasks/{id}/toggle`
pub async fn toggle(
    State(state): State<AppState>,
    user: CurrentUser,
    Path(id): Path<String>,
) -> Result<Json<TaskView>, ApiError> {
    let task = state
        .tasks
        .toggle_status(user.owner(), parse_id(&id)?)
        .await?;
    Ok(Json(TaskView::from(&task)))
}

/// `DELETE /api/tasks/{id}`
pub async fn remove(
    State(state): State<AppState>,
    user: CurrentUser,
    Path(id): Path<String>,
) -> Result<Json<MessageView>, ApiError> {
    state.tasks.delete_task(user.owner(), parse_id(&id)?).await?;
    Ok(Json(MessageView {
        message: "Task removed".to_owned(),
    }))
}

// A malformed identifier cannot name any task.
fn parse_id(raw: &str) -> Result<TaskId, ApiError> {
    Uuid::parse_str(raw)
        .map(TaskId::from_uuid)
        .map_err(|_| ApiError::NotFound("Task not found".to_owned()))
}
