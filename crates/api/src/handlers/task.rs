//! Handlers for the `/tasks` resource.

use axum::extract::State;
use axum::http::StatusCode;
use axum::Json;
use taskflow_core::error::CoreError;
use taskflow_core::types::DbId;
use taskflow_core::validation::{validate_minutes, validate_task_title};
use taskflow_db::models::task::{
    CreateTask, TaskDetail, TaskFilter, TaskListParams, TaskWithRelations, UpdateTask,
};
use taskflow_db::repositories::TaskRepo;

use crate::error::{AppError, AppResult};
use crate::extract::{AppJson, AppPath, AppQuery, Caller};
use crate::response::{DeleteResponse, TaskListResponse};
use crate::state::AppState;

/// GET /api/v1/tasks
///
/// Filters are read leniently: unknown enum values and unparseable numbers
/// or dates are ignored rather than rejected.
pub async fn list(
    State(state): State<AppState>,
    AppQuery(params): AppQuery<TaskListParams>,
) -> AppResult<Json<TaskListResponse>> {
    let (filter, window) = TaskFilter::from_params(&params);

    let total = TaskRepo::count(&state.pool, &filter).await?;
    let tasks = TaskRepo::list(&state.pool, &filter, window).await?;
    let items = TaskRepo::list_items(&state.pool, tasks).await?;

    Ok(Json(window.into_page(items, total).into()))
}

/// POST /api/v1/tasks
pub async fn create(
    State(state): State<AppState>,
    caller: Caller,
    AppJson(input): AppJson<CreateTask>,
) -> AppResult<(StatusCode, Json<TaskWithRelations>)> {
    let title = validate_task_title(&input.title)?;
    validate_minutes("estimatedTime", input.estimated_time)?;
    let input = CreateTask { title, ..input };

    let task = TaskRepo::create(&state.pool, caller.user_id, &input).await?;
    tracing::info!(
        task_id = task.id,
        created_by = caller.user_id,
        has_due_date = task.due_date.is_some(),
        "Task created"
    );

    let task = TaskRepo::with_relations_one(&state.pool, task).await?;
    Ok((StatusCode::CREATED, Json(task)))
}

/// GET /api/v1/tasks/{id}
pub async fn get_by_id(
    State(state): State<AppState>,
    AppPath(id): AppPath<DbId>,
) -> AppResult<Json<TaskDetail>> {
    let task = TaskRepo::find_detail(&state.pool, id)
        .await?
        .ok_or(AppError::Core(CoreError::NotFound { entity: "Task", id }))?;
    Ok(Json(task))
}

/// PUT /api/v1/tasks/{id}
///
/// `completedAt` is written only when supplied; changing `status` alone
/// leaves it untouched.
pub async fn update(
    State(state): State<AppState>,
    AppPath(id): AppPath<DbId>,
    AppJson(mut input): AppJson<UpdateTask>,
) -> AppResult<Json<TaskWithRelations>> {
    if let Some(title) = input.title.as_deref() {
        input.title = Some(validate_task_title(title)?);
    }
    validate_minutes("estimatedTime", input.estimated_time.flatten())?;
    validate_minutes("actualTime", input.actual_time.flatten())?;

    let task = TaskRepo::update(&state.pool, id, &input)
        .await?
        .ok_or(AppError::Core(CoreError::NotFound { entity: "Task", id }))?;
    tracing::info!(task_id = id, status = task.status.as_str(), "Task updated");

    let task = TaskRepo::with_relations_one(&state.pool, task).await?;
    Ok(Json(task))
}

/// DELETE /api/v1/tasks/{id}
pub async fn delete(
    State(state): State<AppState>,
    AppPath(id): AppPath<DbId>,
) -> AppResult<Json<DeleteResponse>> {
    if TaskRepo::delete(&state.pool, id).await? {
        tracing::info!(task_id = id, "Task deleted");
        Ok(Json(DeleteResponse::ok()))
    } else {
        Err(AppError::Core(CoreError::NotFound { entity: "Task", id }))
    }
}
