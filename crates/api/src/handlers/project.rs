//! Handlers for the `/projects` resource.

use axum::extract::State;
use axum::http::StatusCode;
use axum::Json;
use taskflow_core::error::CoreError;
use taskflow_core::types::DbId;
use taskflow_core::validation::validate_project_name;
use taskflow_db::models::project::{
    CreateProject, ProjectFilter, ProjectListItem, ProjectListParams, ProjectWithOwner,
    UpdateProject,
};
use taskflow_db::repositories::ProjectRepo;

use crate::error::{AppError, AppResult};
use crate::extract::{AppJson, AppPath, AppQuery, Caller};
use crate::response::{DeleteResponse, ProjectListResponse};
use crate::state::AppState;

fn not_found(id: DbId) -> AppError {
    AppError::Core(CoreError::NotFound {
        entity: "Project",
        id,
    })
}

/// GET /api/v1/projects
pub async fn list(
    State(state): State<AppState>,
    AppQuery(params): AppQuery<ProjectListParams>,
) -> AppResult<Json<ProjectListResponse>> {
    let (filter, window) = ProjectFilter::from_params(&params);

    let total = ProjectRepo::count(&state.pool, &filter).await?;
    let projects = ProjectRepo::list(&state.pool, &filter, window).await?;
    let items = ProjectRepo::list_items(&state.pool, projects).await?;

    Ok(Json(window.into_page(items, total).into()))
}

/// POST /api/v1/projects
///
/// The caller becomes the owner and the project's first member.
pub async fn create(
    State(state): State<AppState>,
    caller: Caller,
    AppJson(input): AppJson<CreateProject>,
) -> AppResult<(StatusCode, Json<ProjectWithOwner>)> {
    let name = validate_project_name(&input.name)?;
    let input = CreateProject { name, ..input };

    let project = ProjectRepo::create(&state.pool, caller.user_id, &input).await?;
    tracing::info!(
        project_id = project.id,
        owner_id = caller.user_id,
        sort_order = project.sort_order,
        "Project created"
    );

    let project = ProjectRepo::with_owner(&state.pool, project).await?;
    Ok((StatusCode::CREATED, Json(project)))
}

/// GET /api/v1/projects/{id}
pub async fn get_by_id(
    State(state): State<AppState>,
    AppPath(id): AppPath<DbId>,
) -> AppResult<Json<ProjectListItem>> {
    let project = ProjectRepo::find_with_details(&state.pool, id)
        .await?
        .ok_or_else(|| not_found(id))?;
    Ok(Json(project))
}

/// PUT /api/v1/projects/{id}
pub async fn update(
    State(state): State<AppState>,
    AppPath(id): AppPath<DbId>,
    AppJson(mut input): AppJson<UpdateProject>,
) -> AppResult<Json<ProjectWithOwner>> {
    if let Some(name) = input.name.as_deref() {
        input.name = Some(validate_project_name(name)?);
    }
    if let Some(Some(parent_id)) = input.parent_id {
        if parent_id == id || ProjectRepo::is_in_subtree(&state.pool, id, parent_id).await? {
            return Err(CoreError::Validation(
                "A project cannot be nested under itself or its descendants".into(),
            )
            .into());
        }
    }

    let project = ProjectRepo::update(&state.pool, id, &input)
        .await?
        .ok_or_else(|| not_found(id))?;
    tracing::info!(project_id = id, "Project updated");

    let project = ProjectRepo::with_owner(&state.pool, project).await?;
    Ok(Json(project))
}

/// DELETE /api/v1/projects/{id}
///
/// Tasks in the project are kept and detached.
pub async fn delete(
    State(state): State<AppState>,
    AppPath(id): AppPath<DbId>,
) -> AppResult<Json<DeleteResponse>> {
    if ProjectRepo::delete(&state.pool, id).await? {
        tracing::info!(project_id = id, "Project deleted");
        Ok(Json(DeleteResponse::ok()))
    } else {
        Err(not_found(id))
    }
}
