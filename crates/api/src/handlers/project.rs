//! Handlers for the `/projects` resource.

use axum::extract::{Path, State};
use axum::http::StatusCode;
use axum::Json;
use chrono::Utc;
use moqqins_core::error::CoreError;
use moqqins_core::project::validate_project_name;
use moqqins_core::types::Timestamp;
use moqqins_db::models::project::{CreateProject, Project, ProjectSummary, UpdateProject};
use moqqins_db::models::version::ProjectStats;
use moqqins_db::repositories::{ProjectRepo, VersionRepo};
use moqqins_db::DbPool;
use serde::{Deserialize, Serialize};

use crate::error::{is_unique_violation, AppError, AppResult};
use crate::extract::AppJson;
use crate::state::AppState;

/// Request body for `POST /projects`. `name` is optional here so a missing
/// name is reported as a validation error rather than a body rejection.
#[derive(Debug, Deserialize)]
pub struct CreateProjectRequest {
    pub name: Option<String>,
    pub figma_file_id: Option<String>,
    pub description: Option<String>,
}

#[derive(Debug, Serialize)]
pub struct ProjectListResponse {
    pub projects: Vec<ProjectSummary>,
    pub total: usize,
    pub timestamp: Timestamp,
}

#[derive(Debug, Serialize)]
pub struct ProjectDetailResponse {
    #[serde(flatten)]
    pub project: Project,
    pub version_count: i64,
    pub stats: ProjectStats,
}

/// Verify that a project exists, returning the full row.
pub(crate) async fn ensure_project_exists(pool: &DbPool, id: &str) -> AppResult<Project> {
    ProjectRepo::find_by_id(pool, id)
        .await?
        .ok_or_else(|| AppError::not_found("Project", id))
}

/// POST /api/v1/projects
///
/// Idempotent on `figma_file_id`: if a project is already bound to the file
/// it is returned with `200 OK` instead of creating a duplicate.
pub async fn create(
    State(state): State<AppState>,
    AppJson(input): AppJson<CreateProjectRequest>,
) -> AppResult<(StatusCode, Json<Project>)> {
    let name = validate_project_name(input.name.as_deref())?.to_string();
    let figma_file_id = input.figma_file_id.filter(|id| !id.is_empty());

    if let Some(file_id) = figma_file_id.as_deref() {
        if let Some(existing) = ProjectRepo::find_by_external_id(&state.pool, file_id).await? {
            tracing::info!(
                project_id = %existing.id,
                figma_file_id = file_id,
                "Project already bound to file, returning existing",
            );
            return Ok((StatusCode::OK, Json(existing)));
        }
    }

    let create = CreateProject {
        name,
        figma_file_id,
        description: input.description,
    };

    match ProjectRepo::create(&state.pool, &create).await {
        Ok(project) => {
            tracing::info!(project_id = %project.id, name = %project.name, "Project created");
            Ok((StatusCode::CREATED, Json(project)))
        }
        // A concurrent request bound the same file between lookup and insert.
        Err(err) if is_unique_violation(&err) => {
            let Some(file_id) = create.figma_file_id.as_deref() else {
                return Err(err.into());
            };
            match ProjectRepo::find_by_external_id(&state.pool, file_id).await? {
                Some(existing) => Ok((StatusCode::OK, Json(existing))),
                // The winning row was deleted before we could read it back.
                None => Err(CoreError::Conflict(format!(
                    "Figma file {file_id} is already bound to another project"
                ))
                .into()),
            }
        }
        Err(err) => Err(err.into()),
    }
}

/// GET /api/v1/projects
pub async fn list(State(state): State<AppState>) -> AppResult<Json<ProjectListResponse>> {
    let projects = ProjectRepo::list_with_version_counts(&state.pool).await?;
    Ok(Json(ProjectListResponse {
        total: projects.len(),
        projects,
        timestamp: Utc::now(),
    }))
}

/// GET /api/v1/projects/{id}
pub async fn get_by_id(
    State(state): State<AppState>,
    Path(id): Path<String>,
) -> AppResult<Json<ProjectDetailResponse>> {
    let project = ensure_project_exists(&state.pool, &id).await?;
    let version_count = ProjectRepo::count_versions(&state.pool, &id).await?;
    let stats = VersionRepo::project_stats(&state.pool, &id).await?;
    Ok(Json(ProjectDetailResponse {
        project,
        version_count,
        stats,
    }))
}

/// PUT /api/v1/projects/{id}
pub async fn update(
    State(state): State<AppState>,
    Path(id): Path<String>,
    AppJson(input): AppJson<UpdateProject>,
) -> AppResult<Json<Project>> {
    if let Some(name) = input.name.as_deref() {
        if name.trim().is_empty() {
            return Err(CoreError::Validation("Project name must not be empty".to_string()).into());
        }
    }

    let project = ProjectRepo::update(&state.pool, &id, &input)
        .await?
        .ok_or_else(|| AppError::not_found("Project", &id))?;
    Ok(Json(project))
}

/// DELETE /api/v1/projects/{id}
pub async fn delete(State(state): State<AppState>, Path(id): Path<String>) -> AppResult<StatusCode> {
    if ProjectRepo::delete(&state.pool, &id).await? {
        tracing::info!(project_id = %id, "Project deleted with its versions");
        Ok(StatusCode::NO_CONTENT)
    } else {
        Err(AppError::not_found("Project", id))
    }
}
