//! Handlers for versions, both project-scoped and by id.

use axum::extract::{Path, State};
use axum::http::StatusCode;
use axum::Json;
use chrono::Utc;
use moqqins_core::types::{DbId, Timestamp};
use moqqins_core::version::{author_or_default, message_or_default};
use moqqins_db::models::version::{CreateVersion, Version};
use moqqins_db::repositories::VersionRepo;
use serde::{Deserialize, Serialize};
use serde_json::Value;

use crate::error::{AppError, AppResult};
use crate::extract::AppJson;
use crate::handlers::project::ensure_project_exists;
use crate::state::AppState;

/// Request body for `POST /projects/{project_id}/versions`. Every field is optional.
#[derive(Debug, Deserialize)]
pub struct CreateVersionRequest {
    pub message: Option<String>,
    pub author: Option<String>,
    pub document_data: Option<Value>,
    pub is_auto_save: Option<bool>,
}

#[derive(Debug, Serialize)]
pub struct VersionListResponse {
    pub versions: Vec<Version>,
    pub total: usize,
    pub project_id: DbId,
    pub project_name: String,
    pub timestamp: Timestamp,
}

/// POST /api/v1/projects/{project_id}/versions
pub async fn create(
    State(state): State<AppState>,
    Path(project_id): Path<String>,
    AppJson(input): AppJson<CreateVersionRequest>,
) -> AppResult<(StatusCode, Json<Version>)> {
    ensure_project_exists(&state.pool, &project_id).await?;

    let create = CreateVersion {
        project_id,
        message: Some(message_or_default(input.message)),
        author: Some(author_or_default(input.author)),
        document_data: input.document_data,
        is_auto_save: Some(input.is_auto_save.unwrap_or(false)),
    };

    // The project can still vanish between the check and the insert.
    let version = VersionRepo::create(&state.pool, &create)
        .await
        .map_err(|err| match err {
            sqlx::Error::Encode(source) => {
                AppError::InternalError(format!("Failed to serialize document_data: {source}"))
            }
            other => AppError::Database(other),
        })?
        .ok_or_else(|| AppError::not_found("Project", &create.project_id))?;

    tracing::info!(
        version_id = %version.id,
        project_id = %version.project_id,
        version_number = version.version_number,
        file_size = version.file_size,
        is_auto_save = version.is_auto_save,
        "Version created",
    );
    Ok((StatusCode::CREATED, Json(version)))
}

/// GET /api/v1/projects/{project_id}/versions
pub async fn list_by_project(
    State(state): State<AppState>,
    Path(project_id): Path<String>,
) -> AppResult<Json<VersionListResponse>> {
    let project = ensure_project_exists(&state.pool, &project_id).await?;
    let versions = VersionRepo::list_by_project(&state.pool, &project.id).await?;
    Ok(Json(VersionListResponse {
        total: versions.len(),
        versions,
        project_id: project.id,
        project_name: project.name,
        timestamp: Utc::now(),
    }))
}

/// GET /api/v1/versions/{id}
pub async fn get_by_id(
    State(state): State<AppState>,
    Path(id): Path<String>,
) -> AppResult<Json<Version>> {
    let version = VersionRepo::find_by_id(&state.pool, &id)
        .await?
        .ok_or_else(|| AppError::not_found("Version", &id))?;
    Ok(Json(version))
}

/// DELETE /api/v1/versions/{id}
pub async fn delete(State(state): State<AppState>, Path(id): Path<String>) -> AppResult<StatusCode> {
    if VersionRepo::delete(&state.pool, &id).await? {
        tracing::info!(version_id = %id, "Version deleted");
        Ok(StatusCode::NO_CONTENT)
    } else {
        Err(AppError::not_found("Version", id))
    }
}
