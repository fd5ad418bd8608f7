//! Repository for the `projects` table.

use chrono::Utc;
use moqqins_core::project::new_project_id;
use sqlx::SqlitePool;

use crate::models::project::{CreateProject, Project, ProjectSummary, UpdateProject};

/// Column list shared across queries to avoid repetition.
const COLUMNS: &str = "id, name, figma_file_id, description, created_at, updated_at";

/// Provides CRUD operations for projects.
pub struct ProjectRepo;

impl ProjectRepo {
    /// Insert a new project with a freshly generated id, returning the created row.
    ///
    /// Fails with a unique violation (`uq_projects_figma_file_id`) if another
    /// project is already bound to the same `figma_file_id`.
    pub async fn create(pool: &SqlitePool, input: &CreateProject) -> Result<Project, sqlx::Error> {
        let query = format!(
            "INSERT INTO projects (id, name, figma_file_id, description, created_at, updated_at)
             VALUES ($1, $2, $3, $4, $5, $5)
             RETURNING {COLUMNS}"
        );
        sqlx::query_as::<_, Project>(&query)
            .bind(new_project_id())
            .bind(&input.name)
            .bind(&input.figma_file_id)
            .bind(&input.description)
            .bind(Utc::now())
            .fetch_one(pool)
            .await
    }

    /// Find a project by its id.
    pub async fn find_by_id(pool: &SqlitePool, id: &str) -> Result<Option<Project>, sqlx::Error> {
        let query = format!("SELECT {COLUMNS} FROM projects WHERE id = $1");
        sqlx::query_as::<_, Project>(&query)
            .bind(id)
            .fetch_optional(pool)
            .await
    }

    /// Find the project bound to an external design-tool file.
    pub async fn find_by_external_id(
        pool: &SqlitePool,
        figma_file_id: &str,
    ) -> Result<Option<Project>, sqlx::Error> {
        let query = format!("SELECT {COLUMNS} FROM projects WHERE figma_file_id = $1");
        sqlx::query_as::<_, Project>(&query)
            .bind(figma_file_id)
            .fetch_optional(pool)
            .await
    }

    /// List all projects ordered by most recently created first.
    pub async fn list(pool: &SqlitePool) -> Result<Vec<Project>, sqlx::Error> {
        let query = format!("SELECT {COLUMNS} FROM projects ORDER BY created_at DESC, rowid DESC");
        sqlx::query_as::<_, Project>(&query).fetch_all(pool).await
    }

    /// List all projects (most recent first), each with its version count.
    pub async fn list_with_version_counts(
        pool: &SqlitePool,
    ) -> Result<Vec<ProjectSummary>, sqlx::Error> {
        sqlx::query_as::<_, ProjectSummary>(
            "SELECT p.id, p.name, p.figma_file_id, p.description, p.created_at, p.updated_at,
                    (SELECT COUNT(*) FROM versions v WHERE v.project_id = p.id) AS version_count
             FROM projects p
             ORDER BY p.created_at DESC, p.rowid DESC",
        )
        .fetch_all(pool)
        .await
    }

    /// Update a project. Only non-`None` fields in `input` are applied;
    /// `updated_at` is always refreshed.
    ///
    /// Returns `None` if no row with the given `id` exists.
    pub async fn update(
        pool: &SqlitePool,
        id: &str,
        input: &UpdateProject,
    ) -> Result<Option<Project>, sqlx::Error> {
        let query = format!(
            "UPDATE projects SET
                name = COALESCE($2, name),
                description = COALESCE($3, description),
                updated_at = $4
             WHERE id = $1
             RETURNING {COLUMNS}"
        );
        sqlx::query_as::<_, Project>(&query)
            .bind(id)
            .bind(&input.name)
            .bind(&input.description)
            .bind(Utc::now())
            .fetch_optional(pool)
            .await
    }

    /// Delete a project by id, cascading to its versions.
    /// Returns `true` if a row was removed.
    pub async fn delete(pool: &SqlitePool, id: &str) -> Result<bool, sqlx::Error> {
        let result = sqlx::query("DELETE FROM projects WHERE id = $1")
            .bind(id)
            .execute(pool)
            .await?;
        Ok(result.rows_affected() > 0)
    }

    /// Count the versions owned by a project.
    pub async fn count_versions(pool: &SqlitePool, project_id: &str) -> Result<i64, sqlx::Error> {
        sqlx::query_scalar("SELECT COUNT(*) FROM versions WHERE project_id = $1")
            .bind(project_id)
            .fetch_one(pool)
            .await
    }
}
