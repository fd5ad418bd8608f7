//! Repository for the `versions` table.

use chrono::Utc;
use moqqins_core::document::StoredDocument;
use moqqins_core::version::new_version_id;
use sqlx::SqlitePool;

use crate::models::version::{CreateVersion, ProjectStats, Version, VersionRow};

/// Column list shared across queries to avoid repetition.
const COLUMNS: &str = "id, project_id, version_number, message, author, \
    document_data, file_size, is_auto_save, created_at";

/// Provides append-only creation and read operations for versions.
pub struct VersionRepo;

impl VersionRepo {
    /// Insert a new version, assigning the project's next version number.
    ///
    /// The project's `last_version_number` counter is advanced and the row is
    /// inserted in one transaction. The counter `UPDATE` takes the write lock
    /// before it reads, so concurrent creators for the same project are
    /// serialized and never observe the same number. A rolled-back creation
    /// leaves the counter untouched.
    ///
    /// Returns `None` if the project does not exist.
    pub async fn create(
        pool: &SqlitePool,
        input: &CreateVersion,
    ) -> Result<Option<Version>, sqlx::Error> {
        let stored = input
            .document_data
            .as_ref()
            .map(StoredDocument::encode)
            .transpose()
            .map_err(|e| sqlx::Error::Encode(Box::new(e)))?;
        let file_size = stored.as_ref().map_or(0, StoredDocument::byte_len);

        let mut tx = pool.begin().await?;

        let next_number: Option<i64> = sqlx::query_scalar(
            "UPDATE projects SET last_version_number = last_version_number + 1 \
             WHERE id = $1 \
             RETURNING last_version_number",
        )
        .bind(&input.project_id)
        .fetch_optional(&mut *tx)
        .await?;

        let Some(version_number) = next_number else {
            tx.rollback().await?;
            return Ok(None);
        };

        let query = format!(
            "INSERT INTO versions
                (id, project_id, version_number, message, author, document_data, file_size, is_auto_save, created_at)
             VALUES ($1, $2, $3, $4, $5, $6, $7, $8, $9)
             RETURNING {COLUMNS}"
        );
        let row = sqlx::query_as::<_, VersionRow>(&query)
            .bind(new_version_id())
            .bind(&input.project_id)
            .bind(version_number)
            .bind(&input.message)
            .bind(&input.author)
            .bind(stored.as_ref().map(StoredDocument::as_str))
            .bind(file_size)
            .bind(input.is_auto_save.unwrap_or(false))
            .bind(Utc::now())
            .fetch_one(&mut *tx)
            .await?;

        tx.commit().await?;
        Ok(Some(row.into_version()))
    }

    /// Find a version by its id.
    pub async fn find_by_id(pool: &SqlitePool, id: &str) -> Result<Option<Version>, sqlx::Error> {
        let query = format!("SELECT {COLUMNS} FROM versions WHERE id = $1");
        let row = sqlx::query_as::<_, VersionRow>(&query)
            .bind(id)
            .fetch_optional(pool)
            .await?;
        Ok(row.map(VersionRow::into_version))
    }

    /// List all versions of a project, newest version number first.
    pub async fn list_by_project(
        pool: &SqlitePool,
        project_id: &str,
    ) -> Result<Vec<Version>, sqlx::Error> {
        let query = format!(
            "SELECT {COLUMNS} FROM versions
             WHERE project_id = $1
             ORDER BY version_number DESC"
        );
        let rows = sqlx::query_as::<_, VersionRow>(&query)
            .bind(project_id)
            .fetch_all(pool)
            .await?;
        Ok(rows.into_iter().map(VersionRow::into_version).collect())
    }

    /// Delete a version by id. Returns `true` if a row was removed.
    ///
    /// The project's counter is not rewound, so a deleted number is never reused.
    pub async fn delete(pool: &SqlitePool, id: &str) -> Result<bool, sqlx::Error> {
        let result = sqlx::query("DELETE FROM versions WHERE id = $1")
            .bind(id)
            .execute(pool)
            .await?;
        Ok(result.rows_affected() > 0)
    }

    /// Aggregate version statistics for a project in a single read.
    pub async fn project_stats(
        pool: &SqlitePool,
        project_id: &str,
    ) -> Result<ProjectStats, sqlx::Error> {
        sqlx::query_as::<_, ProjectStats>(
            "SELECT
                COUNT(*) AS total_versions,
                COALESCE(SUM(file_size), 0) AS total_size,
                COUNT(CASE WHEN is_auto_save THEN 1 END) AS auto_save_count,
                COUNT(CASE WHEN NOT is_auto_save THEN 1 END) AS manual_save_count,
                MAX(created_at) AS last_version_date
             FROM versions
             WHERE project_id = $1",
        )
        .bind(project_id)
        .fetch_one(pool)
        .await
    }
}
