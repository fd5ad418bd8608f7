//! Version entity model and DTOs.

use moqqins_core::document::{DocumentData, StoredDocument};
use moqqins_core::types::{DbId, Timestamp};
use serde::{Deserialize, Serialize};
use serde_json::Value;
use sqlx::FromRow;

/// A raw row from the `versions` table, with `document_data` still serialized.
#[derive(Debug, Clone, FromRow)]
pub struct VersionRow {
    pub id: DbId,
    pub project_id: DbId,
    pub version_number: i64,
    pub message: Option<String>,
    pub author: Option<String>,
    pub document_data: Option<String>,
    pub file_size: i64,
    pub is_auto_save: bool,
    pub created_at: Timestamp,
}

impl VersionRow {
    /// Decode the stored payload.
    ///
    /// A payload that is not valid JSON is logged and kept as raw text.
    pub fn into_version(self) -> Version {
        let document_data = self.document_data.map(|text| {
            match StoredDocument::from_stored(text).decode() {
                Ok(value) => DocumentData::Structured(value),
                Err(failure) => {
                    tracing::warn!(
                        version_id = %self.id,
                        error = %failure.error,
                        "Failed to parse document_data, returning raw text",
                    );
                    DocumentData::from(failure)
                }
            }
        });

        Version {
            id: self.id,
            project_id: self.project_id,
            version_number: self.version_number,
            message: self.message,
            author: self.author,
            document_data,
            file_size: self.file_size,
            is_auto_save: self.is_auto_save,
            created_at: self.created_at,
        }
    }
}

/// A version as returned to callers, with `document_data` decoded.
#[derive(Debug, Clone, Serialize)]
pub struct Version {
    pub id: DbId,
    pub project_id: DbId,
    pub version_number: i64,
    pub message: Option<String>,
    pub author: Option<String>,
    pub document_data: Option<DocumentData>,
    /// Byte length of the serialized `document_data` (0 when absent).
    pub file_size: i64,
    pub is_auto_save: bool,
    pub created_at: Timestamp,
}

/// DTO for creating a new version. The version number is always assigned by
/// the repository.
#[derive(Debug, Clone, Deserialize)]
pub struct CreateVersion {
    pub project_id: DbId,
    pub message: Option<String>,
    pub author: Option<String>,
    pub document_data: Option<Value>,
    /// Defaults to `false` if omitted.
    pub is_auto_save: Option<bool>,
}

/// Aggregate version statistics for one project.
#[derive(Debug, Clone, FromRow, Serialize)]
pub struct ProjectStats {
    pub total_versions: i64,
    /// Sum of `file_size` across all versions (0 when there are none).
    pub total_size: i64,
    pub auto_save_count: i64,
    pub manual_save_count: i64,
    pub last_version_date: Option<Timestamp>,
}
