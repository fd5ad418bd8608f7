//! Service metadata endpoints and the catch-all 404.

use axum::http::{Method, StatusCode, Uri};
use axum::Json;
use chrono::Utc;
use moqqins_core::types::Timestamp;
use serde::Serialize;

use crate::response::ErrorBody;

/// Human-readable service name reported by metadata endpoints.
pub const SERVICE_NAME: &str = "Moqqins API";

/// One entry of the endpoint listing.
#[derive(Debug, Serialize)]
pub struct EndpointInfo {
    pub method: &'static str,
    pub path: &'static str,
    pub description: &'static str,
}

#[derive(Debug, Serialize)]
pub struct ApiIndexResponse {
    pub service: &'static str,
    pub version: &'static str,
    pub base_path: &'static str,
    pub endpoints: Vec<EndpointInfo>,
}

#[derive(Debug, Serialize)]
pub struct ConnectivityResponse {
    pub message: &'static str,
    pub timestamp: Timestamp,
    pub version: &'static str,
}

const ENDPOINTS: [(&str, &str, &str); 11] = [
    ("GET", "/health", "Service and database health"),
    ("GET", "/api/v1/test", "Connectivity check"),
    ("GET", "/api/v1/projects", "List projects with version counts"),
    ("POST", "/api/v1/projects", "Create a project, or return the one bound to figma_file_id"),
    ("GET", "/api/v1/projects/{id}", "Project details with version statistics"),
    ("PUT", "/api/v1/projects/{id}", "Update project name or description"),
    ("DELETE", "/api/v1/projects/{id}", "Delete a project and all its versions"),
    ("GET", "/api/v1/projects/{project_id}/versions", "List a project's versions"),
    ("POST", "/api/v1/projects/{project_id}/versions", "Create the next version of a project"),
    ("GET", "/api/v1/versions/{id}", "Fetch a single version"),
    ("DELETE", "/api/v1/versions/{id}", "Delete a single version"),
];

/// GET /api/v1
pub async fn api_index() -> Json<ApiIndexResponse> {
    let endpoints = ENDPOINTS
        .iter()
        .map(|&(method, path, description)| EndpointInfo {
            method,
            path,
            description,
        })
        .collect();

    Json(ApiIndexResponse {
        service: SERVICE_NAME,
        version: env!("CARGO_PKG_VERSION"),
        base_path: "/api/v1",
        endpoints,
    })
}

/// GET /api/v1/test
pub async fn connectivity_test() -> Json<ConnectivityResponse> {
    Json(ConnectivityResponse {
        message: "Moqqins API is working perfectly!",
        timestamp: Utc::now(),
        version: env!("CARGO_PKG_VERSION"),
    })
}

/// Fallback for any unmatched route.
pub async fn route_not_found(method: Method, uri: Uri) -> (StatusCode, Json<ErrorBody>) {
    (
        StatusCode::NOT_FOUND,
        Json(ErrorBody {
            error: "Route not found".to_string(),
            message: format!("Cannot {method} {}", uri.path()),
            code: "NOT_FOUND",
        }),
    )
}
