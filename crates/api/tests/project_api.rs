//! Integration tests for the `/api/v1/projects` resource.

mod common;

use axum::body::Body;
use axum::http::{Request, StatusCode};
use common::{body_json, build_test_app, delete, get, post_json, put_json};
use futures::future::join_all;
use serde_json::json;
use sqlx::SqlitePool;
use tower::ServiceExt;

/// Create a project through the API and return its JSON representation.
async fn create_project(pool: &SqlitePool, body: serde_json::Value) -> serde_json::Value {
    let response = post_json(build_test_app(pool.clone()), "/api/v1/projects", body).await;
    assert_eq!(response.status(), StatusCode::CREATED);
    body_json(response).await
}

// ---------------------------------------------------------------------------
// Create
// ---------------------------------------------------------------------------

#[sqlx::test(migrations = "../db/migrations")]
async fn create_project_returns_201(pool: SqlitePool) {
    let json = create_project(
        &pool,
        json!({ "name": "Landing page", "figma_file_id": "fig-1", "description": "Hero" }),
    )
    .await;

    assert!(json["id"].as_str().unwrap().starts_with("proj_"));
    assert_eq!(json["name"], "Landing page");
    assert_eq!(json["figma_file_id"], "fig-1");
    assert_eq!(json["description"], "Hero");
    assert!(json["created_at"].is_string());
    assert!(json["updated_at"].is_string());
    assert!(json.get("version_count").is_none());
}

#[sqlx::test(migrations = "../db/migrations")]
async fn create_project_without_name_returns_400(pool: SqlitePool) {
    let response = post_json(
        build_test_app(pool),
        "/api/v1/projects",
        json!({ "figma_file_id": "fig-1" }),
    )
    .await;

    assert_eq!(response.status(), StatusCode::BAD_REQUEST);
    let json = body_json(response).await;
    assert_eq!(json["code"], "VALIDATION_ERROR");
    assert_eq!(json["message"], "Project name is required");
}

#[sqlx::test(migrations = "../db/migrations")]
async fn create_project_with_blank_name_returns_400(pool: SqlitePool) {
    let response = post_json(
        build_test_app(pool.clone()),
        "/api/v1/projects",
        json!({ "name": "   " }),
    )
    .await;
    assert_eq!(response.status(), StatusCode::BAD_REQUEST);

    let list = body_json(get(build_test_app(pool), "/api/v1/projects").await).await;
    assert_eq!(list["total"], 0);
}

#[sqlx::test(migrations = "../db/migrations")]
async fn create_project_with_malformed_json_returns_400(pool: SqlitePool) {
    let request = Request::builder()
        .method("POST")
        .uri("/api/v1/projects")
        .header("content-type", "application/json")
        .body(Body::from("{not json"))
        .unwrap();

    let response = build_test_app(pool).oneshot(request).await.unwrap();

    assert_eq!(response.status(), StatusCode::BAD_REQUEST);
    let json = body_json(response).await;
    assert_eq!(json["code"], "BAD_REQUEST");
    assert!(json["message"].is_string());
}

#[sqlx::test(migrations = "../db/migrations")]
async fn create_project_is_idempotent_on_figma_file_id(pool: SqlitePool) {
    let first = create_project(&pool, json!({ "name": "Design", "figma_file_id": "fig-42" })).await;

    let response = post_json(
        build_test_app(pool.clone()),
        "/api/v1/projects",
        json!({ "name": "Design again", "figma_file_id": "fig-42" }),
    )
    .await;
    assert_eq!(response.status(), StatusCode::OK);

    let second = body_json(response).await;
    assert_eq!(second["id"], first["id"]);
    assert_eq!(second["name"], "Design");

    let list = body_json(get(build_test_app(pool), "/api/v1/projects").await).await;
    assert_eq!(list["total"], 1);
}

#[sqlx::test(migrations = "../db/migrations")]
async fn projects_without_figma_file_id_are_never_merged(pool: SqlitePool) {
    let first = create_project(&pool, json!({ "name": "A" })).await;
    let second = create_project(&pool, json!({ "name": "A", "figma_file_id": "" })).await;

    assert_ne!(first["id"], second["id"]);
    assert!(second["figma_file_id"].is_null());
}

#[sqlx::test(migrations = "../db/migrations")]
async fn concurrent_creates_with_same_figma_file_id_share_one_project(pool: SqlitePool) {
    let requests = (0..4).map(|i| {
        post_json(
            build_test_app(pool.clone()),
            "/api/v1/projects",
            json!({ "name": format!("Racer {i}"), "figma_file_id": "fig-race" }),
        )
    });
    let responses = join_all(requests).await;

    let mut ids = Vec::new();
    let mut created = 0;
    for response in responses {
        let status = response.status();
        assert!(
            status == StatusCode::CREATED || status == StatusCode::OK,
            "unexpected status {status}"
        );
        if status == StatusCode::CREATED {
            created += 1;
        }
        ids.push(body_json(response).await["id"].clone());
    }

    assert_eq!(created, 1);
    assert!(ids.iter().all(|id| *id == ids[0]));

    let list = body_json(get(build_test_app(pool), "/api/v1/projects").await).await;
    assert_eq!(list["total"], 1);
}

// ---------------------------------------------------------------------------
// List / detail
// ---------------------------------------------------------------------------

#[sqlx::test(migrations = "../db/migrations")]
async fn list_projects_includes_version_counts(pool: SqlitePool) {
    let older = create_project(&pool, json!({ "name": "Older" })).await;
    let newer = create_project(&pool, json!({ "name": "Newer" })).await;

    let uri = format!("/api/v1/projects/{}/versions", older["id"].as_str().unwrap());
    for _ in 0..2 {
        let response = post_json(build_test_app(pool.clone()), &uri, json!({})).await;
        assert_eq!(response.status(), StatusCode::CREATED);
    }

    let response = get(build_test_app(pool), "/api/v1/projects").await;
    assert_eq!(response.status(), StatusCode::OK);

    let json = body_json(response).await;
    assert_eq!(json["total"], 2);
    assert!(json["timestamp"].is_string());

    let projects = json["projects"].as_array().unwrap();
    assert_eq!(projects[0]["id"], newer["id"]);
    assert_eq!(projects[0]["version_count"], 0);
    assert_eq!(projects[1]["id"], older["id"]);
    assert_eq!(projects[1]["version_count"], 2);
}

#[sqlx::test(migrations = "../db/migrations")]
async fn get_project_returns_stats(pool: SqlitePool) {
    let project = create_project(&pool, json!({ "name": "Stats" })).await;
    let id = project["id"].as_str().unwrap();
    let versions_uri = format!("/api/v1/projects/{id}/versions");

    post_json(build_test_app(pool.clone()), &versions_uri, json!({ "document_data": { "a": 1 } })).await;
    post_json(build_test_app(pool.clone()), &versions_uri, json!({ "is_auto_save": true })).await;

    let response = get(build_test_app(pool), &format!("/api/v1/projects/{id}")).await;
    assert_eq!(response.status(), StatusCode::OK);

    let json = body_json(response).await;
    assert_eq!(json["id"], id);
    assert_eq!(json["name"], "Stats");
    assert_eq!(json["version_count"], 2);
    assert_eq!(json["stats"]["total_versions"], 2);
    assert_eq!(json["stats"]["total_size"], r#"{"a":1}"#.len());
    assert_eq!(json["stats"]["auto_save_count"], 1);
    assert_eq!(json["stats"]["manual_save_count"], 1);
    assert!(json["stats"]["last_version_date"].is_string());
}

#[sqlx::test(migrations = "../db/migrations")]
async fn get_missing_project_returns_404(pool: SqlitePool) {
    let response = get(build_test_app(pool), "/api/v1/projects/proj_missing").await;

    assert_eq!(response.status(), StatusCode::NOT_FOUND);
    let json = body_json(response).await;
    assert_eq!(json["error"], "Project not found");
    assert_eq!(json["code"], "NOT_FOUND");
}

// ---------------------------------------------------------------------------
// Update / delete
// ---------------------------------------------------------------------------

#[sqlx::test(migrations = "../db/migrations")]
async fn update_project_changes_only_given_fields(pool: SqlitePool) {
    let project = create_project(&pool, json!({ "name": "Old", "description": "Keep me" })).await;
    let uri = format!("/api/v1/projects/{}", project["id"].as_str().unwrap());

    let response = put_json(build_test_app(pool), &uri, json!({ "name": "New" })).await;
    assert_eq!(response.status(), StatusCode::OK);

    let json = body_json(response).await;
    assert_eq!(json["name"], "New");
    assert_eq!(json["description"], "Keep me");
}

#[sqlx::test(migrations = "../db/migrations")]
async fn update_project_rejects_blank_name(pool: SqlitePool) {
    let project = create_project(&pool, json!({ "name": "Named" })).await;
    let uri = format!("/api/v1/projects/{}", project["id"].as_str().unwrap());

    let response = put_json(build_test_app(pool), &uri, json!({ "name": "" })).await;
    assert_eq!(response.status(), StatusCode::BAD_REQUEST);
}

#[sqlx::test(migrations = "../db/migrations")]
async fn update_missing_project_returns_404(pool: SqlitePool) {
    let response = put_json(
        build_test_app(pool),
        "/api/v1/projects/proj_missing",
        json!({ "name": "Nope" }),
    )
    .await;
    assert_eq!(response.status(), StatusCode::NOT_FOUND);
}

#[sqlx::test(migrations = "../db/migrations")]
async fn delete_project_removes_its_versions(pool: SqlitePool) {
    let project = create_project(&pool, json!({ "name": "Doomed" })).await;
    let id = project["id"].as_str().unwrap();

    let created = post_json(
        build_test_app(pool.clone()),
        &format!("/api/v1/projects/{id}/versions"),
        json!({}),
    )
    .await;
    let version = body_json(created).await;
    let version_uri = format!("/api/v1/versions/{}", version["id"].as_str().unwrap());

    let response = delete(build_test_app(pool.clone()), &format!("/api/v1/projects/{id}")).await;
    assert_eq!(response.status(), StatusCode::NO_CONTENT);

    let response = get(build_test_app(pool.clone()), &format!("/api/v1/projects/{id}")).await;
    assert_eq!(response.status(), StatusCode::NOT_FOUND);

    let response = get(build_test_app(pool.clone()), &version_uri).await;
    assert_eq!(response.status(), StatusCode::NOT_FOUND);

    let response = delete(build_test_app(pool), &format!("/api/v1/projects/{id}")).await;
    assert_eq!(response.status(), StatusCode::NOT_FOUND);
}
