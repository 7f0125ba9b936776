//! HTTP-level integration tests for the `/tasks` endpoints.

mod common;

use axum::http::StatusCode;
use common::{body_json, delete, get, post_json, post_json_as, put_json};
use serde_json::json;
use sqlx::PgPool;

async fn create_task(pool: &PgPool, body: serde_json::Value) -> serde_json::Value {
    let app = common::build_test_app(pool.clone());
    let response = post_json(app, "/api/v1/tasks", body).await;
    assert_eq!(response.status(), StatusCode::CREATED);
    body_json(response).await
}

// ---------------------------------------------------------------------------
// Create
// ---------------------------------------------------------------------------

#[sqlx::test(migrations = "../../db/migrations")]
async fn create_task_applies_defaults(pool: PgPool) {
    let json = create_task(&pool, json!({ "title": "  Write report  ", "estimatedTime": "90" })).await;

    assert!(json["id"].is_number());
    assert_eq!(json["title"], "Write report");
    assert_eq!(json["status"], "todo");
    assert_eq!(json["priority"], "medium");
    assert_eq!(json["isRecurring"], false);
    assert_eq!(json["estimatedTime"], 90);
    assert_eq!(json["tags"], json!([]));
    assert_eq!(json["createdById"], 1);
    assert_eq!(json["createdBy"]["email"], "demo@example.com");
    assert!(json["project"].is_null());
    assert!(json["assignee"].is_null());
}

#[sqlx::test(migrations = "../../db/migrations")]
async fn create_task_with_due_date_schedules_reminder(pool: PgPool) {
    let created = create_task(
        &pool,
        json!({ "title": "Submit taxes", "dueDate": "2030-04-15T12:00:00Z" }),
    )
    .await;
    let id = created["id"].as_i64().unwrap();

    let app = common::build_test_app(pool);
    let json = body_json(get(app, &format!("/api/v1/tasks/{id}")).await).await;

    let reminders = json["reminders"].as_array().unwrap();
    assert_eq!(reminders.len(), 1);
    assert_eq!(reminders[0]["triggerAt"], "2030-04-14T12:00:00Z");
    assert_eq!(reminders[0]["type"], "notification");
    assert_eq!(reminders[0]["message"], "Task \"Submit taxes\" is due tomorrow");
}

#[sqlx::test(migrations = "../../db/migrations")]
async fn create_task_without_title_returns_400(pool: PgPool) {
    let app = common::build_test_app(pool);
    let response = post_json(app, "/api/v1/tasks", json!({ "title": "   " })).await;

    assert_eq!(response.status(), StatusCode::BAD_REQUEST);
    let json = body_json(response).await;
    assert_eq!(json["code"], "VALIDATION_ERROR");
    assert_eq!(json["error"], "Title is required");
}

#[sqlx::test(migrations = "../../db/migrations")]
async fn create_task_with_unknown_project_returns_400(pool: PgPool) {
    let app = common::build_test_app(pool);
    let response = post_json(
        app,
        "/api/v1/tasks",
        json!({ "title": "Orphan", "projectId": 999999 }),
    )
    .await;

    assert_eq!(response.status(), StatusCode::BAD_REQUEST);
    assert_eq!(body_json(response).await["code"], "VALIDATION_ERROR");
}

#[sqlx::test(migrations = "../../db/migrations")]
async fn create_task_with_non_positive_estimate_returns_400(pool: PgPool) {
    let app = common::build_test_app(pool);
    let response = post_json(
        app,
        "/api/v1/tasks",
        json!({ "title": "Quick", "estimatedTime": 0 }),
    )
    .await;

    assert_eq!(response.status(), StatusCode::BAD_REQUEST);
    assert_eq!(body_json(response).await["code"], "VALIDATION_ERROR");
}

#[sqlx::test(migrations = "../../db/migrations")]
async fn create_task_uses_caller_header(pool: PgPool) {
    let other = common::seed_user(&pool, "second@example.com").await;

    let app = common::build_test_app(pool);
    let response = post_json_as(
        app,
        "/api/v1/tasks",
        &other.to_string(),
        json!({ "title": "Mine" }),
    )
    .await;

    assert_eq!(response.status(), StatusCode::CREATED);
    let json = body_json(response).await;
    assert_eq!(json["createdById"], other);
    assert_eq!(json["createdBy"]["email"], "second@example.com");
}

#[sqlx::test(migrations = "../../db/migrations")]
async fn malformed_caller_header_returns_400(pool: PgPool) {
    let app = common::build_test_app(pool);
    let response = post_json_as(app, "/api/v1/tasks", "abc", json!({ "title": "Mine" })).await;

    assert_eq!(response.status(), StatusCode::BAD_REQUEST);
    assert_eq!(body_json(response).await["code"], "BAD_REQUEST");
}

// ---------------------------------------------------------------------------
// List
// ---------------------------------------------------------------------------

#[sqlx::test(migrations = "../../db/migrations")]
async fn list_tasks_filters_and_paginates(pool: PgPool) {
    create_task(&pool, json!({ "title": "Fix login", "priority": "high", "tags": ["auth"] })).await;
    create_task(&pool, json!({ "title": "Fix signup", "priority": "high" })).await;
    create_task(&pool, json!({ "title": "Fix footer", "priority": "high" })).await;
    create_task(&pool, json!({ "title": "Tidy docs", "priority": "low" })).await;

    let app = common::build_test_app(pool.clone());
    let json = body_json(get(app, "/api/v1/tasks?priority=high&limit=2").await).await;
    assert_eq!(json["total"], 3);
    assert_eq!(json["hasMore"], true);
    assert_eq!(json["tasks"].as_array().unwrap().len(), 2);

    let app = common::build_test_app(pool.clone());
    let json = body_json(get(app, "/api/v1/tasks?priority=high&limit=2&offset=2").await).await;
    assert_eq!(json["total"], 3);
    assert_eq!(json["hasMore"], false);
    assert_eq!(json["tasks"].as_array().unwrap().len(), 1);

    let app = common::build_test_app(pool.clone());
    let json = body_json(get(app, "/api/v1/tasks?tags=auth&priority=all").await).await;
    assert_eq!(json["total"], 1);
    assert_eq!(json["tasks"][0]["title"], "Fix login");
    assert_eq!(json["tasks"][0]["_count"]["comments"], 0);
    assert_eq!(json["tasks"][0]["children"], json!([]));
}

#[sqlx::test(migrations = "../../db/migrations")]
async fn list_tasks_ignores_malformed_filters(pool: PgPool) {
    create_task(&pool, json!({ "title": "One" })).await;
    create_task(&pool, json!({ "title": "Two" })).await;

    let app = common::build_test_app(pool);
    let response = get(
        app,
        "/api/v1/tasks?status=bogus&estimatedMin=lots&dueFrom=yesterday&limit=-5",
    )
    .await;

    assert_eq!(response.status(), StatusCode::OK);
    let json = body_json(response).await;
    assert_eq!(json["total"], 2);
}

#[sqlx::test(migrations = "../../db/migrations")]
async fn list_tasks_tag_named_all_is_a_real_tag(pool: PgPool) {
    create_task(&pool, json!({ "title": "Tagged all", "tags": ["all"] })).await;
    create_task(&pool, json!({ "title": "Tagged other", "tags": ["other"] })).await;

    let app = common::build_test_app(pool);
    let json = body_json(get(app, "/api/v1/tasks?tags=all").await).await;
    assert_eq!(json["total"], 1);
    assert_eq!(json["tasks"][0]["title"], "Tagged all");
}

#[sqlx::test(migrations = "../../db/migrations")]
async fn list_tasks_with_maximal_offset_returns_empty_page(pool: PgPool) {
    create_task(&pool, json!({ "title": "Only one" })).await;

    let app = common::build_test_app(pool);
    let response = get(app, "/api/v1/tasks?offset=9223372036854775807").await;

    assert_eq!(response.status(), StatusCode::OK);
    let json = body_json(response).await;
    assert_eq!(json["total"], 1);
    assert_eq!(json["hasMore"], false);
    assert_eq!(json["tasks"], json!([]));
}

#[sqlx::test(migrations = "../../db/migrations")]
async fn list_tasks_search_matches_description(pool: PgPool) {
    create_task(
        &pool,
        json!({ "title": "Login page", "description": "Authentication flow rewrite" }),
    )
    .await;
    create_task(&pool, json!({ "title": "Footer" })).await;

    let app = common::build_test_app(pool);
    let json = body_json(get(app, "/api/v1/tasks?search=auth").await).await;
    assert_eq!(json["total"], 1);
    assert_eq!(json["tasks"][0]["title"], "Login page");
}

// ---------------------------------------------------------------------------
// Get / Update / Delete
// ---------------------------------------------------------------------------

#[sqlx::test(migrations = "../../db/migrations")]
async fn get_nonexistent_task_returns_404(pool: PgPool) {
    let app = common::build_test_app(pool);
    let response = get(app, "/api/v1/tasks/999999").await;

    assert_eq!(response.status(), StatusCode::NOT_FOUND);
    let json = body_json(response).await;
    assert_eq!(json["code"], "NOT_FOUND");
    assert_eq!(json["error"], "Task with id 999999 not found");
}

#[sqlx::test(migrations = "../../db/migrations")]
async fn update_nonexistent_task_returns_404(pool: PgPool) {
    let app = common::build_test_app(pool);
    let response = put_json(app, "/api/v1/tasks/999999", json!({ "title": "Ghost" })).await;
    assert_eq!(response.status(), StatusCode::NOT_FOUND);
}

#[sqlx::test(migrations = "../../db/migrations")]
async fn update_task_is_partial(pool: PgPool) {
    let created = create_task(
        &pool,
        json!({
            "title": "Draft",
            "description": "first pass",
            "dueDate": "2030-01-01",
            "estimatedTime": 30
        }),
    )
    .await;
    let id = created["id"].as_i64().unwrap();

    let app = common::build_test_app(pool);
    let response = put_json(
        app,
        &format!("/api/v1/tasks/{id}"),
        json!({ "status": "completed", "description": null, "dueDate": "" }),
    )
    .await;

    assert_eq!(response.status(), StatusCode::OK);
    let json = body_json(response).await;
    assert_eq!(json["title"], "Draft");
    assert_eq!(json["status"], "completed");
    assert!(json["description"].is_null());
    assert!(json["dueDate"].is_null());
    assert_eq!(json["estimatedTime"], 30);
    assert!(json["completedAt"].is_null());
}

#[sqlx::test(migrations = "../../db/migrations")]
async fn update_task_rejects_blank_title(pool: PgPool) {
    let created = create_task(&pool, json!({ "title": "Keep me" })).await;
    let id = created["id"].as_i64().unwrap();

    let app = common::build_test_app(pool);
    let response = put_json(app, &format!("/api/v1/tasks/{id}"), json!({ "title": "" })).await;
    assert_eq!(response.status(), StatusCode::BAD_REQUEST);
}

#[sqlx::test(migrations = "../../db/migrations")]
async fn delete_task_then_404(pool: PgPool) {
    let created = create_task(&pool, json!({ "title": "Temporary" })).await;
    let id = created["id"].as_i64().unwrap();

    let app = common::build_test_app(pool.clone());
    let response = delete(app, &format!("/api/v1/tasks/{id}")).await;
    assert_eq!(response.status(), StatusCode::OK);
    assert_eq!(body_json(response).await, json!({ "success": true }));

    let app = common::build_test_app(pool.clone());
    let response = get(app, &format!("/api/v1/tasks/{id}")).await;
    assert_eq!(response.status(), StatusCode::NOT_FOUND);

    let app = common::build_test_app(pool);
    let response = delete(app, &format!("/api/v1/tasks/{id}")).await;
    assert_eq!(response.status(), StatusCode::NOT_FOUND);
}

// ---------------------------------------------------------------------------
// Malformed requests
// ---------------------------------------------------------------------------

#[sqlx::test(migrations = "../../db/migrations")]
async fn malformed_body_returns_json_400(pool: PgPool) {
    let app = common::build_test_app(pool);
    let request = axum::http::Request::builder()
        .method(axum::http::Method::POST)
        .uri("/api/v1/tasks")
        .header("content-type", "application/json")
        .body(axum::body::Body::from("{not json"))
        .unwrap();

    let response = common::send(app, request).await;
    assert_eq!(response.status(), StatusCode::BAD_REQUEST);
    assert_eq!(body_json(response).await["code"], "BAD_REQUEST");
}

#[sqlx::test(migrations = "../../db/migrations")]
async fn invalid_enum_in_body_returns_400(pool: PgPool) {
    let app = common::build_test_app(pool);
    let response = post_json(
        app,
        "/api/v1/tasks",
        json!({ "title": "Odd", "priority": "critical" }),
    )
    .await;
    assert_eq!(response.status(), StatusCode::BAD_REQUEST);
}

#[sqlx::test(migrations = "../../db/migrations")]
async fn non_numeric_id_returns_400(pool: PgPool) {
    let app = common::build_test_app(pool);
    let response = get(app, "/api/v1/tasks/abc").await;

    assert_eq!(response.status(), StatusCode::BAD_REQUEST);
    assert_eq!(body_json(response).await["code"], "BAD_REQUEST");
}
