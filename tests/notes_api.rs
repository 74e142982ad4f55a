//! Notes API Tests
//!
//! Drives the full router in-process and checks status codes and bodies
//! for every notes endpoint, including failure translation.

use std::sync::Arc;

use axum::body::{to_bytes, Body};
use axum::http::{header, Request, StatusCode};
use axum::Router;
use notesd::http_server::HttpServer;
use notesd::observability::MetricsRegistry;
use notesd::service::NoteService;
use notesd::storage::{Database, SqliteNoteRepository};
use serde_json::{json, Value};
use tower::ServiceExt;

// =============================================================================
// Test Utilities
// =============================================================================

async fn app_with_db() -> (Router, Database) {
    let db = Database::in_memory().await.unwrap();
    let service = NoteService::new(
        Arc::new(SqliteNoteRepository::new(&db)),
        Arc::new(MetricsRegistry::new()),
    );
    let router = HttpServer::new(service).unwrap().router();
    (router, db)
}

async fn app() -> Router {
    app_with_db().await.0
}

fn json_request(method: &str, uri: &str, body: Value) -> Request<Body> {
    Request::builder()
        .method(method)
        .uri(uri)
        .header(header::CONTENT_TYPE, "application/json")
        .body(Body::from(body.to_string()))
        .unwrap()
}

fn empty_request(method: &str, uri: &str) -> Request<Body> {
    Request::builder()
        .method(method)
        .uri(uri)
        .body(Body::empty())
        .unwrap()
}

async fn send(app: &Router, request: Request<Body>) -> (StatusCode, Value) {
    let response = app.clone().oneshot(request).await.unwrap();
    let status = response.status();
    let bytes = to_bytes(response.into_body(), usize::MAX).await.unwrap();
    let body = if bytes.is_empty() {
        Value::Null
    } else {
        serde_json::from_slice(&bytes).unwrap()
    };
    (status, body)
}

async fn create(app: &Router, title: &str, body: &str) -> Value {
    let (status, note) = send(
        app,
        json_request("POST", "/notes", json!({"title": title, "body": body})),
    )
    .await;
    assert_eq!(status, StatusCode::CREATED);
    note
}

// =============================================================================
// Create & Read
// =============================================================================

#[tokio::test]
async fn test_create_then_read_returns_same_fields() {
    let app = app().await;

    let response = app
        .clone()
        .oneshot(json_request(
            "POST",
            "/notes",
            json!({"title": "Groceries", "body": "Milk, eggs"}),
        ))
        .await
        .unwrap();
    assert_eq!(response.status(), StatusCode::CREATED);
    let location = response.headers()[header::LOCATION].to_str().unwrap().to_string();
    let bytes = to_bytes(response.into_body(), usize::MAX).await.unwrap();
    let created: Value = serde_json::from_slice(&bytes).unwrap();

    assert_eq!(location, format!("/notes/{}", created["id"]));
    assert_eq!(created["title"], "Groceries");
    assert_eq!(created["body"], "Milk, eggs");
    assert!(created["createdAt"].is_string());
    assert_eq!(created["createdAt"], created["lastUpdated"]);

    let (status, fetched) = send(&app, empty_request("GET", &location)).await;
    assert_eq!(status, StatusCode::OK);
    assert_eq!(fetched, created);
}

#[tokio::test]
async fn test_client_supplied_id_is_ignored() {
    let app = app().await;
    let note = send(
        &app,
        json_request("POST", "/notes", json!({"id": 999, "title": "t", "body": "b"})),
    )
    .await
    .1;
    assert_ne!(note["id"], 999);
}

#[tokio::test]
async fn test_get_unknown_note_is_404() {
    let app = app().await;
    let (status, body) = send(&app, empty_request("GET", "/notes/12345")).await;
    assert_eq!(status, StatusCode::NOT_FOUND);
    assert_eq!(body["code"], 404);
    assert_eq!(body["error"], "Note 12345 not found");
}

#[tokio::test]
async fn test_non_integer_id_is_400() {
    let app = app().await;
    let (status, body) = send(&app, empty_request("GET", "/notes/abc")).await;
    assert_eq!(status, StatusCode::BAD_REQUEST);
    assert_eq!(body["code"], 400);
}

// =============================================================================
// Validation
// =============================================================================

#[tokio::test]
async fn test_invalid_create_lists_violations_and_persists_nothing() {
    let app = app().await;

    let (status, body) = send(
        &app,
        json_request("POST", "/notes", json!({"title": "", "body": null})),
    )
    .await;
    assert_eq!(status, StatusCode::BAD_REQUEST);
    assert_eq!(body["error"], "Note validation has failed.");
    let violations = body["violations"].as_array().unwrap();
    assert_eq!(violations.len(), 2);
    assert_eq!(violations[0]["field"], "title");
    assert_eq!(violations[0]["message"], "Note title cannot be empty.");
    assert_eq!(violations[1]["field"], "body");
    assert_eq!(violations[1]["message"], "Note body cannot be empty.");

    let (_, list) = send(&app, empty_request("GET", "/notes")).await;
    assert_eq!(list["count"], 0);
}

#[tokio::test]
async fn test_title_too_long_is_400() {
    let app = app().await;
    let (status, body) = send(
        &app,
        json_request("POST", "/notes", json!({"title": "x".repeat(256), "body": "b"})),
    )
    .await;
    assert_eq!(status, StatusCode::BAD_REQUEST);
    assert_eq!(body["violations"][0]["rule"], "max_length");
}

#[tokio::test]
async fn test_nul_characters_accepted_when_validation_passes() {
    let app = app().await;

    let created = create(&app, "\u{0}t", "b").await;
    assert_eq!(created["title"], "\u{0}t");

    let uri = format!("/notes/{}", created["id"]);
    let (status, updated) = send(
        &app,
        json_request("PUT", &uri, json!({"title": "t", "body": "\u{0}"})),
    )
    .await;
    assert_eq!(status, StatusCode::OK);
    assert_eq!(updated["body"], "\u{0}");

    let (_, fetched) = send(&app, empty_request("GET", &uri)).await;
    assert_eq!(fetched, updated);
}

#[tokio::test]
async fn test_malformed_json_is_400() {
    let app = app().await;
    let request = Request::builder()
        .method("POST")
        .uri("/notes")
        .header(header::CONTENT_TYPE, "application/json")
        .body(Body::from("{\"title\": "))
        .unwrap();
    let (status, body) = send(&app, request).await;
    assert_eq!(status, StatusCode::BAD_REQUEST);
    assert!(body.get("violations").is_none());
}

// =============================================================================
// Update & Delete
// =============================================================================

#[tokio::test]
async fn test_update_replaces_fields() {
    let app = app().await;
    let created = create(&app, "Draft", "first").await;
    let uri = format!("/notes/{}", created["id"]);

    let (status, updated) = send(
        &app,
        json_request("PUT", &uri, json!({"title": "Final", "body": "second"})),
    )
    .await;
    assert_eq!(status, StatusCode::OK);
    assert_eq!(updated["id"], created["id"]);
    assert_eq!(updated["title"], "Final");
    assert_eq!(updated["body"], "second");
    assert_eq!(updated["createdAt"], created["createdAt"]);

    let (_, fetched) = send(&app, empty_request("GET", &uri)).await;
    assert_eq!(fetched, updated);
}

#[tokio::test]
async fn test_update_unknown_note_is_404() {
    let app = app().await;
    let (status, _) = send(
        &app,
        json_request("PUT", "/notes/77", json!({"title": "t", "body": "b"})),
    )
    .await;
    assert_eq!(status, StatusCode::NOT_FOUND);
}

#[tokio::test]
async fn test_invalid_update_leaves_note_unchanged() {
    let app = app().await;
    let created = create(&app, "Keep", "me").await;
    let uri = format!("/notes/{}", created["id"]);

    let (status, _) = send(&app, json_request("PUT", &uri, json!({"title": "", "body": "x"}))).await;
    assert_eq!(status, StatusCode::BAD_REQUEST);

    let (_, fetched) = send(&app, empty_request("GET", &uri)).await;
    assert_eq!(fetched, created);
}

#[tokio::test]
async fn test_delete_twice_is_204_then_404() {
    let app = app().await;
    let created = create(&app, "Temp", "gone soon").await;
    let uri = format!("/notes/{}", created["id"]);

    let (status, body) = send(&app, empty_request("DELETE", &uri)).await;
    assert_eq!(status, StatusCode::NO_CONTENT);
    assert_eq!(body, Value::Null);

    let (status, _) = send(&app, empty_request("DELETE", &uri)).await;
    assert_eq!(status, StatusCode::NOT_FOUND);

    let (status, _) = send(&app, empty_request("GET", &uri)).await;
    assert_eq!(status, StatusCode::NOT_FOUND);
}

// =============================================================================
// Listing
// =============================================================================

#[tokio::test]
async fn test_list_in_creation_order_and_stable() {
    let app = app().await;
    for i in 0..5 {
        create(&app, &format!("note {i}"), "body").await;
    }

    let (status, first) = send(&app, empty_request("GET", "/notes")).await;
    assert_eq!(status, StatusCode::OK);
    assert_eq!(first["count"], 5);
    assert_eq!(first["limit"], 100);
    assert_eq!(first["offset"], 0);
    let titles: Vec<&str> = first["data"]
        .as_array()
        .unwrap()
        .iter()
        .map(|n| n["title"].as_str().unwrap())
        .collect();
    assert_eq!(titles, vec!["note 0", "note 1", "note 2", "note 3", "note 4"]);

    let (_, second) = send(&app, empty_request("GET", "/notes")).await;
    assert_eq!(first, second);
}

#[tokio::test]
async fn test_list_window() {
    let app = app().await;
    for i in 0..5 {
        create(&app, &format!("note {i}"), "body").await;
    }

    let (status, page) = send(&app, empty_request("GET", "/notes?limit=2&offset=3")).await;
    assert_eq!(status, StatusCode::OK);
    assert_eq!(page["count"], 2);
    assert_eq!(page["data"][0]["title"], "note 3");
    assert_eq!(page["data"][1]["title"], "note 4");
}

#[tokio::test]
async fn test_list_rejects_bad_paging() {
    let app = app().await;
    for uri in ["/notes?limit=0", "/notes?limit=1001", "/notes?limit=abc", "/notes?offset=-1"] {
        let (status, body) = send(&app, empty_request("GET", uri)).await;
        assert_eq!(status, StatusCode::BAD_REQUEST, "{uri}");
        assert_eq!(body["code"], 400);
    }
}

// =============================================================================
// Concurrency
// =============================================================================

#[tokio::test(flavor = "multi_thread", worker_threads = 4)]
async fn test_concurrent_creates_get_distinct_ids() {
    let app = app().await;

    let handles: Vec<_> = (0..16)
        .map(|i| {
            let app = app.clone();
            tokio::spawn(async move {
                let request = json_request(
                    "POST",
                    "/notes",
                    json!({"title": format!("n{i}"), "body": "b"}),
                );
                send(&app, request).await
            })
        })
        .collect();

    let mut ids = Vec::new();
    for handle in handles {
        let (status, note) = handle.await.unwrap();
        assert_eq!(status, StatusCode::CREATED);
        ids.push(note["id"].as_i64().unwrap());
    }
    ids.sort_unstable();
    ids.dedup();
    assert_eq!(ids.len(), 16);
}

// =============================================================================
// Operations & Failure Translation
// =============================================================================

#[tokio::test]
async fn test_health_reports_database() {
    let (app, db) = app_with_db().await;

    let (status, body) = send(&app, empty_request("GET", "/health")).await;
    assert_eq!(status, StatusCode::OK);
    assert_eq!(body["status"], "UP");
    assert_eq!(body["database"], "UP");

    db.close().await;

    let (status, body) = send(&app, empty_request("GET", "/health")).await;
    assert_eq!(status, StatusCode::SERVICE_UNAVAILABLE);
    assert_eq!(body["database"], "DOWN");
}

#[tokio::test]
async fn test_unavailable_database_is_503() {
    let (app, db) = app_with_db().await;
    db.close().await;

    let (status, body) = send(
        &app,
        json_request("POST", "/notes", json!({"title": "t", "body": "b"})),
    )
    .await;
    assert_eq!(status, StatusCode::SERVICE_UNAVAILABLE);
    assert_eq!(body["code"], 503);
    assert_eq!(body["error"], "Service temporarily unavailable");
}

#[tokio::test]
async fn test_metrics_count_requests() {
    let app = app().await;
    create(&app, "a", "b").await;
    send(&app, empty_request("GET", "/notes/999")).await;
    send(&app, json_request("POST", "/notes", json!({}))).await;

    let (status, metrics) = send(&app, empty_request("GET", "/metrics")).await;
    assert_eq!(status, StatusCode::OK);
    assert_eq!(metrics["notes_created"], 1);
    assert_eq!(metrics["not_found"], 1);
    assert_eq!(metrics["validation_rejections"], 1);
}
