// SPDX-License-Identifier: MIT

//! HTTP surface tests.
//!
//! These tests verify that:
//! 1. Each error kind maps to its own status and code
//! 2. The solved-question round trip works over JSON
//! 3. Reconciliation reports the skipped outcome distinctly

use axum::{
    body::Body,
    http::{header, Method, Request, StatusCode},
    Router,
};
use leetrack::db::UserStore;
use serde_json::{json, Value};
use tower::ServiceExt;

mod common;
use common::{create_test_app, test_user, ScriptedProvider};

async fn call(app: &Router, method: Method, uri: &str, body: Value) -> (StatusCode, Value) {
    let response = app
        .clone()
        .oneshot(
            Request::builder()
                .method(method)
                .uri(uri)
                .header(header::CONTENT_TYPE, "application/json")
                .body(Body::from(body.to_string()))
                .unwrap(),
        )
        .await
        .unwrap();

    let status = response.status();
    let bytes = axum::body::to_bytes(response.into_body(), 64 * 1024)
        .await
        .unwrap();
    let json = serde_json::from_slice(&bytes).unwrap_or(Value::Null);
    (status, json)
}

async fn post(app: &Router, uri: &str, body: Value) -> (StatusCode, Value) {
    call(app, Method::POST, uri, body).await
}

#[tokio::test]
async fn test_health() {
    let (app, _db, _state) = create_test_app(ScriptedProvider::returning(&[]));

    let response = app
        .oneshot(Request::builder().uri("/health").body(Body::empty()).unwrap())
        .await
        .unwrap();

    assert_eq!(response.status(), StatusCode::OK);
}

#[tokio::test]
async fn test_solved_question_round_trip() {
    let (app, db, _state) = create_test_app(ScriptedProvider::returning(&[]));
    db.insert(test_user("ada@example.com", Some("ada"))).await;

    let (status, body) = post(
        &app,
        "/getSolvedQuestions",
        json!({"email": "ada@example.com"}),
    )
    .await;
    assert_eq!(status, StatusCode::OK);
    assert_eq!(body["solved_questions"], json!(["two-sum"]));

    let add = json!({"email": "ada@example.com", "question_slug": "jump-game"});
    let (status, body) = post(&app, "/addSolvedQuestion", add.clone()).await;
    assert_eq!(status, StatusCode::OK);
    assert_eq!(body["status"], json!(true));

    let (status, body) = post(&app, "/addSolvedQuestion", add.clone()).await;
    assert_eq!(status, StatusCode::CONFLICT);
    assert_eq!(body["error"], "conflict");
    assert_eq!(body["status"], json!(false));

    let (_, body) = post(
        &app,
        "/getSolvedQuestions",
        json!({"email": "ada@example.com"}),
    )
    .await;
    assert_eq!(body["solved_questions"], json!(["jump-game"]));

    let (status, _) = post(&app, "/removeSolvedQuestion", add).await;
    assert_eq!(status, StatusCode::OK);

    let stored = db
        .find_user_by_email("ada@example.com")
        .await
        .unwrap()
        .unwrap();
    assert!(stored.solved_questions.is_empty());
}

#[tokio::test]
async fn test_error_kinds_are_distinct() {
    let (app, db, _state) = create_test_app(ScriptedProvider::failing("boom"));
    db.insert(test_user("ada@example.com", Some("ada"))).await;

    let (status, body) = post(&app, "/getSolvedQuestions", json!({"email": "nope"})).await;
    assert_eq!(status, StatusCode::BAD_REQUEST);
    assert_eq!(body["error"], "bad_request");

    let (status, body) = post(
        &app,
        "/removeSolvedQuestion",
        json!({"email": "ghost@example.com", "question_slug": "two-sum"}),
    )
    .await;
    assert_eq!(status, StatusCode::NOT_FOUND);
    assert_eq!(body["error"], "not_found");

    let (status, body) = post(
        &app,
        "/updateSolvedWithLeetCode",
        json!({"email": "ada@example.com"}),
    )
    .await;
    assert_eq!(status, StatusCode::BAD_GATEWAY);
    assert_eq!(body["error"], "upstream_error");
}

#[tokio::test]
async fn test_malformed_body_is_bad_request() {
    let (app, _db, _state) = create_test_app(ScriptedProvider::returning(&[]));

    let (status, body) = post(&app, "/addSolvedQuestion", json!({"email": "a@b.co"})).await;
    assert_eq!(status, StatusCode::BAD_REQUEST);
    assert_eq!(body["error"], "bad_request");

    let (status, _) = post(
        &app,
        "/addSolvedQuestion",
        json!({"email": "a@b.co", "question_slug": ""}),
    )
    .await;
    assert_eq!(status, StatusCode::BAD_REQUEST);
}

#[tokio::test]
async fn test_reconcile_responses() {
    let (app, db, _state) =
        create_test_app(ScriptedProvider::returning(&[("Easy", 5), ("Medium", 2)]));
    db.insert(test_user("ada@example.com", Some("ada"))).await;
    db.insert(test_user("nouser@example.com", None)).await;

    let (status, body) = post(
        &app,
        "/updateSolvedWithLeetCode",
        json!({"email": "ada@example.com"}),
    )
    .await;
    assert_eq!(status, StatusCode::OK);
    assert_eq!(body["skipped"], json!(false));
    assert_eq!(body["solved"], json!({"easy": 5, "medium": 2, "hard": 0}));

    let (status, body) = post(
        &app,
        "/updateSolvedWithLeetCode",
        json!({"email": "nouser@example.com"}),
    )
    .await;
    assert_eq!(status, StatusCode::OK);
    assert_eq!(body["skipped"], json!(true));
    assert!(body.get("solved").is_none());
}

#[tokio::test]
async fn test_register_update_and_stats() {
    let (app, _db, _state) = create_test_app(ScriptedProvider::returning(&[]));

    let (status, body) = post(
        &app,
        "/addUser",
        json!({"email": "lin@example.com", "name": "Lin"}),
    )
    .await;
    assert_eq!(status, StatusCode::CREATED);
    assert_eq!(body["inserted_id"], "lin@example.com");

    let (status, body) = post(&app, "/getUserData", json!({"email": "lin@example.com"})).await;
    assert_eq!(status, StatusCode::OK);
    assert_eq!(body["username"], "lin");
    assert_eq!(body["institution"], "N/A");

    let (status, _) = call(
        &app,
        Method::PATCH,
        "/updateUser",
        json!({"email": "lin@example.com", "institution": "MIT"}),
    )
    .await;
    assert_eq!(status, StatusCode::OK);

    // Non-allow-listed fields are refused
    let (status, _) = call(
        &app,
        Method::PATCH,
        "/updateUser",
        json!({"email": "lin@example.com", "solved": {"easy": 999}}),
    )
    .await;
    assert_eq!(status, StatusCode::BAD_REQUEST);

    let (status, body) = post(&app, "/getStats", json!({"email": "lin@example.com"})).await;
    assert_eq!(status, StatusCode::OK);
    assert_eq!(body["userStats"], json!({"easy": 0, "medium": 0, "hard": 0}));
    assert_eq!(body["solved_questions"], json!([]));
}

#[tokio::test]
async fn test_register_shared_local_part() {
    let (app, _db, _state) = create_test_app(ScriptedProvider::returning(&[]));

    let (status, _) = post(&app, "/addUser", json!({"email": "john@gmail.com"})).await;
    assert_eq!(status, StatusCode::CREATED);

    // Empty username is treated as absent, not as a length violation
    let (status, _) = post(
        &app,
        "/addUser",
        json!({"email": "john@yahoo.com", "username": ""}),
    )
    .await;
    assert_eq!(status, StatusCode::CREATED);

    for email in ["john@gmail.com", "john@yahoo.com"] {
        let (status, body) = post(&app, "/getUserData", json!({ "email": email })).await;
        assert_eq!(status, StatusCode::OK);
        assert_eq!(body["username"], "john");
    }
}

#[tokio::test]
async fn test_cors_preflight() {
    let (app, _db, _state) = create_test_app(ScriptedProvider::returning(&[]));

    let response = app
        .oneshot(
            Request::builder()
                .method(Method::OPTIONS)
                .uri("/addSolvedQuestion")
                .header(header::ORIGIN, "https://example.org")
                .header(header::ACCESS_CONTROL_REQUEST_METHOD, "POST")
                .body(Body::empty())
                .unwrap(),
        )
        .await
        .unwrap();

    assert_eq!(response.status(), StatusCode::OK);
    assert_eq!(
        response
            .headers()
            .get(header::ACCESS_CONTROL_ALLOW_ORIGIN)
            .unwrap(),
        "*"
    );
}
