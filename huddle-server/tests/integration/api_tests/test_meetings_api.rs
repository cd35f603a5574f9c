use axum::http::StatusCode;
use huddle_core::{ParticipantId, RoomCode};
use serde_json::json;

use super::{call, get, post_json, test_app};
use crate::integration::init_tracing;

#[tokio::test]
async fn test_create_then_fetch_meeting() {
    init_tracing();
    let (app, _) = test_app();

    let (status, created) = call(
        &app,
        post_json(
            "/meetings",
            json!({ "code": "abc-123", "title": "Standup", "createdBy": "alice" }),
        ),
    )
    .await;
    assert_eq!(status, StatusCode::CREATED);
    assert_eq!(created["code"], "abc-123");
    assert_eq!(created["createdBy"], "alice");

    let (status, fetched) = call(&app, get("/meetings/abc-123")).await;
    assert_eq!(status, StatusCode::OK);
    assert_eq!(fetched, created);

    let (status, listed) = call(&app, get("/meetings")).await;
    assert_eq!(status, StatusCode::OK);
    assert_eq!(listed.as_array().map(Vec::len), Some(1));
}

#[tokio::test]
async fn test_duplicate_code_conflicts() {
    init_tracing();
    let (app, _) = test_app();
    let body = json!({ "code": "dup", "title": "First", "createdBy": "alice" });

    let (status, _) = call(&app, post_json("/meetings", body.clone())).await;
    assert_eq!(status, StatusCode::CREATED);

    let (status, error) = call(&app, post_json("/meetings", body)).await;
    assert_eq!(status, StatusCode::CONFLICT);
    assert_eq!(error["error"]["code"], "CONFLICT");
}

#[tokio::test]
async fn test_missing_fields_are_rejected() {
    init_tracing();
    let (app, _) = test_app();

    let (status, error) = call(&app, post_json("/meetings", json!({ "title": "No code" }))).await;
    assert_eq!(status, StatusCode::BAD_REQUEST);
    assert_eq!(error["error"]["code"], "VALIDATION_FAILED");

    let (_, listed) = call(&app, get("/meetings")).await;
    assert_eq!(listed, json!([]));
}

#[tokio::test]
async fn test_unknown_meeting_is_not_found() {
    init_tracing();
    let (app, _) = test_app();

    let (status, error) = call(&app, get("/meetings/nope")).await;
    assert_eq!(status, StatusCode::NOT_FOUND);
    assert_eq!(error["error"]["code"], "NOT_FOUND");
}

#[tokio::test]
async fn test_participants_reflect_live_presence() {
    init_tracing();
    let (app, state) = test_app();
    let conn = huddle_core::ConnectionId::new();

    state
        .hub
        .join(conn, ParticipantId::from("alice"), RoomCode::from("X"))
        .await
        .unwrap();

    let (status, people) = call(&app, get("/meetings/X/participants")).await;
    assert_eq!(status, StatusCode::OK);
    assert_eq!(
        people,
        json!([{ "participantId": "alice", "connectionId": conn.to_string() }])
    );

    let (_, empty) = call(&app, get("/meetings/Y/participants")).await;
    assert_eq!(empty, json!([]));
}

#[tokio::test]
async fn test_healthz() {
    let (app, _) = test_app();
    let (status, _) = call(&app, get("/healthz")).await;
    assert_eq!(status, StatusCode::OK);
}
