mod common;

use axum::http::{Method, StatusCode};
use common::{VALID_TOKEN, lesson_body, setup_test_app};
use serde_json::json;
use sqlx::PgPool;
use uuid::Uuid;

const UUID_V4_EXPECTED: &str = "Validation failed (uuid v4 is expected)";

#[sqlx::test(migrations = "./migrations")]
async fn test_create_conflict_unauthorized_delete_flow(pool: PgPool) {
    let app = setup_test_app(pool).await;

    let lesson = app.create_lesson(1, "2025-03-10T09:00:00Z").await;
    let id = lesson["id"].as_str().unwrap().to_string();
    assert_eq!(lesson["sequence"], 1);
    assert!(lesson["roomId"].is_string());
    assert!(lesson["classId"].is_string());
    assert!(lesson["createdAt"].is_string());

    let (status, body) = app
        .send(
            Method::POST,
            "/api/v1/lessons",
            Some(VALID_TOKEN),
            Some(lesson_body(1, "2025-03-10T09:00:00Z")),
        )
        .await;
    assert_eq!(status, StatusCode::CONFLICT);
    assert_eq!(body["statusCode"], 409);
    assert_eq!(body["error"], "Conflict");
    assert!(body["message"].as_str().unwrap().contains("already exists"));

    let (status, body) = app
        .send(Method::GET, &format!("/api/v1/lessons/{id}"), None, None)
        .await;
    assert_eq!(status, StatusCode::UNAUTHORIZED);
    assert_eq!(body["message"], "Missing bearer token");

    let (status, body) = app
        .send(
            Method::DELETE,
            &format!("/api/v1/lessons/{id}"),
            Some(VALID_TOKEN),
            None,
        )
        .await;
    assert_eq!(status, StatusCode::OK);
    assert_eq!(body["id"], id.as_str());

    let (status, body) = app
        .send(
            Method::GET,
            &format!("/api/v1/lessons/{id}"),
            Some(VALID_TOKEN),
            None,
        )
        .await;
    assert_eq!(status, StatusCode::NOT_FOUND);
    assert_eq!(body["message"], format!("Lesson with ID {id} not found"));
    assert_eq!(body["error"], "Not Found");
}

#[sqlx::test(migrations = "./migrations")]
async fn test_list_lessons_empty_then_filled(pool: PgPool) {
    let app = setup_test_app(pool).await;

    let (status, body) = app
        .send(Method::GET, "/api/v1/lessons", Some(VALID_TOKEN), None)
        .await;
    assert_eq!(status, StatusCode::NO_CONTENT);
    assert!(body.is_null());

    app.create_lesson(1, "2025-03-10T09:00:00Z").await;
    app.create_lesson(2, "2025-03-10T09:00:00Z").await;

    let (status, body) = app
        .send(Method::GET, "/api/v1/lessons", Some(VALID_TOKEN), None)
        .await;
    assert_eq!(status, StatusCode::OK);
    assert_eq!(body.as_array().unwrap().len(), 2);
}

#[sqlx::test(migrations = "./migrations")]
async fn test_put_replaces_and_patch_merges(pool: PgPool) {
    let app = setup_test_app(pool).await;
    let lesson = app.create_lesson(1, "2025-03-10T09:00:00Z").await;
    let id = lesson["id"].as_str().unwrap();
    let uri = format!("/api/v1/lessons/{id}");

    let replacement = lesson_body(5, "2025-04-01T08:30:00Z");
    let (status, body) = app
        .send(Method::PUT, &uri, Some(VALID_TOKEN), Some(replacement.clone()))
        .await;
    assert_eq!(status, StatusCode::OK);
    assert_eq!(body["sequence"], 5);
    assert_eq!(body["roomId"], replacement["roomId"]);

    let (status, body) = app
        .send(
            Method::PATCH,
            &uri,
            Some(VALID_TOKEN),
            Some(json!({ "sequence": 6 })),
        )
        .await;
    assert_eq!(status, StatusCode::OK);
    assert_eq!(body["sequence"], 6);
    assert_eq!(body["roomId"], replacement["roomId"]);
    assert_eq!(body["classId"], replacement["classId"]);
}

#[sqlx::test(migrations = "./migrations")]
async fn test_updates_into_taken_slot_conflict(pool: PgPool) {
    let app = setup_test_app(pool).await;
    app.create_lesson(1, "2025-03-10T09:00:00Z").await;
    let second = app.create_lesson(2, "2025-03-10T09:00:00Z").await;
    let uri = format!("/api/v1/lessons/{}", second["id"].as_str().unwrap());

    let (status, _) = app
        .send(
            Method::PUT,
            &uri,
            Some(VALID_TOKEN),
            Some(lesson_body(1, "2025-03-10T09:00:00Z")),
        )
        .await;
    assert_eq!(status, StatusCode::CONFLICT);

    let (status, body) = app
        .send(
            Method::PATCH,
            &uri,
            Some(VALID_TOKEN),
            Some(json!({ "sequence": 1 })),
        )
        .await;
    assert_eq!(status, StatusCode::CONFLICT);
    assert_eq!(
        body["message"],
        "Lesson with sequence 1 on 2025-03-10T09:00:00+00:00 already exists"
    );
}

#[sqlx::test(migrations = "./migrations")]
async fn test_missing_lesson_is_not_found_for_every_verb(pool: PgPool) {
    let app = setup_test_app(pool).await;
    let uri = format!("/api/v1/lessons/{}", Uuid::new_v4());

    let (status, _) = app.send(Method::GET, &uri, Some(VALID_TOKEN), None).await;
    assert_eq!(status, StatusCode::NOT_FOUND);

    let (status, _) = app
        .send(
            Method::PUT,
            &uri,
            Some(VALID_TOKEN),
            Some(lesson_body(1, "2025-03-10T09:00:00Z")),
        )
        .await;
    assert_eq!(status, StatusCode::NOT_FOUND);

    let (status, _) = app
        .send(Method::PATCH, &uri, Some(VALID_TOKEN), Some(json!({})))
        .await;
    assert_eq!(status, StatusCode::NOT_FOUND);

    let (status, _) = app.send(Method::DELETE, &uri, Some(VALID_TOKEN), None).await;
    assert_eq!(status, StatusCode::NOT_FOUND);
}

#[sqlx::test(migrations = "./migrations")]
async fn test_non_v4_ids_are_rejected(pool: PgPool) {
    let app = setup_test_app(pool).await;

    for id in ["not-a-uuid", "6ba7b810-9dad-11d1-80b4-00c04fd430c8"] {
        let (status, body) = app
            .send(
                Method::GET,
                &format!("/api/v1/lessons/{id}"),
                Some(VALID_TOKEN),
                None,
            )
            .await;
        assert_eq!(status, StatusCode::BAD_REQUEST);
        assert_eq!(body["message"], UUID_V4_EXPECTED);
        assert_eq!(body["error"], "Bad Request");
    }
}

#[sqlx::test(migrations = "./migrations")]
async fn test_invalid_bodies_are_rejected(pool: PgPool) {
    let app = setup_test_app(pool).await;

    let (status, body) = app
        .send(
            Method::POST,
            "/api/v1/lessons",
            Some(VALID_TOKEN),
            Some(lesson_body(-1, "2025-03-10T09:00:00Z")),
        )
        .await;
    assert_eq!(status, StatusCode::BAD_REQUEST);
    assert_eq!(body["message"], "sequence must be a non-negative integer");

    let (status, body) = app
        .send(
            Method::POST,
            "/api/v1/lessons",
            Some(VALID_TOKEN),
            Some(json!({ "sequence": 1, "date": "2025-03-10T09:00:00Z" })),
        )
        .await;
    assert_eq!(status, StatusCode::BAD_REQUEST);
    assert_eq!(body["message"], "roomId is required");

    let (status, _) = app
        .send(
            Method::POST,
            "/api/v1/lessons",
            Some(VALID_TOKEN),
            Some(lesson_body(1, "next tuesday")),
        )
        .await;
    assert_eq!(status, StatusCode::BAD_REQUEST);
}
