mod common;

use axum::http::{Method, StatusCode};
use common::{REVOKED_TOKEN, VALID_TOKEN, lesson_body, setup_test_app};
use sqlx::PgPool;

#[sqlx::test(migrations = "./migrations")]
async fn test_protected_routes_require_bearer_token(pool: PgPool) {
    let app = setup_test_app(pool).await;

    for token in [
        None,
        Some("Basic dXNlcjpwYXNz"),
        Some("Bearer"),
        Some("Bearer "),
        Some("Bearer   "),
        Some("Bearer  valid-token"),
        Some("bearer valid-token"),
        Some("BEARER valid-token"),
    ] {
        let (status, body) = app
            .send(Method::GET, "/api/v1/lessons", token, None)
            .await;
        assert_eq!(status, StatusCode::UNAUTHORIZED);
        assert_eq!(body["statusCode"], 401);
        assert_eq!(body["message"], "Missing bearer token");
        assert_eq!(body["error"], "Unauthorized");
    }
}

#[sqlx::test(migrations = "./migrations")]
async fn test_rejected_token_is_unauthorized(pool: PgPool) {
    let app = setup_test_app(pool).await;

    let (status, body) = app
        .send(
            Method::POST,
            "/api/v1/lessons",
            Some(REVOKED_TOKEN),
            Some(lesson_body(1, "2025-03-10T09:00:00Z")),
        )
        .await;
    assert_eq!(status, StatusCode::UNAUTHORIZED);
    assert_eq!(body["message"], "Token validation failed");

    // Nothing was written
    let (status, _) = app
        .send(Method::GET, "/api/v1/lessons", Some(VALID_TOKEN), None)
        .await;
    assert_eq!(status, StatusCode::NO_CONTENT);
}

#[sqlx::test(migrations = "./migrations")]
async fn test_every_request_is_introspected(pool: PgPool) {
    let app = setup_test_app(pool).await;
    let calls = app
        .authority
        .mock_async(|when, then| {
            when.method(httpmock::Method::POST)
                .path("/validate")
                .header("authorization", "Bearer session-token");
            then.status(204);
        })
        .await;

    for _ in 0..2 {
        let (status, _) = app
            .send(
                Method::GET,
                "/api/v1/lessons",
                Some("Bearer session-token"),
                None,
            )
            .await;
        assert_eq!(status, StatusCode::NO_CONTENT);
    }

    calls.assert_calls_async(2).await;
}

#[sqlx::test(migrations = "./migrations")]
async fn test_scheme_is_case_sensitive(pool: PgPool) {
    let app = setup_test_app(pool).await;
    let calls = app
        .authority
        .mock_async(|when, then| {
            when.method(httpmock::Method::POST).path("/validate");
            then.status(200);
        })
        .await;

    for token in ["bearer valid-token", "Bearer  valid-token", "Bearer   "] {
        let (status, body) = app
            .send(Method::GET, "/api/v1/lessons", Some(token), None)
            .await;
        assert_eq!(status, StatusCode::UNAUTHORIZED);
        assert_eq!(body["message"], "Missing bearer token");
    }

    calls.assert_calls_async(0).await;
}

#[sqlx::test(migrations = "./migrations")]
async fn test_public_routes_skip_the_gate(pool: PgPool) {
    let app = setup_test_app(pool).await;

    let (status, body) = app.send(Method::GET, "/", None, None).await;
    assert_eq!(status, StatusCode::OK);
    assert_eq!(body["name"], "lessons");

    let (status, body) = app.send(Method::GET, "/api/v1/health", None, None).await;
    assert_eq!(status, StatusCode::OK);
    assert_eq!(body["status"], "ok");

    let (status, body) = app
        .send(Method::GET, "/api/v1/docs/openapi.json", None, None)
        .await;
    assert_eq!(status, StatusCode::OK);
    assert!(body["paths"]["/api/v1/lessons"].is_object());

    // Only GET is exempt
    let (status, _) = app.send(Method::POST, "/", None, None).await;
    assert_eq!(status, StatusCode::UNAUTHORIZED);
}
