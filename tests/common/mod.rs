use axum::Router;
use axum::body::Body;
use axum::http::{Method, Request, StatusCode};
use http_body_util::BodyExt;
use httpmock::prelude::*;
use lessons::lessons_auth::IntrospectionClient;
use lessons::lessons_config::{CorsConfig, OAuthConfig};
use lessons::router::init_router;
use lessons::state::AppState;
use serde_json::{Value, json};
use sqlx::PgPool;
use tower::ServiceExt;
use uuid::Uuid;

pub const VALID_TOKEN: &str = "Bearer valid-token";
#[allow(dead_code)]
pub const REVOKED_TOKEN: &str = "Bearer revoked-token";
#[allow(dead_code)]
pub const TOKEN_SUBJECT: &str = "teacher-42";

/// Router wired to a mock introspection authority.
///
/// The authority accepts [`VALID_TOKEN`] with a JSON identity and answers 401
/// for [`REVOKED_TOKEN`]. The mock server must outlive the router, so both
/// are returned.
pub struct TestApp {
    pub router: Router,
    pub authority: MockServer,
}

pub async fn setup_test_app(pool: PgPool) -> TestApp {
    let authority = MockServer::start_async().await;

    authority
        .mock_async(|when, then| {
            when.method(POST)
                .path("/validate")
                .header("authorization", VALID_TOKEN);
            then.status(200)
                .header("content-type", "application/json")
                .json_body(json!({ "sub": TOKEN_SUBJECT, "active": true }));
        })
        .await;

    authority
        .mock_async(|when, then| {
            when.method(POST)
                .path("/validate")
                .header("authorization", REVOKED_TOKEN);
            then.status(401)
                .header("content-type", "application/json")
                .json_body(json!({ "active": false }));
        })
        .await;

    let oauth = OAuthConfig {
        service_url: Some(authority.base_url()),
        ..OAuthConfig::default()
    };

    let state = AppState {
        db: pool,
        introspection: IntrospectionClient::new(&oauth).unwrap(),
        cors_config: CorsConfig {
            allowed_origins: vec!["http://localhost:5173".to_string()],
        },
    };

    TestApp {
        router: init_router(state),
        authority,
    }
}

impl TestApp {
    /// Sends a request and returns the status and the JSON body (`Null` when
    /// the body is empty).
    pub async fn send(
        &self,
        method: Method,
        uri: &str,
        token: Option<&str>,
        body: Option<Value>,
    ) -> (StatusCode, Value) {
        let mut builder = Request::builder().method(method).uri(uri);
        if let Some(token) = token {
            builder = builder.header("authorization", token);
        }

        let request = match body {
            Some(body) => builder
                .header("content-type", "application/json")
                .body(Body::from(serde_json::to_string(&body).unwrap()))
                .unwrap(),
            None => builder.body(Body::empty()).unwrap(),
        };

        let response = self.router.clone().oneshot(request).await.unwrap();
        let status = response.status();
        let bytes = response.into_body().collect().await.unwrap().to_bytes();
        let body = serde_json::from_slice(&bytes).unwrap_or(Value::Null);
        (status, body)
    }

    #[allow(dead_code)]
    pub async fn create_lesson(&self, sequence: i32, date: &str) -> Value {
        let (status, body) = self
            .send(
                Method::POST,
                "/api/v1/lessons",
                Some(VALID_TOKEN),
                Some(lesson_body(sequence, date)),
            )
            .await;
        assert_eq!(status, StatusCode::CREATED, "unexpected body: {body}");
        body
    }

    #[allow(dead_code)]
    pub async fn create_subject(&self, lesson_id: &str, description: &str, credits: i32) -> Value {
        let (status, body) = self
            .send(
                Method::POST,
                &format!("/api/v1/lessons/{lesson_id}/subjects"),
                Some(VALID_TOKEN),
                Some(json!({ "description": description, "credits": credits })),
            )
            .await;
        assert_eq!(status, StatusCode::CREATED, "unexpected body: {body}");
        body
    }
}

#[allow(dead_code)]
pub fn lesson_body(sequence: i32, date: &str) -> Value {
    json!({
        "sequence": sequence,
        "date": date,
        "roomId": Uuid::new_v4(),
        "classId": Uuid::new_v4(),
    })
}
