use crate::docs::ApiDoc;
use crate::logging::logging_middleware;
use crate::metrics::metrics_middleware;
use crate::middleware::auth::require_bearer;
use crate::modules::health::{init_health_router, init_root_router};
use crate::modules::lessons::init_lessons_router;
use crate::state::AppState;
use axum::http::{HeaderValue, Method};
use axum::{Router, middleware};
use tower_http::cors::CorsLayer;
use utoipa::OpenApi;
use utoipa_scalar::{Scalar, Servable as _};
use utoipa_swagger_ui::SwaggerUi;

pub const API_PREFIX: &str = "/api/v1";

fn cors_layer(state: &AppState) -> CorsLayer {
    let allowed_origins: Vec<HeaderValue> = state
        .cors_config
        .allowed_origins
        .iter()
        .filter_map(|origin| origin.parse().ok())
        .collect();

    CorsLayer::new()
        .allow_origin(allowed_origins)
        .allow_methods([
            Method::GET,
            Method::POST,
            Method::PUT,
            Method::PATCH,
            Method::DELETE,
            Method::OPTIONS,
        ])
        .allow_headers([
            axum::http::header::AUTHORIZATION,
            axum::http::header::CONTENT_TYPE,
            axum::http::header::ACCEPT,
        ])
        .allow_credentials(true)
}

/// Layer order, outermost first: logging, CORS, metrics, bearer gate.
pub fn init_router(state: AppState) -> Router {
    Router::new()
        .merge(
            SwaggerUi::new("/api/v1/docs")
                .url("/api/v1/docs/openapi.json", ApiDoc::openapi()),
        )
        .merge(Scalar::with_url("/api/v1/docs/scalar", ApiDoc::openapi()))
        .merge(init_root_router())
        .nest(
            API_PREFIX,
            Router::new()
                .merge(init_health_router())
                .nest("/lessons", init_lessons_router()),
        )
        .layer(middleware::from_fn_with_state(state.clone(), require_bearer))
        .layer(middleware::from_fn(metrics_middleware))
        .layer(cors_layer(&state))
        .with_state(state)
        .layer(middleware::from_fn(logging_middleware))
}
