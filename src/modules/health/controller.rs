use axum::{Json, extract::State, http::StatusCode};
use serde::Serialize;
use tracing::{error, instrument};
use utoipa::ToSchema;

use crate::state::AppState;

#[derive(Debug, Serialize, ToSchema)]
pub struct ServiceInfo {
    pub name: &'static str,
    pub version: &'static str,
    pub docs: &'static str,
}

#[derive(Debug, Serialize, ToSchema)]
pub struct HealthStatus {
    /// `ok` or `unavailable`
    pub status: &'static str,
    pub database: &'static str,
}

#[utoipa::path(
    get,
    path = "/",
    responses(
        (status = 200, description = "Service name and version", body = ServiceInfo)
    ),
    tag = "Health"
)]
pub async fn service_info() -> Json<ServiceInfo> {
    Json(ServiceInfo {
        name: env!("CARGO_PKG_NAME"),
        version: env!("CARGO_PKG_VERSION"),
        docs: "/api/v1/docs",
    })
}

#[utoipa::path(
    get,
    path = "/api/v1/health",
    responses(
        (status = 200, description = "Service and database reachable", body = HealthStatus),
        (status = 503, description = "Database unreachable", body = HealthStatus)
    ),
    tag = "Health"
)]
#[instrument(skip(state))]
pub async fn health_check(State(state): State<AppState>) -> (StatusCode, Json<HealthStatus>) {
    match lessons_db::ping(&state.db).await {
        Ok(()) => (
            StatusCode::OK,
            Json(HealthStatus {
                status: "ok",
                database: "ok",
            }),
        ),
        Err(e) => {
            error!(error = %e, "Health check failed: database unavailable");
            (
                StatusCode::SERVICE_UNAVAILABLE,
                Json(HealthStatus {
                    status: "unavailable",
                    database: "unavailable",
                }),
            )
        }
    }
}
