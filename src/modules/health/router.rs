use axum::{Router, routing::get};

use crate::state::AppState;

use super::controller::{health_check, service_info};

pub fn init_root_router() -> Router<AppState> {
    Router::new().route("/", get(service_info))
}

/// Mounted under `/api/v1`.
pub fn init_health_router() -> Router<AppState> {
    Router::new().route("/health", get(health_check))
}
