use axum::Json;
use axum::extract::State;
use serde::Serialize;

use crate::api::state::AppState;
use crate::config::APP_VERSION;
use crate::detection::format::timestamp_now;

#[derive(Serialize)]
pub struct HealthResponse {
    pub status: &'static str,
    pub message: &'static str,
    pub timestamp: String,
    pub version: &'static str,
    pub database: &'static str,
}

/// `GET /api/health`
pub async fn check(State(state): State<AppState>) -> Json<HealthResponse> {
    Json(HealthResponse {
        status: "healthy",
        message: "AI Agriculture Assistant Backend",
        timestamp: timestamp_now(),
        version: APP_VERSION,
        database: state.storage_status(),
    })
}
