//! Health check handler

use axum::{extract::State, Json};
use serde::Serialize;

use crate::response::ApiResponse;
use crate::state::AppState;

#[derive(Debug, Serialize)]
pub struct HealthStatus {
    pub status: &'static str,
    /// `store` when a configuration store is attached, `static` otherwise.
    pub pricing_mode: &'static str,
}

/// Health handler - GET /health
pub async fn health_check(State(state): State<AppState>) -> Json<ApiResponse<HealthStatus>> {
    let pricing_mode = if state.conference.has_store() { "store" } else { "static" };
    Json(ApiResponse::success(HealthStatus {
        status: "ok",
        pricing_mode,
    }))
}
