//! Route table

use axum::{http::Method, routing::get, Router};
use tower_http::{cors::CorsLayer, trace::TraceLayer};

use crate::handlers::{conference, health};
use crate::state::AppState;

pub fn router(state: AppState) -> Router {
    Router::new()
        // Health check
        .route("/health", get(health::health_check))
        // Conference queries
        .route("/api/v1/conference", get(conference::summary))
        .route("/api/v1/conference/status", get(conference::status))
        .route("/api/v1/conference/categories", get(conference::categories))
        .route("/api/v1/conference/categories/{key}", get(conference::category))
        .route("/api/v1/conference/tracks", get(conference::tracks))
        .route("/api/v1/conference/pricing/{category}", get(conference::pricing))
        // Add State
        .with_state(state)
        .layer(TraceLayer::new_for_http())
        .layer(CorsLayer::new().allow_methods([Method::GET, Method::OPTIONS]))
}
