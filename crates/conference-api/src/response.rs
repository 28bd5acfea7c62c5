//! API Response wrapper

use axum::{http::StatusCode, Json};
use chrono::Utc;
use serde::Serialize;

#[derive(Serialize)]
pub struct ApiResponse<T: Serialize> {
    pub success: bool,
    pub data: Option<T>,
    pub error: Option<ApiError>,
    pub timestamp: String,
}

#[derive(Serialize)]
pub struct ApiError {
    pub code: String,
    pub message: String,
}

/// Error half of every handler result.
pub type ErrorResponse = (StatusCode, Json<ApiResponse<()>>);

pub type HandlerResult<T> = Result<Json<ApiResponse<T>>, ErrorResponse>;

impl<T: Serialize> ApiResponse<T> {
    pub fn success(data: T) -> Self {
        Self {
            success: true,
            data: Some(data),
            error: None,
            timestamp: Utc::now().to_rfc3339(),
        }
    }

    pub fn error(code: &str, message: &str) -> Self {
        Self {
            success: false,
            data: None,
            error: Some(ApiError {
                code: code.to_string(),
                message: message.to_string(),
            }),
            timestamp: Utc::now().to_rfc3339(),
        }
    }
}

pub fn ok<T: Serialize>(data: T) -> HandlerResult<T> {
    Ok(Json(ApiResponse::success(data)))
}

pub fn bad_request(message: &str) -> ErrorResponse {
    (
        StatusCode::BAD_REQUEST,
        Json(ApiResponse::error("VALIDATION_ERROR", message)),
    )
}

pub fn not_found(message: &str) -> ErrorResponse {
    (StatusCode::NOT_FOUND, Json(ApiResponse::error("NOT_FOUND", message)))
}
