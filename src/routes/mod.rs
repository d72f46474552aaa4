//! API route handlers
//!
//! Routes are organized by functionality:
//!
//! - `auth`: token issuance
//! - `health`: liveness and readiness checks
//! - `data`: protected sheet and summary endpoints

pub mod auth;
pub mod data;
pub mod health;

use crate::error::ApiError;
use axum::response::IntoResponse;
use axum::Json;
use serde_json::json;

/// API version and base info
///
/// Returns server information including version and available endpoints.
/// This is the root endpoint (GET /) and requires no authentication.
pub async fn api_info() -> impl IntoResponse {
    Json(json!({
        "name": "Tally Server",
        "version": env!("CARGO_PKG_VERSION"),
        "api_version": "v1",
        "endpoints": [
            "/get_token",
            "/api/v1/sheets",
            "/api/v1/sheets/{name}",
            "/api/v1/summary",
            "/health",
            "/ready"
        ]
    }))
}

/// 404 fallback for undefined routes.
pub async fn not_found() -> ApiError {
    ApiError::not_found("Not found")
}
