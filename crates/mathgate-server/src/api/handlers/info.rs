//! Unguarded service endpoints

use axum::Json;
use serde::Serialize;
use std::collections::BTreeMap;

use crate::api::error::ApiError;

/// Service description returned from the root path
#[derive(Serialize)]
pub struct ServiceInfo {
    pub message: &'static str,
    pub version: &'static str,
    pub endpoints: BTreeMap<&'static str, &'static str>,
}

/// Health check response
#[derive(Serialize)]
pub struct HealthResponse {
    pub status: &'static str,
    pub version: &'static str,
}

/// Describe the service and its endpoints
///
/// GET /
pub async fn root() -> Json<ServiceInfo> {
    let endpoints = BTreeMap::from([
        ("auth", "POST /auth/login"),
        ("calculate_get", "GET /math/calculate"),
        ("calculate_post", "POST /math/calculate"),
        ("power", "PUT /math/power"),
        ("factorial", "GET /math/factorial"),
    ]);

    Json(ServiceInfo {
        message: "Math API Server",
        version: env!("CARGO_PKG_VERSION"),
        endpoints,
    })
}

/// Health check endpoint
///
/// GET /health
pub async fn health() -> Json<HealthResponse> {
    Json(HealthResponse {
        status: "ok",
        version: env!("CARGO_PKG_VERSION"),
    })
}

/// Fallback for unmatched paths and methods
pub async fn not_found() -> ApiError {
    ApiError::NotFound
}
