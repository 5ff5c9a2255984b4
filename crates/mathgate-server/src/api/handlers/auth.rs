//! Login handler
//!
//! The only unguarded route that touches credentials.

use axum::{extract::State, Json};
use serde::{Deserialize, Serialize};
use std::sync::Arc;

use super::AppState;
use crate::api::error::ApiError;
use crate::api::extract::ApiJson;

/// Login request body
#[derive(Debug, Deserialize)]
pub struct LoginRequest {
    #[serde(default)]
    pub username: Option<String>,
    #[serde(default)]
    pub password: Option<String>,
}

/// Successful login response
#[derive(Debug, Serialize)]
pub struct LoginResponse {
    pub message: &'static str,
    pub token: String,
    /// Token lifetime, e.g. `"24h"`
    #[serde(rename = "expiresIn")]
    pub expires_in: String,
}

/// Exchange a username and password for an access token
///
/// POST /auth/login
pub async fn login(
    State(state): State<Arc<AppState>>,
    ApiJson(request): ApiJson<LoginRequest>,
) -> Result<Json<LoginResponse>, ApiError> {
    let username = request.username.unwrap_or_default();
    let password = request.password.unwrap_or_default();

    let issued = state.verifier.authenticate(&username, &password).await?;

    Ok(Json(LoginResponse {
        message: "Login successful",
        token: issued.token,
        expires_in: issued.expires_in,
    }))
}
