//! Access guard middleware for protected routes

use axum::{
    extract::{Request, State},
    http::header::AUTHORIZATION,
    middleware::Next,
    response::Response,
};
use std::sync::Arc;
use tracing::warn;

use crate::api::error::ApiError;
use crate::api::handlers::AppState;

/// Reject requests without a valid bearer token; otherwise attach the
/// caller identity to the request extensions and continue.
pub async fn require_bearer(
    State(state): State<Arc<AppState>>,
    mut req: Request,
    next: Next,
) -> Result<Response, ApiError> {
    let header = req
        .headers()
        .get(AUTHORIZATION)
        .and_then(|value| value.to_str().ok());

    let caller = state.guard.authorize(header).map_err(|err| {
        warn!(
            path = %req.uri().path(),
            reason = %err,
            "Rejected unauthenticated request"
        );
        ApiError::from(err)
    })?;

    req.extensions_mut().insert(caller);
    Ok(next.run(req).await)
}
