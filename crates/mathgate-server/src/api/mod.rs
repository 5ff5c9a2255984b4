//! API module for the mathgate server

pub mod error;
pub mod extract;
pub mod handlers;
pub mod middleware;

use axum::{
    extract::DefaultBodyLimit,
    middleware::from_fn_with_state,
    response::{IntoResponse, Response},
    routing::{get, post, put},
    Router,
};
use std::any::Any;
use std::sync::Arc;
use tower_http::catch_panic::CatchPanicLayer;
use tower_http::trace::TraceLayer;
use tracing::error;

use error::ApiError;
use handlers::AppState;

/// Largest accepted request body
pub const BODY_LIMIT_BYTES: usize = 10 * 1024 * 1024;

/// Panic handler signature used by [`fault_barrier`]
pub type PanicHandler = fn(Box<dyn Any + Send + 'static>) -> Response;

/// Layer that turns a panicking handler into a generic 500 response
pub fn fault_barrier() -> CatchPanicLayer<PanicHandler> {
    CatchPanicLayer::custom(handle_panic as PanicHandler)
}

fn handle_panic(panic: Box<dyn Any + Send + 'static>) -> Response {
    let detail = if let Some(s) = panic.downcast_ref::<String>() {
        s.as_str()
    } else if let Some(s) = panic.downcast_ref::<&str>() {
        s
    } else {
        "unknown panic payload"
    };

    error!(panic = %detail, "Request handler panicked");
    ApiError::Panic.into_response()
}

/// Create the API router
pub fn create_router(state: Arc<AppState>) -> Router {
    // Every /math route requires a bearer token
    let math = Router::new()
        .route(
            "/math/calculate",
            get(handlers::calculate_binary).post(handlers::calculate_aggregate),
        )
        .route("/math/power", put(handlers::power))
        .route("/math/factorial", get(handlers::factorial))
        .route_layer(from_fn_with_state(state.clone(), middleware::require_bearer));

    Router::new()
        .route("/", get(handlers::root))
        .route("/health", get(handlers::health))
        .route("/auth/login", post(handlers::login))
        .merge(math)
        .fallback(handlers::not_found)
        .method_not_allowed_fallback(handlers::not_found)
        // Middleware
        .layer(DefaultBodyLimit::max(BODY_LIMIT_BYTES))
        .layer(TraceLayer::new_for_http())
        .layer(fault_barrier())
        .with_state(state)
}
