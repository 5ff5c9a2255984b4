//! Mathgate Server Binary
//!
//! Runs the authenticated arithmetic HTTP server.

use std::sync::Arc;
use tracing::{info, warn};
use tracing_subscriber::FmtSubscriber;

use mathgate_server::{create_router, AppState, ServerConfig};

#[tokio::main]
async fn main() {
    // Configuration
    let config = ServerConfig::from_env().unwrap_or_else(|err| {
        eprintln!("Invalid configuration: {}", err);
        std::process::exit(1);
    });

    // Initialize logging
    let subscriber = FmtSubscriber::builder()
        .with_max_level(config.log_level)
        .with_target(true)
        .with_thread_ids(true)
        .finish();

    tracing::subscriber::set_global_default(subscriber)
        .expect("Failed to set tracing subscriber");

    if config.auth.uses_insecure_secret() {
        warn!("MATHGATE_JWT_SECRET is not set; signing tokens with the insecure fallback secret");
    }

    // Credential store with the seeded user
    let store = config
        .credential_store()
        .expect("Failed to provision credential store");

    info!(
        port = config.port,
        environment = %config.environment,
        admin = %config.admin_username,
        "Starting Math API server"
    );

    // Create application state
    let state = Arc::new(
        AppState::new(&config.auth, store).expect("Failed to initialize authentication"),
    );

    // Build router
    let app = create_router(state);

    // Start server
    let addr = format!("0.0.0.0:{}", config.port);
    let listener = tokio::net::TcpListener::bind(&addr)
        .await
        .expect("Failed to bind to address");

    info!(addr = %addr, "Math API server listening");

    axum::serve(listener, app)
        .await
        .expect("Server error");
}
