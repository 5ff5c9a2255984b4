//! API request handlers

pub mod auth;
pub mod calculate;
pub mod factorial;
pub mod info;
pub mod power;

use std::sync::Arc;

use mathgate_auth::{AccessGuard, AuthConfig, AuthError, CredentialStore, CredentialVerifier};

pub use auth::{login, LoginRequest, LoginResponse};
pub use calculate::{calculate_aggregate, calculate_binary, CalculateQuery};
pub use factorial::{factorial, FactorialQuery};
pub use info::{health, not_found, root, HealthResponse, ServiceInfo};
pub use power::power;

/// Application state shared across handlers
///
/// Built once at startup and never mutated.
pub struct AppState {
    /// Checks login credentials and issues tokens
    pub verifier: CredentialVerifier,
    /// Validates bearer tokens on protected routes
    pub guard: AccessGuard,
}

impl AppState {
    /// Build the verifier and guard from one configuration so they share the
    /// signing key
    pub fn new(config: &AuthConfig, store: Arc<dyn CredentialStore>) -> Result<Self, AuthError> {
        Ok(Self {
            verifier: CredentialVerifier::new(config, store)?,
            guard: AccessGuard::new(config),
        })
    }
}
