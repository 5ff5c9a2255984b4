//! Mathgate Server
//!
//! HTTP surface for the mathgate arithmetic service. Callers log in once for
//! a bearer token and present it on every `/math` request.
//!
//! ## API Endpoints
//!
//! ### Public
//! - `GET /` - Service description
//! - `GET /health` - Liveness check
//! - `POST /auth/login` - Exchange username and password for an access token
//!
//! ### Protected (bearer token)
//! - `GET /math/calculate?operation=&a=&b=` - add, subtract, multiply, divide
//! - `POST /math/calculate` - sum, product, average, max, min over `numbers`
//! - `PUT /math/power` - base^exponent
//! - `GET /math/factorial?n=` - n! for 0 <= n <= 170
//!
//! Anything else answers 404.

pub mod api;
pub mod config;

pub use api::handlers::AppState;
pub use api::{create_router, fault_barrier};
pub use config::{ConfigError, Environment, ServerConfig};
