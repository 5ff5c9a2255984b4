//! Mathgate Auth
//!
//! Credential verification and bearer-token access control.
//!
//! ## Components
//!
//! - **[`CredentialVerifier`]**: checks a username/password pair against a
//!   [`CredentialStore`] using Argon2id and issues an HS256 access token
//! - **[`AccessGuard`]**: validates the bearer token on protected requests and
//!   produces the [`CallerIdentity`]
//!
//! Both are built from one [`AuthConfig`], so issuance and validation always
//! share the signing key.
//!
//! ## Usage
//!
//! ```ignore
//! use mathgate_auth::{AccessGuard, AuthConfig, CredentialVerifier, InMemoryCredentialStore};
//!
//! let config = AuthConfig::new(secret);
//! let verifier = CredentialVerifier::new(&config, Arc::new(store))?;
//! let guard = AccessGuard::new(&config);
//!
//! let issued = verifier.authenticate("admin", "password").await?;
//! let caller = guard.authorize(Some(&format!("Bearer {}", issued.token)))?;
//! ```

pub mod config;
pub mod error;
pub mod guard;
pub mod password;
pub mod store;
pub mod types;
pub mod verifier;

pub use config::{AuthConfig, HashParams, DEFAULT_TOKEN_TTL_HOURS, INSECURE_FALLBACK_SECRET};
pub use error::{AuthError, Result};
pub use guard::{bearer_token, AccessGuard};
pub use password::PasswordHashing;
pub use store::{CredentialStore, InMemoryCredentialStore};
pub use types::{CallerIdentity, CredentialRecord, IssuedToken, TokenClaims};
pub use verifier::CredentialVerifier;
