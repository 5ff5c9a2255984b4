//! Authentication configuration
//!
//! Resolved once at startup and handed to [`crate::CredentialVerifier`] and
//! [`crate::AccessGuard`] explicitly. Nothing in this crate reads the
//! environment.

use chrono::Duration;

use crate::error::{AuthError, Result};

/// Signing secret used when none is configured. Development only.
pub const INSECURE_FALLBACK_SECRET: &str = "fallback_secret_key";

/// Default access token lifetime in hours
pub const DEFAULT_TOKEN_TTL_HOURS: i64 = 24;

/// Argon2id work factors
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct HashParams {
    /// Memory cost in KiB
    pub memory_kib: u32,
    /// Number of passes
    pub iterations: u32,
    /// Degree of parallelism
    pub parallelism: u32,
}

impl HashParams {
    /// Minimal work factors for tests. Never use these in a deployment.
    pub fn insecure_fast() -> Self {
        Self {
            memory_kib: 8,
            iterations: 1,
            parallelism: 1,
        }
    }

    /// Read the work factors embedded in a stored Argon2 PHC string
    ///
    /// Fails when the string is not an Argon2 hash that verification could
    /// use: unparseable, another algorithm, or missing its hash output.
    pub fn from_phc(stored_hash: &str) -> Result<Self> {
        let parsed = argon2::PasswordHash::new(stored_hash)?;
        argon2::Algorithm::try_from(parsed.algorithm)
            .map_err(|e| AuthError::Hashing(e.to_string()))?;
        if parsed.hash.is_none() {
            return Err(AuthError::Hashing("PHC string has no hash output".into()));
        }
        let params = argon2::Params::try_from(&parsed)?;

        Ok(Self {
            memory_kib: params.m_cost(),
            iterations: params.t_cost(),
            parallelism: params.p_cost(),
        })
    }

    pub(crate) fn to_argon2(self) -> Result<argon2::Params> {
        argon2::Params::new(self.memory_kib, self.iterations, self.parallelism, None)
            .map_err(|e| AuthError::Hashing(e.to_string()))
    }
}

impl Default for HashParams {
    fn default() -> Self {
        Self {
            memory_kib: argon2::Params::DEFAULT_M_COST,
            iterations: argon2::Params::DEFAULT_T_COST,
            parallelism: argon2::Params::DEFAULT_P_COST,
        }
    }
}

/// Process-wide authentication settings
#[derive(Clone)]
pub struct AuthConfig {
    signing_secret: String,
    /// Lifetime of issued access tokens
    pub token_ttl: Duration,
    /// Work factors for newly computed hashes
    pub hash_params: HashParams,
}

impl AuthConfig {
    /// Create a configuration with the given signing secret and default lifetime
    pub fn new(signing_secret: impl Into<String>) -> Self {
        Self {
            signing_secret: signing_secret.into(),
            token_ttl: Duration::hours(DEFAULT_TOKEN_TTL_HOURS),
            hash_params: HashParams::default(),
        }
    }

    /// Set the access token lifetime
    pub fn with_token_ttl(mut self, ttl: Duration) -> Self {
        self.token_ttl = ttl;
        self
    }

    /// Set the Argon2 work factors
    pub fn with_hash_params(mut self, params: HashParams) -> Self {
        self.hash_params = params;
        self
    }

    pub(crate) fn signing_secret(&self) -> &[u8] {
        self.signing_secret.as_bytes()
    }

    /// True when running with [`INSECURE_FALLBACK_SECRET`]
    pub fn uses_insecure_secret(&self) -> bool {
        self.signing_secret == INSECURE_FALLBACK_SECRET
    }

    /// Human-readable token lifetime, e.g. `"24h"`
    pub fn ttl_label(&self) -> String {
        let hours = self.token_ttl.num_hours();
        if Duration::hours(hours) == self.token_ttl {
            format!("{}h", hours)
        } else {
            format!("{}s", self.token_ttl.num_seconds())
        }
    }
}

impl std::fmt::Debug for AuthConfig {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("AuthConfig")
            .field("signing_secret", &"<redacted>")
            .field("token_ttl", &self.token_ttl)
            .field("hash_params", &self.hash_params)
            .finish()
    }
}
