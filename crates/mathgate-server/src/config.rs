//! Server configuration from the environment
//!
//! All settings are read once at startup. [`ServerConfig::from_lookup`] takes
//! the variable source as a function so tests can supply their own values.

use std::sync::Arc;

use chrono::Duration;
use thiserror::Error;
use tracing::Level;

use mathgate_auth::{
    AuthConfig, AuthError, CredentialRecord, CredentialStore, HashParams,
    InMemoryCredentialStore, PasswordHashing, DEFAULT_TOKEN_TTL_HOURS, INSECURE_FALLBACK_SECRET,
};

/// Prefix shared by every configuration variable
pub const ENV_PREFIX: &str = "MATHGATE_";

const DEFAULT_PORT: u16 = 3000;
const DEFAULT_ADMIN_USERNAME: &str = "admin";
const DEFAULT_ADMIN_PASSWORD: &str = "password";

/// Errors that prevent the server from starting
#[derive(Error, Debug)]
pub enum ConfigError {
    #[error("MATHGATE_PORT must be a valid port number, got '{0}'")]
    InvalidPort(String),

    #[error("MATHGATE_TOKEN_TTL_HOURS must be a positive integer, got '{0}'")]
    InvalidTokenTtl(String),

    #[error("MATHGATE_JWT_SECRET must be set in production")]
    MissingSecret,

    #[error("MATHGATE_ADMIN_PASSWORD_HASH or MATHGATE_ADMIN_PASSWORD must be set in production")]
    MissingAdminCredential,

    #[error("MATHGATE_ADMIN_PASSWORD_HASH is not a usable Argon2 PHC string: {0}")]
    InvalidAdminHash(String),
}

/// Deployment environment
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Environment {
    Development,
    Production,
}

impl Environment {
    fn parse(value: Option<&str>) -> Self {
        match value {
            Some(v) if v.trim().eq_ignore_ascii_case("production") => Environment::Production,
            _ => Environment::Development,
        }
    }
}

impl std::fmt::Display for Environment {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            Environment::Development => write!(f, "development"),
            Environment::Production => write!(f, "production"),
        }
    }
}

/// Password material for the seeded user
#[derive(Clone)]
pub enum AdminSecret {
    /// A precomputed Argon2 PHC string
    Hash(String),
    /// A plaintext password, hashed at startup
    Password(String),
}

impl std::fmt::Debug for AdminSecret {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            AdminSecret::Hash(_) => write!(f, "Hash(<redacted>)"),
            AdminSecret::Password(_) => write!(f, "Password(<redacted>)"),
        }
    }
}

/// Complete server configuration
#[derive(Debug, Clone)]
pub struct ServerConfig {
    pub port: u16,
    pub environment: Environment,
    pub log_level: Level,
    pub auth: AuthConfig,
    pub admin_username: String,
    pub admin_secret: AdminSecret,
}

impl ServerConfig {
    /// Read configuration from the process environment
    pub fn from_env() -> Result<Self, ConfigError> {
        Self::from_lookup(|key| std::env::var(key).ok())
    }

    /// Read configuration through `lookup`, which receives full variable names.
    /// Empty values count as unset.
    pub fn from_lookup<F>(lookup: F) -> Result<Self, ConfigError>
    where
        F: Fn(&str) -> Option<String>,
    {
        let var = |name: &str| {
            lookup(&format!("{}{}", ENV_PREFIX, name)).filter(|value| !value.is_empty())
        };

        let environment = Environment::parse(var("ENV").as_deref());

        let port = match var("PORT") {
            Some(raw) => raw
                .trim()
                .parse::<u16>()
                .map_err(|_| ConfigError::InvalidPort(raw.clone()))?,
            None => DEFAULT_PORT,
        };

        let log_level = var("LOG_LEVEL")
            .and_then(|raw| raw.parse().ok())
            .unwrap_or(Level::INFO);

        let ttl_hours = match var("TOKEN_TTL_HOURS") {
            Some(raw) => raw
                .trim()
                .parse::<i64>()
                .ok()
                .filter(|hours| *hours > 0)
                .ok_or_else(|| ConfigError::InvalidTokenTtl(raw.clone()))?,
            None => DEFAULT_TOKEN_TTL_HOURS,
        };

        let secret = match (var("JWT_SECRET"), environment) {
            (Some(secret), Environment::Production) if secret == INSECURE_FALLBACK_SECRET => {
                return Err(ConfigError::MissingSecret)
            }
            (Some(secret), _) => secret,
            (None, Environment::Production) => return Err(ConfigError::MissingSecret),
            (None, Environment::Development) => INSECURE_FALLBACK_SECRET.to_string(),
        };

        let admin_secret = match (var("ADMIN_PASSWORD_HASH"), var("ADMIN_PASSWORD"), environment) {
            (Some(hash), _, _) => AdminSecret::Hash(hash),
            (None, Some(password), _) => AdminSecret::Password(password),
            (None, None, Environment::Production) => {
                return Err(ConfigError::MissingAdminCredential)
            }
            (None, None, Environment::Development) => {
                AdminSecret::Password(DEFAULT_ADMIN_PASSWORD.to_string())
            }
        };

        let mut auth = AuthConfig::new(secret).with_token_ttl(Duration::hours(ttl_hours));

        // Login work for unknown users must match the seeded hash's cost
        if let AdminSecret::Hash(hash) = &admin_secret {
            let params = HashParams::from_phc(hash)
                .map_err(|e| ConfigError::InvalidAdminHash(e.to_string()))?;
            auth = auth.with_hash_params(params);
        }

        Ok(Self {
            port,
            environment,
            log_level,
            auth,
            admin_username: var("ADMIN_USERNAME")
                .unwrap_or_else(|| DEFAULT_ADMIN_USERNAME.to_string()),
            admin_secret,
        })
    }

    /// Build the credential store holding the seeded user
    pub fn credential_store(&self) -> Result<Arc<dyn CredentialStore>, AuthError> {
        let password_hash = match &self.admin_secret {
            AdminSecret::Hash(hash) => hash.clone(),
            AdminSecret::Password(password) => {
                PasswordHashing::new(self.auth.hash_params).hash(password)?
            }
        };

        let record = CredentialRecord::new(1, self.admin_username.clone(), password_hash);
        Ok(Arc::new(InMemoryCredentialStore::new([record])))
    }
}
