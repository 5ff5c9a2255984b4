//! Credential records, token claims and caller identity

use chrono::{DateTime, TimeZone, Utc};
use serde::{Deserialize, Serialize};

/// A provisioned user. Immutable once created.
#[derive(Clone, PartialEq, Eq)]
pub struct CredentialRecord {
    pub id: u64,
    /// Unique, case-sensitive login name
    pub username: String,
    /// Argon2 PHC string
    pub password_hash: String,
}

impl CredentialRecord {
    pub fn new(id: u64, username: impl Into<String>, password_hash: impl Into<String>) -> Self {
        Self {
            id,
            username: username.into(),
            password_hash: password_hash.into(),
        }
    }
}

impl std::fmt::Debug for CredentialRecord {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("CredentialRecord")
            .field("id", &self.id)
            .field("username", &self.username)
            .field("password_hash", &"<redacted>")
            .finish()
    }
}

/// Claims carried by an access token
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct TokenClaims {
    pub id: u64,
    pub username: String,
    /// Issued at, seconds since the epoch
    pub iat: i64,
    /// Expiry, seconds since the epoch
    pub exp: i64,
}

/// The authenticated caller of a single request
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct CallerIdentity {
    pub id: u64,
    pub username: String,
    pub issued_at: DateTime<Utc>,
    pub expires_at: DateTime<Utc>,
}

impl From<TokenClaims> for CallerIdentity {
    fn from(claims: TokenClaims) -> Self {
        Self {
            id: claims.id,
            username: claims.username,
            issued_at: Utc.timestamp_opt(claims.iat, 0).single().unwrap_or_default(),
            expires_at: Utc.timestamp_opt(claims.exp, 0).single().unwrap_or_default(),
        }
    }
}

/// A freshly signed access token
#[derive(Clone)]
pub struct IssuedToken {
    pub token: String,
    /// Human-readable lifetime, e.g. `"24h"`
    pub expires_in: String,
    pub expires_at: DateTime<Utc>,
}

impl std::fmt::Debug for IssuedToken {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("IssuedToken")
            .field("token", &"<redacted>")
            .field("expires_in", &self.expires_in)
            .field("expires_at", &self.expires_at)
            .finish()
    }
}
