//! Credential Verifier
//!
//! Checks a username/password pair against the [`CredentialStore`] and
//! issues a signed HS256 access token on success.

use chrono::{DateTime, Utc};
use jsonwebtoken::{encode, EncodingKey, Header};
use std::sync::Arc;
use tracing::{debug, error, info, warn};

use crate::config::AuthConfig;
use crate::error::{AuthError, Result};
use crate::password::PasswordHashing;
use crate::store::CredentialStore;
use crate::types::{CredentialRecord, IssuedToken, TokenClaims};

/// Verifies credentials and issues access tokens
pub struct CredentialVerifier {
    store: Arc<dyn CredentialStore>,
    hashing: PasswordHashing,
    encoding_key: EncodingKey,
    token_ttl: chrono::Duration,
    ttl_label: String,
    /// Verified against when the username is unknown, so both failure
    /// branches cost one hash verification
    dummy_hash: String,
}

impl CredentialVerifier {
    /// Create a verifier. Computes the dummy hash up front.
    pub fn new(config: &AuthConfig, store: Arc<dyn CredentialStore>) -> Result<Self> {
        let hashing = PasswordHashing::new(config.hash_params);
        let dummy_hash = hashing.hash("mathgate-dummy-password")?;

        debug!(store = store.description(), "Credential verifier ready");

        Ok(Self {
            store,
            hashing,
            encoding_key: EncodingKey::from_secret(config.signing_secret()),
            token_ttl: config.token_ttl,
            ttl_label: config.ttl_label(),
            dummy_hash,
        })
    }

    /// Authenticate a username/password pair and issue a token.
    ///
    /// Unknown usernames and wrong passwords both return
    /// [`AuthError::InvalidCredentials`].
    pub async fn authenticate(&self, username: &str, password: &str) -> Result<IssuedToken> {
        if username.is_empty() || password.is_empty() {
            return Err(AuthError::MissingCredentials);
        }

        let record = self.store.find_by_username(username).await?;
        let stored_hash = record
            .as_ref()
            .map_or_else(|| self.dummy_hash.clone(), |r| r.password_hash.clone());

        let hashing = self.hashing.clone();
        let candidate = password.to_string();
        let verified =
            tokio::task::spawn_blocking(move || hashing.verify(&candidate, &stored_hash)).await?;

        // An unusable stored hash fails like a wrong password
        let matches = verified.unwrap_or_else(|e| {
            error!(username = %username, error = %e, "Stored password hash is unusable");
            false
        });

        let record = match record {
            Some(record) if matches => record,
            _ => {
                warn!(username = %username, "Rejected login attempt");
                return Err(AuthError::InvalidCredentials);
            }
        };

        let issued = self.issue_for(&record, Utc::now())?;
        info!(user_id = record.id, username = %record.username, "Login successful");
        Ok(issued)
    }

    /// Sign a token for `record` as if issued at `issued_at`
    pub fn issue_for(
        &self,
        record: &CredentialRecord,
        issued_at: DateTime<Utc>,
    ) -> Result<IssuedToken> {
        let expires_at = issued_at + self.token_ttl;
        let claims = TokenClaims {
            id: record.id,
            username: record.username.clone(),
            iat: issued_at.timestamp(),
            exp: expires_at.timestamp(),
        };

        let token = encode(&Header::default(), &claims, &self.encoding_key)
            .map_err(|e| AuthError::Signing(e.to_string()))?;

        Ok(IssuedToken {
            token,
            expires_in: self.ttl_label.clone(),
            expires_at,
        })
    }
}
