//! Access Guard
//!
//! Validates the bearer token on a protected request and yields the caller
//! identity. Validity is signature plus expiry; there is no revocation.

use jsonwebtoken::{decode, Algorithm, DecodingKey, Validation};
use tracing::debug;

use crate::config::AuthConfig;
use crate::error::{AuthError, Result};
use crate::types::{CallerIdentity, TokenClaims};

/// Bearer-token validator for protected requests
pub struct AccessGuard {
    decoding_key: DecodingKey,
    validation: Validation,
}

impl AccessGuard {
    pub fn new(config: &AuthConfig) -> Self {
        let mut validation = Validation::new(Algorithm::HS256);
        validation.leeway = 0;

        Self {
            decoding_key: DecodingKey::from_secret(config.signing_secret()),
            validation,
        }
    }

    /// Authorize a request from the raw `Authorization` header value.
    ///
    /// A missing header or a header without a bearer token is
    /// [`AuthError::TokenRequired`]; a token that fails verification is
    /// [`AuthError::TokenInvalid`].
    pub fn authorize(&self, header: Option<&str>) -> Result<CallerIdentity> {
        let token = bearer_token(header).ok_or(AuthError::TokenRequired)?;

        let data = decode::<TokenClaims>(token, &self.decoding_key, &self.validation)
            .map_err(|e| {
                debug!(error = %e, "Token verification failed");
                AuthError::TokenInvalid
            })?;

        Ok(data.claims.into())
    }
}

/// Extract the token from `Bearer <token>`. The scheme is case-insensitive.
pub fn bearer_token(header: Option<&str>) -> Option<&str> {
    let (scheme, token) = header?.trim().split_once(' ')?;
    if !scheme.eq_ignore_ascii_case("bearer") {
        return None;
    }

    let token = token.trim();
    (!token.is_empty()).then_some(token)
}
