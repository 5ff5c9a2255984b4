//! Error types for credential verification and access control

use thiserror::Error;

/// Result type for authentication operations
pub type Result<T> = std::result::Result<T, AuthError>;

/// Errors raised while verifying credentials or authorizing a request
#[derive(Error, Debug)]
pub enum AuthError {
    /// Username or password absent or empty
    #[error("Username and password required")]
    MissingCredentials,

    /// Unknown username or wrong password; the two are indistinguishable
    #[error("Invalid credentials")]
    InvalidCredentials,

    /// No usable bearer token on a protected request
    #[error("Access token required")]
    TokenRequired,

    /// Bad signature, malformed, tampered or expired token
    #[error("Invalid or expired token")]
    TokenInvalid,

    /// Password hashing or hash parsing failed
    #[error("Password hashing failed: {0}")]
    Hashing(String),

    /// Token signing failed
    #[error("Token signing failed: {0}")]
    Signing(String),

    /// The credential store could not be queried
    #[error("Credential store error: {0}")]
    Store(String),
}

impl AuthError {
    /// Stable machine-readable code for the error kind
    pub fn code(&self) -> &'static str {
        match self {
            AuthError::MissingCredentials => "MISSING_CREDENTIALS",
            AuthError::InvalidCredentials => "INVALID_CREDENTIALS",
            AuthError::TokenRequired => "TOKEN_REQUIRED",
            AuthError::TokenInvalid => "TOKEN_INVALID",
            AuthError::Hashing(_) | AuthError::Signing(_) | AuthError::Store(_) => {
                "INTERNAL_ERROR"
            }
        }
    }

    /// Whether the error is a server-side fault rather than a caller mistake
    pub fn is_internal(&self) -> bool {
        matches!(
            self,
            AuthError::Hashing(_) | AuthError::Signing(_) | AuthError::Store(_)
        )
    }
}

impl From<argon2::password_hash::Error> for AuthError {
    fn from(err: argon2::password_hash::Error) -> Self {
        AuthError::Hashing(err.to_string())
    }
}

impl From<tokio::task::JoinError> for AuthError {
    fn from(err: tokio::task::JoinError) -> Self {
        AuthError::Hashing(format!("hashing task failed: {}", err))
    }
}
