//! Argon2id password hashing
//!
//! Hashes are stored as PHC strings, so each one carries its own salt and
//! work factors. Verification reads the parameters from the stored hash,
//! not from the configured [`HashParams`].

use argon2::password_hash::rand_core::OsRng;
use argon2::password_hash::{PasswordHash, PasswordHasher, PasswordVerifier, SaltString};
use argon2::{Algorithm, Argon2, Version};

use crate::config::HashParams;
use crate::error::Result;

/// Argon2id hasher with fixed work factors
#[derive(Debug, Clone)]
pub struct PasswordHashing {
    params: HashParams,
}

impl PasswordHashing {
    pub fn new(params: HashParams) -> Self {
        Self { params }
    }

    fn argon2(&self) -> Result<Argon2<'static>> {
        Ok(Argon2::new(
            Algorithm::Argon2id,
            Version::V0x13,
            self.params.to_argon2()?,
        ))
    }

    /// Hash a password with a fresh random salt, returning a PHC string
    pub fn hash(&self, password: &str) -> Result<String> {
        let salt = SaltString::generate(&mut OsRng);
        let hash = self.argon2()?.hash_password(password.as_bytes(), &salt)?;
        Ok(hash.to_string())
    }

    /// Check a password against a stored PHC string.
    ///
    /// A mismatch is `Ok(false)`; only an unparseable hash is an error.
    pub fn verify(&self, password: &str, stored_hash: &str) -> Result<bool> {
        let parsed = PasswordHash::new(stored_hash)?;
        match Argon2::default().verify_password(password.as_bytes(), &parsed) {
            Ok(()) => Ok(true),
            Err(argon2::password_hash::Error::Password) => Ok(false),
            Err(e) => Err(e.into()),
        }
    }
}

impl Default for PasswordHashing {
    fn default() -> Self {
        Self::new(HashParams::default())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn hashing() -> PasswordHashing {
        PasswordHashing::new(HashParams::insecure_fast())
    }

    #[test]
    fn test_hash_and_verify() {
        let hasher = hashing();
        let hash = hasher.hash("password").unwrap();

        assert!(hash.starts_with("$argon2id$"));
        assert!(hasher.verify("password", &hash).unwrap());
        assert!(!hasher.verify("Password", &hash).unwrap());
    }

    #[test]
    fn test_hashes_are_salted() {
        let hasher = hashing();
        let first = hasher.hash("password").unwrap();
        let second = hasher.hash("password").unwrap();
        assert_ne!(first, second);
    }

    #[test]
    fn test_verify_uses_params_from_hash() {
        let hash = hashing().hash("secret").unwrap();
        // A verifier configured with different work factors still accepts it
        assert!(PasswordHashing::default().verify("secret", &hash).unwrap());
    }

    #[test]
    fn test_malformed_hash_is_error() {
        assert!(hashing().verify("password", "not-a-phc-string").is_err());
    }
}
