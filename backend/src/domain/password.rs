//! Salted one-way password hashing.
//!
//! Wraps Argon2id PHC-format hashes so the rest of the domain never touches a
//! plaintext comparison. Hash derivation salts with OS randomness; verification
//! parses the stored PHC string and is constant-time inside the argon2 crate.

use std::fmt;

use argon2::password_hash::rand_core::OsRng;
use argon2::password_hash::{PasswordHash as PhcHash, SaltString};
use argon2::{Argon2, PasswordHasher, PasswordVerifier};

/// Errors raised while deriving or parsing a password hash.
#[derive(Debug, Clone, PartialEq, Eq, thiserror::Error)]
pub enum PasswordHashError {
    /// The hash could not be derived from the supplied password.
    #[error("failed to derive password hash: {message}")]
    Derive { message: String },
    /// A stored value was not a valid PHC hash string.
    #[error("stored password hash is malformed: {message}")]
    Malformed { message: String },
}

/// An Argon2id password hash in PHC string format.
///
/// ## Invariants
/// - The wrapped string always parses as a PHC hash; rows read back from the
///   store go through [`StoredPasswordHash::parse`] so corruption is caught at
///   the persistence boundary.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct StoredPasswordHash(String);

impl StoredPasswordHash {
    /// Hash a plaintext password with a fresh random salt.
    pub fn derive(password: &str) -> Result<Self, PasswordHashError> {
        let salt = SaltString::generate(&mut OsRng);
        let hash = Argon2::default()
            .hash_password(password.as_bytes(), &salt)
            .map_err(|error| PasswordHashError::Derive {
                message: error.to_string(),
            })?;
        Ok(Self(hash.to_string()))
    }

    /// Validate a PHC string loaded from the store.
    pub fn parse(raw: impl Into<String>) -> Result<Self, PasswordHashError> {
        let raw = raw.into();
        PhcHash::new(&raw).map_err(|error| PasswordHashError::Malformed {
            message: error.to_string(),
        })?;
        Ok(Self(raw))
    }

    /// Return whether the supplied plaintext matches this hash.
    pub fn verify(&self, password: &str) -> bool {
        let Ok(parsed) = PhcHash::new(&self.0) else {
            return false;
        };
        Argon2::default()
            .verify_password(password.as_bytes(), &parsed)
            .is_ok()
    }
}

impl AsRef<str> for StoredPasswordHash {
    fn as_ref(&self) -> &str {
        self.0.as_str()
    }
}

impl fmt::Display for StoredPasswordHash {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        // Never print hash material in logs.
        f.write_str("<password hash>")
    }
}
