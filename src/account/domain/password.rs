//! Argon2id password hashing.

use super::AccountDomainError;
use argon2::Argon2;
use argon2::password_hash::rand_core::OsRng;
use argon2::password_hash::{PasswordHash, PasswordHasher, PasswordVerifier, SaltString};
use std::fmt;

/// Argon2id hash of a user password in PHC string format.
#[derive(Clone, PartialEq, Eq)]
pub struct HashedPassword(String);

impl HashedPassword {
    /// Hashes `plain` with a fresh random salt.
    ///
    /// # Errors
    ///
    /// Returns [`AccountDomainError::EmptyPassword`] for an empty password and
    /// [`AccountDomainError::Hashing`] when argon2 rejects the input.
    pub fn hash(plain: &str) -> Result<Self, AccountDomainError> {
        if plain.is_empty() {
            return Err(AccountDomainError::EmptyPassword);
        }
        let salt = SaltString::generate(&mut OsRng);
        let phc = Argon2::default()
            .hash_password(plain.as_bytes(), &salt)
            .map_err(|err| AccountDomainError::Hashing(err.to_string()))?;
        Ok(Self(phc.to_string()))
    }

    /// Wraps a stored PHC string without checking it.
    ///
    /// Malformed values simply never verify.
    #[must_use]
    pub fn from_stored(phc: impl Into<String>) -> Self {
        Self(phc.into())
    }

    /// Returns `true` when `plain` matches this hash.
    #[must_use]
    pub fn verify(&self, plain: &str) -> bool {
        PasswordHash::new(&self.0).is_ok_and(|parsed| {
            Argon2::default()
                .verify_password(plain.as_bytes(), &parsed)
                .is_ok()
        })
    }

    /// Returns the PHC string for storage.
    #[must_use]
    pub fn as_str(&self) -> &str {
        &self.0
    }
}

impl fmt::Debug for HashedPassword {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str("HashedPassword(<redacted>)")
    }
}
