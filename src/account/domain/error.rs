//! Error types for account validation.

use thiserror::Error;

/// Errors returned while constructing account values.
#[derive(Debug, Clone, Error, PartialEq, Eq)]
pub enum AccountDomainError {
    /// The display name is empty after trimming.
    #[error("name must not be empty")]
    EmptyName,

    /// The email address is malformed.
    #[error("invalid email address '{0}'")]
    InvalidEmail(String),

    /// The password is empty.
    #[error("password must not be empty")]
    EmptyPassword,

    /// The password could not be hashed.
    #[error("password hashing failed: {0}")]
    Hashing(String),
}
