//! Bearer token issuance and verification.
//!
//! Tokens are HS256 JWTs carrying the user identifier and display name.
//! Verification checks the signature and the expiry claim.

use crate::account::domain::{User, UserId};
use chrono::{DateTime, Duration, Utc};
use jsonwebtoken::{DecodingKey, EncodingKey, Header, Validation};
use serde::{Deserialize, Serialize};
use thiserror::Error;
use uuid::Uuid;

/// Claims embedded in every bearer token.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Claims {
    /// Subject: the user identifier.
    pub sub: String,
    /// Display name at issuance time.
    pub name: String,
    /// Issued at (unix timestamp).
    pub iat: i64,
    /// Expiration (unix timestamp).
    pub exp: i64,
}

/// Identity recovered from a verified token.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct AuthenticatedUser {
    /// Verified user identifier.
    pub id: UserId,
    /// Display name carried by the token.
    pub name: String,
}

/// Errors raised while issuing or verifying tokens.
#[derive(Debug, Clone, Error, PartialEq, Eq)]
pub enum TokenError {
    /// The secret is empty.
    #[error("token secret must not be empty")]
    EmptySecret,

    /// Signing failed.
    #[error("failed to sign token: {0}")]
    Signing(String),

    /// The token is malformed, tampered with, or expired.
    #[error("invalid token: {0}")]
    Invalid(String),
}

/// Issues and verifies bearer tokens with a shared HMAC secret.
#[derive(Clone)]
pub struct TokenIssuer {
    encoding_key: EncodingKey,
    decoding_key: DecodingKey,
    validation: Validation,
    ttl: Duration,
}

impl TokenIssuer {
    /// Creates an issuer for `secret` whose tokens live for `ttl`.
    ///
    /// # Errors
    ///
    /// Returns [`TokenError::EmptySecret`] when `secret` is empty.
    pub fn new(secret: &str, ttl: Duration) -> Result<Self, TokenError> {
        if secret.is_empty() {
            return Err(TokenError::EmptySecret);
        }
        Ok(Self {
            encoding_key: EncodingKey::from_secret(secret.as_bytes()),
            decoding_key: DecodingKey::from_secret(secret.as_bytes()),
            validation: Validation::default(),
            ttl,
        })
    }

    /// Signs a token for `user`, issued at `now`.
    ///
    /// # Errors
    ///
    /// Returns [`TokenError::Signing`] when encoding fails.
    pub fn issue(&self, user: &User, now: DateTime<Utc>) -> Result<String, TokenError> {
        let claims = Claims {
            sub: user.id().to_string(),
            name: user.name().as_str().to_owned(),
            iat: now.timestamp(),
            exp: (now + self.ttl).timestamp(),
        };
        jsonwebtoken::encode(&Header::default(), &claims, &self.encoding_key)
            .map_err(|err| TokenError::Signing(err.to_string()))
    }

    /// Verifies `token` and returns the identity it carries.
    ///
    /// # Errors
    ///
    /// Returns [`TokenError::Invalid`] when the signature, expiry, or subject
    /// is not acceptable.
    pub fn verify(&self, token: &str) -> Result<AuthenticatedUser, TokenError> {
        let data = jsonwebtoken::decode::<Claims>(token, &self.decoding_key, &self.validation)
            .map_err(|err| TokenError::Invalid(err.to_string()))?;
        let uuid = Uuid::parse_str(&data.claims.sub)
            .map_err(|err| TokenError::Invalid(format!("subject is not a user id: {err}")))?;
        Ok(AuthenticatedUser {
            id: UserId::from_uuid(uuid),
            name: data.claims.name,
        })
    }
}
