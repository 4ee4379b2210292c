//! Service layer for registration, login, and token authentication.

use super::token::{AuthenticatedUser, TokenError, TokenIssuer};
use crate::account::{
    domain::{AccountDomainError, DisplayName, EmailAddress, HashedPassword, User, UserProfile},
    ports::{UserRepository, UserRepositoryError},
};
use mockable::Clock;
use serde::{Deserialize, Serialize};
use std::fmt;
use std::sync::Arc;
use thiserror::Error;

/// Request payload for creating an account.
#[derive(Clone, PartialEq, Eq, Deserialize)]
pub struct RegisterRequest {
    name: String,
    email: String,
    password: String,
}

impl RegisterRequest {
    /// Creates a registration request.
    #[must_use]
    pub fn new(
        name: impl Into<String>,
        email: impl Into<String>,
        password: impl Into<String>,
    ) -> Self {
        Self {
            name: name.into(),
            email: email.into(),
            password: password.into(),
        }
    }
}

impl fmt::Debug for RegisterRequest {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("RegisterRequest")
            .field("name", &self.name)
            .field("email", &self.email)
            .field("password", &"<redacted>")
            .finish()
    }
}

/// Request payload for logging in.
#[derive(Clone, PartialEq, Eq, Deserialize)]
pub struct LoginRequest {
    email: String,
    password: String,
}

impl LoginRequest {
    /// Creates a login request.
    #[must_use]
    pub fn new(email: impl Into<String>, password: impl Into<String>) -> Self {
        Self {
            email: email.into(),
            password: password.into(),
        }
    }
}

impl fmt::Debug for LoginRequest {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("LoginRequest")
            .field("email", &self.email)
            .field("password", &"<redacted>")
            .finish()
    }
}

/// Token plus the profile of the user it was issued to.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct AuthSession {
    /// Bearer token for subsequent requests.
    pub token: String,
    /// Profile of the authenticated user.
    #[serde(flatten)]
    pub user: UserProfile,
}

/// Service-level errors for account operations.
#[derive(Debug, Error)]
pub enum AccountError {
    /// Input validation failed.
    #[error(transparent)]
    Domain(#[from] AccountDomainError),

    /// The email address is already registered.
    #[error("email already registered: {0}")]
    EmailTaken(EmailAddress),

    /// Unknown email or wrong password.
    #[error("invalid email or password")]
    InvalidCredentials,

    /// The presented bearer token is not acceptable.
    #[error(transparent)]
    InvalidToken(TokenError),

    /// A token could not be issued.
    #[error("could not issue token: {0}")]
    Issuance(TokenError),

    /// Repository operation failed.
    #[error(transparent)]
    Repository(UserRepositoryError),
}

impl From<UserRepositoryError> for AccountError {
    fn from(err: UserRepositoryError) -> Self {
        match err {
            UserRepositoryError::DuplicateEmail(email) => Self::EmailTaken(email),
            other => Self::Repository(other),
        }
    }
}

/// Result type for account service operations.
pub type AccountResult<T> = Result<T, AccountError>;

/// Account orchestration service.
pub struct AccountService<R, C>
where
    R: UserRepository + ?Sized,
    C: Clock + Send + Sync,
{
    repository: Arc<R>,
    clock: Arc<C>,
    tokens: TokenIssuer,
}

impl<R, C> Clone for AccountService<R, C>
where
    R: UserRepository + ?Sized,
    C: Clock + Send + Sync,
{
    fn clone(&self) -> Self {
        Self {
            repository: Arc::clone(&self.repository),
            clock: Arc::clone(&self.clock),
            tokens: self.tokens.clone(),
        }
    }
}

impl<R, C> AccountService<R, C>
where
    R: UserRepository + ?Sized,
    C: Clock + Send + Sync,
{
    /// Creates a new account service.
    #[must_use]
    pub const fn new(repository: Arc<R>, clock: Arc<C>, tokens: TokenIssuer) -> Self {
        Self {
            repository,
            clock,
            tokens,
        }
    }

    /// Registers a new user and signs them in.
    ///
    /// # Errors
    ///
    /// Returns [`AccountError::Domain`] for a blank name or password or a
    /// malformed email, [`AccountError::EmailTaken`] when the address is
    /// already registered, and repository or issuance failures otherwise.
    pub async fn register(&self, request: RegisterRequest) -> AccountResult<AuthSession> {
        let name = DisplayName::new(request.name)?;
        let email = EmailAddress::new(request.email)?;
        if request.password.is_empty() {
            return Err(AccountDomainError::EmptyPassword.into());
        }
        if self.repository.find_by_email(&email).await?.is_some() {
            tracing::debug!(%email, "registration rejected: email taken");
            return Err(AccountError::EmailTaken(email));
        }

        let password = HashedPassword::hash(&request.password)?;
        let user = User::new(name, email, password, &*self.clock);
        self.repository.store(&user).await?;
        tracing::info!(user_id = %user.id(), "user registered");
        self.open_session(&user)
    }

    /// Verifies credentials and signs the user in.
    ///
    /// # Errors
    ///
    /// Returns [`AccountError::InvalidCredentials`] for an unknown email or a
    /// wrong password, and repository or issuance failures otherwise.
    pub async fn login(&self, request: LoginRequest) -> AccountResult<AuthSession> {
        let Ok(email) = EmailAddress::new(request.email) else {
            return Err(AccountError::InvalidCredentials);
        };
        let Some(user) = self.repository.find_by_email(&email).await? else {
            tracing::debug!(%email, "login rejected: unknown email");
            return Err(AccountError::InvalidCredentials);
        };
        if !user.password().verify(&request.password) {
            tracing::debug!(user_id = %user.id(), "login rejected: wrong password");
            return Err(AccountError::InvalidCredentials);
        }
        tracing::info!(user_id = %user.id(), "user logged in");
        self.open_session(&user)
    }

    /// Verifies a bearer token.
    ///
    /// # Errors
    ///
    /// Returns [`AccountError::InvalidToken`] when the token is malformed,
    /// tampered with, or expired.
    pub fn authenticate(&self, token: &str) -> AccountResult<AuthenticatedUser> {
        self.tokens.verify(token).map_err(AccountError::InvalidToken)
    }

    fn open_session(&self, user: &User) -> AccountResult<AuthSession> {
        let token = self
            .tokens
            .issue(user, self.clock.utc())
            .map_err(AccountError::Issuance)?;
        Ok(AuthSession {
            token,
            user: user.profile(),
        })
    }
}
