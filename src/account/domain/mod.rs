//! Domain model for user accounts.

mod error;
mod password;
mod user;

pub use error::AccountDomainError;
pub use password::HashedPassword;
pub use user::{DisplayName, EmailAddress, PersistedUserData, User, UserId, UserProfile};
