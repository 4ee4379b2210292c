//! Application services for account management.

mod accounts;
mod token;

pub use accounts::{
    AccountError, AccountResult, AccountService, AuthSession, LoginRequest, RegisterRequest,
};
pub use token::{AuthenticatedUser, Claims, TokenError, TokenIssuer};
