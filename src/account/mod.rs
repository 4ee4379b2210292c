//! User accounts and bearer-token authentication.
//!
//! Registration stores an argon2id password hash; login and registration
//! both hand back a signed, expiring bearer token that the HTTP layer
//! verifies on every task request. Layout mirrors the task module:
//!
//! - Domain types in [`domain`]
//! - Port contracts in [`ports`]
//! - Adapter implementations in [`adapters`]
//! - Orchestration services and token handling in [`services`]

pub mod adapters;
pub mod domain;
pub mod ports;
pub mod services;

#[cfg(test)]
mod tests;
