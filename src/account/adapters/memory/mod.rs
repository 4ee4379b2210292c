//! In-memory adapters for user accounts.

mod user;

pub use user::InMemoryUserRepository;
