//! Personal task tracking.
//!
//! Each user owns a private collection of tasks that can be created,
//! listed, partially updated, toggled between pending and completed, and
//! deleted. The module follows hexagonal architecture:
//!
//! - Domain types in [`domain`]
//! - Port contracts in [`ports`]
//! - Adapter implementations in [`adapters`]
//! - Orchestration services in [`services`]

pub mod adapters;
pub mod domain;
pub mod ports;
pub mod services;

#[cfg(test)]
mod tests;
