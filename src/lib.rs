//! Tasklane: a multi-user task list service and its terminal client.
//!
//! This crate provides the task model, account management, an HTTP API,
//! and a client that keeps a filtered, priority-ordered view of the
//! signed-in user's tasks.
//!
//! # Architecture
//!
//! Tasklane follows hexagonal architecture principles:
//!
//! - **Domain**: Pure business logic with no infrastructure dependencies
//! - **Ports**: Abstract trait interfaces for external interactions
//! - **Adapters**: Concrete implementations of ports (database, memory)
//! - **Services**: Orchestration used by the HTTP layer and tests
//!
//! # Modules
//!
//! - [`projection`]: Status filtering and display ordering of task lists
//! - [`task`]: Per-owner task storage and lifecycle
//! - [`account`]: Registration, login, and bearer tokens
//! - [`api`]: Axum router exposing accounts and tasks over HTTP
//! - [`client`]: HTTP client, session persistence, and the task board
//! - [`config`]: Command-line and environment configuration
//! - [`storage`]: `PostgreSQL` connection pooling and schema bootstrap
//! - [`telemetry`]: Tracing subscriber setup

pub mod account;
pub mod api;
pub mod client;
pub mod config;
pub mod projection;
pub mod storage;
pub mod task;
pub mod telemetry;
