//! HTTP surface for accounts and tasks.
//!
//! The router is built over an [`AppState`] holding type-erased services,
//! so the same handlers serve the in-memory and `PostgreSQL` adapters.

mod accounts;
mod auth;
mod error;
mod tasks;
mod views;


pub use auth::CurrentUser;
pub use error::{ApiError, ErrorBody};
pub use tasks::{ListQuery, ListView};
pub use views::{MessageView, TaskView};

use crate::account::{
    adapters::memory::InMemoryUserRepository,
    ports::UserRepository,
    services::{AccountService, TokenIssuer},
};
use crate::task::{
    adapters::memory::InMemoryTaskRepository, ports::TaskRepository, services::TaskService,
};
use axum::routing::{get, post};
use axum::{Json, Router};
use mockable::DefaultClock;
use serde_json::{Value, json};
use std::sync::Arc;
use tower_http::trace::TraceLayer;

/// Task service over any repository implementation.
pub type SharedTaskService = TaskService<dyn TaskRepository, DefaultClock>;

/// Account service over any repository implementation.
pub type SharedAccountService = AccountService<dyn UserRepository, DefaultClock>;

/// Shared handler state.
#[derive(Clone)]
pub struct AppState {
    /// Task operations.
    pub tasks: Arc<SharedTaskService>,
    /// Account operations.
    pub accounts: Arc<SharedAccountService>,
}

impl AppState {
    /// Wires services over the given repositories.
    #[must_use]
    pub fn new(
        tasks: Arc<dyn TaskRepository>,
        users: Arc<dyn UserRepository>,
        tokens: TokenIssuer,
    ) -> Self {
        let clock = Arc::new(DefaultClock);
        Self {
            tasks: Arc::new(TaskService::new(tasks, Arc::clone(&clock))),
            accounts: Arc::new(AccountService::new(users, clock, tokens)),
        }
    }

    /// Wires services over fresh in-memory repositories.
    #[must_use]
    pub fn in_memory(tokens: TokenIssuer) -> Self {
        Self::new(
            Arc::new(InMemoryTaskRepository::new()),
            Arc::new(InMemoryUserRepository::new()),
            tokens,
        )
    }
}

/// Builds the application router.
#[must_use]
pub fn router(state: AppState) -> Router {
    Router::new()
        .route("/", get(banner))
        .route("/health", get(health))
        .route("/api/auth/register", post(accounts::register))
        .route("/api/auth/login", post(accounts::login))
        .route("/api/tasks", get(tasks::list).post(tasks::create))
        .route(
            "/api/tasks/{id}",
            get(tasks::fetch).put(tasks::update).delete(tasks::remove),
        )
        .route("/api/tasks/{id}/toggle", post(tasks::toggle))
        .layer(TraceLayer::new_for_http())
        .with_state(state)
}

async fn banner() -> &'static str {
    "API is running..."
}

async fn health() -> Json<Value> {
    Json(json!({ "status": "ok" }))
}
