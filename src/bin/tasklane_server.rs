//! `tasklane-server`: HTTP API for accounts and per-user task lists.
//!
//! Usage:
//!
//! ```text
//! TASKLANE_JWT_SECRET=... tasklane-server [--listen 0.0.0.0:5000] [--database-url postgres://...]
//! ```
//!
//! Without a database URL every account and task lives in memory and is
//! lost on exit.

use std::sync::Arc;

use clap::Parser;
use eyre::{Result, WrapErr};
use tasklane::account::adapters::postgres::PostgresUserRepository;
use tasklane::account::services::TokenIssuer;
use tasklane::api::{self, AppState};
use tasklane::config::ServerConfig;
use tasklane::storage::{self, PgPool, StorageError};
use tasklane::task::adapters::postgres::PostgresTaskRepository;
use tasklane::telemetry;
use tokio::net::TcpListener;

/// Tasklane API server.
#[derive(Debug, Parser)]
#[command(name = "tasklane-server", about = "Tasklane task list API server")]
struct Cli {
    #[command(flatten)]
    config: ServerConfig,
}

#[tokio::main]
async fn main() -> Result<()> {
    telemetry::init(telemetry::DEFAULT_FILTER);
    let cli = Cli::parse();
    tracing::debug!(config = ?cli.config, "configuration loaded");

    let tokens = TokenIssuer::new(&cli.config.jwt_secret, cli.config.token_ttl())
        .wrap_err("invalid token configuration")?;
    let state = build_state(&cli.config, tokens).await?;

    let listener = TcpListener::bind(cli.config.listen)
        .await
        .wrap_err_with(|| format!("failed to bind {}", cli.config.listen))?;
    tracing::info!(address = %listener.local_addr()?, "tasklane server listening");

    axum::serve(listener, api::router(state))
        .with_graceful_shutdown(shutdown_signal())
        .await
        .wrap_err("server terminated unexpectedly")?;
    tracing::info!("tasklane server stopped");
    Ok(())
}

async fn build_state(config: &ServerConfig, tokens: TokenIssuer) -> Result<AppState> {
    let Some(url) = config.database_url.clone() else {
        tracing::warn!("no database configured; accounts and tasks are kept in memory");
        return Ok(AppState::in_memory(tokens));
    };

    let pool_size = config.pool_size;
    let pool = tokio::task::spawn_blocking(move || -> Result<PgPool, StorageError> {
        let pool = storage::connect(&url, pool_size)?;
        storage::bootstrap_schema(&pool)?;
        Ok(pool)
    })
    .await
    .wrap_err("storage bootstrap task panicked")?
    .wrap_err("failed to prepare PostgreSQL storage")?;
    tracing::info!(pool_size, "using PostgreSQL storage");

    Ok(AppState::new(
        Arc::new(PostgresTaskRepository::new(pool.clone())),
        Arc::new(PostgresUserRepository::new(pool)),
        tokens,
    ))
}

async fn shutdown_signal() {
    if let Err(err) = tokio::signal::ctrl_c().await {
        tracing::error!(error = %err, "failed to listen for shutdown signal");
        std::future::pending::<()>().await;
    }
    tracing::info!("shutdown requested");
}
