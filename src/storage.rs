//! `PostgreSQL` connection pooling and schema bootstrap.
//!
//! Both the task and account adapters share one r2d2 pool. The schema is
//! created idempotently at server start-up from the SQL in `migrations/`.

use diesel::connection::SimpleConnection;
use diesel::pg::PgConnection;
use diesel::r2d2::{ConnectionManager, Pool, PoolError};
use thiserror::Error;

/// `PostgreSQL` connection pool type used by all adapters.
pub type PgPool = Pool<ConnectionManager<PgConnection>>;

const SCHEMA_SQL: &str = include_str!("../migrations/0001_create_users_and_tasks/up.sql");

/// Errors raised while preparing storage.
#[derive(Debug, Error)]
pub enum StorageError {
    /// The pool could not be built or a connection could not be checked out.
    #[error("connection pool error: {0}")]
    Pool(#[from] PoolError),

    /// The pool was asked to hold no connections.
    #[error("connection pool size must be at least 1")]
    EmptyPool,

    /// Executing the schema script failed.
    #[error("schema bootstrap failed: {0}")]
    Schema(#[from] diesel::result::Error),
}

/// Builds a connection pool for `database_url`.
///
/// # Errors
///
/// Returns [`StorageError::EmptyPool`] when `max_size` is zero and
/// [`StorageError::Pool`] when the pool cannot establish its initial
/// connections.
pub fn connect(database_url: &str, max_size: u32) -> Result<PgPool, StorageError> {
    if max_size == 0 {
        return Err(StorageError::EmptyPool);
    }
    let manager = ConnectionManager::<PgConnection>::new(database_url);
    let pool = Pool::builder().max_size(max_size).build(manager)?;
    Ok(pool)
}

/// Creates the users and tasks tables when they do not exist yet.
///
/// # Errors
///
/// Returns [`StorageError`] when no connection is available or the schema
/// script fails.
pub fn bootstrap_schema(pool: &PgPool) -> Result<(), StorageError> {
    let mut connection = pool.get()?;
    connection.batch_execute(SCHEMA_SQL)?;
    tracing::info!("database schema ready");
    Ok(())
}
