//! Shared helpers for `PostgreSQL` integration tests.

use chrono::{DateTime, Duration, TimeZone, Utc};
use eyre::{Result, eyre};
use pg_embedded_setup_unpriv::TestCluster;
use tasklane::account::adapters::postgres::PostgresUserRepository;
use tasklane::account::domain::{
    DisplayName, EmailAddress, HashedPassword, PersistedUserData, User, UserId,
};
use tasklane::account::ports::UserRepository;
use tasklane::storage::{self, PgPool};
use tasklane::task::adapters::postgres::PostgresTaskRepository;
use tasklane::task::domain::{
    OwnerId, PersistedTaskData, Task, TaskId, TaskPriority, TaskStatus,
};
use tokio::runtime::Runtime;
use uuid::Uuid;

/// Template database holding the bootstrapped schema.
pub const TEMPLATE_DB: &str = "tasklane_test_template";

/// Creates a tokio runtime for driving the async repositories.
pub fn test_runtime() -> Runtime {
    tokio::runtime::Builder::new_current_thread()
        .enable_all()
        .build()
        .expect("failed to create test runtime")
}

/// Ensures the template database exists with the schema applied.
///
/// The schema goes through [`storage::bootstrap_schema`], the same path the
/// server takes at start-up.
pub fn ensure_template(cluster: &TestCluster) -> Result<()> {
    cluster
        .ensure_template_exists(TEMPLATE_DB, |db_name| {
            let url = cluster.connection().database_url(db_name);
            let pool = storage::connect(&url, 1).map_err(|e| eyre!("{e}"))?;
            storage::bootstrap_schema(&pool).map_err(|e| eyre!("{e}"))?;
            Ok(())
        })
        .map_err(|e| eyre!("template setup failed: {e}"))
}

/// Scratch database cloned from the template and dropped afterwards.
pub struct TestDatabase {
    cluster: &'static TestCluster,
    name: String,
    pool: Option<PgPool>,
}

impl TestDatabase {
    /// Creates a fresh database named after `prefix`.
    pub fn create(cluster: &'static TestCluster, prefix: &str) -> Result<Self> {
        ensure_template(cluster)?;
        let name = format!("{prefix}_{}", Uuid::new_v4().simple());
        cluster
            .create_database_from_template(name.as_str(), TEMPLATE_DB)
            .map_err(|e| eyre!("failed to create {name}: {e}"))?;
        let url = cluster.connection().database_url(&name);
        let pool = storage::connect(&url, 1)?;
        Ok(Self {
            cluster,
            name,
            pool: Some(pool),
        })
    }

    fn pool(&self) -> PgPool {
        self.pool.clone().expect("pool lives until drop")
    }

    /// Task repository bound to this database.
    pub fn tasks(&self) -> PostgresTaskRepository {
        PostgresTaskRepository::new(self.pool())
    }

    /// User repository bound to this database.
    pub fn users(&self) -> PostgresUserRepository {
        PostgresUserRepository::new(self.pool())
    }
}

impl Drop for TestDatabase {
    fn drop(&mut self) {
        drop(self.pool.take());
        if let Err(err) = self.cluster.drop_database(self.name.as_str()) {
            tracing::warn!(database = %self.name, %err, "failed to drop test database");
        }
    }
}

/// Fixed timestamp with whole-second precision.
pub fn at_minute(minute: i64) -> DateTime<Utc> {
    Utc.with_ymd_and_hms(2024, 3, 1, 8, 0, 0)
        .single()
        .expect("valid timestamp")
        + Duration::minutes(minute)
}

/// Builds a user whose timestamps survive a `TIMESTAMPTZ` round trip.
pub fn user(name: &str, email: &str) -> User {
    User::from_persisted(PersistedUserData {
        id: UserId::new(),
        name: DisplayName::new(name).expect("valid name"),
        email: EmailAddress::new(email).expect("valid email"),
        password: HashedPassword::from_stored("$argon2id$v=19$m=19456,t=2,p=1$c2FsdA$aGFzaA"),
        created_at: at_minute(0),
    })
}

/// Stores a user so tasks may reference it, returning its owner identifier.
pub fn seed_owner(runtime: &Runtime, database: &TestDatabase, email: &str) -> OwnerId {
    let owner = user("Owner", email);
    runtime
        .block_on(database.users().store(&owner))
        .expect("owner should be stored");
    OwnerId::from_uuid(owner.id().into_inner())
}

/// Builds a pending task created `minute` minutes after the fixed epoch.
pub fn task(owner: OwnerId, title: &str, minute: i64) -> Task {
    let created_at = at_minute(minute);
    Task::from_persisted(PersistedTaskData {
        id: TaskId::new(),
        owner,
        title: title.to_owned(),
        description: None,
        status: TaskStatus::Pending,
        priority: TaskPriority::Medium,
        category: "General".to_owned(),
        start_date: None,
        deadline: None,
        created_at,
        updated_at: created_at,
    })
}
