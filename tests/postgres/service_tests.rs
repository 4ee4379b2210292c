//! Task and account services running over the `PostgreSQL` adapters.

use crate::postgres::helpers::{TestDatabase, seed_owner, test_runtime};
use chrono::Duration;
use mockable::DefaultClock;
use pg_embedded_setup_unpriv::TestCluster;
use pg_embedded_setup_unpriv::test_support::shared_test_cluster;
use rstest::rstest;
use std::sync::Arc;
use tasklane::account::services::{AccountService, LoginRequest, RegisterRequest, TokenIssuer};
use tasklane::task::services::{CreateTaskRequest, TaskService, UpdateTaskRequest};

#[rstest]
fn long_titles_and_categories_are_accepted(shared_test_cluster: &'static TestCluster) {
    let database = TestDatabase::create(shared_test_cluster, "svc_long_title").expect("database");
    let rt = test_runtime();
    let owner = seed_owner(&rt, &database, "ada@example.com");
    let service = TaskService::new(Arc::new(database.tasks()), Arc::new(DefaultClock));
    let title = "x".repeat(300);
    let category = "c".repeat(300);

    let created = rt
        .block_on(service.create_task(owner, CreateTaskRequest::new(title.clone())))
        .expect("long title should be accepted");
    let updated = rt
        .block_on(service.update_task(
            owner,
            created.id(),
            UpdateTaskRequest::new().with_category(category.clone()),
        ))
        .expect("long category should be accepted");
    let fetched = rt
        .block_on(service.get_task(owner, created.id()))
        .expect("lookup");

    assert_eq!(updated.title(), title);
    assert_eq!(fetched.title(), title);
    assert_eq!(fetched.category(), category);
}

#[rstest]
fn registered_user_with_long_name_can_log_in(shared_test_cluster: &'static TestCluster) {
    let database = TestDatabase::create(shared_test_cluster, "svc_account").expect("database");
    let rt = test_runtime();
    let tokens = TokenIssuer::new("postgres-test-secret", Duration::hours(1)).expect("secret");
    let accounts = AccountService::new(Arc::new(database.users()), Arc::new(DefaultClock), tokens);
    let name = "N".repeat(300);

    let registered = rt
        .block_on(accounts.register(RegisterRequest::new(
            name.clone(),
            "ada@example.com",
            "correct horse",
        )))
        .expect("registration should succeed");
    let session = rt
        .block_on(accounts.login(LoginRequest::new("ADA@example.com", "correct horse")))
        .expect("login should succeed");
    let verified = accounts
        .authenticate(&session.token)
        .expect("token should verify");

    assert_eq!(session.user, registered.user);
    assert_eq!(session.user.name, name);
    assert_eq!(verified.id, registered.user.id);
}
