//! Task repository tests against a live `PostgreSQL` database.

use crate::postgres::helpers::{TestDatabase, seed_owner, task, test_runtime};
use chrono::NaiveDate;
use mockable::DefaultClock;
use pg_embedded_setup_unpriv::TestCluster;
use pg_embedded_setup_unpriv::test_support::shared_test_cluster;
use rstest::rstest;
use tasklane::task::domain::{OwnerId, PersistedTaskData, Task, TaskId, TaskPriority, TaskStatus};
use tasklane::task::ports::{TaskRepository, TaskRepositoryError};

#[rstest]
fn stored_task_is_found_with_every_field(shared_test_cluster: &'static TestCluster) {
    let database = TestDatabase::create(shared_test_cluster, "task_roundtrip").expect("database");
    let rt = test_runtime();
    let owner = seed_owner(&rt, &database, "ada@example.com");
    let repo = database.tasks();
    let base = task(owner, "Renew passport", 0);
    let stored = Task::from_persisted(PersistedTaskData {
        id: base.id(),
        owner,
        title: base.title().to_owned(),
        description: Some("Bring two photos".to_owned()),
        status: TaskStatus::Completed,
        priority: TaskPriority::High,
        category: "Errands".to_owned(),
        start_date: NaiveDate::from_ymd_opt(2024, 5, 20),
        deadline: NaiveDate::from_ymd_opt(2024, 6, 1),
        created_at: base.created_at(),
        updated_at: base.updated_at(),
    });

    rt.block_on(repo.store(&stored)).expect("store");
    let found = rt
        .block_on(repo.find_by_id(stored.id()))
        .expect("lookup")
        .expect("task should exist");

    assert_eq!(found, stored);
}

#[rstest]
fn long_text_fields_are_stored_verbatim(shared_test_cluster: &'static TestCluster) {
    let database = TestDatabase::create(shared_test_cluster, "task_long_text").expect("database");
    let rt = test_runtime();
    let owner = seed_owner(&rt, &database, "ada@example.com");
    let repo = database.tasks();
    let title = "t".repeat(300);
    let long = task(owner, &title, 0);

    rt.block_on(repo.store(&long)).expect("long title should be stored");
    let found = rt
        .block_on(repo.find_by_id(long.id()))
        .expect("lookup")
        .expect("task should exist");

    assert_eq!(found.title(), title);
}

#[rstest]
fn storing_the_same_id_twice_is_a_duplicate(shared_test_cluster: &'static TestCluster) {
    let database = TestDatabase::create(shared_test_cluster, "task_duplicate").expect("database");
    let rt = test_runtime();
    let owner = seed_owner(&rt, &database, "ada@example.com");
    let repo = database.tasks();
    let original = task(owner, "Once", 0);

    rt.block_on(repo.store(&original)).expect("first store");
    let result = rt.block_on(repo.store(&original));

    assert!(
        matches!(result, Err(TaskRepositoryError::DuplicateTask(id)) if id == original.id()),
        "expected duplicate error, got {result:?}"
    );
}

#[rstest]
fn update_replaces_the_stored_row(shared_test_cluster: &'static TestCluster) {
    let database = TestDatabase::create(shared_test_cluster, "task_update").expect("database");
    let rt = test_runtime();
    let owner = seed_owner(&rt, &database, "ada@example.com");
    let repo = database.tasks();
    let mut stored = task(owner, "Draft", 0);
    rt.block_on(repo.store(&stored)).expect("store");

    stored.toggle_status(&DefaultClock);
    rt.block_on(repo.update(&stored)).expect("update");
    let found = rt
        .block_on(repo.find_by_id(stored.id()))
        .expect("lookup")
        .expect("task should exist");

    assert_eq!(found.status(), TaskStatus::Completed);
    assert_eq!(found.created_at(), stored.created_at());
    assert!(found.updated_at() > found.created_at());
}

#[rstest]
fn update_and_delete_of_missing_rows_are_not_found(shared_test_cluster: &'static TestCluster) {
    let database = TestDatabase::create(shared_test_cluster, "task_missing").expect("database");
    let rt = test_runtime();
    let owner = seed_owner(&rt, &database, "ada@example.com");
    let repo = database.tasks();
    let ghost = task(owner, "Never stored", 0);

    let updated = rt.block_on(repo.update(&ghost));
    let deleted = rt.block_on(repo.delete(ghost.id()));
    let found = rt.block_on(repo.find_by_id(TaskId::new())).expect("lookup");

    assert!(matches!(updated, Err(TaskRepositoryError::NotFound(id)) if id == ghost.id()));
    assert!(matches!(deleted, Err(TaskRepositoryError::NotFound(id)) if id == ghost.id()));
    assert!(found.is_none());
}

#[rstest]
fn delete_removes_the_row(shared_test_cluster: &'static TestCluster) {
    let database = TestDatabase::create(shared_test_cluster, "task_delete").expect("database");
    let rt = test_runtime();
    let owner = seed_owner(&rt, &database, "ada@example.com");
    let repo = database.tasks();
    let doomed = task(owner, "Temporary", 0);
    rt.block_on(repo.store(&doomed)).expect("store");

    rt.block_on(repo.delete(doomed.id())).expect("delete");

    let found = rt.block_on(repo.find_by_id(doomed.id())).expect("lookup");
    assert!(found.is_none());
}

#[rstest]
fn list_by_owner_returns_only_that_owner_oldest_first(shared_test_cluster: &'static TestCluster) {
    let database = TestDatabase::create(shared_test_cluster, "task_list").expect("database");
    let rt = test_runtime();
    let ada = seed_owner(&rt, &database, "ada@example.com");
    let bob = seed_owner(&rt, &database, "bob@example.com");
    let repo = database.tasks();
    for stored in [
        task(ada, "third", 30),
        task(bob, "foreign", 10),
        task(ada, "first", 5),
        task(ada, "second", 20),
    ] {
        rt.block_on(repo.store(&stored)).expect("store");
    }

    let listed = rt.block_on(repo.list_by_owner(ada)).expect("list");
    let titles: Vec<&str> = listed.iter().map(Task::title).collect();

    assert_eq!(titles, vec!["first", "second", "third"]);
    assert!(listed.iter().all(|listed_task| listed_task.is_owned_by(ada)));
}

#[rstest]
fn task_for_unknown_owner_is_rejected(shared_test_cluster: &'static TestCluster) {
    let database = TestDatabase::create(shared_test_cluster, "task_orphan").expect("database");
    let rt = test_runtime();
    let repo = database.tasks();
    let orphan = task(OwnerId::from_uuid(uuid::Uuid::new_v4()), "Orphan", 0);

    let result = rt.block_on(repo.store(&orphan));

    assert!(matches!(result, Err(TaskRepositoryError::Persistence(_))));
}
