//! In-memory integration tests for task service operations.

use std::sync::Arc;

use chrono::NaiveDate;
use mockable::DefaultClock;
use rstest::{fixture, rstest};
use tasklane::projection::StatusFilter;
use tasklane::task::{
    adapters::memory::InMemoryTaskRepository,
    domain::{OwnerId, TaskPriority, TaskStatus},
    ports::TaskRepository,
    services::{CreateTaskRequest, TaskService, TaskServiceError, UpdateTaskRequest},
};
use uuid::Uuid;

type TestService = TaskService<InMemoryTaskRepository, DefaultClock>;

struct Harness {
    repository: Arc<InMemoryTaskRepository>,
    service: TestService,
}

#[fixture]
fn harness() -> Harness {
    let repository = Arc::new(InMemoryTaskRepository::new());
    let service = TaskService::new(Arc::clone(&repository), Arc::new(DefaultClock));
    Harness {
        repository,
        service,
    }
}

fn owner() -> OwnerId {
    OwnerId::from_uuid(Uuid::new_v4())
}

#[rstest]
#[tokio::test(flavor = "multi_thread")]
async fn repository_lists_owner_tasks_oldest_first(harness: Harness) -> Result<(), eyre::Report> {
    let ada = owner();
    let first = harness
        .service
        .create_task(ada, CreateTaskRequest::new("first"))
        .await?;
    let second = harness
        .service
        .create_task(ada, CreateTaskRequest::new("second"))
        .await?;
    harness
        .service
        .create_task(owner(), CreateTaskRequest::new("someone else"))
        .await?;

    let stored = harness.repository.list_by_owner(ada).await?;
    let ids: Vec<_> = stored.iter().map(|task| task.id()).collect();

    eyre::ensure!(ids == vec![first.id(), second.id()], "unexpected order {ids:?}");
    Ok(())
}

#[rstest]
#[tokio::test(flavor = "multi_thread")]
async fn projected_listing_tracks_status_changes(harness: Harness) -> Result<(), eyre::Report> {
    let ada = owner();
    let due = NaiveDate::from_ymd_opt(2024, 6, 1).expect("valid date");
    let urgent = harness
        .service
        .create_task(
            ada,
            CreateTaskRequest::new("urgent")
                .with_priority("high")
                .with_deadline(due),
        )
        .await?;
    let later = harness
        .service
        .create_task(ada, CreateTaskRequest::new("later").with_priority("low"))
        .await?;

    harness.service.toggle_status(ada, urgent.id()).await?;
    let pending = harness
        .service
        .list_projected(ada, StatusFilter::Pending)
        .await?;
    let completed = harness
        .service
        .list_projected(ada, StatusFilter::Completed)
        .await?;

    eyre::ensure!(
        pending.iter().map(|task| task.id()).eq([later.id()]),
        "only the low task stays pending"
    );
    eyre::ensure!(
        completed.iter().map(|task| task.id()).eq([urgent.id()]),
        "the toggled task is completed"
    );
    Ok(())
}

#[rstest]
#[tokio::test(flavor = "multi_thread")]
async fn update_persists_through_the_repository(harness: Harness) -> Result<(), eyre::Report> {
    let ada = owner();
    let task = harness
        .service
        .create_task(ada, CreateTaskRequest::new("draft"))
        .await?;

    harness
        .service
        .update_task(
            ada,
            task.id(),
            UpdateTaskRequest::new()
                .with_status("completed")
                .with_priority("high"),
        )
        .await?;
    let stored = harness
        .repository
        .find_by_id(task.id())
        .await?
        .ok_or_else(|| eyre::eyre!("task should still exist"))?;

    eyre::ensure!(stored.status() == TaskStatus::Completed, "status persisted");
    eyre::ensure!(stored.priority() == TaskPriority::High, "priority persisted");
    eyre::ensure!(stored.updated_at() >= stored.created_at(), "timestamps ordered");
    Ok(())
}

#[rstest]
#[tokio::test(flavor = "multi_thread")]
async fn deleted_task_is_gone_for_everyone(harness: Harness) -> Result<(), eyre::Report> {
    let ada = owner();
    let task = harness
        .service
        .create_task(ada, CreateTaskRequest::new("temporary"))
        .await?;

    harness.service.delete_task(ada, task.id()).await?;

    eyre::ensure!(
        harness.repository.find_by_id(task.id()).await?.is_none(),
        "repository no longer holds the task"
    );
    eyre::ensure!(
        harness.repository.list_by_owner(ada).await?.is_empty(),
        "owner index was cleaned up"
    );
    let again = harness.service.delete_task(ada, task.id()).await;
    eyre::ensure!(
        matches!(again, Err(TaskServiceError::NotFound(_))),
        "second delete reports not found"
    );
    Ok(())
}
