//! Service layer for per-owner task creation, retrieval, and mutation.

use crate::projection::{StatusFilter, project};
use crate::task::{
    domain::{
        OwnerId, Task, TaskChanges, TaskDetails, TaskDomainError, TaskId, TaskPriority, TaskStatus,
    },
    ports::{TaskRepository, TaskRepositoryError},
};
use chrono::NaiveDate;
use mockable::Clock;
use serde::Deserialize;
use std::sync::Arc;
use thiserror::Error;

/// Request payload for creating a task.
#[derive(Debug, Clone, PartialEq, Eq, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct CreateTaskRequest {
    title: String,
    #[serde(default)]
    description: Option<String>,
    #[serde(default)]
    priority: Option<String>,
    #[serde(default)]
    category: Option<String>,
    #[serde(default)]
    start_date: Option<NaiveDate>,
    #[serde(default)]
    deadline: Option<NaiveDate>,
}

impl CreateTaskRequest {
    /// Creates a request with the required title.
    #[must_use]
    pub fn new(title: impl Into<String>) -> Self {
        Self {
            title: title.into(),
            description: None,
            priority: None,
            category: None,
            start_date: None,
            deadline: None,
        }
    }

    /// Sets the description.
    #[must_use]
    pub fn with_description(mut self, description: impl Into<String>) -> Self {
        self.description = Some(description.into());
        self
    }

    /// Sets the priority as text (`low`, `medium`, or `high`).
    #[must_use]
    pub fn with_priority(mut self, priority: impl Into<String>) -> Self {
        self.priority = Some(priority.into());
        self
    }

    /// Sets the category label.
    #[must_use]
    pub fn with_category(mut self, category: impl Into<String>) -> Self {
        self.category = Some(category.into());
        self
    }

    /// Sets the start date.
    #[must_use]
    pub const fn with_start_date(mut self, start_date: NaiveDate) -> Self {
        self.start_date = Some(start_date);
        self
    }

    /// Sets the deadline.
    #[must_use]
    pub const fn with_deadline(mut self, deadline: NaiveDate) -> Self {
        self.deadline = Some(deadline);
        self
    }

    fn into_details(self) -> Result<TaskDetails, TaskDomainError> {
        let mut details = TaskDetails::new(self.title)?;
        if let Some(description) = self.description {
            details = details.with_description(description);
        }
        if let Some(priority) = self.priority {
            details = details.with_priority(TaskPriority::try_from(priority.as_str())?);
        }
        if let Some(category) = self.category {
            details = details.with_category(category);
        }
        if let Some(start_date) = self.start_date {
            details = details.with_start_date(start_date);
        }
        if let Some(deadline) = self.deadline {
            details = details.with_deadline(deadline);
        }
        Ok(details)
    }
}

/// Request payload for a partial task update.
///
/// Absent fields leave the stored values unchanged.
#[derive(Debug, Clone, Default, PartialEq, Eq, Deserialize)]
#[serde(rename_all = "camelCase", default)]
pub struct UpdateTaskRequest {
    title: Option<String>,
    description: Option<String>,
    status: Option<String>,
    priority: Option<String>,
    category: Option<String>,
    start_date: Option<NaiveDate>,
    deadline: Option<NaiveDate>,
}

impl UpdateTaskRequest {
    /// Creates an empty update.
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    /// Replaces the title.
    #[must_use]
    pub fn with_title(mut self, title: impl Into<String>) -> Self {
        self.title = Some(title.into());
        self
    }

    /// Replaces the description.
    #[must_use]
    pub fn with_description(mut self, description: impl Into<String>) -> Self {
        self.description = Some(description.into());
        self
    }

    /// Replaces the status (`pending` or `completed`).
    #[must_use]
    pub fn with_status(mut self, status: impl Into<String>) -> Self {
        self.status = Some(status.into());
        self
    }

    /// Replaces the priority (`low`, `medium`, or `high`).
    #[must_use]
    pub fn with_priority(mut self, priority: impl Into<String>) -> Self {
        self.priority = Some(priority.into());
        self
    }

    /// Replaces the category label.
    #[must_use]
    pub fn with_category(mut self, category: impl Into<String>) -> Self {
        self.category = Some(category.into());
        self
    }

    /// Replaces the start date.
    #[must_use]
    pub const fn with_start_date(mut self, start_date: NaiveDate) -> Self {
        self.start_date = Some(start_date);
        self
    }

    /// Replaces the deadline.
    #[must_use]
    pub const fn with_deadline(mut self, deadline: NaiveDate) -> Self {
        self.deadline = Some(deadline);
        self
    }

    fn into_changes(self) -> Result<TaskChanges, TaskDomainError> {
        let status = self
            .status
            .as_deref()
            .map(TaskStatus::try_from)
            .transpose()?;
        let priority = self
            .priority
            .as_deref()
            .map(TaskPriority::try_from)
            .transpose()?;
        Ok(TaskChanges {
            title: self.title,
            description: self.description,
            status,
            priority,
            category: self.category,
            start_date: self.start_date,
            deadline: self.deadline,
        })
    }
}

/// Service-level errors for task operations.
#[derive(Debug, Error)]
pub enum TaskServiceError {
    /// Domain validation failed.
    #[error(transparent)]
    Domain(#[from] TaskDomainError),

    /// The task does not exist.
    #[error("task not found: {0}")]
    NotFound(TaskId),

    /// The task belongs to another user.
    #[error("task {0} belongs to another user")]
    NotOwner(TaskId),

    /// Repository operation failed.
    #[error(transparent)]
    Repository(TaskRepositoryError),
}

impl From<TaskRepositoryError> for TaskServiceError {
    fn from(err: TaskRepositoryError) -> Self {
        match err {
            TaskRepositoryError::NotFound(id) => Self::NotFound(id),
            other => Self::Repository(other),
        }
    }
}

/// Result type for task service operations.
pub type TaskServiceResult<T> = Result<T, TaskServiceError>;

/// Task orchestration service scoped to the calling owner.
pub struct TaskService<R, C>
where
    R: TaskRepository + ?Sized,
    C: Clock + Send + Sync,
{
    repository: Arc<R>,
    clock: Arc<C>,
}

impl<R, C> Clone for TaskService<R, C>
where
    R: TaskRepository + ?Sized,
    C: Clock + Send + Sync,
{
    fn clone(&self) -> Self {
        Self {
            repository: Arc::clone(&self.repository),
            clock: Arc::clone(&self.clock),
        }
    }
}

impl<R, C> TaskService<R, C>
where
    R: TaskRepository + ?Sized,
    C: Clock + Send + Sync,
{
    /// Creates a new task service.
    #[must_use]
    pub const fn new(repository: Arc<R>, clock: Arc<C>) -> Self {
        Self { repository, clock }
    }

    /// Creates a pending task for `owner`.
    ///
    /// # Errors
    ///
    /// Returns [`TaskServiceError::Domain`] when the title is blank or the
    /// priority is unknown, or [`TaskServiceError::Repository`] when the
    /// repository rejects persistence.
    pub async fn create_task(
        &self,
        owner: OwnerId,
        request: CreateTaskRequest,
    ) -> TaskServiceResult<Task> {
        let details = request.into_details()?;
        let task = Task::new(owner, details, &*self.clock);
        self.repository.store(&task).await?;
        tracing::info!(task_id = %task.id(), %owner, "task created");
        Ok(task)
    }

    /// Lists every task belonging to `owner` in storage order.
    ///
    /// # Errors
    ///
    /// Returns [`TaskServiceError::Repository`] when the lookup fails.
    pub async fn list_tasks(&self, owner: OwnerId) -> TaskServiceResult<Vec<Task>> {
        Ok(self.repository.list_by_owner(owner).await?)
    }

    /// Lists `owner`'s tasks filtered and ordered for display.
    ///
    /// # Errors
    ///
    /// Returns [`TaskServiceError::Repository`] when the lookup fails.
    pub async fn list_projected(
        &self,
        owner: OwnerId,
        filter: StatusFilter,
    ) -> TaskServiceResult<Vec<Task>> {
        let tasks = self.repository.list_by_owner(owner).await?;
        Ok(project(&tasks, filter))
    }

    /// Fetches one of `owner`'s tasks.
    ///
    /// # Errors
    ///
    /// Returns [`TaskServiceError::NotFound`] when the task does not exist or
    /// [`TaskServiceError::NotOwner`] when it belongs to someone else.
    pub async fn get_task(&self, owner: OwnerId, id: TaskId) -> TaskServiceResult<Task> {
        self.load_owned(owner, id).await
    }

    /// Applies a partial update to one of `owner`'s tasks.
    ///
    /// # Errors
    ///
    /// Returns the lookup errors of [`get_task`](Self::get_task) first, then
    /// [`TaskServiceError::Domain`] for a blank title or unknown
    /// status/priority text.
    pub async fn update_task(
        &self,
        owner: OwnerId,
        id: TaskId,
        request: UpdateTaskRequest,
    ) -> TaskServiceResult<Task> {
        let mut task = self.load_owned(owner, id).await?;
        let changes = request.into_changes()?;
        if changes.is_empty() {
            tracing::debug!(task_id = %id, "update carries no changes");
        }
        task.apply(changes, &*self.clock)?;
        self.repository.update(&task).await?;
        tracing::info!(task_id = %id, status = %task.status(), "task updated");
        Ok(task)
    }

    /// Flips one of `owner`'s tasks between pending and completed.
    ///
    /// # Errors
    ///
    /// Returns the lookup errors of [`get_task`](Self::get_task) or
    /// [`TaskServiceError::Repository`] when persistence fails.
    pub async fn toggle_status(&self, owner: OwnerId, id: TaskId) -> TaskServiceResult<Task> {
        let mut task = self.load_owned(owner, id).await?;
        task.toggle_status(&*self.clock);
        self.repository.update(&task).await?;
        tracing::info!(task_id = %id, status = %task.status(), "task status toggled");
        Ok(task)
    }

    /// Deletes one of `owner`'s tasks.
    ///
    /// # Errors
    ///
    /// Returns the lookup errors of [`get_task`](Self::get_task) or
    /// [`TaskServiceError::Repository`] when persistence fails.
    pub async fn delete_task(&self, owner: OwnerId, id: TaskId) -> TaskServiceResult<()> {
        self.load_owned(owner, id).await?;
        self.repository.delete(id).await?;
        tracing::info!(task_id = %id, "task deleted");
        Ok(())
    }

    async fn load_owned(&self, owner: OwnerId, id: TaskId) -> TaskServiceResult<Task> {
        let task = self
            .repository
            .find_by_id(id)
            .await?
            .ok_or(TaskServiceError::NotFound(id))?;
        if !task.is_owned_by(owner) {
            tracing::warn!(task_id = %id, %owner, "rejected access to foreign task");
            return Err(TaskServiceError::NotOwner(id));
        }
        Ok(task)
    }
}
