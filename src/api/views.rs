//! Wire representations of domain values.

use crate::task::domain::{Task, TaskPriority, TaskStatus};
use chrono::{DateTime, NaiveDate, Utc};
use serde::{Deserialize, Serialize};
use uuid::Uuid;

/// JSON shape of a task returned by the API.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct TaskView {
    /// Task identifier.
    pub id: Uuid,
    /// Owning user identifier.
    pub user: Uuid,
    /// Title.
    pub title: String,
    /// Optional description.
    pub description: Option<String>,
    /// Completion status.
    pub status: TaskStatus,
    /// Priority.
    pub priority: TaskPriority,
    /// Category label.
    pub category: String,
    /// Optional start date.
    pub start_date: Option<NaiveDate>,
    /// Optional deadline.
    pub deadline: Option<NaiveDate>,
    /// Creation timestamp.
    pub created_at: DateTime<Utc>,
    /// Latest modification timestamp.
    pub updated_at: DateTime<Utc>,
}

impl From<&Task> for TaskView {
    fn from(task: &Task) -> Self {
        Self {
            id: task.id().into_inner(),
            user: task.owner().into_inner(),
            title: task.title().to_owned(),
            description: task.description().map(ToOwned::to_owned),
            status: task.status(),
            priority: task.priority(),
            category: task.category().to_owned(),
            start_date: task.start_date(),
            deadline: task.deadline(),
            created_at: task.created_at(),
            updated_at: task.updated_at(),
        }
    }
}

/// Confirmation body for a deletion.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct MessageView {
    /// Human-readable confirmation.
    pub message: String,
}
