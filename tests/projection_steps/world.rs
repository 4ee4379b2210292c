//! Shared world state for projection BDD scenarios.

use chrono::{DateTime, Duration, Utc};
use rstest::fixture;
use tasklane::client::{TaskBoard, TaskRecord};
use uuid::Uuid;

/// Scenario world for projection behaviour tests.
#[derive(Default)]
pub struct ProjectionWorld {
    pub tasks: Vec<TaskRecord>,
    pub board: TaskBoard,
    pub visible: Option<Vec<TaskRecord>>,
}

impl ProjectionWorld {
    /// Adds a record created one minute after the previous one.
    pub fn push(&mut self, mut record: TaskRecord) {
        let offset = i64::try_from(self.tasks.len()).unwrap_or(i64::MAX);
        record.created_at = base_time() + Duration::minutes(offset);
        self.tasks.push(record);
    }

    /// Returns the task titled `title`.
    pub fn task_mut(&mut self, title: &str) -> Result<&mut TaskRecord, eyre::Report> {
        self.tasks
            .iter_mut()
            .find(|task| task.title == title)
            .ok_or_else(|| eyre::eyre!("no task titled {title} in scenario world"))
    }
}

/// Builds a bare record for `title`.
#[must_use]
pub fn record(title: &str) -> TaskRecord {
    TaskRecord {
        id: Uuid::new_v4(),
        title: title.to_owned(),
        description: None,
        status: None,
        priority: None,
        category: None,
        start_date: None,
        deadline: None,
        created_at: base_time(),
    }
}

fn base_time() -> DateTime<Utc> {
    DateTime::parse_from_rfc3339("2024-05-01T00:00:00Z")
        .map(|stamp| stamp.with_timezone(&Utc))
        .unwrap_or_default()
}

/// Fixture that creates a new scenario world.
#[fixture]
pub fn world() -> ProjectionWorld {
    ProjectionWorld::default()
}
