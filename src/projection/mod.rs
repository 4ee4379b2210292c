//! Display ordering and status filtering for task lists.
//!
//! A projection turns an arbitrary-order snapshot of tasks into the
//! sequence shown to the user:
//!
//! 1. keep the tasks whose status passes the [`StatusFilter`];
//! 2. sort them with [`compare_for_display`], which ranks by priority
//!    (high, medium, low, then unrecognised), then by deadline (earliest
//!    first, dated before undated), then by creation time (newest first).
//!
//! The projection is a pure function of its inputs. It never fails:
//! records carrying unrecognised or absent priority or status values are
//! ranked lowest or only shown under [`StatusFilter::All`].

mod filter;
mod ordering;

pub use filter::{ParseStatusFilterError, StatusFilter};
pub use ordering::{compare_for_display, priority_rank};

use crate::task::domain::{Task, TaskPriority, TaskStatus};
use chrono::{DateTime, NaiveDate, Utc};

/// Read-only view of a task record consumed by the projection.
///
/// `None` from [`status`](Self::status) or [`priority`](Self::priority)
/// stands for a value that was absent or not recognised when the record
/// was decoded.
pub trait ProjectedTask {
    /// Completion status, if recognised.
    fn status(&self) -> Option<TaskStatus>;

    /// Priority level, if recognised.
    fn priority(&self) -> Option<TaskPriority>;

    /// Deadline, if the task has one.
    fn deadline(&self) -> Option<NaiveDate>;

    /// Creation timestamp.
    fn created_at(&self) -> DateTime<Utc>;
}

impl ProjectedTask for Task {
    fn status(&self) -> Option<TaskStatus> {
        Some(Self::status(self))
    }

    fn priority(&self) -> Option<TaskPriority> {
        Some(Self::priority(self))
    }

    fn deadline(&self) -> Option<NaiveDate> {
        Self::deadline(self)
    }

    fn created_at(&self) -> DateTime<Utc> {
        Self::created_at(self)
    }
}

/// Filters `tasks` by `filter` and sorts the survivors for display.
///
/// The input is left untouched; the result is a new vector holding clones
/// of the matching records.
#[must_use]
pub fn project<T>(tasks: &[T], filter: StatusFilter) -> Vec<T>
where
    T: ProjectedTask + Clone,
{
    let mut visible: Vec<T> = tasks
        .iter()
        .filter(|task| filter.accepts(task.status()))
        .cloned()
        .collect();
    visible.sort_by(compare_for_display);
    visible
}
