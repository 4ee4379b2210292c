//! Client-side task list state.

use super::TaskRecord;
use crate::projection::{StatusFilter, project};

/// Identifies one refresh request.
///
/// Tickets are issued in increasing order by [`TaskBoard::begin_refresh`].
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash)]
pub struct RefreshTicket(u64);

/// Latest task snapshot plus the active status filter.
///
/// Snapshots may arrive out of order when refreshes overlap; a snapshot
/// whose ticket is older than the one already applied is discarded.
#[derive(Debug, Clone, Default)]
pub struct TaskBoard {
    filter: StatusFilter,
    snapshot: Vec<TaskRecord>,
    issued: u64,
    applied: Option<RefreshTicket>,
}

impl TaskBoard {
    /// Creates an empty board showing every task.
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    /// Returns the active filter.
    #[must_use]
    pub const fn filter(&self) -> StatusFilter {
        self.filter
    }

    /// Changes the active filter.
    pub const fn set_filter(&mut self, filter: StatusFilter) {
        self.filter = filter;
    }

    /// Issues the ticket for a refresh about to start.
    pub const fn begin_refresh(&mut self) -> RefreshTicket {
        self.issued += 1;
        RefreshTicket(self.issued)
    }

    /// Applies a snapshot fetched under `ticket`.
    ///
    /// Returns `false` and leaves the board unchanged when a newer snapshot
    /// was already applied.
    pub fn apply(&mut self, ticket: RefreshTicket, snapshot: Vec<TaskRecord>) -> bool {
        if self.applied.is_some_and(|applied| ticket < applied) {
            tracing::debug!(ticket = ticket.0, "discarding stale task snapshot");
            return false;
        }
        self.snapshot = snapshot;
        self.applied = Some(ticket);
        true
    }

    /// Returns the raw snapshot in server order.
    #[must_use]
    pub fn snapshot(&self) -> &[TaskRecord] {
        &self.snapshot
    }

    /// Returns the snapshot filtered and ordered for display.
    #[must_use]
    pub fn visible(&self) -> Vec<TaskRecord> {
        project(&self.snapshot, self.filter)
    }
}
