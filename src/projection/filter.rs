//! Status filter selector.

use crate::task::domain::TaskStatus;
use serde::{Deserialize, Serialize};
use std::fmt;
use std::str::FromStr;
use thiserror::Error;

/// Restricts a projection to pending, completed, or all tasks.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum StatusFilter {
    /// Every task regardless of status.
    #[default]
    All,
    /// Pending tasks only.
    Pending,
    /// Completed tasks only.
    Completed,
}

impl StatusFilter {
    /// Every selector, in the order the client offers them.
    pub const ALL: [Self; 3] = [Self::All, Self::Pending, Self::Completed];

    /// Returns `true` when a task with `status` passes the filter.
    ///
    /// Unrecognised statuses (`None`) pass only [`StatusFilter::All`].
    #[must_use]
    pub fn accepts(self, status: Option<TaskStatus>) -> bool {
        match self {
            Self::All => true,
            Self::Pending => status == Some(TaskStatus::Pending),
            Self::Completed => status == Some(TaskStatus::Completed),
        }
    }

    /// Returns the canonical text form.
    #[must_use]
    pub const fn as_str(self) -> &'static str {
        match self {
            Self::All => "all",
            Self::Pending => "pending",
            Self::Completed => "completed",
        }
    }
}

/// Error returned when a filter selector is not recognised.
#[derive(Debug, Clone, Error, PartialEq, Eq)]
#[error("unknown status filter '{0}', expected all, pending, or completed")]
pub struct ParseStatusFilterError(pub String);

impl FromStr for StatusFilter {
    type Err = ParseStatusFilterError;

    fn from_str(value: &str) -> Result<Self, Self::Err> {
        match value.trim().to_ascii_lowercase().as_str() {
            "all" => Ok(Self::All),
            "pending" => Ok(Self::Pending),
            "completed" => Ok(Self::Completed),
            _ => Err(ParseStatusFilterError(value.to_owned())),
        }
    }
}

impl fmt::Display for StatusFilter {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}
