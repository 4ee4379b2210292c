//! Domain model for personal task tracking.
//!
//! The task domain models task creation, partial updates, and status
//! toggling for a single owner while keeping all infrastructure concerns
//! outside of the domain boundary.

mod error;
mod ids;
mod task;

pub use error::{ParseTaskPriorityError, ParseTaskStatusError, TaskDomainError};
pub use ids::{OwnerId, TaskId};
pub use task::{
    DEFAULT_CATEGORY, PersistedTaskData, Task, TaskChanges, TaskDetails, TaskPriority, TaskStatus,
};
