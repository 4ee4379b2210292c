//! Total display order for task records.

use super::ProjectedTask;
use crate::task::domain::TaskPriority;
use std::cmp::Ordering;

/// Maps a priority onto its sort rank. Higher ranks are shown first.
///
/// Unrecognised or absent priorities rank `0`, below [`TaskPriority::Low`].
#[must_use]
pub const fn priority_rank(priority: Option<TaskPriority>) -> u8 {
    match priority {
        Some(TaskPriority::High) => 3,
        Some(TaskPriority::Medium) => 2,
        Some(TaskPriority::Low) => 1,
        None => 0,
    }
}

/// Compares two tasks for display.
///
/// Keys, most significant first:
///
/// 1. priority rank, descending;
/// 2. deadline, ascending, with any deadline ahead of none;
/// 3. creation time, descending.
///
/// Tasks equal on all three keys compare as [`Ordering::Equal`].
#[must_use]
pub fn compare_for_display<T>(a: &T, b: &T) -> Ordering
where
    T: ProjectedTask + ?Sized,
{
    priority_rank(b.priority())
        .cmp(&priority_rank(a.priority()))
        .then_with(|| compare_deadlines(a, b))
        .then_with(|| b.created_at().cmp(&a.created_at()))
}

fn compare_deadlines<T>(a: &T, b: &T) -> Ordering
where
    T: ProjectedTask + ?Sized,
{
    match (a.deadline(), b.deadline()) {
        (Some(left), Some(right)) => left.cmp(&right),
        (Some(_), None) => Ordering::Less,
        (None, Some(_)) => Ordering::Greater,
        (None, None) => Ordering::Equal,
    }
}
