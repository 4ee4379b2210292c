//! Given steps for projection scenarios.

use super::world::{ProjectionWorld, record};
use chrono::{DateTime, NaiveDate, Utc};
use eyre::WrapErr;
use rstest_bdd_macros::given;
use tasklane::task::domain::{TaskPriority, TaskStatus};

#[given(r#"a {status} task "{title}" with priority "{priority}""#)]
fn task_with_priority(
    world: &mut ProjectionWorld,
    status: String,
    title: String,
    priority: String,
) -> Result<(), eyre::Report> {
    let mut task = record(&title);
    task.status = Some(
        TaskStatus::try_from(status.as_str()).wrap_err("scenario status must be valid")?,
    );
    task.priority = TaskPriority::try_from(priority.as_str()).ok();
    world.push(task);
    Ok(())
}

#[given(r#"task "{title}" is due on "{date}""#)]
fn task_due_on(world: &mut ProjectionWorld, title: String, date: String) -> Result<(), eyre::Report> {
    let deadline = date
        .parse::<NaiveDate>()
        .wrap_err("scenario deadline must be a date")?;
    world.task_mut(&title)?.deadline = Some(deadline);
    Ok(())
}

#[given(r#"task "{title}" was created at "{stamp}""#)]
fn task_created_at(
    world: &mut ProjectionWorld,
    title: String,
    stamp: String,
) -> Result<(), eyre::Report> {
    let created_at = DateTime::parse_from_rfc3339(&stamp)
        .wrap_err("scenario timestamp must be RFC 3339")?
        .with_timezone(&Utc);
    world.task_mut(&title)?.created_at = created_at;
    Ok(())
}

#[given("an empty task list")]
fn empty_task_list(world: &mut ProjectionWorld) {
    world.tasks.clear();
}
