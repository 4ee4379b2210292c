//! Then steps for projection scenarios.

use super::world::ProjectionWorld;
use rstest_bdd_macros::then;

#[then(r#"the visible tasks are "{titles}""#)]
fn visible_tasks_are(world: &ProjectionWorld, titles: String) -> Result<(), eyre::Report> {
    let visible = world
        .visible
        .as_ref()
        .ok_or_else(|| eyre::eyre!("missing projection result in scenario world"))?;
    let actual: Vec<&str> = visible.iter().map(|task| task.title.as_str()).collect();
    let expected: Vec<&str> = titles.split(',').map(str::trim).collect();
    eyre::ensure!(
        actual == expected,
        "expected order {expected:?}, found {actual:?}"
    );
    Ok(())
}

#[then("no tasks are visible")]
fn no_tasks_visible(world: &ProjectionWorld) -> Result<(), eyre::Report> {
    let visible = world
        .visible
        .as_ref()
        .ok_or_else(|| eyre::eyre!("missing projection result in scenario world"))?;
    eyre::ensure!(visible.is_empty(), "expected no tasks, found {}", visible.len());
    Ok(())
}
