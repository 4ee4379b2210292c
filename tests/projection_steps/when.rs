//! When steps for projection scenarios.

use super::world::{ProjectionWorld, record};
use eyre::WrapErr;
use rstest_bdd_macros::when;
use tasklane::projection::{StatusFilter, project};

#[when(r#"the list is projected with the "{selector}" filter"#)]
fn project_with_filter(world: &mut ProjectionWorld, selector: String) -> Result<(), eyre::Report> {
    let filter = selector
        .parse::<StatusFilter>()
        .wrap_err("scenario filter must be valid")?;
    world.visible = Some(project(&world.tasks, filter));
    Ok(())
}

#[when("a newer refresh is applied before an older one")]
fn newer_refresh_then_older(world: &mut ProjectionWorld) -> Result<(), eyre::Report> {
    let older = world.board.begin_refresh();
    let newer = world.board.begin_refresh();
    eyre::ensure!(
        world.board.apply(newer, world.tasks.clone()),
        "newest snapshot should apply"
    );
    let stale = vec![record("Stale")];
    eyre::ensure!(
        !world.board.apply(older, stale),
        "stale snapshot should be rejected"
    );
    world.visible = Some(world.board.visible());
    Ok(())
}
