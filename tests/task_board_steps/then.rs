//! Then steps for task board BDD scenarios.

use super::world::TaskBoardWorld;
use chrono::Weekday;
use mockable::DefaultClock;
use rstest_bdd_macros::then;
use taskdeck::task::{
    domain::{Task, TaskStatus},
    services::{TaskStoreError, TransitionOutcome},
    view::{FilterContext, FilterSpec},
};

fn column_titles(world: &TaskBoardWorld, status: &str) -> Result<Vec<String>, eyre::Report> {
    let parsed = TaskStatus::try_from(status)
        .map_err(|err| eyre::eyre!("invalid column in scenario: {err}"))?;
    let snapshot = world.store.snapshot();
    let context = FilterContext::from_clock(&DefaultClock, Weekday::Sun);
    let board = snapshot.board(&FilterSpec::new(), &context);
    Ok(board
        .column(parsed)
        .tasks()
        .iter()
        .map(|task| task.title().to_owned())
        .collect())
}

#[then(r#"the task "{title}" has status "{status}""#)]
fn task_has_status(
    world: &TaskBoardWorld,
    title: String,
    status: String,
) -> Result<(), eyre::Report> {
    let expected = TaskStatus::try_from(status.as_str())
        .map_err(|err| eyre::eyre!("invalid status in scenario: {err}"))?;
    let held = world
        .store
        .tasks()
        .into_iter()
        .find(|task| task.title() == title)
        .ok_or_else(|| eyre::eyre!("no held task titled {title:?}"))?;

    eyre::ensure!(
        held.status() == expected,
        "expected status {expected}, found {}",
        held.status()
    );
    Ok(())
}

#[then(r#"the "{status}" column lists "{titles}""#)]
fn column_lists(world: &TaskBoardWorld, status: String, titles: String) -> Result<(), eyre::Report> {
    let expected: Vec<String> = titles.split(", ").map(str::to_owned).collect();
    let actual = column_titles(world, &status)?;
    eyre::ensure!(
        actual == expected,
        "expected column {status} to list {expected:?}, found {actual:?}"
    );
    Ok(())
}

#[then(r#"the "{status}" column is empty"#)]
fn column_is_empty(world: &TaskBoardWorld, status: String) -> Result<(), eyre::Report> {
    let actual = column_titles(world, &status)?;
    eyre::ensure!(actual.is_empty(), "expected empty column, found {actual:?}");
    Ok(())
}

#[then("the transition leaves the task unchanged")]
fn transition_unchanged(world: &TaskBoardWorld) -> Result<(), eyre::Report> {
    let result = world
        .last_transition
        .as_ref()
        .ok_or_else(|| eyre::eyre!("missing transition result"))?;
    if !matches!(result, Ok(TransitionOutcome::Unchanged)) {
        return Err(eyre::eyre!("expected an unchanged outcome, got {result:?}"));
    }
    Ok(())
}

#[then("the creation fails with a validation error")]
fn creation_fails(world: &TaskBoardWorld) -> Result<(), eyre::Report> {
    let result = world
        .last_create
        .as_ref()
        .ok_or_else(|| eyre::eyre!("missing create result"))?;
    if !matches!(result, Err(TaskStoreError::Validation(_))) {
        return Err(eyre::eyre!("expected a validation error, got {result:?}"));
    }
    Ok(())
}

#[then("the store holds {count:usize} tasks")]
fn store_holds(world: &TaskBoardWorld, count: usize) -> Result<(), eyre::Report> {
    let held: Vec<Task> = world.store.tasks();
    eyre::ensure!(
        held.len() == count,
        "expected {count} tasks, found {}",
        held.len()
    );
    Ok(())
}

#[then("no task is selected")]
fn no_task_selected(world: &TaskBoardWorld) -> Result<(), eyre::Report> {
    eyre::ensure!(
        world.store.current_task().is_none(),
        "expected no current task"
    );
    Ok(())
}
