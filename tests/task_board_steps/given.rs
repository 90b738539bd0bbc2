//! Given steps for task board BDD scenarios.

use super::world::{TaskBoardWorld, run_async};
use chrono::Utc;
use eyre::WrapErr;
use rstest_bdd_macros::given;
use taskdeck::task::domain::{Task, TaskData, TaskId, TaskPriority, TaskStatus};

#[given(r#"a task "{title}" with status "{status}""#)]
fn task_with_status(
    world: &mut TaskBoardWorld,
    title: String,
    status: String,
) -> Result<(), eyre::Report> {
    let parsed = TaskStatus::try_from(status.as_str())
        .map_err(|err| eyre::eyre!("invalid status in scenario: {err}"))?;
    let now = Utc::now();
    world.seeded.push(Task::from_data(TaskData {
        id: TaskId::new(),
        title,
        description: None,
        priority: TaskPriority::Medium,
        status: parsed,
        due_date: None,
        assigned_to: None,
        team_id: None,
        tags: Default::default(),
        created_at: now,
        updated_at: now,
        is_public: false,
        reminder_at: None,
    }));
    Ok(())
}

#[given("the store has loaded the tasks")]
fn store_has_loaded(world: &mut TaskBoardWorld) -> Result<(), eyre::Report> {
    world
        .server
        .seed(world.seeded.clone())
        .wrap_err("seed in-memory server")?;
    run_async(world.store.fetch(world.store.first_page_query()))
        .wrap_err("load first page into the store")?;
    Ok(())
}

#[given(r#"the task "{title}" is selected"#)]
fn task_is_selected(world: &mut TaskBoardWorld, title: String) -> Result<(), eyre::Report> {
    let id = world.task_id(&title)?;
    world
        .store
        .select(id)
        .ok_or_else(|| eyre::eyre!("task {title:?} could not be selected"))?;
    Ok(())
}
