//! In-memory integration tests for store operations.

use super::helpers::{SeedTask, server, store_over, titles};
use rstest::rstest;
use taskdeck::task::{
    adapters::memory::InMemoryTaskClient,
    domain::{NewTask, TaskPatch, TaskPriority, TaskStatus},
    ports::FixedConfirmation,
    services::{OperationKind, RemoveOutcome, TaskStoreError, TransitionOutcome},
};

#[rstest]
#[tokio::test(flavor = "multi_thread")]
async fn create_edit_complete_and_delete(server: InMemoryTaskClient) {
    let store = store_over(&server);
    store
        .fetch(store.first_page_query())
        .await
        .expect("initial fetch");

    let created = store
        .create(NewTask::new("Draft agenda").with_priority(TaskPriority::Low))
        .await
        .expect("create");
    let id = created.id();
    store.select(id).expect("created task is held");

    let edited = store
        .update(
            id,
            TaskPatch::new()
                .with_title("Final agenda")
                .with_priority(TaskPriority::High),
        )
        .await
        .expect("update");
    assert_eq!(edited.title(), "Final agenda");
    assert_eq!(store.current_task(), Some(edited));

    let outcome = store.toggle(id).await.expect("toggle");
    assert!(matches!(
        outcome,
        TransitionOutcome::Applied(ref task) if task.status() == TaskStatus::Completed
    ));

    let removed = store
        .remove_confirmed(id, &FixedConfirmation(true))
        .await
        .expect("delete");
    assert_eq!(removed, RemoveOutcome::Removed);
    assert!(store.tasks().is_empty());
    assert_eq!(store.current_task(), None);
    assert!(server.stored_tasks().expect("stored").is_empty());

    let kinds: Vec<OperationKind> = store
        .operations()
        .into_iter()
        .map(|(_, record)| record.kind())
        .collect();
    assert_eq!(
        kinds,
        [
            OperationKind::Fetch,
            OperationKind::Create,
            OperationKind::Update(id),
            OperationKind::Update(id),
            OperationKind::Remove(id),
        ]
    );
}

#[rstest]
#[tokio::test(flavor = "multi_thread")]
async fn store_mirrors_server_after_refetch(server: InMemoryTaskClient) {
    server
        .seed([
            SeedTask::titled("One").build(),
            SeedTask::titled("Two").build(),
        ])
        .expect("seed");
    let store = store_over(&server);
    store
        .fetch(store.first_page_query())
        .await
        .expect("fetch");

    store.create(NewTask::new("Three")).await.expect("create");
    store
        .fetch(store.first_page_query())
        .await
        .expect("refetch");

    assert_eq!(titles(&store.tasks()), ["Three", "One", "Two"]);
    assert_eq!(store.total(), 3);
}

#[rstest]
#[tokio::test(flavor = "multi_thread")]
async fn removing_a_task_twice_reports_not_found(server: InMemoryTaskClient) {
    let task = SeedTask::titled("Once").build();
    let id = task.id();
    server.seed([task]).expect("seed");
    let store = store_over(&server);
    store
        .fetch(store.first_page_query())
        .await
        .expect("fetch");

    store.remove(id).await.expect("first delete");
    let second = store.remove(id).await;

    assert!(matches!(second, Err(TaskStoreError::NotFound(missing)) if missing == id));
    assert_eq!(store.total(), 0);
    assert!(store.last_error().is_some());
}

#[rstest]
#[tokio::test(flavor = "multi_thread")]
async fn failed_update_keeps_previous_task_state(server: InMemoryTaskClient) {
    let task = SeedTask::titled("Stable").build();
    let id = task.id();
    server.seed([task.clone()]).expect("seed");
    let store = store_over(&server);
    store
        .fetch(store.first_page_query())
        .await
        .expect("fetch");
    server.fail_next_request("server unavailable").expect("inject");

    let result = store.toggle(id).await;

    assert!(matches!(result, Err(TaskStoreError::Transport(_))));
    assert_eq!(store.get(id), Some(task));
    let record = store.latest_for_task(id).expect("update recorded");
    assert_eq!(
        record.status().error(),
        Some("request failed: server unavailable")
    );
}
