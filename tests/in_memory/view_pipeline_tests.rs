//! In-memory integration tests for projections over store snapshots.

use super::helpers::{SeedTask, date, server, store_over, titles};
use chrono::Weekday;
use rstest::rstest;
use taskdeck::config::EngineConfig;
use taskdeck::task::{
    adapters::memory::InMemoryTaskClient,
    domain::{TaskPriority, TaskStatus},
    view::{
        CalendarMonth, FilterContext, FilterSpec, PriorityFilter, SortDirection, SortField,
        SortSpec,
    },
};

async fn loaded_snapshot(server: &InMemoryTaskClient) -> taskdeck::task::services::StoreSnapshot {
    server
        .seed([
            SeedTask::titled("Write report")
                .priority(TaskPriority::High)
                .due(date(2024, 3, 15))
                .assignee("Noa")
                .build(),
            SeedTask::titled("Ship release")
                .status(TaskStatus::Completed)
                .due(date(2024, 3, 1))
                .build(),
            SeedTask::titled("Fix login")
                .status(TaskStatus::InProgress)
                .priority(TaskPriority::High)
                .assignee("Avi")
                .build(),
            SeedTask::titled("Book venue")
                .due(date(2024, 4, 2))
                .build(),
        ])
        .expect("seed");
    let store = store_over(server);
    store
        .fetch(store.first_page_query())
        .await
        .expect("fetch");
    store.snapshot()
}

#[rstest]
#[tokio::test(flavor = "multi_thread")]
async fn list_view_filters_then_sorts(server: InMemoryTaskClient) {
    let snapshot = loaded_snapshot(&server).await;
    let config = EngineConfig::default();
    let sorter = config.sorter().expect("default locale collates");
    let context = FilterContext::new(date(2024, 3, 13), Weekday::Sun);

    let listed = snapshot.list(
        &FilterSpec::new().with_priority(PriorityFilter::Only(TaskPriority::High)),
        Some(&SortSpec::new(SortField::Assignee, SortDirection::Ascending)),
        &sorter,
        &context,
    );

    assert_eq!(titles(listed), ["Fix login", "Write report"]);
}

#[rstest]
#[tokio::test(flavor = "multi_thread")]
async fn board_and_calendar_share_one_snapshot(server: InMemoryTaskClient) {
    let snapshot = loaded_snapshot(&server).await;
    let context = FilterContext::new(date(2024, 3, 13), Weekday::Sun);

    let board = snapshot.board(&FilterSpec::new(), &context);
    assert_eq!(board.len(), 4);
    assert_eq!(
        titles(board.column(TaskStatus::Pending).tasks().iter().copied()),
        ["Write report", "Book venue"]
    );

    let month = CalendarMonth::new(2024, 3).expect("valid month");
    let grid = snapshot.calendar(month, EngineConfig::default().calendar_options());
    assert_eq!(grid.len(), 36);
    let due_in_march: usize = grid.cells().iter().map(|cell| cell.tasks().len()).sum();
    assert_eq!(due_in_march, 2);
    assert_eq!(
        grid.day(1).map(|cell| titles(cell.tasks().iter().copied())),
        Some(vec!["Ship release"])
    );
}
