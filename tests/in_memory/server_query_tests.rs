//! In-memory integration tests for server-side listing.

use super::helpers::{SeedTask, date, server, titles};
use mockable::DefaultClock;
use rstest::rstest;
use taskdeck::task::{
    adapters::memory::InMemoryTaskClient,
    domain::{DateWindow, TaskPriority, TaskStatus},
    ports::{ListQuery, PageRequest, TaskClient},
    view::{
        FilterContext, FilterSpec, PriorityFilter, SortDirection, SortField, SortSpec,
        StatusFilter,
    },
};

fn seeded(server: InMemoryTaskClient) -> InMemoryTaskClient {
    server
        .seed([
            SeedTask::titled("Delta")
                .priority(TaskPriority::High)
                .due(date(2000, 1, 3))
                .build(),
            SeedTask::titled("alpha")
                .status(TaskStatus::Completed)
                .description("Board meeting notes")
                .build(),
            SeedTask::titled("Charlie")
                .priority(TaskPriority::High)
                .status(TaskStatus::InProgress)
                .due(date(2000, 1, 1))
                .build(),
            SeedTask::titled("bravo").priority(TaskPriority::Low).build(),
            SeedTask::titled("Echo")
                .priority(TaskPriority::High)
                .due(date(2000, 1, 2))
                .build(),
        ])
        .expect("seed server");
    server
}

#[rstest]
#[tokio::test(flavor = "multi_thread")]
async fn unsorted_listing_keeps_server_order(server: InMemoryTaskClient) {
    let server = seeded(server);

    let page = server.list(&ListQuery::new(10)).await.expect("list");

    assert_eq!(
        titles(&page.tasks),
        ["Delta", "alpha", "Charlie", "bravo", "Echo"]
    );
    assert_eq!(page.total, 5);
    assert!(!page.has_more);
}

#[rstest]
#[tokio::test(flavor = "multi_thread")]
async fn listing_applies_filter_before_paging(server: InMemoryTaskClient) {
    let server = seeded(server);
    let query = ListQuery::new(2)
        .with_filter(FilterSpec::new().with_priority(PriorityFilter::Only(TaskPriority::High)))
        .with_page(PageRequest::new(2, 2));

    let page = server.list(&query).await.expect("list");

    assert_eq!(titles(&page.tasks), ["Echo"]);
    assert_eq!(page.total, 3);
    assert!(!page.has_more);
}

#[rstest]
#[tokio::test(flavor = "multi_thread")]
async fn listing_sorts_with_collation_and_tie_break(server: InMemoryTaskClient) {
    let server = seeded(server);
    let query = ListQuery::new(10).with_sort(
        SortSpec::new(SortField::Priority, SortDirection::Descending)
            .then_by(SortField::DueDate, SortDirection::Ascending),
    );

    let page = server.list(&query).await.expect("list");

    assert_eq!(
        titles(&page.tasks),
        ["Charlie", "Echo", "Delta", "alpha", "bravo"]
    );
}

#[rstest]
#[tokio::test(flavor = "multi_thread")]
async fn listing_searches_title_and_description(server: InMemoryTaskClient) {
    let server = seeded(server);
    let query = ListQuery::new(10).with_filter(
        FilterSpec::new()
            .with_search("BOARD")
            .with_status(StatusFilter::Only(TaskStatus::Completed)),
    );

    let page = server.list(&query).await.expect("list");

    assert_eq!(titles(&page.tasks), ["alpha"]);
}

#[rstest]
#[tokio::test(flavor = "multi_thread")]
async fn today_window_uses_the_server_clock(server: InMemoryTaskClient) {
    let today = FilterContext::from_clock(&DefaultClock, chrono::Weekday::Sun).today();
    server
        .seed([
            SeedTask::titled("Due today").due(today).build(),
            SeedTask::titled("Long overdue").due(date(2000, 1, 1)).build(),
            SeedTask::titled("Undated").build(),
        ])
        .expect("seed server");
    let query =
        ListQuery::new(10).with_filter(FilterSpec::new().with_window(DateWindow::Today));

    let page = server.list(&query).await.expect("list");

    assert_eq!(titles(&page.tasks), ["Due today"]);
}

#[rstest]
#[tokio::test(flavor = "multi_thread")]
async fn injected_failure_affects_only_the_next_request(server: InMemoryTaskClient) {
    let server = seeded(server);
    server.fail_next_request("gateway timeout").expect("inject");

    let failed = server.list(&ListQuery::new(10)).await;
    let recovered = server.list(&ListQuery::new(10)).await;

    let err = failed.expect_err("first request should fail");
    assert_eq!(err.to_string(), "request failed: gateway timeout");
    assert_eq!(recovered.expect("second request").total, 5);
}
