//! Shared test helpers for in-memory integration tests.

use std::sync::Arc;

use chrono::{NaiveDate, Utc};
use mockable::DefaultClock;
use rstest::fixture;
use taskdeck::task::{
    adapters::memory::InMemoryTaskClient,
    domain::{Task, TaskData, TaskId, TaskPriority, TaskStatus, UserId, UserRef},
    services::TaskStore,
};

/// Store type used by the integration tests.
pub type TestStore = TaskStore<InMemoryTaskClient, DefaultClock>;

/// Provides a fresh in-memory server for each test.
#[fixture]
pub fn server() -> InMemoryTaskClient {
    InMemoryTaskClient::new()
}

/// Builds a store backed by `server`.
pub fn store_over(server: &InMemoryTaskClient) -> TestStore {
    TaskStore::new(Arc::new(server.clone()), Arc::new(DefaultClock))
}

/// Returns a calendar date.
///
/// # Panics
///
/// Panics when the date is invalid.
pub fn date(year: i32, month: u32, day: u32) -> NaiveDate {
    NaiveDate::from_ymd_opt(year, month, day).expect("valid test date")
}

/// Builder for seeded tasks.
pub struct SeedTask {
    data: TaskData,
}

impl SeedTask {
    /// Starts a pending, medium-priority task.
    pub fn titled(title: &str) -> Self {
        let now = Utc::now();
        Self {
            data: TaskData {
                id: TaskId::new(),
                title: title.to_owned(),
                description: None,
                priority: TaskPriority::Medium,
                status: TaskStatus::Pending,
                due_date: None,
                assigned_to: None,
                team_id: None,
                tags: Default::default(),
                created_at: now,
                updated_at: now,
                is_public: false,
                reminder_at: None,
            },
        }
    }

    /// Sets the status.
    pub fn status(mut self, status: TaskStatus) -> Self {
        self.data.status = status;
        self
    }

    /// Sets the priority.
    pub fn priority(mut self, priority: TaskPriority) -> Self {
        self.data.priority = priority;
        self
    }

    /// Sets the due date.
    pub fn due(mut self, due: NaiveDate) -> Self {
        self.data.due_date = Some(due);
        self
    }

    /// Sets the description.
    pub fn description(mut self, description: &str) -> Self {
        self.data.description = Some(description.to_owned());
        self
    }

    /// Assigns the task to a user with the given display name.
    pub fn assignee(mut self, name: &str) -> Self {
        self.data.assigned_to = Some(UserRef::new(UserId::new(name.to_lowercase()), name));
        self
    }

    /// Builds the task.
    pub fn build(self) -> Task {
        Task::from_data(self.data)
    }
}

/// Returns the titles of `tasks` in order.
pub fn titles<'a>(tasks: impl IntoIterator<Item = &'a Task>) -> Vec<&'a str> {
    tasks.into_iter().map(Task::title).collect()
}
