//! Shared world state for task board BDD scenarios.

use std::sync::Arc;

use mockable::DefaultClock;
use rstest::fixture;
use taskdeck::task::{
    adapters::memory::InMemoryTaskClient,
    domain::{Task, TaskId},
    services::{TaskStore, TaskStoreResult, TransitionOutcome},
};

/// Store type used by the BDD world.
pub type TestTaskStore = TaskStore<InMemoryTaskClient, DefaultClock>;

/// Scenario world for task board behaviour tests.
pub struct TaskBoardWorld {
    pub server: InMemoryTaskClient,
    pub store: TestTaskStore,
    pub seeded: Vec<Task>,
    pub last_transition: Option<TaskStoreResult<TransitionOutcome>>,
    pub last_create: Option<TaskStoreResult<Task>>,
}

impl TaskBoardWorld {
    /// Creates a world with an empty server and store.
    #[must_use]
    pub fn new() -> Self {
        let server = InMemoryTaskClient::new();
        let store = TaskStore::new(Arc::new(server.clone()), Arc::new(DefaultClock));

        Self {
            server,
            store,
            seeded: Vec::new(),
            last_transition: None,
            last_create: None,
        }
    }

    /// Returns the id of the held task titled `title`.
    ///
    /// # Errors
    ///
    /// Returns an error when no held task has that title.
    pub fn task_id(&self, title: &str) -> Result<TaskId, eyre::Report> {
        self.store
            .tasks()
            .iter()
            .find(|task| task.title() == title)
            .map(Task::id)
            .ok_or_else(|| eyre::eyre!("no held task titled {title:?}"))
    }
}

impl Default for TaskBoardWorld {
    fn default() -> Self {
        Self::new()
    }
}

/// Fixture that creates a new scenario world.
#[fixture]
pub fn world() -> TaskBoardWorld {
    TaskBoardWorld::default()
}

/// Runs an async operation within sync step definitions.
pub fn run_async<T>(future: impl std::future::Future<Output = T>) -> T {
    tokio::task::block_in_place(|| tokio::runtime::Handle::current().block_on(future))
}
