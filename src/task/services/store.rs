//! Task store: the single source of truth for the client-side task
//! collection.

use super::{
    OperationId, OperationKind, OperationLog, OperationRecord, OperationStatus, TaskStoreError,
    TaskStoreResult,
};
use crate::config::EngineConfig;
use crate::task::{
    domain::{NewTask, Task, TaskId, TaskPatch, TaskStatus},
    ports::{DeleteConfirmation, ListQuery, TaskClient, TaskPage},
    view::{
        Board, CalendarGrid, CalendarMonth, CalendarOptions, FilterContext, FilterSpec, SortSpec,
        TaskSorter, list_view,
    },
};
use mockable::Clock;
use std::future::Future;
use std::sync::{Arc, PoisonError, RwLock, RwLockReadGuard, RwLockWriteGuard};
use tracing::{debug, info, warn};

/// Owned copy of the store's collection state.
///
/// Projections borrow from a snapshot, so they can be recomputed on every
/// render without holding the store lock.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct StoreSnapshot {
    /// Held tasks in store order.
    pub tasks: Vec<Task>,
    /// Number of tasks matching the last query on the server.
    pub total: usize,
    /// Whether the server has more pages for the last query.
    pub has_more: bool,
    /// Task selected for detail display, if any.
    pub current_task: Option<Task>,
}

impl StoreSnapshot {
    /// Returns the filtered and optionally sorted list view.
    #[must_use]
    pub fn list(
        &self,
        filter: &FilterSpec,
        sort: Option<&SortSpec>,
        sorter: &TaskSorter,
        context: &FilterContext,
    ) -> Vec<&Task> {
        list_view(&self.tasks, filter, sort, sorter, context)
    }

    /// Returns the board for the tasks passing `filter`.
    #[must_use]
    pub fn board(&self, filter: &FilterSpec, context: &FilterContext) -> Board<'_> {
        Board::project(
            self.tasks
                .iter()
                .filter(|task| filter.matches(task, context)),
        )
    }

    /// Returns the calendar grid for `month`.
    #[must_use]
    pub fn calendar(&self, month: CalendarMonth, options: CalendarOptions) -> CalendarGrid<'_> {
        CalendarGrid::build(month, &self.tasks, options)
    }
}

/// Result of a delete request that needs confirmation.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum RemoveOutcome {
    /// The user confirmed and the task was deleted.
    Removed,
    /// The user declined; the store was not called.
    Declined,
}

#[derive(Debug)]
struct StoreState {
    tasks: Vec<Task>,
    total: usize,
    has_more: bool,
    current_task: Option<Task>,
    last_query: Option<ListQuery>,
    operations: OperationLog,
}

/// Task collection store.
///
/// Mutations go through [`TaskStore::create`], [`TaskStore::update`] and
/// [`TaskStore::remove`]; each call records its own
/// [`OperationRecord`]. Responses are applied in arrival order, so when two
/// calls race on the same task the last response wins.
pub struct TaskStore<T, C>
where
    T: TaskClient,
    C: Clock + Send + Sync,
{
    client: Arc<T>,
    clock: Arc<C>,
    page_size: u32,
    state: RwLock<StoreState>,
}

impl<T, C> TaskStore<T, C>
where
    T: TaskClient,
    C: Clock + Send + Sync,
{
    /// Creates an empty store with default limits.
    #[must_use]
    pub fn new(client: Arc<T>, clock: Arc<C>) -> Self {
        Self::with_config(client, clock, &EngineConfig::default())
    }

    /// Creates an empty store using the page size and operation history
    /// limit from `config`.
    #[must_use]
    pub fn with_config(client: Arc<T>, clock: Arc<C>, config: &EngineConfig) -> Self {
        Self {
            client,
            clock,
            page_size: config.page_size,
            state: RwLock::new(StoreState {
                tasks: Vec::new(),
                total: 0,
                has_more: false,
                current_task: None,
                last_query: None,
                operations: OperationLog::new(config.operation_history),
            }),
        }
    }

    /// Returns a query for the first page using the configured page size.
    #[must_use]
    pub fn first_page_query(&self) -> ListQuery {
        ListQuery::new(self.page_size)
    }

    /// Loads a page of tasks.
    ///
    /// Page 1 replaces the held collection; later pages append, skipping
    /// tasks already held. On failure the collection is left untouched.
    ///
    /// # Errors
    ///
    /// Returns [`TaskStoreError::Transport`] when the request fails.
    pub async fn fetch(&self, query: ListQuery) -> TaskStoreResult<TaskPage> {
        let request = async { self.client.list(&query).await.map_err(TaskStoreError::from) };
        self.track(OperationKind::Fetch, request, |state, page| {
            if query.page.is_first() {
                state.tasks.clone_from(&page.tasks);
            } else {
                for task in &page.tasks {
                    if !state.tasks.iter().any(|held| held.id() == task.id()) {
                        state.tasks.push(task.clone());
                    }
                }
            }
            state.total = page.total;
            state.has_more = page.has_more;
            state.last_query = Some(query.clone());
        })
        .await
    }

    /// Loads the page after the last fetched one and appends it.
    ///
    /// Returns an empty page without calling the client when nothing has
    /// been fetched yet or the server reported no further pages.
    ///
    /// # Errors
    ///
    /// Returns [`TaskStoreError::Transport`] when the request fails.
    pub async fn fetch_next_page(&self) -> TaskStoreResult<TaskPage> {
        let next_query = {
            let state = self.read();
            state
                .last_query
                .as_ref()
                .filter(|_| state.has_more)
                .map(|query| query.clone().with_page(query.page.next()))
        };
        match next_query {
            Some(query) => self.fetch(query).await,
            None => Ok(TaskPage::empty()),
        }
    }

    /// Creates a task and inserts the server representation at the head of
    /// the collection.
    ///
    /// # Errors
    ///
    /// Returns [`TaskStoreError::Validation`] when the title is blank (the
    /// client is not called) or the server rejects the payload, and
    /// [`TaskStoreError::Transport`] when the request fails.
    pub async fn create(&self, new_task: NewTask) -> TaskStoreResult<Task> {
        self.track(
            OperationKind::Create,
            self.request_create(&new_task),
            |state, task| {
                state.tasks.insert(0, task.clone());
                state.total = state.total.saturating_add(1);
            },
        )
        .await
    }

    /// Applies a partial update and replaces the held task with the server
    /// representation. The current task is refreshed when it is the same
    /// task.
    ///
    /// # Errors
    ///
    /// Returns [`TaskStoreError::NotFound`] when the server has no such
    /// task, [`TaskStoreError::Validation`] for an invalid patch and
    /// [`TaskStoreError::Transport`] when the request fails.
    pub async fn update(&self, id: TaskId, patch: TaskPatch) -> TaskStoreResult<Task> {
        self.track(
            OperationKind::Update(id),
            self.request_update(id, &patch),
            |state, task| {
                if let Some(held) = state.tasks.iter_mut().find(|held| held.id() == id) {
                    *held = task.clone();
                }
                if state
                    .current_task
                    .as_ref()
                    .is_some_and(|current| current.id() == id)
                {
                    state.current_task = Some(task.clone());
                }
            },
        )
        .await
    }

    /// Deletes a task, removes it from the collection and clears the
    /// current task when it pointed at the removed task.
    ///
    /// Callers are expected to have confirmed the deletion; see
    /// [`TaskStore::remove_confirmed`].
    ///
    /// # Errors
    ///
    /// Returns [`TaskStoreError::NotFound`] when the server has no such
    /// task and [`TaskStoreError::Transport`] when the request fails.
    pub async fn remove(&self, id: TaskId) -> TaskStoreResult<()> {
        let request = async { self.client.delete(id).await.map_err(TaskStoreError::from) };
        self.track(OperationKind::Remove(id), request, |state, _| {
            state.tasks.retain(|task| task.id() != id);
            state.total = state.total.saturating_sub(1);
            if state
                .current_task
                .as_ref()
                .is_some_and(|current| current.id() == id)
            {
                state.current_task = None;
            }
        })
        .await
    }

    /// Asks `confirmation` before deleting. A declined confirmation is not
    /// an error and never reaches the client.
    ///
    /// # Errors
    ///
    /// Returns the errors of [`TaskStore::remove`].
    pub async fn remove_confirmed(
        &self,
        id: TaskId,
        confirmation: &impl DeleteConfirmation,
    ) -> TaskStoreResult<RemoveOutcome> {
        if !confirmation.confirm(id).await {
            debug!(task_id = %id, "task deletion declined");
            return Ok(RemoveOutcome::Declined);
        }
        self.remove(id).await?;
        Ok(RemoveOutcome::Removed)
    }

    /// Sets the current task from the held collection. Returns the selected
    /// task, or `None` (leaving the selection unchanged) when the id is not
    /// held.
    pub fn select(&self, id: TaskId) -> Option<Task> {
        let mut state = self.write();
        let task = state.tasks.iter().find(|task| task.id() == id).cloned()?;
        state.current_task = Some(task.clone());
        Some(task)
    }

    /// Clears the current task.
    pub fn clear_selection(&self) {
        self.write().current_task = None;
    }

    /// Returns the current task, if any.
    #[must_use]
    pub fn current_task(&self) -> Option<Task> {
        self.read().current_task.clone()
    }

    /// Returns a copy of the held tasks in store order.
    #[must_use]
    pub fn tasks(&self) -> Vec<Task> {
        self.read().tasks.clone()
    }

    /// Returns the held task with `id`, if any.
    #[must_use]
    pub fn get(&self, id: TaskId) -> Option<Task> {
        self.read().tasks.iter().find(|task| task.id() == id).cloned()
    }

    /// Returns the server-side total for the last query, adjusted by local
    /// creates and deletes.
    #[must_use]
    pub fn total(&self) -> usize {
        self.read().total
    }

    /// Returns an owned snapshot of the collection state.
    #[must_use]
    pub fn snapshot(&self) -> StoreSnapshot {
        let state = self.read();
        StoreSnapshot {
            tasks: state.tasks.clone(),
            total: state.total,
            has_more: state.has_more,
            current_task: state.current_task.clone(),
        }
    }

    /// Returns the record of one operation, if it is still retained.
    #[must_use]
    pub fn operation(&self, id: OperationId) -> Option<OperationRecord> {
        self.read().operations.get(id).cloned()
    }

    /// Returns every retained operation record, oldest first.
    #[must_use]
    pub fn operations(&self) -> Vec<(OperationId, OperationRecord)> {
        self.read().operations.ordered()
    }

    /// Returns the most recently started operation targeting `task_id`.
    #[must_use]
    pub fn latest_for_task(&self, task_id: TaskId) -> Option<OperationRecord> {
        self.read().operations.latest_for_task(task_id).cloned()
    }

    /// Returns `true` while any operation is in flight.
    #[must_use]
    pub fn is_pending(&self) -> bool {
        self.read().operations.is_pending()
    }

    /// Returns the newest failure that no later call in the same scope has
    /// superseded. Fetches and creates each form one scope; updates and
    /// removals share one scope per task.
    #[must_use]
    pub fn last_error(&self) -> Option<String> {
        self.read().operations.last_error().map(str::to_owned)
    }

    pub(crate) fn held_status(&self, id: TaskId) -> Option<TaskStatus> {
        self.read()
            .tasks
            .iter()
            .find(|task| task.id() == id)
            .map(Task::status)
    }

    /// Records a call that failed before reaching the client.
    pub(crate) fn fail_locally(
        &self,
        kind: OperationKind,
        err: TaskStoreError,
    ) -> TaskStoreError {
        let mut state = self.write();
        let now = self.clock.utc();
        let operation_id = state.operations.begin(kind, now);
        state
            .operations
            .finish(operation_id, OperationStatus::Failed(err.to_string()), now);
        warn!(%operation_id, ?kind, error = %err, "task operation failed");
        err
    }

    async fn request_create(&self, new_task: &NewTask) -> TaskStoreResult<Task> {
        new_task.validate()?;
        Ok(self.client.create(new_task).await?)
    }

    async fn request_update(&self, id: TaskId, patch: &TaskPatch) -> TaskStoreResult<Task> {
        patch.validate()?;
        Ok(self.client.update(id, patch).await?)
    }

    /// Runs `request` under a fresh operation record and applies the
    /// response to the state on success.
    async fn track<R>(
        &self,
        kind: OperationKind,
        request: impl Future<Output = TaskStoreResult<R>>,
        apply: impl FnOnce(&mut StoreState, &R),
    ) -> TaskStoreResult<R> {
        let operation_id = self.write().operations.begin(kind, self.clock.utc());
        debug!(%operation_id, ?kind, "task operation started");

        let result = request.await;

        let mut state = self.write();
        let now = self.clock.utc();
        match &result {
            Ok(value) => {
                apply(&mut state, value);
                state
                    .operations
                    .finish(operation_id, OperationStatus::Succeeded, now);
                info!(%operation_id, ?kind, "task operation succeeded");
            }
            Err(err) => {
                state
                    .operations
                    .finish(operation_id, OperationStatus::Failed(err.to_string()), now);
                warn!(%operation_id, ?kind, error = %err, "task operation failed");
            }
        }
        result
    }

    fn read(&self) -> RwLockReadGuard<'_, StoreState> {
        self.state.read().unwrap_or_else(PoisonError::into_inner)
    }

    fn write(&self) -> RwLockWriteGuard<'_, StoreState> {
        self.state.write().unwrap_or_else(PoisonError::into_inner)
    }
}
