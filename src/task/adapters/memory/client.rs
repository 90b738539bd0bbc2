//! In-memory task client simulating the remote collection resource.

use async_trait::async_trait;
use chrono::Weekday;
use mockable::{Clock, DefaultClock};
use std::fmt;
use std::sync::{Arc, RwLock};

use crate::task::{
    domain::{NewTask, Task, TaskId, TaskPatch},
    ports::{ListQuery, TaskClient, TaskClientError, TaskClientResult, TaskPage},
    view::{FilterContext, TaskSorter, filter_tasks},
};

/// Thread-safe in-memory task server.
///
/// Assigns identifiers and timestamps, validates payloads and serves
/// filtered, sorted pages. Tasks are kept newest first.
pub struct InMemoryTaskClient<C = DefaultClock>
where
    C: Clock,
{
    state: Arc<RwLock<InMemoryTaskState>>,
    clock: Arc<C>,
    locale: String,
    week_start: Weekday,
}

impl<C> Clone for InMemoryTaskClient<C>
where
    C: Clock,
{
    fn clone(&self) -> Self {
        Self {
            state: Arc::clone(&self.state),
            clock: Arc::clone(&self.clock),
            locale: self.locale.clone(),
            week_start: self.week_start,
        }
    }
}

impl<C> fmt::Debug for InMemoryTaskClient<C>
where
    C: Clock,
{
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("InMemoryTaskClient")
            .field("state", &self.state)
            .field("locale", &self.locale)
            .field("week_start", &self.week_start)
            .finish_non_exhaustive()
    }
}

#[derive(Debug, Default)]
struct InMemoryTaskState {
    tasks: Vec<Task>,
    injected_failure: Option<String>,
}

/// Error injected by [`InMemoryTaskClient::fail_next_request`].
#[derive(Debug, thiserror::Error)]
#[error("{0}")]
pub struct InjectedFailure(String);

impl InMemoryTaskClient<DefaultClock> {
    /// Creates an empty server using the system clock, Hebrew collation and
    /// Sunday-first weeks.
    #[must_use]
    pub fn new() -> Self {
        Self::with_clock(Arc::new(DefaultClock))
    }
}

impl Default for InMemoryTaskClient<DefaultClock> {
    fn default() -> Self {
        Self::new()
    }
}

impl<C> InMemoryTaskClient<C>
where
    C: Clock,
{
    /// Creates an empty server with the given clock.
    #[must_use]
    pub fn with_clock(clock: Arc<C>) -> Self {
        Self {
            state: Arc::new(RwLock::new(InMemoryTaskState::default())),
            clock,
            locale: "he".to_owned(),
            week_start: Weekday::Sun,
        }
    }

    /// Sets the collation locale used for sorted listings.
    #[must_use]
    pub fn with_locale(mut self, locale: impl Into<String>) -> Self {
        self.locale = locale.into();
        self
    }

    /// Sets the first weekday used for the `week` quick filter.
    #[must_use]
    pub const fn with_week_start(mut self, week_start: Weekday) -> Self {
        self.week_start = week_start;
        self
    }

    /// Replaces the stored tasks. The first task is the newest.
    ///
    /// # Errors
    ///
    /// Returns [`TaskClientError::Transport`] when the state lock is
    /// poisoned.
    pub fn seed(&self, tasks: impl IntoIterator<Item = Task>) -> TaskClientResult<()> {
        let mut state = self.state.write().map_err(poisoned)?;
        state.tasks = tasks.into_iter().collect();
        Ok(())
    }

    /// Returns a copy of the stored tasks, newest first.
    ///
    /// # Errors
    ///
    /// Returns [`TaskClientError::Transport`] when the state lock is
    /// poisoned.
    pub fn stored_tasks(&self) -> TaskClientResult<Vec<Task>> {
        let state = self.state.read().map_err(poisoned)?;
        Ok(state.tasks.clone())
    }

    /// Makes the next request fail with a transport error carrying
    /// `message`.
    ///
    /// # Errors
    ///
    /// Returns [`TaskClientError::Transport`] when the state lock is
    /// poisoned.
    pub fn fail_next_request(&self, message: impl Into<String>) -> TaskClientResult<()> {
        let mut state = self.state.write().map_err(poisoned)?;
        state.injected_failure = Some(message.into());
        Ok(())
    }

    fn list_page(&self, query: &ListQuery) -> TaskClientResult<TaskPage> {
        let mut state = self.state.write().map_err(poisoned)?;
        take_injected_failure(&mut state)?;

        let context = FilterContext::from_clock(&*self.clock, self.week_start);
        let filtered = filter_tasks(&state.tasks, &query.filter, &context);
        let ordered = match query.sort.as_ref() {
            Some(spec) => TaskSorter::for_locale(&self.locale)
                .map_err(TaskClientError::transport)?
                .sort(filtered, spec),
            None => filtered,
        };

        let total = ordered.len();
        let limit = usize::try_from(query.page.limit).unwrap_or(usize::MAX);
        let offset = usize::try_from(query.page.page.saturating_sub(1))
            .unwrap_or(usize::MAX)
            .saturating_mul(limit);
        let tasks: Vec<Task> = ordered
            .into_iter()
            .skip(offset)
            .take(limit)
            .cloned()
            .collect();
        let has_more = offset.saturating_add(tasks.len()) < total;
        Ok(TaskPage {
            tasks,
            total,
            has_more,
        })
    }
}

fn poisoned<E: std::fmt::Display>(err: E) -> TaskClientError {
    TaskClientError::transport(std::io::Error::other(err.to_string()))
}

fn take_injected_failure(state: &mut InMemoryTaskState) -> TaskClientResult<()> {
    match state.injected_failure.take() {
        Some(message) => Err(TaskClientError::transport(InjectedFailure(message))),
        None => Ok(()),
    }
}

#[async_trait]
impl<C> TaskClient for InMemoryTaskClient<C>
where
    C: Clock + Send + Sync,
{
    async fn list(&self, query: &ListQuery) -> TaskClientResult<TaskPage> {
        self.list_page(query)
    }

    async fn create(&self, new_task: &NewTask) -> TaskClientResult<Task> {
        let mut state = self.state.write().map_err(poisoned)?;
        take_injected_failure(&mut state)?;

        let task = Task::create(TaskId::new(), new_task.clone(), &*self.clock)
            .map_err(|err| TaskClientError::Validation(err.to_string()))?;
        state.tasks.insert(0, task.clone());
        Ok(task)
    }

    async fn update(&self, id: TaskId, patch: &TaskPatch) -> TaskClientResult<Task> {
        let mut state = self.state.write().map_err(poisoned)?;
        take_injected_failure(&mut state)?;

        let stored = state
            .tasks
            .iter_mut()
            .find(|task| task.id() == id)
            .ok_or(TaskClientError::NotFound(id))?;
        let mut updated = stored.clone();
        updated
            .apply_patch(patch.clone(), &*self.clock)
            .map_err(|err| TaskClientError::Validation(err.to_string()))?;
        *stored = updated.clone();
        Ok(updated)
    }

    async fn delete(&self, id: TaskId) -> TaskClientResult<()> {
        let mut state = self.state.write().map_err(poisoned)?;
        take_injected_failure(&mut state)?;

        let position = state
            .tasks
            .iter()
            .position(|task| task.id() == id)
            .ok_or(TaskClientError::NotFound(id))?;
        state.tasks.remove(position);
        Ok(())
    }
}
