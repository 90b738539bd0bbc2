//! Conjunctive task filtering.

use super::ViewError;
use crate::task::domain::{DateWindow, Task, TaskPriority, TaskStatus};
use chrono::{Datelike, Days, NaiveDate, Weekday};
use mockable::Clock;

/// Status predicate: `All` or an exact status.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Hash)]
pub enum StatusFilter {
    /// Every status passes.
    #[default]
    All,
    /// Only the given status passes.
    Only(TaskStatus),
}

impl StatusFilter {
    /// Returns `true` when `status` passes this predicate.
    #[must_use]
    pub fn matches(self, status: TaskStatus) -> bool {
        match self {
            Self::All => true,
            Self::Only(expected) => expected == status,
        }
    }
}

impl TryFrom<&str> for StatusFilter {
    type Error = ViewError;

    /// Parses `all` or a status name. Empty input is rejected; there is no
    /// implicit default.
    fn try_from(value: &str) -> Result<Self, Self::Error> {
        if value.trim().eq_ignore_ascii_case("all") {
            return Ok(Self::All);
        }
        TaskStatus::try_from(value)
            .map(Self::Only)
            .map_err(|_| ViewError::InvalidFilter(value.to_owned()))
    }
}

/// Priority predicate: `All` or an exact priority.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Hash)]
pub enum PriorityFilter {
    /// Every priority passes.
    #[default]
    All,
    /// Only the given priority passes.
    Only(TaskPriority),
}

impl PriorityFilter {
    /// Returns `true` when `priority` passes this predicate.
    #[must_use]
    pub fn matches(self, priority: TaskPriority) -> bool {
        match self {
            Self::All => true,
            Self::Only(expected) => expected == priority,
        }
    }
}

impl TryFrom<&str> for PriorityFilter {
    type Error = ViewError;

    fn try_from(value: &str) -> Result<Self, Self::Error> {
        if value.trim().eq_ignore_ascii_case("all") {
            return Ok(Self::All);
        }
        TaskPriority::try_from(value)
            .map(Self::Only)
            .map_err(|_| ViewError::InvalidFilter(value.to_owned()))
    }
}

/// Date reference used to evaluate quick-filter windows.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct FilterContext {
    today: NaiveDate,
    week_start: Weekday,
}

impl FilterContext {
    /// Creates a context for an explicit date.
    #[must_use]
    pub const fn new(today: NaiveDate, week_start: Weekday) -> Self {
        Self { today, week_start }
    }

    /// Creates a context for the clock's current local date.
    #[must_use]
    pub fn from_clock(clock: &impl Clock, week_start: Weekday) -> Self {
        Self::new(clock.local().date_naive(), week_start)
    }

    /// Returns the reference date.
    #[must_use]
    pub const fn today(&self) -> NaiveDate {
        self.today
    }

    /// Returns `true` when `due` falls inside `window`.
    #[must_use]
    pub fn in_window(&self, window: DateWindow, due: NaiveDate) -> bool {
        match window {
            DateWindow::All => true,
            DateWindow::Today => due == self.today,
            DateWindow::Week => self.current_week().is_some_and(|(start, end)| {
                (start..=end).contains(&due)
            }),
            DateWindow::Month => {
                due.year() == self.today.year() && due.month() == self.today.month()
            }
        }
    }

    fn current_week(&self) -> Option<(NaiveDate, NaiveDate)> {
        let offset = u64::from(self.today.weekday().days_since(self.week_start));
        let start = self.today.checked_sub_days(Days::new(offset))?;
        let end = start.checked_add_days(Days::new(6))?;
        Some((start, end))
    }
}

/// Filter specification. Active predicates compose conjunctively.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct FilterSpec {
    status: StatusFilter,
    priority: PriorityFilter,
    search: Option<String>,
    window: DateWindow,
}

impl FilterSpec {
    /// Creates a filter that accepts every task.
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    /// Sets the status predicate.
    #[must_use]
    pub const fn with_status(mut self, status: StatusFilter) -> Self {
        self.status = status;
        self
    }

    /// Sets the priority predicate.
    #[must_use]
    pub const fn with_priority(mut self, priority: PriorityFilter) -> Self {
        self.priority = priority;
        self
    }

    /// Sets the free-text search term. An all-whitespace term disables
    /// search; any other term is matched as given, surrounding spaces
    /// included.
    #[must_use]
    pub fn with_search(mut self, term: impl Into<String>) -> Self {
        let raw = term.into();
        self.search = (!raw.trim().is_empty()).then(|| raw.to_lowercase());
        self
    }

    /// Sets the quick-filter window.
    #[must_use]
    pub const fn with_window(mut self, window: DateWindow) -> Self {
        self.window = window;
        self
    }

    /// Returns the status predicate.
    #[must_use]
    pub const fn status(&self) -> StatusFilter {
        self.status
    }

    /// Returns the priority predicate.
    #[must_use]
    pub const fn priority(&self) -> PriorityFilter {
        self.priority
    }

    /// Returns the lower-cased search term, if any.
    #[must_use]
    pub fn search(&self) -> Option<&str> {
        self.search.as_deref()
    }

    /// Returns the quick-filter window.
    #[must_use]
    pub const fn window(&self) -> DateWindow {
        self.window
    }

    /// Returns `true` when `task` satisfies every active predicate.
    #[must_use]
    pub fn matches(&self, task: &Task, context: &FilterContext) -> bool {
        self.status.matches(task.status())
            && self.priority.matches(task.priority())
            && self.matches_search(task)
            && self.matches_window(task, context)
    }

    fn matches_search(&self, task: &Task) -> bool {
        let Some(term) = self.search.as_deref() else {
            return true;
        };
        task.title().to_lowercase().contains(term)
            || task
                .description()
                .is_some_and(|description| description.to_lowercase().contains(term))
    }

    fn matches_window(&self, task: &Task, context: &FilterContext) -> bool {
        if self.window == DateWindow::All {
            return true;
        }
        task.due_date()
            .is_some_and(|due| context.in_window(self.window, due))
    }
}

/// Returns the tasks that satisfy `spec`, in input order.
#[must_use]
pub fn filter_tasks<'a>(
    tasks: impl IntoIterator<Item = &'a Task>,
    spec: &FilterSpec,
    context: &FilterContext,
) -> Vec<&'a Task> {
    tasks
        .into_iter()
        .filter(|task| spec.matches(task, context))
        .collect()
}
