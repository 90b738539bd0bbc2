//! Transport port for the remote task collection resource.

use crate::task::{
    domain::{NewTask, Task, TaskId, TaskPatch},
    view::{FilterSpec, SortSpec},
};
use async_trait::async_trait;
use std::sync::Arc;
use thiserror::Error;

/// Result type for task client operations.
pub type TaskClientResult<T> = Result<T, TaskClientError>;

/// One-based page request.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub struct PageRequest {
    /// Page number, starting at 1.
    pub page: u32,
    /// Maximum number of tasks per page.
    pub limit: u32,
}

impl PageRequest {
    /// Creates a page request. Page numbers below 1 are raised to 1 and a
    /// zero limit to 1.
    #[must_use]
    pub fn new(page: u32, limit: u32) -> Self {
        Self {
            page: page.max(1),
            limit: limit.max(1),
        }
    }

    /// Returns the first page with the given limit.
    #[must_use]
    pub fn first(limit: u32) -> Self {
        Self::new(1, limit)
    }

    /// Returns the page after this one.
    #[must_use]
    pub const fn next(self) -> Self {
        Self {
            page: self.page.saturating_add(1),
            limit: self.limit,
        }
    }

    /// Returns `true` for page 1.
    #[must_use]
    pub const fn is_first(self) -> bool {
        self.page == 1
    }
}

/// List query sent to the collection resource.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ListQuery {
    /// Filter applied by the server.
    pub filter: FilterSpec,
    /// Ordering applied by the server; `None` means newest first.
    pub sort: Option<SortSpec>,
    /// Page to return.
    pub page: PageRequest,
}

impl ListQuery {
    /// Creates an unfiltered query for the first page.
    #[must_use]
    pub fn new(limit: u32) -> Self {
        Self {
            filter: FilterSpec::default(),
            sort: None,
            page: PageRequest::first(limit),
        }
    }

    /// Sets the filter.
    #[must_use]
    pub fn with_filter(mut self, filter: FilterSpec) -> Self {
        self.filter = filter;
        self
    }

    /// Sets the ordering.
    #[must_use]
    pub const fn with_sort(mut self, sort: SortSpec) -> Self {
        self.sort = Some(sort);
        self
    }

    /// Sets the page.
    #[must_use]
    pub const fn with_page(mut self, page: PageRequest) -> Self {
        self.page = page;
        self
    }
}

/// One page of tasks with pagination metadata.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct TaskPage {
    /// Tasks on this page.
    pub tasks: Vec<Task>,
    /// Number of tasks matching the query across all pages.
    pub total: usize,
    /// Whether a later page exists.
    pub has_more: bool,
}

impl TaskPage {
    /// Returns an empty final page.
    #[must_use]
    pub const fn empty() -> Self {
        Self {
            tasks: Vec::new(),
            total: 0,
            has_more: false,
        }
    }
}

/// Request/response client for the task collection resource.
#[async_trait]
pub trait TaskClient: Send + Sync {
    /// Lists tasks matching `query`.
    ///
    /// # Errors
    ///
    /// Returns [`TaskClientError::Transport`] when the request fails.
    async fn list(&self, query: &ListQuery) -> TaskClientResult<TaskPage>;

    /// Creates a task and returns the server representation.
    ///
    /// # Errors
    ///
    /// Returns [`TaskClientError::Validation`] when required fields are
    /// missing.
    async fn create(&self, new_task: &NewTask) -> TaskClientResult<Task>;

    /// Applies a partial update and returns the server representation.
    ///
    /// # Errors
    ///
    /// Returns [`TaskClientError::NotFound`] when the task does not exist.
    async fn update(&self, id: TaskId, patch: &TaskPatch) -> TaskClientResult<Task>;

    /// Deletes a task.
    ///
    /// # Errors
    ///
    /// Returns [`TaskClientError::NotFound`] when the task does not exist.
    async fn delete(&self, id: TaskId) -> TaskClientResult<()>;
}

/// Errors returned by task client implementations.
#[derive(Debug, Clone, Error)]
pub enum TaskClientError {
    /// The server rejected the payload.
    #[error("validation failed: {0}")]
    Validation(String),

    /// The task does not exist on the server.
    #[error("task not found: {0}")]
    NotFound(TaskId),

    /// Transport or server failure.
    #[error("request failed: {0}")]
    Transport(Arc<dyn std::error::Error + Send + Sync>),
}

impl TaskClientError {
    /// Wraps a transport error.
    pub fn transport(err: impl std::error::Error + Send + Sync + 'static) -> Self {
        Self::Transport(Arc::new(err))
    }
}
