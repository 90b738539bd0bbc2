//! Store-level error taxonomy.

use crate::task::{
    domain::{TaskDomainError, TaskId},
    ports::TaskClientError,
};
use thiserror::Error;

/// Errors surfaced by task store operations.
///
/// The display string is what the failed operation record carries.
#[derive(Debug, Clone, Error)]
pub enum TaskStoreError {
    /// A required field is missing or invalid, locally or on the server.
    #[error("validation failed: {0}")]
    Validation(String),

    /// The operation targets a task that does not exist.
    #[error("task not found: {0}")]
    NotFound(TaskId),

    /// Transport or server failure.
    #[error(transparent)]
    Transport(TaskClientError),
}

impl From<TaskDomainError> for TaskStoreError {
    fn from(err: TaskDomainError) -> Self {
        Self::Validation(err.to_string())
    }
}

impl From<TaskClientError> for TaskStoreError {
    fn from(err: TaskClientError) -> Self {
        match err {
            TaskClientError::Validation(message) => Self::Validation(message),
            TaskClientError::NotFound(id) => Self::NotFound(id),
            TaskClientError::Transport(_) => Self::Transport(err),
        }
    }
}

/// Result type for task store operations.
pub type TaskStoreResult<T> = Result<T, TaskStoreError>;
