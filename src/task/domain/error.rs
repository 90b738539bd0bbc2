//! Error types for task domain validation and parsing.

use thiserror::Error;

/// Errors returned while validating task payloads.
#[derive(Debug, Clone, Error, PartialEq, Eq)]
pub enum TaskDomainError {
    /// The task title is empty after trimming.
    #[error("task title must not be empty")]
    EmptyTitle,
}

/// Error returned while parsing one of the closed task enumerations.
#[derive(Debug, Clone, Error, PartialEq, Eq)]
pub enum ParseEnumError {
    /// The value is not a known task status.
    #[error("unknown task status: '{0}'")]
    Status(String),

    /// The value is not a known task priority.
    #[error("unknown task priority: '{0}'")]
    Priority(String),

    /// The value is not a known quick-filter window.
    #[error("unknown date window: '{0}'")]
    DateWindow(String),
}
