//! Task status values and the status transition machine.

use super::ParseEnumError;
use serde::{Deserialize, Serialize};
use std::fmt;

/// Task workflow status.
///
/// The declaration order is the board column order.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize)]
#[serde(rename_all = "kebab-case")]
pub enum TaskStatus {
    /// Work has not started.
    Pending,
    /// Work is under way.
    InProgress,
    /// Work is finished.
    Completed,
}

impl TaskStatus {
    /// Every status, in board column order.
    pub const ALL: [Self; 3] = [Self::Pending, Self::InProgress, Self::Completed];

    /// Returns the canonical wire representation.
    #[must_use]
    pub const fn as_str(self) -> &'static str {
        match self {
            Self::Pending => "pending",
            Self::InProgress => "in-progress",
            Self::Completed => "completed",
        }
    }

    /// Returns the status reached by the quick-complete checkbox.
    ///
    /// `Completed` goes back to `Pending`; anything else is completed
    /// directly without passing through `InProgress`.
    #[must_use]
    pub const fn toggled(self) -> Self {
        match self {
            Self::Completed => Self::Pending,
            Self::Pending | Self::InProgress => Self::Completed,
        }
    }

    /// Returns the next status in the workflow, or `None` at `Completed`.
    #[must_use]
    pub const fn next(self) -> Option<Self> {
        match self {
            Self::Pending => Some(Self::InProgress),
            Self::InProgress => Some(Self::Completed),
            Self::Completed => None,
        }
    }

    /// Returns the previous status in the workflow, or `None` at `Pending`.
    #[must_use]
    pub const fn previous(self) -> Option<Self> {
        match self {
            Self::Pending => None,
            Self::InProgress => Some(Self::Pending),
            Self::Completed => Some(Self::InProgress),
        }
    }
}

impl TryFrom<&str> for TaskStatus {
    type Error = ParseEnumError;

    fn try_from(value: &str) -> Result<Self, Self::Error> {
        let normalized = value.trim().to_ascii_lowercase();
        match normalized.as_str() {
            "pending" => Ok(Self::Pending),
            "in-progress" | "in_progress" => Ok(Self::InProgress),
            "completed" => Ok(Self::Completed),
            _ => Err(ParseEnumError::Status(value.to_owned())),
        }
    }
}

impl fmt::Display for TaskStatus {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

/// UI action that changes a task's status.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum StatusTransition {
    /// Checkbox toggle between `Completed` and `Pending`.
    Toggle,
    /// One step forward in the workflow.
    Forward,
    /// One step back in the workflow.
    Back,
}

impl StatusTransition {
    /// Returns the status reached from `from`, or `None` when the action is
    /// disabled for that status.
    #[must_use]
    pub const fn apply(self, from: TaskStatus) -> Option<TaskStatus> {
        match self {
            Self::Toggle => Some(from.toggled()),
            Self::Forward => from.next(),
            Self::Back => from.previous(),
        }
    }
}
