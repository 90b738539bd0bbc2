//! Confirmation port for destructive operations.

use crate::task::domain::TaskId;
use async_trait::async_trait;

/// Asks the user to confirm a destructive operation.
#[async_trait]
pub trait DeleteConfirmation: Send + Sync {
    /// Returns `true` when the user confirms deleting `task_id`.
    async fn confirm(&self, task_id: TaskId) -> bool;
}

/// Confirmation that always answers with a fixed value.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct FixedConfirmation(pub bool);

#[async_trait]
impl DeleteConfirmation for FixedConfirmation {
    async fn confirm(&self, _task_id: TaskId) -> bool {
        self.0
    }
}
