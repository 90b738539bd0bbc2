//! Status transitions triggered by UI actions.
//!
//! A transition is an ordinary [`TaskStore::update`] that only patches the
//! status; no transition history is kept.

use super::{OperationKind, TaskStore, TaskStoreError, TaskStoreResult};
use crate::task::{
    domain::{StatusTransition, Task, TaskId, TaskPatch},
    ports::TaskClient,
};
use mockable::Clock;
use tracing::debug;

/// Result of a status transition request.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum TransitionOutcome {
    /// The status changed; carries the server representation.
    Applied(Task),
    /// The action is disabled for the current status; nothing was sent.
    Unchanged,
}

impl<T, C> TaskStore<T, C>
where
    T: TaskClient,
    C: Clock + Send + Sync,
{
    /// Applies `transition` to the held task `id`.
    ///
    /// # Errors
    ///
    /// Returns [`TaskStoreError::NotFound`] when the task is not held (the
    /// failure is recorded like any other update failure), and the errors of
    /// [`TaskStore::update`] otherwise.
    pub async fn transition(
        &self,
        id: TaskId,
        transition: StatusTransition,
    ) -> TaskStoreResult<TransitionOutcome> {
        let Some(from) = self.held_status(id) else {
            let err = TaskStoreError::NotFound(id);
            return Err(self.fail_locally(OperationKind::Update(id), err));
        };
        let Some(to) = transition.apply(from) else {
            debug!(task_id = %id, ?transition, status = %from, "status transition disabled");
            return Ok(TransitionOutcome::Unchanged);
        };
        let task = self.update(id, TaskPatch::status(to)).await?;
        Ok(TransitionOutcome::Applied(task))
    }

    /// Toggles between completed and pending.
    ///
    /// # Errors
    ///
    /// See [`TaskStore::transition`].
    pub async fn toggle(&self, id: TaskId) -> TaskStoreResult<TransitionOutcome> {
        self.transition(id, StatusTransition::Toggle).await
    }

    /// Moves the task one status forward.
    ///
    /// # Errors
    ///
    /// See [`TaskStore::transition`].
    pub async fn move_forward(&self, id: TaskId) -> TaskStoreResult<TransitionOutcome> {
        self.transition(id, StatusTransition::Forward).await
    }

    /// Moves the task one status back.
    ///
    /// # Errors
    ///
    /// See [`TaskStore::transition`].
    pub async fn move_back(&self, id: TaskId) -> TaskStoreResult<TransitionOutcome> {
        self.transition(id, StatusTransition::Back).await
    }
}
