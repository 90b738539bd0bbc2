//! Application services for task state management.

mod error;
mod operation;
mod store;
mod transition;

pub use error::{TaskStoreError, TaskStoreResult};
pub(crate) use operation::OperationLog;
pub use operation::{OperationId, OperationKind, OperationRecord, OperationStatus};
pub use store::{RemoveOutcome, StoreSnapshot, TaskStore};
pub use transition::TransitionOutcome;
