//! Domain model for task state.
//!
//! Tasks, their closed enumerations and the payloads used to create and
//! patch them. Nothing here performs I/O.

mod error;
mod ids;
mod payload;
mod priority;
mod status;
mod task;

pub use error::{ParseEnumError, TaskDomainError};
pub use ids::{TaskId, TeamId, UserId};
pub use payload::{NewTask, TaskPatch};
pub use priority::{DateWindow, TaskPriority};
pub use status::{StatusTransition, TaskStatus};
pub use task::{Task, TaskData, UserRef};
