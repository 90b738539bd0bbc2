//! Port contracts for task state management.
//!
//! Ports define infrastructure-agnostic interfaces used by the task store.

pub mod client;
pub mod confirmation;

pub use client::{
    ListQuery, PageRequest, TaskClient, TaskClientError, TaskClientResult, TaskPage,
};
pub use confirmation::{DeleteConfirmation, FixedConfirmation};
