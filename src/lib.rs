//! Taskdeck: task state and view-projection engine.
//!
//! This crate holds the client-side task collection of a task-management
//! application and derives the views the UI renders from it.
//!
//! # Architecture
//!
//! Taskdeck follows hexagonal architecture principles:
//!
//! - **Domain**: task entities, enumerations and mutation payloads
//! - **Ports**: the transport client and delete confirmation contracts
//! - **Adapters**: an in-memory server implementing the client port
//! - **Services**: the task store, operation tracking and status transitions
//! - **Views**: pure list, board and calendar projections
//!
//! # Modules
//!
//! - [`config`]: engine configuration loaded from TOML
//! - [`task`]: task state, mutations and projections

pub mod config;
pub mod task;
