//! Task state management and view projections.
//!
//! The store in [`services`] is the single source of truth for the task
//! collection. Mutations flow only through its create, update and remove
//! operations; the projections in [`view`] are recomputed from a snapshot
//! and never mutate it. The module follows hexagonal architecture:
//!
//! - Domain types in [`domain`]
//! - Port contracts in [`ports`]
//! - Adapter implementations in [`adapters`]
//! - Orchestration services in [`services`]
//! - Read-only projections in [`view`]

pub mod adapters;
pub mod domain;
pub mod ports;
pub mod services;
pub mod view;

#[cfg(test)]
mod tests;
