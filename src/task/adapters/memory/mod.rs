//! In-memory adapters for tests and demos.

mod client;

pub use client::{InMemoryTaskClient, InjectedFailure};
