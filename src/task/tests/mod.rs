//! Unit tests for task state management.
