//! Step definitions for task board behaviour tests.

pub mod given;
pub mod then;
pub mod world;
