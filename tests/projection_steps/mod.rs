//! Step definitions for task list projection scenarios.

pub mod world;

mod given;
mod then;
mod when;
