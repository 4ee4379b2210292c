//! In-memory adapters for task tracking.

mod task;

pub use task::InMemoryTaskRepository;
