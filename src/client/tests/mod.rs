//! Unit tests for client records, the task board, and session storage.
