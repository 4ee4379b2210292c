//! Unit tests for the task domain and services.
