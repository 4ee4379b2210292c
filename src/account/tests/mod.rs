//! Unit tests for the account domain, tokens, and services.

mod domain_tests;
